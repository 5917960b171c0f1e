use super::backend::{DrawSubmission, RenderBackend, Transforms};
use super::error::{BatchError, RenderError};
use super::texture::TextureId;
use super::vertex::{BatchKind, Topology, Vertex};

/// Per-frame draw accounting, reset by `begin_frame`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameStats {
    pub draw_calls: u32,
    pub vertices: usize,
    pub indices: usize,
}

/// Fixed-capacity staging area for one topology, flushed as a single draw call.
///
/// Staging is struct-of-arrays (positions, texcoords, colors, indices), matching the
/// separate vertex buffers the backend uploads into. Storage is allocated once and
/// never grows: a push that does not fit is rejected with [`BatchError::Full`].
pub struct GeometryBatch<B: RenderBackend> {
    kind: BatchKind,
    topology: Topology,

    vertex_capacity: usize,
    index_capacity: usize,

    positions: Vec<[f32; 3]>,
    texcoords: Vec<[f32; 2]>,
    colors: Vec<[f32; 4]>,
    indices: Vec<u32>,

    texture: Option<TextureId>,
    buffers: B::Buffers,
}

impl<B: RenderBackend> GeometryBatch<B> {
    /// Allocates staging and GPU storage for `vertex_capacity` vertices.
    ///
    /// Triangle batches get room for `vertex_capacity * 3 / 2` indices (six per
    /// four-vertex quad); points and lines get none.
    pub fn new(backend: &mut B, kind: BatchKind, vertex_capacity: usize) -> Self {
        let topology = kind.topology();
        let index_capacity = if topology.is_indexed() {
            vertex_capacity * 3 / 2
        } else {
            0
        };

        let buffers = backend.create_buffers(kind.label(), topology, vertex_capacity, index_capacity);

        Self {
            kind,
            topology,
            vertex_capacity,
            index_capacity,
            positions: Vec::with_capacity(vertex_capacity),
            texcoords: Vec::with_capacity(vertex_capacity),
            colors: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(index_capacity),
            texture: None,
            buffers,
        }
    }

    #[inline]
    pub fn kind(&self) -> BatchKind {
        self.kind
    }

    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.vertex_capacity
    }

    #[inline]
    pub fn index_capacity(&self) -> usize {
        self.index_capacity
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns `true` if a shape of this size can be staged without flushing.
    #[inline]
    pub fn fits(&self, vertices: usize, indices: usize) -> bool {
        self.vertex_count() + vertices <= self.vertex_capacity
            && self.index_count() + indices <= self.index_capacity
    }

    #[inline]
    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    /// Binds `texture` for the next flush. The last writer wins.
    #[inline]
    pub fn bind_texture(&mut self, texture: Option<TextureId>) {
        self.texture = texture;
    }

    /// Staged positions, for inspection.
    #[inline]
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Staged indices, for inspection.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Appends one vertex and returns its batch-relative offset.
    pub fn push_vertex(&mut self, vertex: Vertex) -> Result<u32, BatchError> {
        if self.vertex_count() >= self.vertex_capacity {
            return Err(BatchError::Full);
        }
        let offset = self.vertex_count() as u32;
        self.positions.push(vertex.position);
        self.texcoords.push(vertex.texcoord);
        self.colors.push(vertex.color);
        Ok(offset)
    }

    /// Appends indices referencing vertices already pushed into this batch.
    ///
    /// Indices are validated up front; on error nothing is appended.
    pub fn push_indices(&mut self, indices: &[u32]) -> Result<(), BatchError> {
        if !self.topology.is_indexed() {
            return Err(BatchError::NotIndexed(self.topology));
        }
        let arity = self.topology.arity();
        if indices.len() % arity != 0 {
            return Err(BatchError::MisalignedIndices { count: indices.len(), arity });
        }
        if self.index_count() + indices.len() > self.index_capacity {
            return Err(BatchError::Full);
        }
        let vertex_count = self.vertex_count();
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(BatchError::IndexOutOfRange { index, vertex_count });
        }
        self.indices.extend_from_slice(indices);
        Ok(())
    }

    /// Drops staged geometry without drawing it.
    pub fn discard(&mut self) {
        self.positions.clear();
        self.texcoords.clear();
        self.colors.clear();
        self.indices.clear();
    }

    /// Uploads staged data and issues one draw call, then resets the stage.
    ///
    /// Empty batches are a no-op: nothing reaches the backend and the draw-call
    /// counter is untouched. Returns whether a draw call was issued.
    pub fn flush(
        &mut self,
        backend: &mut B,
        program: &B::Program,
        transforms: &Transforms,
        stats: &mut FrameStats,
    ) -> Result<bool, RenderError> {
        if self.is_empty() {
            return Ok(false);
        }

        let draw = DrawSubmission {
            topology: self.topology,
            positions: &self.positions,
            texcoords: &self.texcoords,
            colors: &self.colors,
            indices: &self.indices,
            texture: self.texture,
            transforms,
        };

        log::trace!(
            "flush {:?}: {} vertices, {} indices, texture {:?}",
            self.kind,
            draw.vertex_count(),
            draw.index_count(),
            draw.texture
        );

        let (vertices, indices) = (draw.vertex_count(), draw.index_count());
        let result = backend.submit(program, &mut self.buffers, &draw);

        // The stage resets even when the backend rejects the draw.
        self.discard();
        result?;

        stats.draw_calls += 1;
        stats.vertices += vertices;
        stats.indices += indices;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::headless::HeadlessBackend;
    use crate::render::texture::ImageData;

    fn v(x: f32) -> Vertex {
        Vertex::new([x, 0.0, 0.0], [0.0, 0.0], [1.0; 4])
    }

    fn batch(kind: BatchKind, cap: usize) -> (HeadlessBackend, GeometryBatch<HeadlessBackend>) {
        let mut backend = HeadlessBackend::new();
        backend.set_target(Some(()));
        let b = GeometryBatch::new(&mut backend, kind, cap);
        (backend, b)
    }

    // ── push ──────────────────────────────────────────────────────────────

    #[test]
    fn push_vertex_returns_sequential_offsets() {
        let (_, mut b) = batch(BatchKind::Points, 4);
        assert_eq!(b.push_vertex(v(0.0)), Ok(0));
        assert_eq!(b.push_vertex(v(1.0)), Ok(1));
        assert_eq!(b.vertex_count(), 2);
    }

    #[test]
    fn push_vertex_rejects_when_full() {
        let (_, mut b) = batch(BatchKind::Points, 2);
        b.push_vertex(v(0.0)).unwrap();
        b.push_vertex(v(1.0)).unwrap();
        assert_eq!(b.push_vertex(v(2.0)), Err(BatchError::Full));
        assert_eq!(b.vertex_count(), 2);
    }

    #[test]
    fn triangle_index_capacity_is_one_and_a_half_vertices() {
        let (_, b) = batch(BatchKind::Triangles, 8);
        assert_eq!(b.index_capacity(), 12);
        let (_, p) = batch(BatchKind::Lines, 8);
        assert_eq!(p.index_capacity(), 0);
    }

    #[test]
    fn push_indices_rejected_on_lines() {
        let (_, mut b) = batch(BatchKind::Lines, 4);
        b.push_vertex(v(0.0)).unwrap();
        assert_eq!(b.push_indices(&[0, 0]), Err(BatchError::NotIndexed(Topology::Lines)));
    }

    #[test]
    fn push_indices_requires_whole_triangles() {
        let (_, mut b) = batch(BatchKind::Triangles, 4);
        for i in 0..3 {
            b.push_vertex(v(i as f32)).unwrap();
        }
        assert_eq!(
            b.push_indices(&[0, 1]),
            Err(BatchError::MisalignedIndices { count: 2, arity: 3 })
        );
        assert_eq!(b.index_count(), 0);
    }

    #[test]
    fn push_indices_rejects_unstaged_vertices() {
        let (_, mut b) = batch(BatchKind::Triangles, 4);
        b.push_vertex(v(0.0)).unwrap();
        b.push_vertex(v(1.0)).unwrap();
        assert_eq!(
            b.push_indices(&[0, 1, 2]),
            Err(BatchError::IndexOutOfRange { index: 2, vertex_count: 2 })
        );
    }

    #[test]
    fn push_indices_rejects_when_index_stage_full() {
        // Four vertices leave room for six indices.
        let (_, mut b) = batch(BatchKind::Triangles, 4);
        for i in 0..4 {
            b.push_vertex(v(i as f32)).unwrap();
        }
        b.push_indices(&[0, 1, 2, 0, 2, 3]).unwrap();

        assert_eq!(b.push_indices(&[0, 1, 2]), Err(BatchError::Full));
        assert_eq!(b.index_count(), 6);
    }

    #[test]
    fn fits_accounts_for_indices() {
        let (_, mut b) = batch(BatchKind::Triangles, 8);
        assert!(b.fits(4, 6));
        for i in 0..4 {
            b.push_vertex(v(i as f32)).unwrap();
        }
        b.push_indices(&[0, 1, 2, 0, 2, 3]).unwrap();
        assert!(b.fits(4, 6));
        assert!(!b.fits(5, 6));
        assert!(!b.fits(4, 7));
    }

    // ── flush ─────────────────────────────────────────────────────────────

    #[test]
    fn flush_empty_is_noop() {
        let (mut backend, mut b) = batch(BatchKind::Lines, 4);
        let program = backend.create_program().unwrap();
        let mut stats = FrameStats::default();

        let drew = b.flush(&mut backend, &program, &Transforms::default(), &mut stats).unwrap();

        assert!(!drew);
        assert_eq!(stats, FrameStats::default());
        assert!(backend.submissions().is_empty());
    }

    #[test]
    fn flush_draws_once_and_resets() {
        let (mut backend, mut b) = batch(BatchKind::Points, 8);
        let program = backend.create_program().unwrap();
        let mut stats = FrameStats::default();
        for i in 0..5 {
            b.push_vertex(v(i as f32)).unwrap();
        }

        assert!(b.flush(&mut backend, &program, &Transforms::default(), &mut stats).unwrap());

        assert_eq!(stats.draw_calls, 1);
        assert_eq!(stats.vertices, 5);
        assert_eq!(b.vertex_count(), 0);
        assert_eq!(backend.submissions().len(), 1);
        assert_eq!(backend.submissions()[0].positions.len(), 5);
        assert_eq!(backend.submissions()[0].topology, Topology::Points);
    }

    #[test]
    fn flush_forwards_bound_texture() {
        let (mut backend, mut b) = batch(BatchKind::TexturedTriangles, 4);
        let program = backend.create_program().unwrap();
        let mut stats = FrameStats::default();
        let tex = backend.create_texture(&ImageData::solid(1, 1, [255; 4]).unwrap()).unwrap();
        b.bind_texture(Some(tex.id()));
        for i in 0..3 {
            b.push_vertex(v(i as f32)).unwrap();
        }
        b.push_indices(&[0, 1, 2]).unwrap();

        b.flush(&mut backend, &program, &Transforms::default(), &mut stats).unwrap();

        let sub = &backend.submissions()[0];
        assert_eq!(sub.texture, Some(tex.id()));
        assert_eq!(sub.indices, vec![0, 1, 2]);
        // The binding survives the flush; only staged geometry resets.
        assert_eq!(b.texture(), Some(tex.id()));
        assert_eq!(b.index_count(), 0);
    }
}
