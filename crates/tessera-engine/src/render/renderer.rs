use std::path::Path;

use glam::Mat4;

use crate::coords::{Rect, Viewport};
use crate::paint::Color;

use super::backend::{RenderBackend, Transforms};
use super::batch::{FrameStats, GeometryBatch};
use super::error::RenderError;
use super::texture::{ImageData, Texture};
use super::vertex::{BatchKind, Vertex, QUAD_INDICES, UNIT_QUAD_UVS};

/// Renderer construction parameters.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Vertex capacity of each batch. Triangle batches get 1.5x as many indices.
    pub batch_capacity: usize,
    /// Initial z written into every vertex.
    pub depth: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            batch_capacity: 4096,
            depth: 0.0,
        }
    }
}

/// Frame controller state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameState {
    /// Between frames. Draw calls are rejected.
    Idle,
    /// Between `begin_frame` and `end_frame`.
    InFrame,
}

/// Immediate-mode 2D batch renderer.
///
/// Owns the shader program, one [`GeometryBatch`] per [`BatchKind`], and the
/// per-frame transform state. Draw calls stage geometry; a batch is flushed early
/// only when the next shape would not fit, and `end_frame` drains all batches in
/// [`BatchKind::ALL`] order.
///
/// Typical frame:
///
/// ```ignore
/// renderer.begin_frame(viewport, target);
/// renderer.clear(Color::BLACK)?;
/// renderer.draw_rect(Rect::new(10.0, 10.0, 50.0, 20.0), Color::RED)?;
/// let stats = renderer.end_frame()?;
/// ```
pub struct Renderer<B: RenderBackend> {
    backend: B,
    program: B::Program,
    batches: [GeometryBatch<B>; BatchKind::COUNT],

    transforms: Transforms,
    viewport: Viewport,
    depth: f32,

    state: FrameState,
    stats: FrameStats,
}

impl<B: RenderBackend> Renderer<B> {
    /// Compiles the shader program and allocates every batch.
    ///
    /// A shader failure is returned rather than logged and ignored: drawing with an
    /// invalid program would silently produce nothing.
    pub fn new(mut backend: B, config: RendererConfig) -> Result<Self, RenderError> {
        let program = backend.create_program().map_err(|e| {
            log::error!("{e}");
            RenderError::Shader(e)
        })?;

        let capacity = config.batch_capacity;
        let batches = BatchKind::ALL.map(|kind| GeometryBatch::new(&mut backend, kind, capacity));

        log::debug!("renderer ready: {} batches x {capacity} vertices", BatchKind::COUNT);

        Ok(Self {
            backend,
            program,
            batches,
            transforms: Transforms::default(),
            viewport: Viewport::default(),
            depth: config.depth,
            state: FrameState::Idle,
            stats: FrameStats::default(),
        })
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    #[inline]
    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Stats of the current (or last finished) frame.
    #[inline]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    #[inline]
    pub fn transforms(&self) -> &Transforms {
        &self.transforms
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn batch(&self, kind: BatchKind) -> &GeometryBatch<B> {
        &self.batches[kind.index()]
    }

    #[inline]
    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// Sets the z written into subsequently emitted vertices.
    #[inline]
    pub fn set_depth(&mut self, depth: f32) {
        self.depth = depth;
    }

    // ── frame control ─────────────────────────────────────────────────────

    /// Starts a frame against `target`.
    ///
    /// Rebuilds the orthographic projection for `viewport`, resets the model-view to
    /// identity and zeroes the frame stats. If the previous frame was never ended its
    /// staged geometry is discarded.
    pub fn begin_frame(&mut self, viewport: Viewport, target: B::Target) {
        if self.state == FrameState::InFrame {
            log::warn!("begin_frame called twice without end_frame; discarding staged geometry");
            for batch in &mut self.batches {
                batch.discard();
            }
        }

        self.viewport = viewport;
        self.transforms = Transforms::orthographic(viewport);
        self.stats = FrameStats::default();
        self.backend.set_target(Some(target));
        self.state = FrameState::InFrame;
    }

    /// Flushes every batch in fixed order and returns the frame's stats.
    pub fn end_frame(&mut self) -> Result<FrameStats, RenderError> {
        self.ensure_in_frame()?;

        let result = self.flush_all();

        self.backend.set_target(None);
        self.state = FrameState::Idle;
        result?;

        log::trace!(
            "frame done: {} draw calls, {} vertices, {} indices",
            self.stats.draw_calls,
            self.stats.vertices,
            self.stats.indices
        );
        Ok(self.stats)
    }

    /// Flushes every non-empty batch in [`BatchKind::ALL`] order.
    ///
    /// A failing batch does not stop the rest: every batch is drained and the first
    /// error is returned, so no geometry outlives the call.
    pub fn flush_all(&mut self) -> Result<(), RenderError> {
        let mut first_error = None;
        for batch in &mut self.batches {
            if let Err(err) =
                batch.flush(&mut self.backend, &self.program, &self.transforms, &mut self.stats)
            {
                log::warn!("flush of {:?} batch failed: {err}", batch.kind());
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Clears the frame's target.
    pub fn clear(&mut self, color: Color) -> Result<(), RenderError> {
        self.ensure_in_frame()?;
        self.backend.clear(color)
    }

    /// Replaces the model-view transform.
    ///
    /// Pending geometry is flushed first so it keeps the transform it was staged under.
    pub fn set_model_view(&mut self, model_view: Mat4) -> Result<(), RenderError> {
        self.ensure_in_frame()?;
        if self.transforms.model_view != model_view {
            self.flush_all()?;
            self.transforms.model_view = model_view;
        }
        Ok(())
    }

    // ── textures ──────────────────────────────────────────────────────────

    /// Uploads decoded pixels.
    pub fn create_texture(&mut self, image: &ImageData) -> Result<Texture, RenderError> {
        Ok(self.backend.create_texture(image)?)
    }

    /// Decodes an image file and uploads it.
    pub fn load_texture(&mut self, path: impl AsRef<Path>) -> Result<Texture, RenderError> {
        let image = ImageData::load(path)?;
        self.create_texture(&image)
    }

    /// Releases a texture. Staged geometry still bound to it is flushed first.
    pub fn release_texture(&mut self, texture: Texture) -> Result<(), RenderError> {
        let batch = &mut self.batches[BatchKind::TexturedTriangles.index()];
        if batch.texture() == Some(texture.id()) {
            if self.state == FrameState::InFrame {
                batch.flush(&mut self.backend, &self.program, &self.transforms, &mut self.stats)?;
            } else {
                batch.discard();
            }
            batch.bind_texture(None);
        }
        self.backend.release_texture(texture);
        Ok(())
    }

    // ── draw primitives ───────────────────────────────────────────────────

    /// One vertex into the points batch.
    pub fn draw_point(&mut self, x: f32, y: f32, color: Color) -> Result<(), RenderError> {
        self.reserve(BatchKind::Points, 1, 0)?;
        let vertex = Vertex::new([x, y, self.depth], [0.0, 0.0], color.to_normalized());
        self.batch_mut(BatchKind::Points).push_vertex(vertex)?;
        Ok(())
    }

    /// Two vertices into the lines batch.
    pub fn draw_line(
        &mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Color,
    ) -> Result<(), RenderError> {
        self.reserve(BatchKind::Lines, 2, 0)?;
        let z = self.depth;
        let c = color.to_normalized();
        let batch = self.batch_mut(BatchKind::Lines);
        batch.push_vertex(Vertex::new([x1, y1, z], [0.0, 0.0], c))?;
        batch.push_vertex(Vertex::new([x2, y2, z], [0.0, 0.0], c))?;
        Ok(())
    }

    /// Filled rectangle: four vertices and six indices into the triangles batch.
    ///
    /// Texcoords are the unit square corners.
    pub fn draw_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError> {
        self.emit_quad(BatchKind::Triangles, rect, UNIT_QUAD_UVS, color)
    }

    /// Rectangle outline: the four edges as independent segments in the lines batch.
    pub fn draw_rect_outline(&mut self, rect: Rect, color: Color) -> Result<(), RenderError> {
        self.reserve(BatchKind::Lines, 8, 0)?;
        let z = self.depth;
        let c = color.to_normalized();
        let batch = self.batch_mut(BatchKind::Lines);
        for (a, b) in rect.edges() {
            batch.push_vertex(Vertex::new([a.x, a.y, z], [0.0, 0.0], c))?;
            batch.push_vertex(Vertex::new([b.x, b.y, z], [0.0, 0.0], c))?;
        }
        Ok(())
    }

    /// Textured quad: `src` in texels of `texture`, placed at `dst`, tinted by `color`.
    ///
    /// The textured batch holds one texture at a time. Switching textures while it
    /// still holds geometry rebinds it for that geometry too; flush between textures
    /// (or draw each texture's quads together) to keep them apart.
    pub fn draw_texture(
        &mut self,
        texture: &Texture,
        src: Rect,
        dst: Rect,
        color: Color,
    ) -> Result<(), RenderError> {
        self.reserve(BatchKind::TexturedTriangles, 4, QUAD_INDICES.len())?;

        let batch = self.batch_mut(BatchKind::TexturedTriangles);
        let id = texture.id();
        if !batch.is_empty() && batch.texture().is_some_and(|bound| bound != id) {
            log::debug!("textured batch rebound from {:?} to {id:?} with geometry pending", batch.texture());
        }
        batch.bind_texture(Some(id));

        self.emit_quad(BatchKind::TexturedTriangles, dst, texture.uv_quad(src), color)
    }

    // ── internals ─────────────────────────────────────────────────────────

    #[inline]
    fn batch_mut(&mut self, kind: BatchKind) -> &mut GeometryBatch<B> {
        &mut self.batches[kind.index()]
    }

    fn ensure_in_frame(&self) -> Result<(), RenderError> {
        match self.state {
            FrameState::InFrame => Ok(()),
            FrameState::Idle => Err(RenderError::NotInFrame),
        }
    }

    /// Makes room for one whole shape, flushing the batch first if needed.
    ///
    /// A shape is never split across two draw calls, so index offsets computed
    /// against the current vertex count stay valid.
    fn reserve(&mut self, kind: BatchKind, vertices: usize, indices: usize) -> Result<(), RenderError> {
        self.ensure_in_frame()?;

        let batch = &mut self.batches[kind.index()];
        if vertices > batch.capacity() || indices > batch.index_capacity() {
            return Err(RenderError::ShapeTooLarge {
                kind,
                vertices,
                indices,
                vertex_capacity: batch.capacity(),
                index_capacity: batch.index_capacity(),
            });
        }

        if !batch.fits(vertices, indices) {
            log::trace!("{kind:?} batch full at {} vertices; flushing", batch.vertex_count());
            batch.flush(&mut self.backend, &self.program, &self.transforms, &mut self.stats)?;
        }
        Ok(())
    }

    fn emit_quad(
        &mut self,
        kind: BatchKind,
        rect: Rect,
        uvs: [[f32; 2]; 4],
        color: Color,
    ) -> Result<(), RenderError> {
        self.reserve(kind, 4, QUAD_INDICES.len())?;

        let z = self.depth;
        let c = color.to_normalized();
        let batch = self.batch_mut(kind);

        let base = batch.vertex_count() as u32;
        for (p, uv) in rect.corners().into_iter().zip(uvs) {
            batch.push_vertex(Vertex::new([p.x, p.y, z], uv, c))?;
        }
        batch.push_indices(&QUAD_INDICES.map(|i| base + i))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::error::ShaderError;
    use crate::render::headless::HeadlessBackend;
    use crate::render::vertex::Topology;

    fn renderer(capacity: usize) -> Renderer<HeadlessBackend> {
        let config = RendererConfig { batch_capacity: capacity, ..RendererConfig::default() };
        Renderer::new(HeadlessBackend::new(), config).unwrap()
    }

    fn vp() -> Viewport {
        Viewport::new(640.0, 480.0)
    }

    // ── frame state ───────────────────────────────────────────────────────

    #[test]
    fn draw_outside_frame_is_rejected() {
        let mut r = renderer(16);
        assert!(matches!(r.draw_point(1.0, 1.0, Color::RED), Err(RenderError::NotInFrame)));
        assert!(matches!(r.end_frame(), Err(RenderError::NotInFrame)));
        assert!(matches!(r.clear(Color::BLACK), Err(RenderError::NotInFrame)));
    }

    #[test]
    fn empty_frame_issues_no_draw_calls() {
        let mut r = renderer(16);
        r.begin_frame(vp(), ());
        let stats = r.end_frame().unwrap();
        assert_eq!(stats.draw_calls, 0);
        assert!(r.backend().submissions().is_empty());
        assert_eq!(r.state(), FrameState::Idle);
        assert!(!r.backend().target_bound());
    }

    #[test]
    fn begin_frame_resets_transforms_and_stats() {
        let mut r = renderer(16);
        r.begin_frame(vp(), ());
        r.set_model_view(Mat4::from_translation(glam::Vec3::new(5.0, 0.0, 0.0))).unwrap();
        r.draw_point(0.0, 0.0, Color::WHITE).unwrap();
        r.end_frame().unwrap();
        assert_eq!(r.stats().draw_calls, 1);

        r.begin_frame(Viewport::new(100.0, 50.0), ());
        assert_eq!(r.stats(), FrameStats::default());
        assert_eq!(r.transforms().model_view, Mat4::IDENTITY);
        assert_eq!(*r.transforms(), Transforms::orthographic(Viewport::new(100.0, 50.0)));
    }

    #[test]
    fn second_begin_frame_discards_staged_geometry() {
        let mut r = renderer(16);
        r.begin_frame(vp(), ());
        r.draw_point(1.0, 1.0, Color::RED).unwrap();
        r.begin_frame(vp(), ());
        assert!(r.batch(BatchKind::Points).is_empty());
        assert_eq!(r.end_frame().unwrap().draw_calls, 0);
    }

    #[test]
    fn failed_end_frame_drains_every_batch() {
        let mut r = renderer(16);
        r.begin_frame(vp(), ());
        r.draw_line(0.0, 0.0, 4.0, 4.0, Color::WHITE).unwrap();
        r.draw_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::RED).unwrap();
        r.backend_mut().fail_next_submit(Topology::Lines);

        assert!(matches!(r.end_frame(), Err(RenderError::NoTarget)));
        assert_eq!(r.state(), FrameState::Idle);
        assert!(BatchKind::ALL.iter().all(|&k| r.batch(k).is_empty()));
        // Batches after the failing one still draw.
        assert_eq!(r.backend().submissions().len(), 1);
        assert_eq!(r.backend().submissions()[0].topology, Topology::Triangles);

        r.begin_frame(vp(), ());
        assert_eq!(r.end_frame().unwrap().draw_calls, 0);
        assert_eq!(r.backend().submissions().len(), 1);
    }

    #[test]
    fn failed_mid_frame_flush_keeps_frame_open() {
        let mut r = renderer(16);
        r.begin_frame(vp(), ());
        r.draw_point(1.0, 1.0, Color::WHITE).unwrap();
        r.draw_line(0.0, 0.0, 4.0, 4.0, Color::WHITE).unwrap();
        r.backend_mut().fail_next_submit(Topology::Points);

        assert!(r.flush_all().is_err());
        assert_eq!(r.state(), FrameState::InFrame);
        assert!(r.batch(BatchKind::Points).is_empty());
        assert!(r.batch(BatchKind::Lines).is_empty());

        r.draw_point(2.0, 2.0, Color::WHITE).unwrap();
        assert_eq!(r.end_frame().unwrap().draw_calls, 2);
    }

    #[test]
    fn link_failure_is_surfaced() {
        let backend = HeadlessBackend::new()
            .with_program_error(ShaderError::Link { log: "pipeline layout mismatch".into() });
        let err = Renderer::new(backend, RendererConfig::default()).err().unwrap();
        assert!(matches!(err, RenderError::Shader(ShaderError::Link { .. })));
    }

    #[test]
    fn shader_failure_is_surfaced() {
        let backend = HeadlessBackend::new()
            .with_program_error(ShaderError::Compile { log: "0:1 syntax error".into() });
        let err = Renderer::new(backend, RendererConfig::default()).err().unwrap();
        match err {
            RenderError::Shader(e) => assert_eq!(e.log(), "0:1 syntax error"),
            other => panic!("unexpected error: {other}"),
        }
    }

    // ── primitives ────────────────────────────────────────────────────────

    #[test]
    fn point_uses_current_depth_and_zero_texcoord() {
        let mut r = renderer(16);
        r.set_depth(0.25);
        r.begin_frame(vp(), ());
        r.draw_point(3.0, 4.0, Color::rgba(255, 0, 128, 255)).unwrap();
        r.end_frame().unwrap();

        let sub = &r.backend().submissions()[0];
        assert_eq!(sub.topology, Topology::Points);
        assert_eq!(sub.positions, vec![[3.0, 4.0, 0.25]]);
        assert_eq!(sub.texcoords, vec![[0.0, 0.0]]);
        assert!((sub.colors[0][2] - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn rect_emits_quad_with_unit_uvs() {
        let mut r = renderer(16);
        r.begin_frame(vp(), ());
        r.draw_rect(Rect::new(10.0, 20.0, 30.0, 40.0), Color::GREEN).unwrap();
        r.end_frame().unwrap();

        let sub = &r.backend().submissions()[0];
        assert_eq!(sub.topology, Topology::Triangles);
        assert_eq!(sub.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(sub.positions[2], [40.0, 60.0, 0.0]);
        assert_eq!(sub.texcoords, UNIT_QUAD_UVS.to_vec());
        assert_eq!(sub.texture, None);
    }

    #[test]
    fn rect_indices_are_relative_to_their_quad() {
        let mut r = renderer(16);
        r.begin_frame(vp(), ());
        r.draw_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::RED).unwrap();
        r.draw_rect(Rect::new(2.0, 0.0, 1.0, 1.0), Color::RED).unwrap();
        assert_eq!(
            r.batch(BatchKind::Triangles).indices(),
            &[0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]
        );
    }

    #[test]
    fn outline_emits_four_segments() {
        let mut r = renderer(16);
        r.begin_frame(vp(), ());
        r.draw_rect_outline(Rect::new(0.0, 0.0, 10.0, 5.0), Color::WHITE).unwrap();
        r.end_frame().unwrap();

        let sub = &r.backend().submissions()[0];
        assert_eq!(sub.topology, Topology::Lines);
        assert_eq!(sub.positions.len(), 8);
        assert!(sub.indices.is_empty());
        assert_eq!(sub.positions[0], [0.0, 0.0, 0.0]);
        assert_eq!(sub.positions[1], [10.0, 0.0, 0.0]);
        assert_eq!(sub.positions[7], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn texture_uvs_follow_source_rect() {
        let mut r = renderer(16);
        let tex = r.create_texture(&ImageData::solid(64, 64, [255; 4]).unwrap()).unwrap();
        r.begin_frame(vp(), ());
        r.draw_texture(&tex, Rect::new(0.0, 0.0, 32.0, 32.0), Rect::new(100.0, 100.0, 64.0, 64.0), Color::WHITE)
            .unwrap();
        r.end_frame().unwrap();

        let sub = &r.backend().submissions()[0];
        assert_eq!(sub.texture, Some(tex.id()));
        assert_eq!(sub.texcoords[0], [0.0, 0.0]);
        assert_eq!(sub.texcoords[2], [0.5, 0.5]);
        assert_eq!(sub.positions[2], [164.0, 164.0, 0.0]);
    }

    #[test]
    fn last_texture_wins_within_a_batch() {
        let mut r = renderer(16);
        let a = r.create_texture(&ImageData::solid(1, 1, [255; 4]).unwrap()).unwrap();
        let b = r.create_texture(&ImageData::solid(2, 2, [0; 4]).unwrap()).unwrap();
        let src = Rect::new(0.0, 0.0, 1.0, 1.0);
        r.begin_frame(vp(), ());
        r.draw_texture(&a, src, src, Color::WHITE).unwrap();
        r.draw_texture(&b, src, src, Color::WHITE).unwrap();
        r.end_frame().unwrap();

        let subs = r.backend().submissions();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].texture, Some(b.id()));
        assert_eq!(subs[0].positions.len(), 8);
    }

    #[test]
    fn released_texture_flushes_pending_geometry() {
        let mut r = renderer(16);
        let tex = r.create_texture(&ImageData::solid(4, 4, [9; 4]).unwrap()).unwrap();
        let src = Rect::new(0.0, 0.0, 4.0, 4.0);
        r.begin_frame(vp(), ());
        r.draw_texture(&tex, src, src, Color::WHITE).unwrap();
        r.release_texture(tex).unwrap();

        assert_eq!(r.backend().submissions().len(), 1);
        assert_eq!(r.backend().texture_count(), 0);
        assert_eq!(r.batch(BatchKind::TexturedTriangles).texture(), None);
        assert_eq!(r.end_frame().unwrap().draw_calls, 1);
    }

    // ── capacity ──────────────────────────────────────────────────────────

    #[test]
    fn shape_larger_than_batch_fails_fast() {
        let mut r = renderer(4);
        r.begin_frame(vp(), ());
        let err = r.draw_rect_outline(Rect::new(0.0, 0.0, 1.0, 1.0), Color::RED).unwrap_err();
        assert!(matches!(
            err,
            RenderError::ShapeTooLarge { kind: BatchKind::Lines, vertices: 8, vertex_capacity: 4, .. }
        ));
        assert!(r.batch(BatchKind::Lines).is_empty());
    }

    #[test]
    fn overflow_flushes_before_the_shape() {
        let mut r = renderer(6);
        r.begin_frame(vp(), ());
        r.draw_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::RED).unwrap();
        // Four staged; a second quad would need eight.
        r.draw_rect(Rect::new(5.0, 5.0, 1.0, 1.0), Color::BLUE).unwrap();
        assert_eq!(r.stats().draw_calls, 1);
        assert_eq!(r.batch(BatchKind::Triangles).vertex_count(), 4);
        assert_eq!(r.batch(BatchKind::Triangles).indices(), &[0, 1, 2, 0, 2, 3]);
        r.end_frame().unwrap();
        assert_eq!(r.backend().submissions().len(), 2);
    }

    #[test]
    fn model_view_change_flushes_pending() {
        let mut r = renderer(16);
        r.begin_frame(vp(), ());
        r.draw_line(0.0, 0.0, 1.0, 1.0, Color::WHITE).unwrap();
        let shifted = Mat4::from_translation(glam::Vec3::new(10.0, 10.0, 0.0));
        r.set_model_view(shifted).unwrap();
        r.draw_line(0.0, 0.0, 1.0, 1.0, Color::WHITE).unwrap();
        r.end_frame().unwrap();

        let subs = r.backend().submissions();
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].transforms.model_view, Mat4::IDENTITY);
        assert_eq!(subs[1].transforms.model_view, shifted);
    }

    #[test]
    fn model_view_unchanged_does_not_flush() {
        let mut r = renderer(16);
        r.begin_frame(vp(), ());
        r.draw_point(0.0, 0.0, Color::WHITE).unwrap();
        r.set_model_view(Mat4::IDENTITY).unwrap();
        assert_eq!(r.stats().draw_calls, 0);
    }

    #[test]
    fn clear_reaches_backend() {
        let mut r = renderer(16);
        r.begin_frame(vp(), ());
        r.clear(Color::BLUE).unwrap();
        r.end_frame().unwrap();
        assert_eq!(r.backend().clears(), &[Color::BLUE]);
    }
}
