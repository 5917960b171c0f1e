//! Vertex layout and primitive topology.

/// One staged vertex.
///
/// `position.z` is the renderer's current depth; `texcoord` is zero for untextured
/// points and lines.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub texcoord: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    #[inline]
    pub const fn new(position: [f32; 3], texcoord: [f32; 2], color: [f32; 4]) -> Self {
        Self { position, texcoord, color }
    }
}

/// Primitive type a batch draws.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Topology {
    Points,
    Lines,
    Triangles,
}

impl Topology {
    /// Vertices per primitive.
    #[inline]
    pub const fn arity(self) -> usize {
        match self {
            Topology::Points => 1,
            Topology::Lines => 2,
            Topology::Triangles => 3,
        }
    }

    /// Only triangle batches carry an index stage.
    #[inline]
    pub const fn is_indexed(self) -> bool {
        matches!(self, Topology::Triangles)
    }
}

/// The renderer's batches, declared in flush order.
///
/// `end_frame` drains them in this order, so later kinds always draw over earlier
/// ones regardless of submission order within the frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BatchKind {
    Points,
    Lines,
    Triangles,
    TexturedTriangles,
}

impl BatchKind {
    pub const COUNT: usize = 4;

    pub const ALL: [BatchKind; BatchKind::COUNT] = [
        BatchKind::Points,
        BatchKind::Lines,
        BatchKind::Triangles,
        BatchKind::TexturedTriangles,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn topology(self) -> Topology {
        match self {
            BatchKind::Points => Topology::Points,
            BatchKind::Lines => Topology::Lines,
            BatchKind::Triangles | BatchKind::TexturedTriangles => Topology::Triangles,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            BatchKind::Points => "tessera points batch",
            BatchKind::Lines => "tessera lines batch",
            BatchKind::Triangles => "tessera triangles batch",
            BatchKind::TexturedTriangles => "tessera textured batch",
        }
    }
}

/// Two triangles over the corners of [`Rect::corners`](crate::coords::Rect::corners),
/// relative to the quad's first vertex.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Texcoords for an untextured quad: the unit square in corner order.
pub const UNIT_QUAD_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flush_order_matches_index() {
        for (i, kind) in BatchKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn only_triangles_are_indexed() {
        assert!(!Topology::Points.is_indexed());
        assert!(!Topology::Lines.is_indexed());
        assert!(Topology::Triangles.is_indexed());
        assert_eq!(BatchKind::TexturedTriangles.topology(), Topology::Triangles);
    }
}
