use glam::Mat4;

use crate::coords::Viewport;
use crate::paint::Color;

use super::error::{RenderError, ShaderError, TextureError};
use super::texture::{ImageData, Texture, TextureId};
use super::vertex::Topology;

/// Projection and model-view pair uploaded with every flush.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transforms {
    pub projection: Mat4,
    pub model_view: Mat4,
}

impl Transforms {
    /// Orthographic projection over the framebuffer with a top-left origin.
    ///
    /// Maps `(0, 0)` to the top-left corner of clip space and `(width, height)` to
    /// the bottom-right. Depth spans `[-1, 1]`.
    pub fn orthographic(viewport: Viewport) -> Self {
        let vp = viewport.clamped();
        Self {
            projection: Mat4::orthographic_rh(0.0, vp.width, vp.height, 0.0, -1.0, 1.0),
            model_view: Mat4::IDENTITY,
        }
    }
}

impl Default for Transforms {
    fn default() -> Self {
        Self {
            projection: Mat4::IDENTITY,
            model_view: Mat4::IDENTITY,
        }
    }
}

/// Borrowed view of one batch's staged data, handed to the backend on flush.
#[derive(Debug, Copy, Clone)]
pub struct DrawSubmission<'a> {
    pub topology: Topology,
    pub positions: &'a [[f32; 3]],
    pub texcoords: &'a [[f32; 2]],
    pub colors: &'a [[f32; 4]],
    /// Empty for non-indexed topologies.
    pub indices: &'a [u32],
    /// `None` samples nothing; the fragment stage outputs vertex color only.
    pub texture: Option<TextureId>,
    pub transforms: &'a Transforms,
}

impl DrawSubmission<'_> {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
}

/// The GPU seam under the batch renderer.
///
/// Implementations own every GPU object; resources are released when the
/// associated types are dropped.
pub trait RenderBackend {
    /// Vertex/index buffer set owned by one batch.
    type Buffers;
    /// Linked shader program.
    type Program;
    /// Per-frame render target.
    type Target;

    /// Compiles and links the fixed vertex + fragment pair.
    fn create_program(&mut self) -> Result<Self::Program, ShaderError>;

    /// Allocates GPU storage for a batch of the given capacities.
    fn create_buffers(
        &mut self,
        label: &str,
        topology: Topology,
        vertex_capacity: usize,
        index_capacity: usize,
    ) -> Self::Buffers;

    /// Uploads RGBA8 pixels with nearest filtering and clamp-to-edge wrapping.
    fn create_texture(&mut self, image: &ImageData) -> Result<Texture, TextureError>;

    /// Frees a texture. Unknown ids are ignored.
    fn release_texture(&mut self, texture: Texture);

    /// Binds (or unbinds) the target that subsequent clears and submissions draw into.
    fn set_target(&mut self, target: Option<Self::Target>);

    /// Clears the bound target.
    fn clear(&mut self, color: Color) -> Result<(), RenderError>;

    /// Uploads the staged data and issues exactly one draw call.
    fn submit(
        &mut self,
        program: &Self::Program,
        buffers: &mut Self::Buffers,
        draw: &DrawSubmission<'_>,
    ) -> Result<(), RenderError>;
}
