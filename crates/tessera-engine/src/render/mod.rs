//! Batched 2D rendering.
//!
//! Draw calls stage geometry into one [`GeometryBatch`] per primitive kind and are
//! flushed as a single GPU draw each when a batch fills up or the frame ends.
//!
//! Convention:
//! - Coordinates are framebuffer pixels (top-left origin, +Y down).
//! - Batches flush in the fixed order points, lines, triangles, textured triangles.
//! - The GPU is reached only through [`RenderBackend`]; [`WgpuBackend`] drives a
//!   real device, [`HeadlessBackend`] records submissions instead.

mod backend;
mod batch;
mod error;
mod headless;
mod renderer;
mod texture;
mod vertex;
mod wgpu_backend;

pub use backend::{DrawSubmission, RenderBackend, Transforms};
pub use batch::{FrameStats, GeometryBatch};
pub use error::{BatchError, RenderError, ShaderError, TextureError};
pub use headless::{HeadlessBackend, HeadlessBuffers, HeadlessProgram, RecordedDraw};
pub use renderer::{FrameState, Renderer, RendererConfig};
pub use texture::{ImageData, Texture, TextureId};
pub use vertex::{BatchKind, Topology, Vertex, QUAD_INDICES, UNIT_QUAD_UVS};
pub use wgpu_backend::{WgpuBackend, WgpuBuffers, WgpuProgram};
