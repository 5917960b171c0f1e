use std::fmt;
use std::path::PathBuf;

use super::texture::TextureId;
use super::vertex::{BatchKind, Topology};

/// Rejected push into a [`GeometryBatch`](super::GeometryBatch).
///
/// The renderer flushes before pushing, so seeing one of these from a draw call
/// means the batch was driven directly without checking `fits` first.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BatchError {
    /// The vertex or index stage has no room left.
    Full,
    /// Index pushed into a batch whose topology carries no indices.
    NotIndexed(Topology),
    /// Index count is not a multiple of the topology's arity.
    MisalignedIndices { count: usize, arity: usize },
    /// Index references a vertex that has not been pushed yet.
    IndexOutOfRange { index: u32, vertex_count: usize },
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchError::Full => write!(f, "batch is full"),
            BatchError::NotIndexed(t) => write!(f, "{t:?} batches do not carry indices"),
            BatchError::MisalignedIndices { count, arity } => {
                write!(f, "{count} indices is not a multiple of primitive arity {arity}")
            }
            BatchError::IndexOutOfRange { index, vertex_count } => {
                write!(f, "index {index} out of range for {vertex_count} staged vertices")
            }
        }
    }
}

impl std::error::Error for BatchError {}

/// Shader compile or program link failure, with the driver diagnostic log.
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderError {
    Compile { log: String },
    Link { log: String },
}

impl ShaderError {
    pub fn log(&self) -> &str {
        match self {
            ShaderError::Compile { log } | ShaderError::Link { log } => log,
        }
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Compile { log } => write!(f, "shader compilation failed:\n{log}"),
            ShaderError::Link { log } => write!(f, "shader program link failed:\n{log}"),
        }
    }
}

impl std::error::Error for ShaderError {}

/// Image decode or texture upload failure.
#[derive(Debug)]
pub enum TextureError {
    /// The decoder could not read or parse the file.
    Decode { path: PathBuf, source: image::ImageError },
    /// Decoded image has a zero dimension.
    Empty { width: u32, height: u32 },
    /// Pixel buffer length does not match `width * height * 4`.
    SizeMismatch { expected: usize, actual: usize },
    /// Image exceeds the device's maximum 2D texture dimension.
    TooLarge { width: u32, height: u32, max: u32 },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Decode { path, source } => {
                write!(f, "failed to decode image {}: {source}", path.display())
            }
            TextureError::Empty { width, height } => {
                write!(f, "image has no pixels ({width}x{height})")
            }
            TextureError::SizeMismatch { expected, actual } => {
                write!(f, "RGBA8 buffer holds {actual} bytes, expected {expected}")
            }
            TextureError::TooLarge { width, height, max } => {
                write!(f, "image {width}x{height} exceeds the {max}px texture limit")
            }
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors surfaced by [`Renderer`](super::Renderer) operations.
#[derive(Debug)]
pub enum RenderError {
    Shader(ShaderError),
    Texture(TextureError),
    Batch(BatchError),
    /// Draw or end-frame call made outside `begin_frame`/`end_frame`.
    NotInFrame,
    /// A single shape needs more room than the batch holds in total.
    ShapeTooLarge {
        kind: BatchKind,
        vertices: usize,
        indices: usize,
        vertex_capacity: usize,
        index_capacity: usize,
    },
    /// Flush attempted without a render target bound to the backend.
    NoTarget,
    /// The texture was released or never created by this backend.
    UnknownTexture(TextureId),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Shader(e) => write!(f, "{e}"),
            RenderError::Texture(e) => write!(f, "{e}"),
            RenderError::Batch(e) => write!(f, "{e}"),
            RenderError::NotInFrame => write!(f, "draw call issued outside of a frame"),
            RenderError::ShapeTooLarge {
                kind,
                vertices,
                indices,
                vertex_capacity,
                index_capacity,
            } => write!(
                f,
                "shape needs {vertices} vertices / {indices} indices but the {kind:?} batch \
                 holds {vertex_capacity} / {index_capacity}"
            ),
            RenderError::NoTarget => write!(f, "no render target bound"),
            RenderError::UnknownTexture(id) => write!(f, "unknown texture {id:?}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Shader(e) => Some(e),
            RenderError::Texture(e) => Some(e),
            RenderError::Batch(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShaderError> for RenderError {
    fn from(e: ShaderError) -> Self {
        RenderError::Shader(e)
    }
}

impl From<TextureError> for RenderError {
    fn from(e: TextureError) -> Self {
        RenderError::Texture(e)
    }
}

impl From<BatchError> for RenderError {
    fn from(e: BatchError) -> Self {
        RenderError::Batch(e)
    }
}
