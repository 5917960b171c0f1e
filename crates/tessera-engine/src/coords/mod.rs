//! Coordinate and geometry types used by the batch renderer.
//!
//! Canonical CPU space:
//! - Framebuffer pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! The orthographic projection built at `begin_frame` maps this space to clip space.

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
