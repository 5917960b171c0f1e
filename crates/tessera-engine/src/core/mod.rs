//! Engine-facing contracts between the platform loop and the application.
//!
//! The runtime owns the window and GPU; applications see them only through
//! [`App`] callbacks and the per-frame [`FrameCtx`].

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
