//! Tessera engine crate.
//!
//! A small immediate-mode 2D batch renderer plus the platform pieces it runs on:
//! a wgpu device bound to a winit window, input polling and frame timing.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
