//! Paint types.
//!
//! Colors are authored as 8-bit RGBA and normalized when a vertex is emitted.

mod color;

pub use color::Color;
