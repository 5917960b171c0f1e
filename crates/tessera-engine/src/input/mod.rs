//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types. The runtime
//! translates window events through `platform::winit` and feeds them to
//! [`InputState::apply_event`].

mod frame;
mod state;
mod types;

pub(crate) mod platform {
    pub(crate) mod winit;
}

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState, Modifiers, MouseButton};
