//! Frame timing.
//!
//! One [`FrameClock`] per render loop, ticked once per frame; [`FpsCounter`]
//! turns the resulting deltas into a periodic frame-rate reading.

mod fps;
mod frame_clock;

pub use fps::FpsCounter;
pub use frame_clock::{FrameClock, FrameTime};
