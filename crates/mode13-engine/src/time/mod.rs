//! Frame timing.
//!
//! One `FrameClock` per presenter; `tick()` once per `advance`.

mod frame_clock;

pub use frame_clock::{format_title, FrameClock, FrameTime};
