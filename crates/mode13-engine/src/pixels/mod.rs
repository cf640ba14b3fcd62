//! CPU-side pixel storage.
//!
//! The frame buffer is the only resource shared with application code. It is
//! borrowed out between frames and read back by the presenter during upload.

mod frame_buffer;

pub use frame_buffer::{FrameBuffer, BYTES_PER_PIXEL};
