//! mode13 engine.
//!
//! A window you draw into by writing bytes. [`Presenter`] owns the window, a
//! CPU-side RGBA8 frame buffer and the wgpu plumbing that puts that buffer on
//! screen once per [`Presenter::advance`].

pub mod core;
mod device;
pub mod input;
pub mod logging;
pub mod pixels;
pub mod time;
mod window;

pub use crate::core::{AppControl, Error, Presenter, PresenterConfig};
pub use crate::device::GpuInit;
pub use crate::input::{InputState, MouseButton, VirtualKey};
pub use crate::pixels::BYTES_PER_PIXEL;
