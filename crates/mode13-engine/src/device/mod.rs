//! GPU device, surface and frame upload.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue and configuring the surface
//! - staging the CPU frame buffer into a texture each frame
//! - copying or blitting that texture onto the swap target and presenting it
//!
//! Only `GpuInit` leaves the crate; everything else sits behind `Presenter`.

mod blit;
mod error;
mod fence;
mod gpu;
mod init;
mod staging;
mod surface;

#[cfg(test)]
mod testing;

pub(crate) use error::SurfaceErrorAction;
pub(crate) use gpu::{Gpu, PresentOutcome};
pub use init::GpuInit;
