//! Pixel generators and shared controls for the mode13 demo binaries.

pub mod board;
pub mod controls;
pub mod fractal;
pub mod gradient;
pub mod screenshot;
