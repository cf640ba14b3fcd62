use thiserror::Error;

/// Errors returned by presenter setup and resizing.
///
/// `advance` never returns one of these; per-frame failures are logged and
/// reported as `AppControl::Exit` instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid frame buffer size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("failed to create event loop")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window")]
    CreateWindow(#[source] winit::error::OsError),

    #[error("event loop did not produce a window")]
    WindowUnavailable,

    #[error("failed to create GPU surface")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create GPU device")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("frame buffer size {width}x{height} exceeds the GPU's limits")]
    FrameTooLarge { width: u32, height: u32 },

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,

    #[error("failed waiting for the GPU")]
    Poll(#[from] wgpu::PollError),

    #[error("failed to map staging buffer: {0}")]
    MapStaging(String),
}

impl Error {
    /// The error happened while bringing the presenter up.
    pub fn is_initialization(&self) -> bool {
        !matches!(self, Error::Poll(_) | Error::MapStaging(_))
    }
}
