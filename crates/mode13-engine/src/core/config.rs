use crate::device::GpuInit;

/// Presenter configuration.
///
/// Plain struct with defaults; override fields with struct update syntax:
///
/// ```
/// let config = mode13_engine::PresenterConfig {
///     width: 320,
///     height: 200,
///     app_name: "demo".into(),
///     ..Default::default()
/// };
/// assert!(config.vsync);
/// ```
#[derive(Debug, Clone)]
pub struct PresenterConfig {
    /// Frame buffer width in pixels. Must be positive.
    pub width: u32,
    /// Frame buffer height in pixels. Must be positive.
    pub height: u32,
    /// Start in borderless fullscreen.
    pub fullscreen: bool,
    pub vsync: bool,
    /// Window title prefix.
    pub app_name: String,
    /// Allow creating the event loop off the main thread (test harnesses).
    pub any_thread: bool,
    pub gpu: GpuInit,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            fullscreen: false,
            vsync: true,
            app_name: "mode13".to_string(),
            any_thread: false,
            gpu: GpuInit::default(),
        }
    }
}
