//! Platform window: event loop construction, the window event handler and
//! window placement.

mod host;
mod placement;

use winit::error::EventLoopError;
use winit::event_loop::{EventLoop, EventLoopBuilder};

pub(crate) use host::WindowHost;
pub(crate) use placement::{apply_windowed, center_on_primary, window_attributes};

/// Builds the presenter's event loop.
///
/// `any_thread` lifts the main-thread requirement where the platform allows
/// it (Windows, X11/Wayland). Elsewhere it is ignored.
pub(crate) fn build_event_loop(any_thread: bool) -> Result<EventLoop<()>, EventLoopError> {
    let mut builder = EventLoop::builder();
    if any_thread {
        allow_any_thread(&mut builder);
    }
    builder.build()
}

#[cfg(target_os = "windows")]
fn allow_any_thread(builder: &mut EventLoopBuilder<()>) {
    use winit::platform::windows::EventLoopBuilderExtWindows;
    builder.with_any_thread(true);
}

#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "ios", target_os = "android"))
))]
fn allow_any_thread(builder: &mut EventLoopBuilder<()>) {
    // Sets the shared flag for both X11 and Wayland.
    use winit::platform::x11::EventLoopBuilderExtX11;
    builder.with_any_thread(true);
}

#[cfg(not(any(
    target_os = "windows",
    all(
        unix,
        not(any(target_os = "macos", target_os = "ios", target_os = "android"))
    )
)))]
fn allow_any_thread(_builder: &mut EventLoopBuilder<()>) {
    log::debug!("any_thread is not supported on this platform; ignored");
}
