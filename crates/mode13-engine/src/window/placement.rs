use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::window::{Window, WindowAttributes, WindowButtons};

/// Attributes of the fixed-style presenter window.
///
/// Not resizable and no maximize button: the buffer size is the only thing
/// that decides the window size.
pub(crate) fn window_attributes(title: &str, size: PhysicalSize<u32>) -> WindowAttributes {
    Window::default_attributes()
        .with_title(title)
        .with_inner_size(size)
        .with_resizable(false)
        .with_enabled_buttons(WindowButtons::CLOSE | WindowButtons::MINIMIZE)
}

/// Top-left position that centers `outer` on a monitor.
///
/// Windows larger than the monitor are pinned to its origin so the title bar
/// stays reachable.
pub(crate) fn centered_position(
    monitor_pos: PhysicalPosition<i32>,
    monitor_size: PhysicalSize<u32>,
    outer: PhysicalSize<u32>,
) -> PhysicalPosition<i32> {
    let offset = |monitor: u32, window: u32| (monitor.saturating_sub(window) / 2) as i32;
    PhysicalPosition::new(
        monitor_pos.x + offset(monitor_size.width, outer.width),
        monitor_pos.y + offset(monitor_size.height, outer.height),
    )
}

/// Centers the window on the primary monitor (or the current one when the
/// platform cannot name a primary).
pub(crate) fn center_on_primary(window: &Window) {
    let Some(monitor) = window.primary_monitor().or_else(|| window.current_monitor()) else {
        return;
    };
    let pos = centered_position(monitor.position(), monitor.size(), window.outer_size());
    window.set_outer_position(pos);
}

/// Restores windowed placement: inner size equal to the buffer, centered.
///
/// Returns the new drawable size when the platform applied it synchronously.
pub(crate) fn apply_windowed(window: &Window, size: PhysicalSize<u32>) -> Option<PhysicalSize<u32>> {
    let applied = window.request_inner_size(size);
    center_on_primary(window);
    applied
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_on_monitor() {
        let pos = centered_position(
            PhysicalPosition::new(0, 0),
            PhysicalSize::new(1920, 1080),
            PhysicalSize::new(1024, 768),
        );
        assert_eq!(pos, PhysicalPosition::new(448, 156));
    }

    #[test]
    fn offsets_by_monitor_origin() {
        let pos = centered_position(
            PhysicalPosition::new(1920, -200),
            PhysicalSize::new(2560, 1440),
            PhysicalSize::new(560, 440),
        );
        assert_eq!(pos, PhysicalPosition::new(1920 + 1000, -200 + 500));
    }

    #[test]
    fn oversized_window_pins_to_origin() {
        let pos = centered_position(
            PhysicalPosition::new(10, 20),
            PhysicalSize::new(800, 600),
            PhysicalSize::new(1024, 768),
        );
        assert_eq!(pos, PhysicalPosition::new(10, 20));
    }
}
