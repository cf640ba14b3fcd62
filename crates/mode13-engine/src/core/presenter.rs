use std::sync::Arc;

use winit::dpi::PhysicalSize;
use winit::event_loop::EventLoop;
use winit::window::{Fullscreen, Window};

use crate::device::{Gpu, PresentOutcome};
use crate::input::{InputState, MouseButton, VirtualKey};
use crate::pixels::FrameBuffer;
use crate::time::{format_title, FrameClock};
use crate::window::{self, WindowHost};

use super::{AppControl, Error, PresenterConfig};

/// A window that shows a CPU-side RGBA8 frame buffer.
///
/// Write pixels through [`pixels_mut`](Self::pixels_mut), then call
/// [`advance`](Self::advance) once per frame:
///
/// ```no_run
/// use mode13_engine::{Presenter, PresenterConfig, VirtualKey};
///
/// let mut presenter = Presenter::new(PresenterConfig::default())?;
/// while presenter.advance().is_continue() && !presenter.key(VirtualKey::ESCAPE) {
///     presenter.pixels_mut().fill(0x80);
/// }
/// presenter.shutdown();
/// # Ok::<(), mode13_engine::Error>(())
/// ```
///
/// Field order is drop order: GPU resources, then the window, then the event
/// loop, then the frame buffer.
pub struct Presenter {
    gpu: Option<Gpu>,
    host: WindowHost,
    event_loop: EventLoop<()>,
    frame: FrameBuffer,

    clock: FrameClock,
    app_name: String,
    vsync: bool,
    fullscreen: bool,
}

impl Presenter {
    /// Opens the window and brings up the GPU side.
    ///
    /// Anything acquired before a failure is released on return.
    pub fn new(config: PresenterConfig) -> Result<Self, Error> {
        let PresenterConfig {
            width,
            height,
            fullscreen,
            vsync,
            app_name,
            any_thread,
            gpu: gpu_init,
        } = config;

        let frame = FrameBuffer::new(width, height).ok_or(Error::InvalidSize { width, height })?;
        let buffer_size = PhysicalSize::new(width, height);

        let mut event_loop = window::build_event_loop(any_thread)?;
        let mut host = WindowHost::new(window::window_attributes(&app_name, buffer_size), buffer_size);
        let win = host.pump_until_created(&mut event_loop)?;
        window::center_on_primary(&win);

        let gpu = pollster::block_on(Gpu::new(Arc::clone(&win), &gpu_init, (width, height), vsync))?;

        log::info!("presenter up: {width}x{height}, vsync {vsync}");

        let mut presenter = Self {
            gpu: Some(gpu),
            host,
            event_loop,
            frame,
            clock: FrameClock::new(),
            app_name,
            vsync,
            fullscreen: false,
        };

        if fullscreen {
            presenter.set_fullscreen(true);
        }

        Ok(presenter)
    }

    /// Runs one frame: input, timing, events, upload and present.
    ///
    /// Returns `Exit` once the window was closed or presentation failed;
    /// after that the caller should only shut down.
    pub fn advance(&mut self) -> AppControl {
        self.host.input_mut().begin_frame();

        let ft = self.clock.tick();
        if ft.title_due {
            if let Some(win) = self.host.window() {
                win.set_title(&format_title(&self.app_name, ft.average_fps));
            }
        }

        self.host.drain(&mut self.event_loop);
        if self.host.quit_requested() {
            return AppControl::Exit;
        }

        let (Some(gpu), Some(win)) = (self.gpu.as_mut(), self.host.window().cloned()) else {
            return AppControl::Exit;
        };

        if let Some(size) = self.host.take_pending_resize() {
            gpu.resize_surface(size);
        }

        match gpu.present(&win, self.frame.as_bytes()) {
            PresentOutcome::Presented | PresentOutcome::Skipped => AppControl::Continue,
            PresentOutcome::Fatal => {
                self.host.request_quit();
                AppControl::Exit
            }
        }
    }

    /// Resizes the frame buffer and returns it.
    ///
    /// Same size is a no-op returning the existing allocation. Otherwise the
    /// contents are not preserved. A size beyond the GPU's limits fails with
    /// `Error::FrameTooLarge` and leaves the current buffer in place; any other
    /// GPU failure here leaves the presenter unusable and the caller should
    /// shut down.
    pub fn set_size(&mut self, width: u32, height: u32) -> Result<&mut [u8], Error> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidSize { width, height });
        }
        if self.frame.matches(width, height) {
            return Ok(self.frame.as_bytes_mut());
        }

        if let Some(gpu) = self.gpu.as_mut() {
            gpu.resize_frame(width, height)?;
        }
        self.frame.resize(width, height);

        let size = PhysicalSize::new(width, height);
        self.host.set_buffer_size(size);
        if !self.fullscreen {
            self.place_windowed(size);
        }

        log::debug!("frame buffer resized to {width}x{height}");
        Ok(self.frame.as_bytes_mut())
    }

    /// Enters or leaves borderless fullscreen. Idempotent.
    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        if fullscreen == self.fullscreen {
            return;
        }
        self.fullscreen = fullscreen;
        self.host.set_fullscreen(fullscreen);

        let Some(win) = self.host.window().cloned() else {
            return;
        };

        if fullscreen {
            win.set_fullscreen(Some(Fullscreen::Borderless(None)));
        } else {
            win.set_fullscreen(None);
            self.place_windowed(PhysicalSize::new(self.frame.width(), self.frame.height()));
        }

        log::debug!("fullscreen {}", if fullscreen { "on" } else { "off" });
    }

    fn place_windowed(&mut self, size: PhysicalSize<u32>) {
        let Some(win) = self.host.window().cloned() else {
            return;
        };
        if let Some(applied) = window::apply_windowed(&win, size) {
            self.host.note_resize(applied);
        }
    }

    #[inline]
    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Takes effect on the next `advance`.
    pub fn set_vsync(&mut self, vsync: bool) {
        self.vsync = vsync;
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.set_vsync(vsync);
        }
    }

    #[inline]
    pub fn vsync(&self) -> bool {
        self.vsync
    }

    /// Used by the next title refresh.
    pub fn set_app_name(&mut self, name: impl Into<String>) {
        self.app_name = name.into();
    }

    #[inline]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.frame.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.frame.height()
    }

    /// Seconds between the last two `advance` calls.
    #[inline]
    pub fn delta_time(&self) -> f64 {
        self.clock.delta_time()
    }

    #[inline]
    pub fn average_fps(&self) -> f64 {
        self.clock.average_fps()
    }

    pub fn tearing_supported(&self) -> bool {
        self.gpu.as_ref().is_some_and(Gpu::tearing_supported)
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        self.frame.as_bytes()
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        self.frame.as_bytes_mut()
    }

    /// The underlying window, until shutdown.
    pub fn window(&self) -> Option<&Window> {
        self.host.window().map(|w| w.as_ref())
    }

    // ── input ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn input(&self) -> &InputState {
        self.host.input()
    }

    /// Pointer position in frame-buffer pixels.
    pub fn mouse_position(&self) -> (i32, i32) {
        self.input().mouse_position()
    }

    pub fn mouse_position_last_frame(&self) -> (i32, i32) {
        self.input().mouse_position_last_frame()
    }

    pub fn mouse_button(&self, button: MouseButton) -> bool {
        self.input().mouse_button(button)
    }

    pub fn mouse_button_last_frame(&self, button: MouseButton) -> bool {
        self.input().mouse_button_last_frame(button)
    }

    pub fn mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.input().mouse_button_pressed(button)
    }

    pub fn key(&self, key: VirtualKey) -> bool {
        self.input().key(key)
    }

    pub fn key_last_frame(&self, key: VirtualKey) -> bool {
        self.input().key_last_frame(key)
    }

    pub fn key_pressed(&self, key: VirtualKey) -> bool {
        self.input().key_pressed(key)
    }

    /// Raw virtual-key code query; out-of-range codes read `false`.
    pub fn key_code(&self, code: i32) -> bool {
        self.input().key_code(code)
    }

    pub fn key_code_last_frame(&self, code: i32) -> bool {
        self.input().key_code_last_frame(code)
    }

    // ── shutdown ──────────────────────────────────────────────────────────

    /// Waits for the GPU and releases everything. Also done on drop.
    pub fn shutdown(mut self) {
        self.release();
    }

    fn release(&mut self) {
        let Some(mut gpu) = self.gpu.take() else {
            return;
        };
        gpu.release();
        drop(gpu);

        self.host.close_window();
        // Let the platform process the window teardown.
        self.host.drain(&mut self.event_loop);

        self.frame.release();
        log::debug!("presenter shut down");
    }
}

impl Drop for Presenter {
    fn drop(&mut self) {
        self.release();
    }
}
