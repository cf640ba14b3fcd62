use std::sync::Arc;
use std::time::Duration;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::error::OsError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::core::Error;
use crate::input::platform::winit::{translate_window_event, PointerMapping};
use crate::input::InputState;

/// Upper bound on pump iterations while waiting for the first window.
const CREATE_PUMP_LIMIT: u32 = 200;

/// Window event handler for the presenter's single window.
///
/// Every OS event reaches the presenter through here: input goes into the
/// current input snapshot, close requests raise the quit flag and resizes are
/// queued for the GPU side.
pub(crate) struct WindowHost {
    window: Option<Arc<Window>>,
    attributes: WindowAttributes,
    create_error: Option<OsError>,

    input: InputState,
    mapping: PointerMapping,

    quit_requested: bool,
    pending_resize: Option<PhysicalSize<u32>>,
}

impl WindowHost {
    pub(crate) fn new(attributes: WindowAttributes, buffer: PhysicalSize<u32>) -> Self {
        Self {
            window: None,
            attributes,
            create_error: None,
            input: InputState::default(),
            mapping: PointerMapping {
                buffer,
                window: buffer,
                fullscreen: false,
            },
            quit_requested: false,
            pending_resize: None,
        }
    }

    /// Pumps `event_loop` until the window exists.
    pub(crate) fn pump_until_created(
        &mut self,
        event_loop: &mut EventLoop<()>,
    ) -> Result<Arc<Window>, Error> {
        for _ in 0..CREATE_PUMP_LIMIT {
            let status = event_loop.pump_app_events(Some(Duration::from_millis(5)), self);

            if let Some(err) = self.create_error.take() {
                return Err(Error::CreateWindow(err));
            }
            if let Some(window) = &self.window {
                return Ok(Arc::clone(window));
            }
            if let PumpStatus::Exit(code) = status {
                log::warn!("event loop exited ({code}) before the window was created");
                break;
            }
        }
        Err(Error::WindowUnavailable)
    }

    /// Drains pending OS events without blocking.
    pub(crate) fn drain(&mut self, event_loop: &mut EventLoop<()>) {
        if let PumpStatus::Exit(_) = event_loop.pump_app_events(Some(Duration::ZERO), self) {
            self.quit_requested = true;
        }
    }

    #[inline]
    pub(crate) fn window(&self) -> Option<&Arc<Window>> {
        self.window.as_ref()
    }

    /// Drops the host's window handle. The OS window closes once the GPU
    /// surface has let go of its handle too.
    pub(crate) fn close_window(&mut self) {
        self.window = None;
    }

    #[inline]
    pub(crate) fn input(&self) -> &InputState {
        &self.input
    }

    #[inline]
    pub(crate) fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    #[inline]
    pub(crate) fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub(crate) fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    /// Takes the last drawable size reported by the OS, if it changed.
    pub(crate) fn take_pending_resize(&mut self) -> Option<PhysicalSize<u32>> {
        self.pending_resize.take()
    }

    /// Records a drawable size applied synchronously by the platform.
    pub(crate) fn note_resize(&mut self, size: PhysicalSize<u32>) {
        self.mapping.window = size;
        self.pending_resize = Some(size);
    }

    pub(crate) fn set_buffer_size(&mut self, size: PhysicalSize<u32>) {
        self.mapping.buffer = size;
    }

    pub(crate) fn set_fullscreen(&mut self, fullscreen: bool) {
        self.mapping.fullscreen = fullscreen;
    }
}

impl ApplicationHandler for WindowHost {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match event_loop.create_window(self.attributes.clone()) {
            Ok(window) => {
                self.mapping.window = window.inner_size();
                log::debug!(
                    "window created: {}x{}",
                    self.mapping.window.width,
                    self.mapping.window.height
                );
                self.window = Some(Arc::new(window));
            }
            Err(e) => {
                log::error!("failed to create window: {e}");
                self.create_error = Some(e);
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.window.as_ref().is_none_or(|w| w.id() != window_id) {
            return;
        }

        match &event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                self.quit_requested = true;
            }
            WindowEvent::Resized(size) => {
                self.note_resize(*size);
            }
            _ => {
                if let Some(ev) = translate_window_event(&self.mapping, &event) {
                    self.input.apply_event(ev);
                }
            }
        }
    }
}
