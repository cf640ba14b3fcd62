//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The window host translates platform events into `InputEvent`s through
//! `platform::winit` and applies them to the current snapshot.

mod state;
mod types;

pub(crate) mod platform;

pub use state::{InputSnapshot, InputState};
pub use types::{
    ButtonState,
    InputEvent,
    KEY_COUNT,
    MOUSE_BUTTON_COUNT,
    MouseButton,
    VirtualKey,
};
