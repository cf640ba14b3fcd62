use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::{ButtonState, InputEvent, MouseButton, VirtualKey};

/// How raw window coordinates map onto the frame buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PointerMapping {
    /// Frame buffer size in pixels.
    pub buffer: PhysicalSize<u32>,
    /// Current drawable size of the window.
    pub window: PhysicalSize<u32>,
    /// The buffer is stretched over the window only in fullscreen.
    pub fullscreen: bool,
}

impl PointerMapping {
    /// Converts a window-space position to frame-buffer pixels.
    pub fn to_buffer(&self, pos: PhysicalPosition<f64>) -> (i32, i32) {
        let raw_x = pos.x as i32;
        let raw_y = pos.y as i32;

        if !self.fullscreen || self.window.width == 0 || self.window.height == 0 {
            return (raw_x, raw_y);
        }

        let sx = self.buffer.width as f32 / self.window.width as f32;
        let sy = self.buffer.height as f32 / self.window.height as f32;
        ((raw_x as f32 * sx) as i32, (raw_y as f32 * sy) as i32)
    }
}

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Returns `None` for events not represented by the input subsystem
/// (unmapped keys, extra mouse buttons, everything that is not input).
pub fn translate_window_event(mapping: &PointerMapping, event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = mapping.to_buffer(*position);
            Some(InputEvent::PointerMoved { x, y })
        }

        WindowEvent::MouseInput { state, button, .. } => Some(InputEvent::MouseButton {
            button: map_mouse_button(*button)?,
            state: map_state(*state),
        }),

        WindowEvent::KeyboardInput { event, .. } => Some(InputEvent::Key {
            key: map_key(event.physical_key)?,
            state: map_state(event.state),
        }),

        _ => None,
    }
}

fn map_state(state: ElementState) -> ButtonState {
    match state {
        ElementState::Pressed => ButtonState::Pressed,
        ElementState::Released => ButtonState::Released,
    }
}

fn map_mouse_button(b: WinitMouseButton) -> Option<MouseButton> {
    match b {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Right => Some(MouseButton::Right),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        WinitMouseButton::Back | WinitMouseButton::Forward | WinitMouseButton::Other(_) => None,
    }
}

/// Maps a physical key to its virtual-key code.
///
/// Left/right modifier variants collapse onto the generic code, which is what
/// a plain key-down message reports.
pub fn map_key(pk: PhysicalKey) -> Option<VirtualKey> {
    let PhysicalKey::Code(code) = pk else {
        return None;
    };

    let key = match code {
        KeyCode::Backspace => VirtualKey::BACKSPACE,
        KeyCode::Tab => VirtualKey::TAB,
        KeyCode::Enter | KeyCode::NumpadEnter => VirtualKey::ENTER,
        KeyCode::ShiftLeft | KeyCode::ShiftRight => VirtualKey::SHIFT,
        KeyCode::ControlLeft | KeyCode::ControlRight => VirtualKey::CONTROL,
        KeyCode::AltLeft | KeyCode::AltRight => VirtualKey::ALT,
        KeyCode::Pause => VirtualKey::PAUSE,
        KeyCode::CapsLock => VirtualKey::CAPS_LOCK,
        KeyCode::Escape => VirtualKey::ESCAPE,
        KeyCode::Space => VirtualKey::SPACE,

        KeyCode::PageUp => VirtualKey::PAGE_UP,
        KeyCode::PageDown => VirtualKey::PAGE_DOWN,
        KeyCode::End => VirtualKey::END,
        KeyCode::Home => VirtualKey::HOME,
        KeyCode::ArrowLeft => VirtualKey::LEFT,
        KeyCode::ArrowUp => VirtualKey::UP,
        KeyCode::ArrowRight => VirtualKey::RIGHT,
        KeyCode::ArrowDown => VirtualKey::DOWN,
        KeyCode::PrintScreen => VirtualKey::PRINT_SCREEN,
        KeyCode::Insert => VirtualKey::INSERT,
        KeyCode::Delete => VirtualKey::DELETE,

        KeyCode::SuperLeft => VirtualKey::LEFT_META,
        KeyCode::SuperRight => VirtualKey::RIGHT_META,
        KeyCode::ContextMenu => VirtualKey::CONTEXT_MENU,

        KeyCode::Digit0 => VirtualKey::from_char('0')?,
        KeyCode::Digit1 => VirtualKey::from_char('1')?,
        KeyCode::Digit2 => VirtualKey::from_char('2')?,
        KeyCode::Digit3 => VirtualKey::from_char('3')?,
        KeyCode::Digit4 => VirtualKey::from_char('4')?,
        KeyCode::Digit5 => VirtualKey::from_char('5')?,
        KeyCode::Digit6 => VirtualKey::from_char('6')?,
        KeyCode::Digit7 => VirtualKey::from_char('7')?,
        KeyCode::Digit8 => VirtualKey::from_char('8')?,
        KeyCode::Digit9 => VirtualKey::from_char('9')?,

        KeyCode::KeyA => VirtualKey::from_char('A')?,
        KeyCode::KeyB => VirtualKey::from_char('B')?,
        KeyCode::KeyC => VirtualKey::from_char('C')?,
        KeyCode::KeyD => VirtualKey::from_char('D')?,
        KeyCode::KeyE => VirtualKey::from_char('E')?,
        KeyCode::KeyF => VirtualKey::from_char('F')?,
        KeyCode::KeyG => VirtualKey::from_char('G')?,
        KeyCode::KeyH => VirtualKey::from_char('H')?,
        KeyCode::KeyI => VirtualKey::from_char('I')?,
        KeyCode::KeyJ => VirtualKey::from_char('J')?,
        KeyCode::KeyK => VirtualKey::from_char('K')?,
        KeyCode::KeyL => VirtualKey::from_char('L')?,
        KeyCode::KeyM => VirtualKey::from_char('M')?,
        KeyCode::KeyN => VirtualKey::from_char('N')?,
        KeyCode::KeyO => VirtualKey::from_char('O')?,
        KeyCode::KeyP => VirtualKey::from_char('P')?,
        KeyCode::KeyQ => VirtualKey::from_char('Q')?,
        KeyCode::KeyR => VirtualKey::from_char('R')?,
        KeyCode::KeyS => VirtualKey::from_char('S')?,
        KeyCode::KeyT => VirtualKey::from_char('T')?,
        KeyCode::KeyU => VirtualKey::from_char('U')?,
        KeyCode::KeyV => VirtualKey::from_char('V')?,
        KeyCode::KeyW => VirtualKey::from_char('W')?,
        KeyCode::KeyX => VirtualKey::from_char('X')?,
        KeyCode::KeyY => VirtualKey::from_char('Y')?,
        KeyCode::KeyZ => VirtualKey::from_char('Z')?,

        KeyCode::Numpad0 => VirtualKey::numpad(0)?,
        KeyCode::Numpad1 => VirtualKey::numpad(1)?,
        KeyCode::Numpad2 => VirtualKey::numpad(2)?,
        KeyCode::Numpad3 => VirtualKey::numpad(3)?,
        KeyCode::Numpad4 => VirtualKey::numpad(4)?,
        KeyCode::Numpad5 => VirtualKey::numpad(5)?,
        KeyCode::Numpad6 => VirtualKey::numpad(6)?,
        KeyCode::Numpad7 => VirtualKey::numpad(7)?,
        KeyCode::Numpad8 => VirtualKey::numpad(8)?,
        KeyCode::Numpad9 => VirtualKey::numpad(9)?,
        KeyCode::NumpadMultiply => VirtualKey::NUMPAD_MULTIPLY,
        KeyCode::NumpadAdd => VirtualKey::NUMPAD_ADD,
        KeyCode::NumpadSubtract => VirtualKey::NUMPAD_SUBTRACT,
        KeyCode::NumpadDecimal => VirtualKey::NUMPAD_DECIMAL,
        KeyCode::NumpadDivide => VirtualKey::NUMPAD_DIVIDE,

        KeyCode::F1 => VirtualKey::function(1)?,
        KeyCode::F2 => VirtualKey::function(2)?,
        KeyCode::F3 => VirtualKey::function(3)?,
        KeyCode::F4 => VirtualKey::function(4)?,
        KeyCode::F5 => VirtualKey::function(5)?,
        KeyCode::F6 => VirtualKey::function(6)?,
        KeyCode::F7 => VirtualKey::function(7)?,
        KeyCode::F8 => VirtualKey::function(8)?,
        KeyCode::F9 => VirtualKey::function(9)?,
        KeyCode::F10 => VirtualKey::function(10)?,
        KeyCode::F11 => VirtualKey::function(11)?,
        KeyCode::F12 => VirtualKey::function(12)?,

        KeyCode::NumLock => VirtualKey::NUM_LOCK,
        KeyCode::ScrollLock => VirtualKey::SCROLL_LOCK,

        KeyCode::Semicolon => VirtualKey::SEMICOLON,
        KeyCode::Equal => VirtualKey::EQUAL,
        KeyCode::Comma => VirtualKey::COMMA,
        KeyCode::Minus => VirtualKey::MINUS,
        KeyCode::Period => VirtualKey::PERIOD,
        KeyCode::Slash => VirtualKey::SLASH,
        KeyCode::Backquote => VirtualKey::BACKQUOTE,
        KeyCode::BracketLeft => VirtualKey::BRACKET_LEFT,
        KeyCode::Backslash => VirtualKey::BACKSLASH,
        KeyCode::BracketRight => VirtualKey::BRACKET_RIGHT,
        KeyCode::Quote => VirtualKey::QUOTE,

        _ => return None,
    };

    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(fullscreen: bool) -> PointerMapping {
        PointerMapping {
            buffer: PhysicalSize::new(320, 200),
            window: PhysicalSize::new(1920, 1080),
            fullscreen,
        }
    }

    // ── pointer ───────────────────────────────────────────────────────────

    #[test]
    fn windowed_positions_pass_through() {
        let m = mapping(false);
        assert_eq!(m.to_buffer(PhysicalPosition::new(100.7, 50.2)), (100, 50));
    }

    #[test]
    fn fullscreen_positions_rescale_to_buffer() {
        let m = mapping(true);
        assert_eq!(m.to_buffer(PhysicalPosition::new(960.0, 540.0)), (160, 100));
        assert_eq!(m.to_buffer(PhysicalPosition::new(0.0, 0.0)), (0, 0));
        assert_eq!(m.to_buffer(PhysicalPosition::new(1919.0, 1079.0)), (319, 199));
    }

    #[test]
    fn fullscreen_with_degenerate_window_passes_through() {
        let m = PointerMapping {
            window: PhysicalSize::new(0, 0),
            ..mapping(true)
        };
        assert_eq!(m.to_buffer(PhysicalPosition::new(12.0, 34.0)), (12, 34));
    }

    // ── keys ──────────────────────────────────────────────────────────────

    #[test]
    fn letters_and_digits_use_ascii_codes() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyV)), VirtualKey::from_char('V'));
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyA)).map(VirtualKey::code), Some(0x41));
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Digit7)).map(VirtualKey::code), Some(0x37));
    }

    #[test]
    fn control_keys_use_virtual_key_table() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Escape)), Some(VirtualKey::ESCAPE));
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Space)), Some(VirtualKey::SPACE));
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::ShiftRight)), Some(VirtualKey::SHIFT));
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::F5)).map(VirtualKey::code), Some(0x74));
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Numpad3)).map(VirtualKey::code), Some(0x63));
    }

    #[test]
    fn unmapped_keys_are_dropped() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::AudioVolumeUp)), None);
    }

    #[test]
    fn extra_mouse_buttons_are_dropped() {
        assert_eq!(map_mouse_button(WinitMouseButton::Back), None);
        assert_eq!(map_mouse_button(WinitMouseButton::Middle), Some(MouseButton::Middle));
    }
}
