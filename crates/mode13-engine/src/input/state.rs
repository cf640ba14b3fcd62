use super::types::{
    ButtonState, InputEvent, KEY_COUNT, MOUSE_BUTTON_COUNT, MouseButton, VirtualKey,
};

/// Input captured at one point in time.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Pointer position in frame-buffer pixels.
    pub mouse: (i32, i32),
    buttons: [bool; MOUSE_BUTTON_COUNT],
    keys: [bool; KEY_COUNT],
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            mouse: (0, 0),
            buttons: [false; MOUSE_BUTTON_COUNT],
            keys: [false; KEY_COUNT],
        }
    }
}

impl InputSnapshot {
    #[inline]
    pub fn button(&self, button: MouseButton) -> bool {
        self.buttons[button.index()]
    }

    #[inline]
    pub fn key(&self, key: VirtualKey) -> bool {
        self.keys[key.index()]
    }

    /// Number of keys currently held.
    pub fn keys_down(&self) -> usize {
        self.keys.iter().filter(|&&k| k).count()
    }
}

/// Input state for the presenter window.
///
/// Holds two snapshots: `current` (mutated by window events as they are
/// drained) and `previous` (a copy of `current` taken at the start of each
/// frame). "Pressed this frame" is `current && !previous`.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    current: InputSnapshot,
    previous: InputSnapshot,
}

impl InputState {
    /// Starts a new frame: `previous` becomes a copy of `current`.
    ///
    /// Must run before the frame's events are applied.
    pub fn begin_frame(&mut self) {
        self.previous = self.current;
    }

    /// Applies a platform-agnostic input event to the current snapshot.
    pub fn apply_event(&mut self, ev: InputEvent) {
        match ev {
            InputEvent::PointerMoved { x, y } => {
                self.current.mouse = (x, y);
            }
            InputEvent::MouseButton { button, state } => {
                self.current.buttons[button.index()] = state.is_pressed();
            }
            InputEvent::Key { key, state } => {
                self.current.keys[key.index()] = state == ButtonState::Pressed;
            }
        }
    }

    #[inline]
    pub fn current(&self) -> &InputSnapshot {
        &self.current
    }

    #[inline]
    pub fn previous(&self) -> &InputSnapshot {
        &self.previous
    }

    // ── mouse ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn mouse_position(&self) -> (i32, i32) {
        self.current.mouse
    }

    #[inline]
    pub fn mouse_position_last_frame(&self) -> (i32, i32) {
        self.previous.mouse
    }

    #[inline]
    pub fn mouse_button(&self, button: MouseButton) -> bool {
        self.current.button(button)
    }

    #[inline]
    pub fn mouse_button_last_frame(&self, button: MouseButton) -> bool {
        self.previous.button(button)
    }

    /// Index-based query (`0 = left, 1 = right, 2 = middle`); other indices read `false`.
    pub fn mouse_button_index(&self, index: i32) -> bool {
        MouseButton::from_index(index).is_some_and(|b| self.mouse_button(b))
    }

    pub fn mouse_button_index_last_frame(&self, index: i32) -> bool {
        MouseButton::from_index(index).is_some_and(|b| self.mouse_button_last_frame(b))
    }

    /// Button went down since the previous frame.
    #[inline]
    pub fn mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_button(button) && !self.mouse_button_last_frame(button)
    }

    // ── keyboard ──────────────────────────────────────────────────────────

    #[inline]
    pub fn key(&self, key: VirtualKey) -> bool {
        self.current.key(key)
    }

    #[inline]
    pub fn key_last_frame(&self, key: VirtualKey) -> bool {
        self.previous.key(key)
    }

    /// Raw virtual-key code query; codes outside `0..256` read `false`.
    pub fn key_code(&self, code: i32) -> bool {
        VirtualKey::from_code(code).is_some_and(|k| self.key(k))
    }

    pub fn key_code_last_frame(&self, code: i32) -> bool {
        VirtualKey::from_code(code).is_some_and(|k| self.key_last_frame(k))
    }

    /// Key went down since the previous frame.
    #[inline]
    pub fn key_pressed(&self, key: VirtualKey) -> bool {
        self.key(key) && !self.key_last_frame(key)
    }
}
