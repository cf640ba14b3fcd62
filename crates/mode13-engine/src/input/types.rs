use std::fmt;

/// Number of distinct key codes tracked per snapshot.
pub const KEY_COUNT: usize = 256;

/// Number of tracked mouse buttons.
pub const MOUSE_BUTTON_COUNT: usize = 3;

/// Keyboard key identified by its Windows virtual-key code.
///
/// The code space is bounded to `0..256`, so every `VirtualKey` indexes the
/// key tables directly. Raw codes outside that range have no `VirtualKey` and
/// always read as "not pressed".
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct VirtualKey(u8);

impl VirtualKey {
    pub const BACKSPACE: Self = Self(0x08);
    pub const TAB: Self = Self(0x09);
    pub const ENTER: Self = Self(0x0D);
    pub const SHIFT: Self = Self(0x10);
    pub const CONTROL: Self = Self(0x11);
    pub const ALT: Self = Self(0x12);
    pub const PAUSE: Self = Self(0x13);
    pub const CAPS_LOCK: Self = Self(0x14);
    pub const ESCAPE: Self = Self(0x1B);
    pub const SPACE: Self = Self(0x20);
    pub const PAGE_UP: Self = Self(0x21);
    pub const PAGE_DOWN: Self = Self(0x22);
    pub const END: Self = Self(0x23);
    pub const HOME: Self = Self(0x24);
    pub const LEFT: Self = Self(0x25);
    pub const UP: Self = Self(0x26);
    pub const RIGHT: Self = Self(0x27);
    pub const DOWN: Self = Self(0x28);
    pub const PRINT_SCREEN: Self = Self(0x2C);
    pub const INSERT: Self = Self(0x2D);
    pub const DELETE: Self = Self(0x2E);
    pub const LEFT_META: Self = Self(0x5B);
    pub const RIGHT_META: Self = Self(0x5C);
    pub const CONTEXT_MENU: Self = Self(0x5D);
    pub const NUMPAD_MULTIPLY: Self = Self(0x6A);
    pub const NUMPAD_ADD: Self = Self(0x6B);
    pub const NUMPAD_SUBTRACT: Self = Self(0x6D);
    pub const NUMPAD_DECIMAL: Self = Self(0x6E);
    pub const NUMPAD_DIVIDE: Self = Self(0x6F);
    pub const NUM_LOCK: Self = Self(0x90);
    pub const SCROLL_LOCK: Self = Self(0x91);
    pub const SEMICOLON: Self = Self(0xBA);
    pub const EQUAL: Self = Self(0xBB);
    pub const COMMA: Self = Self(0xBC);
    pub const MINUS: Self = Self(0xBD);
    pub const PERIOD: Self = Self(0xBE);
    pub const SLASH: Self = Self(0xBF);
    pub const BACKQUOTE: Self = Self(0xC0);
    pub const BRACKET_LEFT: Self = Self(0xDB);
    pub const BACKSLASH: Self = Self(0xDC);
    pub const BRACKET_RIGHT: Self = Self(0xDD);
    pub const QUOTE: Self = Self(0xDE);

    /// Wraps a raw virtual-key code. `None` outside `0..256`.
    #[inline]
    pub fn from_code(code: i32) -> Option<Self> {
        u8::try_from(code).ok().map(Self)
    }

    /// Key for an ASCII letter or digit (`'A'..='Z'`, `'a'..='z'`, `'0'..='9'`).
    ///
    /// Letters map to their upper-case code, matching the virtual-key table.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'A'..='Z' | '0'..='9' => Some(Self(c as u8)),
            'a'..='z' => Some(Self(c.to_ascii_uppercase() as u8)),
            _ => None,
        }
    }

    /// Function key `F1..=F24`.
    pub const fn function(n: u8) -> Option<Self> {
        match n {
            1..=24 => Some(Self(0x70 + n - 1)),
            _ => None,
        }
    }

    /// Numeric keypad digit `0..=9`.
    pub const fn numpad(n: u8) -> Option<Self> {
        match n {
            0..=9 => Some(Self(0x60 + n)),
            _ => None,
        }
    }

    #[inline]
    pub const fn code(self) -> u8 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<VirtualKey> for i32 {
    fn from(key: VirtualKey) -> Self {
        key.0 as i32
    }
}

impl fmt::Display for VirtualKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            c @ (b'0'..=b'9' | b'A'..=b'Z') => write!(f, "{}", c as char),
            c => write!(f, "VK(0x{c:02X})"),
        }
    }
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub const ALL: [MouseButton; MOUSE_BUTTON_COUNT] =
        [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

    /// Maps `0 = left, 1 = right, 2 = middle`.
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(MouseButton::Left),
            1 => Some(MouseButton::Right),
            2 => Some(MouseButton::Middle),
            _ => None,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

impl ButtonState {
    #[inline]
    pub fn is_pressed(self) -> bool {
        self == ButtonState::Pressed
    }
}

/// Platform-agnostic input events emitted by the window host.
///
/// Pointer coordinates are already in frame-buffer pixel space.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InputEvent {
    PointerMoved { x: i32, y: i32 },
    MouseButton { button: MouseButton, state: ButtonState },
    Key { key: VirtualKey, state: ButtonState },
}
