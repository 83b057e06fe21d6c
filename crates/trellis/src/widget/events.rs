//! Input events routed to widgets.
//!
//! The canvas turns driver input into [`WidgetEvent`]s and delivers each one
//! to exactly one target: keyboard events go to the focused widget, taps go
//! to the widget that was tapped.

/// A named key.
///
/// Only keys with widget-level meaning are named here. Printable input
/// arrives separately as [`WidgetEvent::TypedRune`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// The main Return key.
    Return,
    /// The keypad Enter key.
    Enter,
    Space,
    Tab,
    Escape,

    // Navigation
    Left,
    Right,
    Up,
    Down,
    Home,
    End,

    // Editing
    Backspace,
    Delete,
}

impl Key {
    /// Keys that activate the current item: Return, Enter and Space.
    #[inline]
    pub fn is_activation(self) -> bool {
        matches!(self, Key::Return | Key::Enter | Key::Space)
    }

    /// Keys that move towards the start of a sequence.
    #[inline]
    pub fn is_backward(self) -> bool {
        matches!(self, Key::Left | Key::Up)
    }

    /// Keys that move towards the end of a sequence.
    #[inline]
    pub fn is_forward(self) -> bool {
        matches!(self, Key::Right | Key::Down)
    }
}

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };
}

/// A key press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: KeyboardModifiers,
}

impl KeyEvent {
    /// A key event with no modifiers held.
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    pub const fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

impl From<Key> for KeyEvent {
    fn from(key: Key) -> Self {
        Self::new(key)
    }
}

/// An event delivered to a single widget.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// The widget became the canvas's focused widget.
    FocusGained,
    /// The widget stopped being the canvas's focused widget.
    FocusLost,
    /// A named key was typed (pressed and released).
    TypedKey(KeyEvent),
    /// A character was typed.
    TypedRune(char),
    /// A key went down.
    KeyDown(KeyEvent),
    /// A key came up.
    KeyUp(KeyEvent),
    /// The widget was tapped or clicked.
    Tapped,
}

impl WidgetEvent {
    /// Whether this event is only ever sent to the focused widget.
    pub fn is_keyboard(&self) -> bool {
        matches!(
            self,
            WidgetEvent::TypedKey(_)
                | WidgetEvent::TypedRune(_)
                | WidgetEvent::KeyDown(_)
                | WidgetEvent::KeyUp(_)
        )
    }
}
