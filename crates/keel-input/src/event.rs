//! Input event records.
//!
//! An [`EventRecord`] is a timestamp plus an [`InputEvent`] payload. Records
//! are plain `Copy` data: the queue moves them by value and never mutates
//! one after it has been pushed.

use std::fmt;

/// Two-component float vector for pointer positions and deltas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Construct from components.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Mouse button identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Wheel button.
    Middle,
    /// Any additional button, numbered by the platform.
    Other(u8),
}

/// Opaque, platform-neutral key code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyCode(pub u16);

/// Input event payload.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// A mouse button was pressed.
    MouseDown {
        /// Which button.
        button: MouseButton,
        /// Pointer position in window coordinates.
        position: Vec2,
    },
    /// A mouse button was released.
    MouseUp {
        /// Which button.
        button: MouseButton,
        /// Pointer position in window coordinates.
        position: Vec2,
    },
    /// The pointer moved to an absolute position.
    MouseMove {
        /// Pointer position in window coordinates.
        position: Vec2,
    },
    /// Raw relative pointer motion, unaffected by acceleration or clipping.
    MouseMoveDelta {
        /// Motion since the previous delta event.
        delta: Vec2,
    },
    /// Scroll wheel or trackpad scroll.
    Wheel {
        /// Scroll amount on each axis.
        delta: Vec2,
    },
    /// A key went down.
    KeyDown {
        /// Which key.
        key: KeyCode,
    },
    /// Auto-repeat of a held key.
    KeyRepeat {
        /// Which key.
        key: KeyCode,
    },
    /// A key was released.
    KeyUp {
        /// Which key.
        key: KeyCode,
    },
    /// Text input, after keyboard layout translation.
    CharInput {
        /// The produced character.
        ch: char,
    },
    /// The window's client area changed size.
    WindowResize {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
    /// The window moved on screen.
    WindowMove {
        /// New top-left position in screen coordinates.
        position: Vec2,
    },
    /// The window gained focus.
    Activate,
    /// The window lost focus.
    Deactivate,
}

/// Payload-free tag for [`InputEvent`] variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum EventKind {
    MouseDown,
    MouseUp,
    MouseMove,
    MouseMoveDelta,
    Wheel,
    KeyDown,
    KeyRepeat,
    KeyUp,
    CharInput,
    WindowResize,
    WindowMove,
    Activate,
    Deactivate,
}

impl EventKind {
    /// Pointer and wheel events.
    pub fn is_mouse(self) -> bool {
        matches!(
            self,
            Self::MouseDown | Self::MouseUp | Self::MouseMove | Self::MouseMoveDelta | Self::Wheel
        )
    }

    /// Key and text events.
    pub fn is_keyboard(self) -> bool {
        matches!(
            self,
            Self::KeyDown | Self::KeyRepeat | Self::KeyUp | Self::CharInput
        )
    }

    /// Window geometry and focus events.
    pub fn is_window(self) -> bool {
        matches!(
            self,
            Self::WindowResize | Self::WindowMove | Self::Activate | Self::Deactivate
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MouseDown => "mouse_down",
            Self::MouseUp => "mouse_up",
            Self::MouseMove => "mouse_move",
            Self::MouseMoveDelta => "mouse_move_delta",
            Self::Wheel => "wheel",
            Self::KeyDown => "key_down",
            Self::KeyRepeat => "key_repeat",
            Self::KeyUp => "key_up",
            Self::CharInput => "char_input",
            Self::WindowResize => "window_resize",
            Self::WindowMove => "window_move",
            Self::Activate => "activate",
            Self::Deactivate => "deactivate",
        };
        f.write_str(name)
    }
}

impl InputEvent {
    /// The variant tag.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::MouseDown { .. } => EventKind::MouseDown,
            Self::MouseUp { .. } => EventKind::MouseUp,
            Self::MouseMove { .. } => EventKind::MouseMove,
            Self::MouseMoveDelta { .. } => EventKind::MouseMoveDelta,
            Self::Wheel { .. } => EventKind::Wheel,
            Self::KeyDown { .. } => EventKind::KeyDown,
            Self::KeyRepeat { .. } => EventKind::KeyRepeat,
            Self::KeyUp { .. } => EventKind::KeyUp,
            Self::CharInput { .. } => EventKind::CharInput,
            Self::WindowResize { .. } => EventKind::WindowResize,
            Self::WindowMove { .. } => EventKind::WindowMove,
            Self::Activate => EventKind::Activate,
            Self::Deactivate => EventKind::Deactivate,
        }
    }
}

/// One timestamped input event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EventRecord {
    /// Platform timestamp in microseconds. Monotonic per producer, but the
    /// queue does not rely on it: order is push order.
    pub timestamp_us: u64,
    /// What happened.
    pub event: InputEvent,
}

impl EventRecord {
    /// Pair an event with its timestamp.
    pub const fn new(timestamp_us: u64, event: InputEvent) -> Self {
        Self {
            timestamp_us,
            event,
        }
    }

    /// Shorthand for `self.event.kind()`.
    pub fn kind(&self) -> EventKind {
        self.event.kind()
    }
}
