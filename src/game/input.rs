//! Input State
//!
//! The simulation consumes an abstracted pressed/released key snapshot with
//! four logical keys. Raw capture (DOM events, gamepads, terminals) is the
//! caller's concern; this module only translates key names and holds state.

use serde::{Deserialize, Serialize};

/// Logical keys understood by the hero controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    /// Walk left.
    Left,
    /// Walk right.
    Right,
    /// Jump (only acts while grounded).
    Jump,
    /// Run modifier (doubles animation speed and walk speed).
    Shift,
}

impl Key {
    /// Map a physical key name (case-insensitive) to a logical key.
    ///
    /// Recognizes the same bindings as the original game: `h`/`ArrowLeft`,
    /// `l`/`ArrowRight`, space, and `Shift`. Returns `None` for anything else.
    pub fn from_key_name(name: &str) -> Option<Key> {
        match name.to_ascii_lowercase().as_str() {
            "h" | "arrowleft" => Some(Key::Left),
            "l" | "arrowright" => Some(Key::Right),
            " " | "space" => Some(Key::Jump),
            "shift" => Some(Key::Shift),
            _ => None,
        }
    }
}

/// Pressed/released snapshot of all logical keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyState {
    /// Left is held.
    pub left: bool,
    /// Right is held.
    pub right: bool,
    /// Jump is held.
    pub jump: bool,
    /// Shift is held.
    pub shift: bool,
}

impl KeyState {
    /// Create a snapshot with no keys pressed.
    pub const fn new() -> Self {
        Self {
            left: false,
            right: false,
            jump: false,
            shift: false,
        }
    }

    /// Record a key-down (`pressed = true`) or key-up event.
    pub fn set(&mut self, key: Key, pressed: bool) {
        match key {
            Key::Left => self.left = pressed,
            Key::Right => self.right = pressed,
            Key::Jump => self.jump = pressed,
            Key::Shift => self.shift = pressed,
        }
    }

    /// Focus-lost signal: treat every key as released.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// True if any key is held.
    #[inline]
    pub fn any_pressed(&self) -> bool {
        self.left || self.right || self.jump || self.shift
    }
}
