#![forbid(unsafe_code)]

//! Canonical keyboard event types.
//!
//! The sidebar only reacts to the keyboard, so this module carries key
//! events plus the small amount of host context a handler needs to decide
//! whether an event is its business: did it land inside the tree region,
//! and did it come from a secondary action control (a button rendered on
//! a row).
//!
//! # Design Notes
//!
//! - `KeyEventKind` defaults to `Press` when the host cannot tell
//! - `Modifiers` use bitflags for easy combination
//! - Hosts that report keys by name (`"ArrowLeft"`, `" "`) go through
//!   [`KeyCode::from_key_name`]; unknown or empty names become
//!   [`KeyCode::Null`]

use bitflags::bitflags;

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Build a key event from a host key name such as `"Enter"` or `"ArrowLeft"`.
    #[must_use]
    pub fn from_key_name(name: &str) -> Self {
        Self::new(KeyCode::from_key_name(name))
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }


    /// Whether the host reported a key at all.
    #[must_use]
    pub const fn has_key(&self) -> bool {
        !matches!(self.code, KeyCode::Null)
    }





    /// Check if any modifier is held.
    #[must_use]
    pub const fn has_modifiers(&self) -> bool {
        !self.modifiers.is_empty()
    }

    /// Whether this is a fresh key press (not auto-repeat, not release).
    #[must_use]
    pub const fn is_press(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key. Space is `Char(' ')`.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Backspace key.
    Backspace,

    /// Tab key.
    Tab,

    /// Delete key.
    Delete,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Page Up key.
    PageUp,

    /// Page Down key.
    PageDown,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,

    /// Function key (F1-F24).
    F(u8),

    /// The host reported no usable key.
    Null,
}

impl KeyCode {
    /// Map a host key name (the `KeyboardEvent.key` vocabulary) to a key code.
    ///
    /// Single characters map to [`KeyCode::Char`]; anything unrecognized,
    /// including the empty string, maps to [`KeyCode::Null`].
    #[must_use]
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            "Backspace" => Self::Backspace,
            "Tab" => Self::Tab,
            "Delete" => Self::Delete,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "ArrowUp" | "Up" => Self::Up,
            "ArrowDown" | "Down" => Self::Down,
            "ArrowLeft" | "Left" => Self::Left,
            "ArrowRight" | "Right" => Self::Right,
            "Spacebar" => Self::Char(' '),
            _ => {
                if let Some(n) = name.strip_prefix('F')
                    && let Ok(n) = n.parse::<u8>()
                    && (1..=24).contains(&n)
                {
                    return Self::F(n);
                }
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Null,
                }
            }
        }
    }
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// Where a key event landed, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventTarget {
    /// The target is inside the tree region (or contains it).
    pub within_region: bool,

    /// The target is a secondary action control on a row.
    pub is_action: bool,
}

impl EventTarget {
    /// A plain target inside the tree region.
    pub const INSIDE: Self = Self {
        within_region: true,
        is_action: false,
    };

    /// A target outside the tree region.
    pub const OUTSIDE: Self = Self {
        within_region: false,
        is_action: false,
    };

    /// An action control inside the tree region.
    pub const ACTION: Self = Self {
        within_region: true,
        is_action: true,
    };
}

impl Default for EventTarget {
    fn default() -> Self {
        Self::INSIDE
    }
}

/// A key event together with the target it was delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetedKeyEvent {
    /// The key itself.
    pub key: KeyEvent,

    /// Where it landed.
    pub target: EventTarget,
}

impl TargetedKeyEvent {
    /// A key event delivered inside the tree region.
    #[must_use]
    pub const fn new(key: KeyEvent) -> Self {
        Self {
            key,
            target: EventTarget::INSIDE,
        }
    }

    /// Override the event target.
    #[must_use]
    pub const fn with_target(mut self, target: EventTarget) -> Self {
        self.target = target;
        self
    }
}

impl From<KeyEvent> for TargetedKeyEvent {
    fn from(key: KeyEvent) -> Self {
        Self::new(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_kind() {
        let press = KeyEvent::new(KeyCode::Enter);
        assert!(press.is_press());
        assert!(!press.has_modifiers());

        assert!(!press.with_kind(KeyEventKind::Repeat).is_press());
        assert!(!press.with_kind(KeyEventKind::Release).is_press());
        assert!(press.with_modifiers(Modifiers::CTRL | Modifiers::SHIFT).has_modifiers());
    }

    #[test]
    fn key_names_map_to_codes() {
        assert_eq!(KeyCode::from_key_name("Enter"), KeyCode::Enter);
        assert_eq!(KeyCode::from_key_name(" "), KeyCode::Char(' '));
        assert_eq!(KeyCode::from_key_name("ArrowLeft"), KeyCode::Left);
        assert_eq!(KeyCode::from_key_name("ArrowRight"), KeyCode::Right);
        assert_eq!(KeyCode::from_key_name("a"), KeyCode::Char('a'));
        assert_eq!(KeyCode::from_key_name("F5"), KeyCode::F(5));
    }

    #[test]
    fn empty_or_unknown_key_name_is_null() {
        assert_eq!(KeyCode::from_key_name(""), KeyCode::Null);
        assert_eq!(KeyCode::from_key_name("Unidentified"), KeyCode::Null);
        assert!(!KeyEvent::from_key_name("").has_key());
        assert!(KeyEvent::from_key_name("Enter").has_key());
    }

    #[test]
    fn targeted_event_defaults_inside() {
        let event = TargetedKeyEvent::from(KeyEvent::new(KeyCode::Left));
        assert_eq!(event.target, EventTarget::INSIDE);
        let event = event.with_target(EventTarget::ACTION);
        assert!(event.target.is_action);
        assert!(event.target.within_region);
    }

    #[test]
    fn modifiers_default() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }

    #[test]
    fn key_event_kind_default() {
        assert_eq!(KeyEventKind::default(), KeyEventKind::Press);
    }
}
