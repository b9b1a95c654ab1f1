#![forbid(unsafe_code)]

//! Canonical keyboard input types.
//!
//! The editor core never sees raw platform events. The translation layer
//! (out of scope) converts whatever the host delivers into [`KeyInput`],
//! and the keymap dispatches on that. Keeping the type here means tests,
//! a browser shell, and a scripted harness all drive the core identically.

use bitflags::bitflags;

/// Keys the editor core dispatches on.
///
/// This is deliberately the small set the default keymap binds, not a full
/// keyboard model; unknown keys simply never match a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character key (lowercased by the translation layer).
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Backspace,
    Tab,
}

bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const NONE  = 0b0000;
        const SHIFT = 0b0001;
        /// Alt/Option.
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
        /// Super/Meta/Command.
        const META  = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A single key press with its modifier set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyInput {
    /// Create a key press without modifiers.
    #[must_use]
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Attach modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if Alt/Option is held.
    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// Check if Super/Meta/Command is held.
    #[must_use]
    pub const fn meta(&self) -> bool {
        self.modifiers.contains(Modifiers::META)
    }

    /// Check if Shift is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

#[cfg(test)]
mod tests {
    use super::{Key, KeyInput, Modifiers};

    #[test]
    fn key_input_defaults_to_no_modifiers() {
        let input = KeyInput::new(Key::Enter);
        assert_eq!(input.modifiers, Modifiers::NONE);
        assert!(!input.alt());
        assert!(!input.meta());
        assert!(!input.shift());
    }

    #[test]
    fn key_input_modifier_queries() {
        let input =
            KeyInput::new(Key::Char('s')).with_modifiers(Modifiers::META | Modifiers::SHIFT);
        assert!(input.meta());
        assert!(input.shift());
        assert!(!input.alt());
    }

    #[test]
    fn modifiers_combine() {
        let mods = Modifiers::ALT | Modifiers::CTRL;
        assert!(mods.contains(Modifiers::ALT));
        assert!(mods.contains(Modifiers::CTRL));
        assert!(!mods.contains(Modifiers::META));
    }

    #[test]
    fn key_input_equality_includes_modifiers() {
        let plain = KeyInput::new(Key::Up);
        let alt = KeyInput::new(Key::Up).with_modifiers(Modifiers::ALT);
        assert_ne!(plain, alt);
        assert_eq!(alt, KeyInput::new(Key::Up).with_modifiers(Modifiers::ALT));
    }
}
