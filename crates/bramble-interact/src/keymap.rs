#![forbid(unsafe_code)]

//! The keyboard dispatch table.
//!
//! Bindings map a `(key, modifier set)` pair to an [`EditorCommand`]; the
//! editor looks incoming presses up here and never pattern-matches raw
//! keys itself. Because the table is plain data, tests and scripted
//! harnesses drive the editor exactly the way a real keyboard layer does.

use bramble_core::event::{Key, KeyInput, Modifiers};

use crate::structural::MoveDirection;

/// A command the keymap can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    /// Structural move of the selected node (Alt + direction).
    MoveNode(MoveDirection),
    /// Spatial selection change (plain arrows).
    Navigate(MoveDirection),
    Undo,
    Redo,
    /// Named action triggers, dispatched to registered callbacks. The core
    /// treats these as opaque events; it performs no I/O itself.
    Save,
    Open,
    Export,
}

/// Ordered binding table; later entries shadow earlier ones for the same
/// chord.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: Vec<(KeyInput, EditorCommand)>,
}

impl Default for Keymap {
    fn default() -> Self {
        use EditorCommand::*;
        use MoveDirection::*;

        let mut map = Self {
            bindings: Vec::with_capacity(20),
        };

        // Structural moves: Alt + arrows, and Alt + hjkl for vim hands.
        for (key, direction) in [
            (Key::Up, Up),
            (Key::Down, Down),
            (Key::Left, Left),
            (Key::Right, Right),
            (Key::Char('k'), Up),
            (Key::Char('j'), Down),
            (Key::Char('h'), Left),
            (Key::Char('l'), Right),
        ] {
            map.bind(
                KeyInput::new(key).with_modifiers(Modifiers::ALT),
                MoveNode(direction),
            );
        }

        // Plain arrows walk the map spatially.
        for (key, direction) in [
            (Key::Up, Up),
            (Key::Down, Down),
            (Key::Left, Left),
            (Key::Right, Right),
        ] {
            map.bind(KeyInput::new(key), Navigate(direction));
        }

        map.bind(
            KeyInput::new(Key::Char('z')).with_modifiers(Modifiers::META),
            Undo,
        );
        map.bind(
            KeyInput::new(Key::Char('z')).with_modifiers(Modifiers::META | Modifiers::SHIFT),
            Redo,
        );
        map.bind(
            KeyInput::new(Key::Char('s')).with_modifiers(Modifiers::META),
            Save,
        );
        map.bind(
            KeyInput::new(Key::Char('o')).with_modifiers(Modifiers::META),
            Open,
        );
        map.bind(
            KeyInput::new(Key::Char('e')).with_modifiers(Modifiers::META | Modifiers::SHIFT),
            Export,
        );

        map
    }
}

impl Keymap {
    /// An empty keymap with no bindings.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Bind a chord, replacing any existing binding for it.
    pub fn bind(&mut self, input: KeyInput, command: EditorCommand) {
        self.bindings.retain(|(bound, _)| *bound != input);
        self.bindings.push((input, command));
    }

    /// Remove a binding. Returns whether one existed.
    pub fn unbind(&mut self, input: KeyInput) -> bool {
        let before = self.bindings.len();
        self.bindings.retain(|(bound, _)| *bound != input);
        self.bindings.len() != before
    }

    /// Look up the command for a chord. Modifiers must match exactly.
    #[must_use]
    pub fn lookup(&self, input: KeyInput) -> Option<EditorCommand> {
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == input)
            .map(|(_, command)| *command)
    }
}
