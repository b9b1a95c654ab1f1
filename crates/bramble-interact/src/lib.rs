#![forbid(unsafe_code)]

//! Interaction layer for Bramble.
//!
//! [`Editor`] is the facade the event-translation layer drives: pointer
//! drags (reposition and reparent), width resize, keyboard structural
//! moves, EasyMotion jump labels, spatial navigation, and undo/redo. Each
//! gesture commits as one transaction against the document crate.
//!
//! # Example
//! ```
//! use bramble_doc::measure::MonospaceMeasurer;
//! use bramble_interact::Editor;
//!
//! let mut editor = Editor::new(Box::new(MonospaceMeasurer));
//! let root = editor.add_root("Root", 0.0, 0.0);
//! editor.exit_edit_mode();
//! let child = editor.add_child(root, "Child").unwrap();
//! editor.exit_edit_mode();
//!
//! // Drag the child 50 to the right; one undo restores it.
//! let origin = editor.node(child).unwrap().x;
//! editor.pointer_down(child, origin + 5.0, 5.0);
//! editor.pointer_move(origin + 55.0, 5.0);
//! editor.pointer_up();
//! assert_eq!(editor.node(child).unwrap().x, origin + 50.0);
//! editor.undo();
//! assert_eq!(editor.node(child).unwrap().x, origin);
//! ```

pub mod drag;
pub mod editor;
pub mod keymap;
pub mod motion;
pub mod structural;

pub use drag::REPARENT_RADIUS;
pub use editor::Editor;
pub use keymap::{EditorCommand, Keymap};
pub use motion::{assign_labels, rank_by_distance};
pub use structural::MoveDirection;
