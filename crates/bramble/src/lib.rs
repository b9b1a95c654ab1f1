#![forbid(unsafe_code)]

//! Bramble: the interaction core of a mind-mapping editor.
//!
//! This facade re-exports the public API of the workspace crates:
//!
//! - [`core`] — geometry and canonical input types
//! - [`doc`] — the node tree store, undo history, serialization
//! - [`interact`] — the editor facade, gestures, EasyMotion
//!
//! Most embedders only need [`Editor`] plus a [`TextMeasurer`]:
//!
//! ```
//! use bramble::{Editor, MonospaceMeasurer};
//!
//! let mut editor = Editor::new(Box::new(MonospaceMeasurer));
//! let root = editor.add_root("Idea", 0.0, 0.0);
//! editor.exit_edit_mode();
//! assert_eq!(editor.selected(), Some(root));
//! ```

pub use bramble_core as core;
pub use bramble_doc as doc;
pub use bramble_interact as interact;

pub use bramble_core::event::{Key, KeyInput, Modifiers};
pub use bramble_core::geometry::{Point, Rect};
pub use bramble_doc::file::{CURRENT_FORMAT_VERSION, LoadError, MapFile};
pub use bramble_doc::measure::{Extent, MonospaceMeasurer, NodeStyle, TextMeasurer};
pub use bramble_doc::node::{MIN_NODE_WIDTH, Node, NodeId};
pub use bramble_doc::share::{decode_share, encode_share};
pub use bramble_doc::store::{Camera, MapMeta, NodeStore, StructuralViolation};
pub use bramble_doc::subscribe::{ChangeEvent, ChangeKind, SubscriptionId};
pub use bramble_interact::{Editor, EditorCommand, Keymap, MoveDirection, REPARENT_RADIUS};
