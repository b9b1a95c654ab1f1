#![forbid(unsafe_code)]

//! Document model for Bramble.
//!
//! This crate owns everything that is "the document": the node forest and
//! its mutation primitives ([`NodeStore`]), the undo/redo transaction log
//! ([`History`]), layout helpers, the injected text-measurement seam
//! ([`TextMeasurer`]), change subscriptions, the versioned file format,
//! and the URL share codec.
//!
//! # Example
//! ```
//! use bramble_doc::measure::MonospaceMeasurer;
//! use bramble_doc::store::NodeStore;
//! use bramble_doc::history::{EditOp, History};
//!
//! let mut store = NodeStore::new(Box::new(MonospaceMeasurer));
//! let mut history = History::new();
//! let root = store.add_root("Root", 0.0, 0.0);
//!
//! history.begin("move");
//! history
//!     .apply(&mut store, EditOp::SetPosition { id: root, x: 50.0, y: 0.0 })
//!     .unwrap();
//! assert!(history.commit());
//!
//! history.undo(&mut store);
//! assert_eq!(store.node(root).unwrap().x, 0.0);
//! ```

pub mod file;
pub mod history;
pub mod layout;
pub mod measure;
pub mod node;
pub mod share;
pub mod store;
pub mod subscribe;

pub use file::{CURRENT_FORMAT_VERSION, LoadError, MapFile};
pub use history::{EditOp, History};
pub use measure::{Extent, MonospaceMeasurer, NodeStyle, TextMeasurer};
pub use node::{MIN_NODE_WIDTH, Node, NodeId};
pub use share::{decode_share, encode_share};
pub use store::{Camera, MapMeta, NodeStore, StructuralViolation};
pub use subscribe::{ChangeEvent, ChangeKind, Subscribers, SubscriptionId};
