#![forbid(unsafe_code)]

//! Node identity and the node record itself.

use bramble_core::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Width floor applied to explicit width resizes.
pub const MIN_NODE_WIDTH: f64 = 60.0;

/// Stable identifier for a node, unique within one store instance.
///
/// Ids are handed out by a counter owned by the [`NodeStore`] they belong
/// to, so two documents never race each other and tests stay independent.
///
/// [`NodeStore`]: crate::store::NodeStore
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl NodeId {
    /// The raw counter value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// A single node in the document forest.
///
/// Other components hold only [`NodeId`]s; the store is the sole owner of
/// `Node` values. `children` order is semantic (sibling order) and survives
/// every structural mutation except an explicit reorder.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    /// `None` for roots.
    pub parent: Option<NodeId>,
    /// Ordered child ids.
    pub children: Vec<NodeId>,
    /// Top-left corner in document space.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub text: String,
    /// Hides descendants from traversal and rendering.
    pub collapsed: bool,
    /// Width was set explicitly; text reflows inside it instead of
    /// auto-fitting.
    pub width_constrained: bool,
}

impl Node {
    /// Top-left origin.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Bounding box.
    #[inline]
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Center of the bounding box.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point {
        self.rect().center()
    }
}
