#![forbid(unsafe_code)]

//! Pure layout helpers over the store: branch sides, attach points, and
//! subtree bounds. No state, no mutation — every function here answers a
//! geometric question about the current tree.

use bramble_core::geometry::{Point, Rect};

use crate::node::NodeId;
use crate::store::NodeStore;

/// Horizontal gap between a parent's far edge and a newly attached child.
pub const CHILD_GAP_X: f64 = 150.0;

/// Vertical gap between stacked siblings.
pub const SIBLING_GAP_Y: f64 = 20.0;

/// Which side of its root a branch occupies.
///
/// Determined by comparing a node's x to its root's; nodes at the same x
/// (including the root itself) count as `Right`, so fresh documents grow
/// rightward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchSide {
    Left,
    Right,
}

/// Side of the root that `id`'s branch occupies.
#[must_use]
pub fn branch_side(store: &NodeStore, id: NodeId) -> BranchSide {
    let (Some(node), Ok(root_id)) = (store.node(id), store.root_of(id)) else {
        return BranchSide::Right;
    };
    let Some(root) = store.node(root_id) else {
        return BranchSide::Right;
    };
    if node.x < root.x {
        BranchSide::Left
    } else {
        BranchSide::Right
    }
}

/// Where a child of `parent` with the given width should sit when appended:
/// offset [`CHILD_GAP_X`] beyond the parent's far edge on the parent's
/// branch side, at the parent's y for a first child, below the last child
/// otherwise.
#[must_use]
pub fn attach_point(store: &NodeStore, parent: NodeId, child_width: f64) -> Point {
    let index = store
        .node(parent)
        .map_or(0, |node| node.children.len());
    insert_point(store, parent, index, child_width, 0.0)
}

/// Where a child of `parent` should sit when spliced in at `index`:
/// the same horizontal offset as [`attach_point`], vertically between the
/// siblings it lands among (above the first when `index` is 0).
#[must_use]
pub fn insert_point(
    store: &NodeStore,
    parent: NodeId,
    index: usize,
    child_width: f64,
    child_height: f64,
) -> Point {
    let Some(parent_node) = store.node(parent) else {
        return Point::default();
    };
    let x = match branch_side(store, parent) {
        BranchSide::Right => parent_node.rect().right() + CHILD_GAP_X,
        BranchSide::Left => parent_node.x - CHILD_GAP_X - child_width,
    };
    let children = &parent_node.children;
    let y = if children.is_empty() {
        parent_node.y
    } else if index == 0 {
        store
            .node(children[0])
            .map_or(parent_node.y, |first| first.y - SIBLING_GAP_Y - child_height)
    } else {
        let before = children[(index - 1).min(children.len() - 1)];
        store
            .node(before)
            .map_or(parent_node.y, |prev| prev.y + prev.height + SIBLING_GAP_Y)
    };
    Point::new(x, y)
}

/// Bounding box of `id`'s whole subtree, or `None` for an unknown id.
#[must_use]
pub fn subtree_rect(store: &NodeStore, id: NodeId) -> Option<Rect> {
    let members = store.subtree_ids(id).ok()?;
    let mut bounds: Option<Rect> = None;
    for member in members {
        let rect = store.node(member)?.rect();
        bounds = Some(match bounds {
            Some(acc) => acc.union(&rect),
            None => rect,
        });
    }
    bounds
}
