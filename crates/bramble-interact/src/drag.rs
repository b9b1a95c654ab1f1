#![forbid(unsafe_code)]

//! Reparent-target detection for pointer drags.
//!
//! While a node is being dragged, every pointer move re-evaluates which
//! node (if any) would adopt it on drop. A node qualifies when the drop
//! point is inside its bounds or within [`REPARENT_RADIUS`] of them; the
//! dragged node and its descendants never qualify, no matter how close —
//! adopting either would cut a cycle into the forest.

use bramble_core::geometry::Point;
use bramble_doc::node::NodeId;
use bramble_doc::store::NodeStore;

/// How far outside a node's bounds a drop point may land and still count
/// as targeting that node.
pub const REPARENT_RADIUS: f64 = 60.0;

/// Live drag state; exists only between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DragSession {
    /// The node under the pointer when the drag started.
    pub node: NodeId,
    /// Pointer offset from the node's origin at pointer-down, so the node
    /// doesn't jump to put its corner under the cursor.
    pub grab_dx: f64,
    pub grab_dy: f64,
    /// Current drop target, recomputed on every move.
    pub target: Option<NodeId>,
}

/// Find the reparent target for a drop at `pointer`.
///
/// Candidates are visible nodes other than `dragged` and its descendants
/// whose bounds lie within [`REPARENT_RADIUS`] of the pointer. Among
/// qualifying candidates the one whose center is closest to the pointer
/// wins.
#[must_use]
pub fn reparent_candidate(store: &NodeStore, dragged: NodeId, pointer: Point) -> Option<NodeId> {
    let mut best: Option<(NodeId, f64)> = None;
    for node in store.visible_nodes() {
        if node.id == dragged || store.is_descendant(node.id, dragged) {
            continue;
        }
        if node.rect().distance_to(pointer) > REPARENT_RADIUS {
            continue;
        }
        let centrality = node.center().distance(pointer);
        if best.is_none_or(|(_, current)| centrality < current) {
            best = Some((node.id, centrality));
        }
    }
    best.map(|(id, _)| id)
}
