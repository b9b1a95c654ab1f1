#![forbid(unsafe_code)]

//! Keyboard-triggered structural moves.
//!
//! Four moves operate on the selected node, each committed as a single
//! transaction by the editor:
//!
//! - **Reorder** — swap with the adjacent sibling above/below; the two
//!   nodes exchange vertical positions so the drawing tracks the order.
//! - **Overflow** — a boundary child crosses into the parent's adjacent
//!   sibling: first-child-moving-up becomes the previous aunt's last
//!   child, last-child-moving-down becomes the next aunt's first child.
//! - **Outdent** — reinsert immediately after the former parent, one
//!   level shallower.
//! - **Indent** — become the last child of the preceding sibling.
//!
//! Horizontal keys are branch-side aware: on a branch right of its root,
//! rightward motion indents and leftward outdents; branches left of the
//! root invert the mapping, so the same physical key always means the
//! same visual motion. Moves on roots and moves with nowhere to go plan
//! to `None`, which the editor turns into "no transaction at all".

use bramble_core::geometry::Point;
use bramble_doc::history::{EditOp, History};
use bramble_doc::layout::{self, BranchSide};
use bramble_doc::node::NodeId;
use bramble_doc::store::{NodeStore, StoreResult};

/// Direction of a structural move, as the keyboard reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
}

/// What a feasible move will do, resolved against the current tree.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum MovePlan {
    /// Swap with an adjacent sibling and exchange y positions.
    Reorder {
        parent: NodeId,
        node: NodeId,
        from: usize,
        to: usize,
        node_to: Point,
        sibling: NodeId,
        sibling_to: Point,
    },
    /// Move under a different parent at `index`, then sit at `to`.
    Adopt {
        node: NodeId,
        new_parent: NodeId,
        index: usize,
        to: Point,
    },
}

enum Resolved {
    Vertical(VerticalStep),
    Indent,
    Outdent,
}

enum VerticalStep {
    Up,
    Down,
}

fn resolve(store: &NodeStore, id: NodeId, direction: MoveDirection) -> Resolved {
    match direction {
        MoveDirection::Up => Resolved::Vertical(VerticalStep::Up),
        MoveDirection::Down => Resolved::Vertical(VerticalStep::Down),
        MoveDirection::Left | MoveDirection::Right => {
            let side = layout::branch_side(store, id);
            let rightward = direction == MoveDirection::Right;
            match (side, rightward) {
                (BranchSide::Right, true) | (BranchSide::Left, false) => Resolved::Indent,
                (BranchSide::Right, false) | (BranchSide::Left, true) => Resolved::Outdent,
            }
        }
    }
}

/// Resolve a move against the tree. `None` means the move is infeasible
/// (root selected, no neighbour in that direction) and must leave no
/// trace.
pub(crate) fn plan(store: &NodeStore, id: NodeId, direction: MoveDirection) -> Option<MovePlan> {
    let node = store.node(id)?;
    let parent = node.parent?;
    let index = store.children(parent).ok()?.iter().position(|&c| c == id)?;

    match resolve(store, id, direction) {
        Resolved::Vertical(step) => plan_vertical(store, id, parent, index, step),
        Resolved::Indent => {
            if index == 0 {
                return None;
            }
            let prev = store.children(parent).ok()?[index - 1];
            let slot = store.children(prev).ok()?.len();
            Some(MovePlan::Adopt {
                node: id,
                new_parent: prev,
                index: slot,
                to: layout::insert_point(store, prev, slot, node.width, node.height),
            })
        }
        Resolved::Outdent => {
            let grandparent = store.parent(parent).ok()??;
            let parent_index = store
                .children(grandparent)
                .ok()?
                .iter()
                .position(|&c| c == parent)?;
            let slot = parent_index + 1;
            Some(MovePlan::Adopt {
                node: id,
                new_parent: grandparent,
                index: slot,
                to: layout::insert_point(store, grandparent, slot, node.width, node.height),
            })
        }
    }
}

fn plan_vertical(
    store: &NodeStore,
    id: NodeId,
    parent: NodeId,
    index: usize,
    step: VerticalStep,
) -> Option<MovePlan> {
    let siblings = store.children(parent).ok()?;
    let neighbour = match step {
        VerticalStep::Up if index > 0 => Some(siblings[index - 1]),
        VerticalStep::Down if index + 1 < siblings.len() => Some(siblings[index + 1]),
        _ => None,
    };

    if let Some(sibling) = neighbour {
        let node = store.node(id)?;
        let other = store.node(sibling)?;
        let to = match step {
            VerticalStep::Up => index - 1,
            VerticalStep::Down => index + 1,
        };
        return Some(MovePlan::Reorder {
            parent,
            node: id,
            from: index,
            to,
            node_to: Point::new(node.x, other.y),
            sibling,
            sibling_to: Point::new(other.x, node.y),
        });
    }

    // At the boundary: overflow into the parent's adjacent sibling.
    let aunts = match store.parent(parent).ok()? {
        Some(grandparent) => store.children(grandparent).ok()?,
        None => store.roots(),
    };
    let parent_index = aunts.iter().position(|&c| c == parent)?;
    let node = store.node(id)?;
    let (aunt, slot) = match step {
        VerticalStep::Up => {
            if parent_index == 0 {
                return None;
            }
            let aunt = aunts[parent_index - 1];
            (aunt, store.children(aunt).ok()?.len())
        }
        VerticalStep::Down => {
            let aunt = *aunts.get(parent_index + 1)?;
            (aunt, 0)
        }
    };
    Some(MovePlan::Adopt {
        node: id,
        new_parent: aunt,
        index: slot,
        to: layout::insert_point(store, aunt, slot, node.width, node.height),
    })
}

/// Apply a plan through the open transaction.
pub(crate) fn execute(
    store: &mut NodeStore,
    history: &mut History,
    plan: MovePlan,
) -> StoreResult<()> {
    match plan {
        MovePlan::Reorder {
            parent,
            node,
            from,
            to,
            node_to,
            sibling,
            sibling_to,
        } => {
            history.apply(store, EditOp::Reorder { parent, from, to })?;
            history.apply(
                store,
                EditOp::SetPosition {
                    id: node,
                    x: node_to.x,
                    y: node_to.y,
                },
            )?;
            history.apply(
                store,
                EditOp::SetPosition {
                    id: sibling,
                    x: sibling_to.x,
                    y: sibling_to.y,
                },
            )?;
        }
        MovePlan::Adopt {
            node,
            new_parent,
            index,
            to,
        } => {
            history.apply(
                store,
                EditOp::Reparent {
                    id: node,
                    new_parent,
                    index,
                },
            )?;
            history.apply(
                store,
                EditOp::SetPosition {
                    id: node,
                    x: to.x,
                    y: to.y,
                },
            )?;
        }
    }
    Ok(())
}
