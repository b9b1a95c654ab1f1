#![forbid(unsafe_code)]

//! Undoable transactions over store primitives.
//!
//! A transaction wraps one or more primitive calls into a single history
//! entry with a begin/commit/cancel lifecycle. Mutations apply immediately
//! (a drag is visibly live mid-gesture); what the transaction accumulates
//! is an inverse-operation log — the minimal per-primitive delta needed to
//! reverse and replay it — never a whole-tree snapshot.
//!
//! # Invariants
//!
//! 1. At most one transaction is open at a time. Nested `begin` is a
//!    caller error (debug-asserted, logged, and ignored in release).
//! 2. A committed transaction whose net effect is identity leaves no
//!    history entry.
//! 3. `undo` exactly reverses the newest entry; `redo` replays the newest
//!    undone entry; committing anything new discards the redo chain.
//! 4. Failed primitives record nothing: the log only ever holds deltas
//!    that were actually applied.

use bramble_core::geometry::Point;
use tracing::{debug, warn};

use crate::node::{Node, NodeId};
use crate::store::{NodeStore, StoreResult};

// ---------------------------------------------------------------------------
// Forward operations
// ---------------------------------------------------------------------------

/// A primitive mutation routed through the history engine.
///
/// Each variant maps onto one store primitive; applying it inside an open
/// transaction records the delta needed to undo it.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOp {
    AddRoot { text: String, x: f64, y: f64 },
    AddChild { parent: NodeId, text: String },
    Remove { id: NodeId },
    SetPosition { id: NodeId, x: f64, y: f64 },
    SetSize { id: NodeId, width: f64, height: f64 },
    SetText { id: NodeId, text: String },
    SetCollapsed { id: NodeId, collapsed: bool },
    /// Explicit width resize: clamps, reflows, and marks the node
    /// width-constrained.
    ConstrainWidth { id: NodeId, width: f64 },
    Reparent { id: NodeId, new_parent: NodeId, index: usize },
    Reorder { parent: NodeId, from: usize, to: usize },
}

// ---------------------------------------------------------------------------
// Recorded deltas
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
struct SizeState {
    width: f64,
    height: f64,
    width_constrained: bool,
}

fn size_state(store: &NodeStore, id: NodeId) -> StoreResult<SizeState> {
    let node = store.get(id)?;
    Ok(SizeState {
        width: node.width,
        height: node.height,
        width_constrained: node.width_constrained,
    })
}

/// One applied primitive, with enough context to reverse or replay it.
#[derive(Debug, Clone)]
enum OpRecord {
    Insert {
        parent: Option<NodeId>,
        index: usize,
        nodes: Vec<Node>,
    },
    Remove {
        parent: Option<NodeId>,
        index: usize,
        nodes: Vec<Node>,
    },
    Position {
        id: NodeId,
        from: Point,
        to: Point,
    },
    Size {
        id: NodeId,
        from: SizeState,
        to: SizeState,
    },
    Text {
        id: NodeId,
        from: (String, SizeState),
        to: (String, SizeState),
    },
    Collapsed {
        id: NodeId,
        from: bool,
        to: bool,
    },
    Moved {
        id: NodeId,
        from: (Option<NodeId>, usize),
        to: (Option<NodeId>, usize),
    },
    Reorder {
        parent: NodeId,
        from: usize,
        to: usize,
    },
}

impl OpRecord {
    /// Whether the record's net effect is identity.
    fn is_noop(&self) -> bool {
        match self {
            Self::Insert { .. } | Self::Remove { .. } => false,
            Self::Position { from, to, .. } => from == to,
            Self::Size { from, to, .. } => from == to,
            Self::Text { from, to, .. } => from == to,
            Self::Collapsed { from, to, .. } => from == to,
            Self::Moved { from, to, .. } => from == to,
            Self::Reorder { from, to, .. } => from == to,
        }
    }

    /// Merge `next` into `self` when both are the same kind of delta on the
    /// same target. Returns `next` back otherwise.
    fn absorb(&mut self, next: OpRecord) -> Option<OpRecord> {
        match (&mut *self, next) {
            (Self::Position { id: a, to, .. }, OpRecord::Position { id: b, to: next_to, .. })
                if *a == b =>
            {
                *to = next_to;
                None
            }
            (Self::Size { id: a, to, .. }, OpRecord::Size { id: b, to: next_to, .. })
                if *a == b =>
            {
                *to = next_to;
                None
            }
            (Self::Text { id: a, to, .. }, OpRecord::Text { id: b, to: next_to, .. })
                if *a == b =>
            {
                *to = next_to;
                None
            }
            (Self::Collapsed { id: a, to, .. }, OpRecord::Collapsed { id: b, to: next_to, .. })
                if *a == b =>
            {
                *to = next_to;
                None
            }
            (_, other) => Some(other),
        }
    }

    fn revert(&self, store: &mut NodeStore) -> StoreResult<()> {
        match self {
            Self::Insert { nodes, .. } => match nodes.first() {
                Some(head) => store.remove(head.id),
                None => Ok(()),
            },
            Self::Remove {
                parent,
                index,
                nodes,
            } => store.restore_subtree(*parent, *index, nodes),
            Self::Position { id, from, .. } => store.set_position(*id, from.x, from.y),
            Self::Size { id, from, .. } => {
                store.apply_size_state(*id, from.width, from.height, from.width_constrained)
            }
            Self::Text { id, from, .. } => {
                store.restore_text(*id, &from.0, from.1.width, from.1.height)
            }
            Self::Collapsed { id, from, .. } => store.set_collapsed(*id, *from),
            Self::Moved { id, from, .. } => store.move_to(*id, from.0, from.1),
            Self::Reorder { parent, from, to } => store.reorder(*parent, *to, *from),
        }
    }

    fn replay(&self, store: &mut NodeStore) -> StoreResult<()> {
        match self {
            Self::Insert {
                parent,
                index,
                nodes,
            } => store.restore_subtree(*parent, *index, nodes),
            Self::Remove { nodes, .. } => match nodes.first() {
                Some(head) => store.remove(head.id),
                None => Ok(()),
            },
            Self::Position { id, to, .. } => store.set_position(*id, to.x, to.y),
            Self::Size { id, to, .. } => {
                store.apply_size_state(*id, to.width, to.height, to.width_constrained)
            }
            Self::Text { id, to, .. } => store.restore_text(*id, &to.0, to.1.width, to.1.height),
            Self::Collapsed { id, to, .. } => store.set_collapsed(*id, *to),
            Self::Moved { id, to, .. } => store.move_to(*id, to.0, to.1),
            Self::Reorder { parent, from, to } => store.reorder(*parent, *from, *to),
        }
    }
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Transaction {
    label: String,
    ops: Vec<OpRecord>,
}

/// The undo/redo stack and the currently open transaction.
#[derive(Debug, Default)]
pub struct History {
    undo: Vec<Transaction>,
    redo: Vec<Transaction>,
    open: Option<Transaction>,
}

impl History {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a transaction is currently open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Whether undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of committed entries on the undo stack.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Open a new transaction.
    pub fn begin(&mut self, label: impl Into<String>) {
        if self.open.is_some() {
            debug_assert!(false, "History::begin while a transaction is open");
            warn!("nested transaction begin ignored");
            return;
        }
        self.open = Some(Transaction {
            label: label.into(),
            ops: Vec::new(),
        });
    }

    /// Apply one primitive through the open transaction, recording its
    /// delta. The mutation lands immediately; a failed primitive records
    /// nothing and the error is returned untouched.
    ///
    /// Returns the id of a node created by `AddRoot`/`AddChild`.
    pub fn apply(&mut self, store: &mut NodeStore, op: EditOp) -> StoreResult<Option<NodeId>> {
        let (record, created) = match op {
            EditOp::AddRoot { text, x, y } => {
                let index = store.roots().len();
                let id = store.add_root(&text, x, y);
                let nodes = store.snapshot_subtree(id)?;
                (
                    OpRecord::Insert {
                        parent: None,
                        index,
                        nodes,
                    },
                    Some(id),
                )
            }
            EditOp::AddChild { parent, text } => {
                let index = store.children(parent)?.len();
                let id = store.add_child(parent, &text)?;
                let nodes = store.snapshot_subtree(id)?;
                (
                    OpRecord::Insert {
                        parent: Some(parent),
                        index,
                        nodes,
                    },
                    Some(id),
                )
            }
            EditOp::Remove { id } => {
                let parent = store.parent(id)?;
                let index = store.sibling_index(id)?;
                let nodes = store.snapshot_subtree(id)?;
                store.remove(id)?;
                (
                    OpRecord::Remove {
                        parent,
                        index,
                        nodes,
                    },
                    None,
                )
            }
            EditOp::SetPosition { id, x, y } => {
                let from = store.get(id)?.origin();
                store.set_position(id, x, y)?;
                (
                    OpRecord::Position {
                        id,
                        from,
                        to: Point::new(x, y),
                    },
                    None,
                )
            }
            EditOp::SetSize { id, width, height } => {
                let from = size_state(store, id)?;
                store.set_size(id, width, height)?;
                let to = size_state(store, id)?;
                (OpRecord::Size { id, from, to }, None)
            }
            EditOp::SetText { id, text } => {
                let before = store.get(id)?;
                let from = (before.text.clone(), size_state(store, id)?);
                store.set_text(id, &text)?;
                let to = (text, size_state(store, id)?);
                (OpRecord::Text { id, from, to }, None)
            }
            EditOp::SetCollapsed { id, collapsed } => {
                let from = store.get(id)?.collapsed;
                store.set_collapsed(id, collapsed)?;
                (
                    OpRecord::Collapsed {
                        id,
                        from,
                        to: collapsed,
                    },
                    None,
                )
            }
            EditOp::ConstrainWidth { id, width } => {
                let from = size_state(store, id)?;
                store.constrain_width(id, width)?;
                let to = size_state(store, id)?;
                (OpRecord::Size { id, from, to }, None)
            }
            EditOp::Reparent {
                id,
                new_parent,
                index,
            } => {
                let from = (store.parent(id)?, store.sibling_index(id)?);
                store.reparent(id, new_parent, index)?;
                (
                    OpRecord::Moved {
                        id,
                        from,
                        to: (Some(new_parent), index),
                    },
                    None,
                )
            }
            EditOp::Reorder { parent, from, to } => {
                store.reorder(parent, from, to)?;
                (OpRecord::Reorder { parent, from, to }, None)
            }
        };

        match self.open.as_mut() {
            Some(txn) => txn.ops.push(record),
            None => {
                debug_assert!(false, "History::apply without an open transaction");
                warn!("edit applied outside a transaction; it will not be undoable");
            }
        }
        Ok(created)
    }

    /// Close the open transaction. Pushes a history entry and clears the
    /// redo chain unless the coalesced log is a no-op, in which case the
    /// transaction vanishes without trace. Returns whether an entry was
    /// pushed.
    pub fn commit(&mut self) -> bool {
        let Some(txn) = self.open.take() else {
            debug_assert!(false, "History::commit without an open transaction");
            warn!("commit without an open transaction ignored");
            return false;
        };
        let ops = coalesce(txn.ops);
        if ops.is_empty() {
            debug!(label = %txn.label, "transaction discarded as no-op");
            return false;
        }
        debug!(label = %txn.label, ops = ops.len(), "transaction committed");
        self.undo.push(Transaction {
            label: txn.label,
            ops,
        });
        self.redo.clear();
        true
    }

    /// Abandon the open transaction, restoring the pre-transaction state.
    pub fn cancel(&mut self, store: &mut NodeStore) {
        let Some(txn) = self.open.take() else {
            return;
        };
        debug!(label = %txn.label, ops = txn.ops.len(), "transaction cancelled");
        revert_all(store, &txn.ops);
    }

    /// Reverse the newest committed transaction.
    pub fn undo(&mut self, store: &mut NodeStore) -> bool {
        debug_assert!(self.open.is_none(), "undo with a transaction open");
        let Some(txn) = self.undo.pop() else {
            return false;
        };
        debug!(label = %txn.label, "undo");
        revert_all(store, &txn.ops);
        self.redo.push(txn);
        true
    }

    /// Replay the newest undone transaction.
    pub fn redo(&mut self, store: &mut NodeStore) -> bool {
        debug_assert!(self.open.is_none(), "redo with a transaction open");
        let Some(txn) = self.redo.pop() else {
            return false;
        };
        debug!(label = %txn.label, "redo");
        for op in &txn.ops {
            if let Err(err) = op.replay(store) {
                debug_assert!(false, "history replay failed: {err}");
                warn!(%err, "history replay failed");
            }
        }
        self.undo.push(txn);
        true
    }
}

fn revert_all(store: &mut NodeStore, ops: &[OpRecord]) {
    for op in ops.iter().rev() {
        if let Err(err) = op.revert(store) {
            debug_assert!(false, "history revert failed: {err}");
            warn!(%err, "history revert failed");
        }
    }
}

/// Merge runs of same-target deltas and drop identity records.
fn coalesce(ops: Vec<OpRecord>) -> Vec<OpRecord> {
    let mut out: Vec<OpRecord> = Vec::with_capacity(ops.len());
    for op in ops {
        match out.last_mut() {
            Some(last) => {
                if let Some(unmerged) = last.absorb(op) {
                    out.push(unmerged);
                } else if last.is_noop() {
                    out.pop();
                }
            }
            None => out.push(op),
        }
        // A freshly pushed identity record (e.g. collapse toggled to its
        // current value) is dropped on the spot.
        if out.last().is_some_and(OpRecord::is_noop) {
            out.pop();
        }
    }
    out
}
