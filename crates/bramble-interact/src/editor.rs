#![forbid(unsafe_code)]

//! The editor facade: selection, modes, gestures, and dispatch.
//!
//! This is the single object the event-translation layer talks to. It
//! owns the store, the history engine, and the transient gesture state,
//! and it is the only place transactions are begun and committed —
//! everything below it just applies primitives.
//!
//! # Gesture lifecycle
//!
//! Pointer and resize gestures are mutually exclusive by caller contract:
//! the translation layer must not start one while the other is active
//! (debug-asserted here, not enforced at runtime). A gesture holds its
//! transaction open from start to end; cancellation restores the
//! pre-gesture document.

use bramble_core::event::{Key, KeyInput};
use bramble_core::geometry::Point;
use bramble_doc::file::{self, LoadError, MapFile};
use bramble_doc::history::{EditOp, History};
use bramble_doc::layout;
use bramble_doc::measure::TextMeasurer;
use bramble_doc::node::{Node, NodeId};
use bramble_doc::store::{Camera, NodeStore, StoreResult, StructuralViolation};
use bramble_doc::subscribe::{ChangeEvent, ChangeKind, Subscribers, SubscriptionId};
use tracing::{trace, warn};

use crate::drag::{self, DragSession};
use crate::keymap::{EditorCommand, Keymap};
use crate::motion::{self, MotionHit, MotionMode};
use crate::structural::{self, MoveDirection};

/// Live width-resize state.
#[derive(Debug, Clone, Copy)]
struct ResizeSession {
    node: NodeId,
}

/// Named actions the host registers callbacks for. The editor dispatches
/// the trigger and nothing else; file dialogs and exporters live outside.
#[derive(Default)]
struct ActionHandlers {
    save: Option<Box<dyn FnMut()>>,
    open: Option<Box<dyn FnMut()>>,
    export: Option<Box<dyn FnMut()>>,
}

/// The interaction core of a mind-map editor.
pub struct Editor {
    store: NodeStore,
    history: History,
    subscribers: Subscribers,
    keymap: Keymap,
    selection: Option<NodeId>,
    editing: bool,
    drag: Option<DragSession>,
    resize: Option<ResizeSession>,
    motion: Option<MotionMode>,
    viewport: (f64, f64),
    actions: ActionHandlers,
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("store", &self.store)
            .field("selection", &self.selection)
            .field("editing", &self.editing)
            .field("dragging", &self.drag.is_some())
            .field("resizing", &self.resize.is_some())
            .field("easy_motion", &self.motion.is_some())
            .finish()
    }
}

impl Editor {
    /// Create an editor over an empty document.
    #[must_use]
    pub fn new(measurer: Box<dyn TextMeasurer>) -> Self {
        Self::with_store(NodeStore::new(measurer))
    }

    /// Create an editor over an existing store.
    #[must_use]
    pub fn with_store(store: NodeStore) -> Self {
        Self {
            store,
            history: History::new(),
            subscribers: Subscribers::new(),
            keymap: Keymap::default(),
            selection: None,
            editing: false,
            drag: None,
            resize: None,
            motion: None,
            viewport: (800.0, 600.0),
            actions: ActionHandlers::default(),
        }
    }

    // -- document access -----------------------------------------------------

    /// Read access to the store.
    #[must_use]
    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    /// Look up a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.store.node(id)
    }

    /// Number of nodes in the document.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.store.len()
    }

    /// Serialize the document.
    #[must_use]
    pub fn to_file(&self) -> MapFile {
        file::to_file(&self.store)
    }

    /// Replace the document with a loaded file. Selection, history, and
    /// any open gesture are discarded; subscribers are kept.
    pub fn load_file(
        &mut self,
        map: MapFile,
        measurer: Box<dyn TextMeasurer>,
    ) -> Result<(), LoadError> {
        let store = file::from_file(map, measurer)?;
        self.store = store;
        self.history = History::new();
        self.selection = None;
        self.editing = false;
        self.drag = None;
        self.resize = None;
        self.motion = None;
        Ok(())
    }

    // -- selection and edit mode ---------------------------------------------

    /// Currently selected node, if any.
    #[must_use]
    pub fn selected(&self) -> Option<NodeId> {
        self.selection
    }

    /// Select a node. Returns whether it exists.
    pub fn select(&mut self, id: NodeId) -> bool {
        if self.store.contains(id) {
            self.selection = Some(id);
            true
        } else {
            false
        }
    }

    /// Clear the selection (and edit mode with it).
    pub fn deselect(&mut self) {
        self.selection = None;
        self.editing = false;
    }

    /// Whether the selected node is in text-edit mode.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Enter text-edit mode on the selection. No-op without one.
    pub fn enter_edit_mode(&mut self) {
        if self.selection.is_some() {
            self.editing = true;
        }
    }

    /// Leave text-edit mode.
    pub fn exit_edit_mode(&mut self) {
        self.editing = false;
    }

    // -- subscriptions and actions -------------------------------------------

    /// Register a change callback, invoked synchronously after every
    /// committed transaction, undo, and redo.
    pub fn subscribe_changes(
        &mut self,
        callback: Box<dyn FnMut(ChangeEvent<'_>)>,
    ) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    /// Deregister a change callback.
    pub fn unsubscribe_changes(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Register the save trigger.
    pub fn on_save(&mut self, callback: impl FnMut() + 'static) {
        self.actions.save = Some(Box::new(callback));
    }

    /// Register the open trigger.
    pub fn on_open(&mut self, callback: impl FnMut() + 'static) {
        self.actions.open = Some(Box::new(callback));
    }

    /// Register the export trigger.
    pub fn on_export(&mut self, callback: impl FnMut() + 'static) {
        self.actions.export = Some(Box::new(callback));
    }

    fn notify(&mut self, label: &str, kind: ChangeKind) {
        self.subscribers.notify(ChangeEvent { label, kind });
    }

    // -- structure edits -----------------------------------------------------

    /// Add a root node, select it, and open it for editing.
    pub fn add_root(&mut self, text: &str, x: f64, y: f64) -> NodeId {
        self.history.begin("add-root");
        let created = self.history.apply(
            &mut self.store,
            EditOp::AddRoot {
                text: text.to_string(),
                x,
                y,
            },
        );
        if self.history.commit() {
            self.notify("add-root", ChangeKind::Commit);
        }
        // AddRoot has no preconditions; the fallback arm is unreachable.
        let id = match created {
            Ok(Some(id)) => id,
            _ => NodeId(u64::MAX),
        };
        self.selection = Some(id);
        self.editing = true;
        id
    }

    /// Add a child to `parent`, select it, and open it for editing.
    pub fn add_child(&mut self, parent: NodeId, text: &str) -> StoreResult<NodeId> {
        self.history.begin("add-child");
        match self.history.apply(
            &mut self.store,
            EditOp::AddChild {
                parent,
                text: text.to_string(),
            },
        ) {
            Ok(Some(id)) => {
                if self.history.commit() {
                    self.notify("add-child", ChangeKind::Commit);
                }
                self.selection = Some(id);
                self.editing = true;
                Ok(id)
            }
            Ok(None) => {
                // AddChild always creates a node when it succeeds.
                self.history.cancel(&mut self.store);
                Err(StructuralViolation::MissingNode(parent))
            }
            Err(err) => {
                self.history.cancel(&mut self.store);
                Err(err)
            }
        }
    }

    /// Replace a node's text as one transaction.
    pub fn set_text(&mut self, id: NodeId, text: &str) -> StoreResult<()> {
        self.history.begin("edit-text");
        match self.history.apply(
            &mut self.store,
            EditOp::SetText {
                id,
                text: text.to_string(),
            },
        ) {
            Ok(_) => {
                if self.history.commit() {
                    self.notify("edit-text", ChangeKind::Commit);
                }
                Ok(())
            }
            Err(err) => {
                self.history.cancel(&mut self.store);
                Err(err)
            }
        }
    }

    /// Move a node (and its subtree) to an absolute origin as one
    /// transaction.
    pub fn set_node_position(&mut self, id: NodeId, x: f64, y: f64) -> StoreResult<()> {
        self.history.begin("set-position");
        match self
            .history
            .apply(&mut self.store, EditOp::SetPosition { id, x, y })
        {
            Ok(_) => {
                if self.history.commit() {
                    self.notify("set-position", ChangeKind::Commit);
                }
                Ok(())
            }
            Err(err) => {
                self.history.cancel(&mut self.store);
                Err(err)
            }
        }
    }

    /// Toggle a node's collapsed flag as one transaction.
    pub fn toggle_collapse(&mut self, id: NodeId) -> StoreResult<()> {
        let collapsed = !self
            .store
            .node(id)
            .ok_or(StructuralViolation::MissingNode(id))?
            .collapsed;
        self.history.begin("collapse");
        match self
            .history
            .apply(&mut self.store, EditOp::SetCollapsed { id, collapsed })
        {
            Ok(_) => {
                if self.history.commit() {
                    self.notify("collapse", ChangeKind::Commit);
                }
                Ok(())
            }
            Err(err) => {
                self.history.cancel(&mut self.store);
                Err(err)
            }
        }
    }

    // -- undo/redo -----------------------------------------------------------

    /// Reverse the newest committed transaction.
    pub fn undo(&mut self) -> bool {
        if self.history.is_open() {
            warn!("undo ignored while a gesture is in progress");
            return false;
        }
        let done = self.history.undo(&mut self.store);
        if done {
            self.prune_selection();
            self.notify("undo", ChangeKind::Undo);
        }
        done
    }

    /// Replay the newest undone transaction.
    pub fn redo(&mut self) -> bool {
        if self.history.is_open() {
            warn!("redo ignored while a gesture is in progress");
            return false;
        }
        let done = self.history.redo(&mut self.store);
        if done {
            self.prune_selection();
            self.notify("redo", ChangeKind::Redo);
        }
        done
    }

    /// Whether undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of committed entries on the undo stack.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    fn prune_selection(&mut self) {
        if let Some(id) = self.selection {
            if !self.store.contains(id) {
                self.deselect();
            }
        }
    }

    // -- camera and viewport -------------------------------------------------

    /// Camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.store.camera()
    }

    /// Pan/zoom the camera (zoom is clamped).
    pub fn set_camera(&mut self, x: f64, y: f64, zoom: f64) {
        self.store.set_camera(x, y, zoom);
    }

    /// Tell the editor how large the viewport is, for viewport-centred
    /// ranking when nothing is selected.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport = (width, height);
    }

    // -- pointer drag: reposition and reparent -------------------------------

    /// Begin dragging `id` from pointer position `(x, y)`.
    ///
    /// Exits edit mode, selects the node, and opens the drag transaction.
    /// Returns whether the drag started.
    pub fn pointer_down(&mut self, id: NodeId, x: f64, y: f64) -> bool {
        debug_assert!(self.resize.is_none(), "drag started during a resize");
        let Some(node) = self.store.node(id) else {
            warn!(%id, "pointer down on unknown node");
            return false;
        };
        let origin = node.origin();
        self.editing = false;
        self.selection = Some(id);
        self.history.begin("drag");
        self.drag = Some(DragSession {
            node: id,
            grab_dx: x - origin.x,
            grab_dy: y - origin.y,
            target: None,
        });
        true
    }

    /// Drag to pointer position `(x, y)`: the subtree follows rigidly and
    /// the reparent target is recomputed.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let Some(session) = self.drag else {
            return;
        };
        if let Err(err) = self.history.apply(
            &mut self.store,
            EditOp::SetPosition {
                id: session.node,
                x: x - session.grab_dx,
                y: y - session.grab_dy,
            },
        ) {
            warn!(%err, "drag move failed");
            return;
        }
        let target = drag::reparent_candidate(&self.store, session.node, Point::new(x, y));
        if target != session.target {
            trace!(node = %session.node, ?target, "reparent target changed");
        }
        if let Some(session) = self.drag.as_mut() {
            session.target = target;
        }
    }

    /// Drop: reparent onto the current target if there is one, then commit
    /// the whole gesture as a single undoable transaction.
    pub fn pointer_up(&mut self) {
        let Some(session) = self.drag.take() else {
            return;
        };
        if let Some(target) = session.target {
            self.adopt_dropped(session.node, target);
        }
        if self.history.commit() {
            self.notify("drag", ChangeKind::Commit);
        }
    }

    /// Abort an in-progress drag, restoring the pre-drag document.
    pub fn pointer_cancel(&mut self) {
        if self.drag.take().is_some() {
            self.history.cancel(&mut self.store);
        }
    }

    fn adopt_dropped(&mut self, node: NodeId, target: NodeId) {
        let Some(width) = self.store.node(node).map(|n| n.width) else {
            return;
        };
        let index = self
            .store
            .children(target)
            .map(<[NodeId]>::len)
            .unwrap_or(0);
        // Attach position is computed before the reparent so the dropped
        // node does not count as its own predecessor sibling.
        let at = layout::attach_point(&self.store, target, width);
        let reparented = self.history.apply(
            &mut self.store,
            EditOp::Reparent {
                id: node,
                new_parent: target,
                index,
            },
        );
        match reparented {
            Ok(_) => {
                if let Err(err) = self.history.apply(
                    &mut self.store,
                    EditOp::SetPosition {
                        id: node,
                        x: at.x,
                        y: at.y,
                    },
                ) {
                    warn!(%err, "drop placement failed");
                }
            }
            Err(err) => warn!(%err, "drop reparent rejected"),
        }
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Current reparent target of the in-progress drag.
    #[must_use]
    pub fn reparent_target(&self) -> Option<NodeId> {
        self.drag.and_then(|session| session.target)
    }

    // -- width resize --------------------------------------------------------

    /// Begin a width resize on `id`. Returns whether it started.
    pub fn start_width_resize(&mut self, id: NodeId) -> bool {
        debug_assert!(self.drag.is_none(), "resize started during a drag");
        if !self.store.contains(id) {
            warn!(%id, "resize on unknown node");
            return false;
        }
        self.history.begin("resize");
        self.resize = Some(ResizeSession { node: id });
        true
    }

    /// Apply a new width to the resizing node (floored at the minimum
    /// width), reflowing its text.
    pub fn update_width_resize(&mut self, width: f64) {
        let Some(session) = self.resize else {
            return;
        };
        if let Err(err) = self.history.apply(
            &mut self.store,
            EditOp::ConstrainWidth {
                id: session.node,
                width,
            },
        ) {
            warn!(%err, "resize update failed");
        }
    }

    /// Commit the resize; an unchanged width leaves no history entry.
    pub fn end_width_resize(&mut self) {
        if self.resize.take().is_some() && self.history.commit() {
            self.notify("resize", ChangeKind::Commit);
        }
    }

    /// Whether a width resize is in progress.
    #[must_use]
    pub fn is_resizing_width(&self) -> bool {
        self.resize.is_some()
    }

    // -- structural moves ----------------------------------------------------

    /// Structurally move the selected node. Returns whether anything
    /// changed; infeasible moves leave no history entry.
    pub fn move_node(&mut self, direction: MoveDirection) -> bool {
        let Some(id) = self.selection else {
            return false;
        };
        let Some(plan) = structural::plan(&self.store, id, direction) else {
            return false;
        };
        self.history.begin("move-node");
        if let Err(err) = structural::execute(&mut self.store, &mut self.history, plan) {
            warn!(%err, "structural move failed");
            self.history.cancel(&mut self.store);
            return false;
        }
        let committed = self.history.commit();
        if committed {
            self.notify("move-node", ChangeKind::Commit);
        }
        committed
    }

    // -- spatial navigation --------------------------------------------------

    /// Move selection to the nearest visible node in `direction`.
    pub fn navigate(&mut self, direction: MoveDirection) -> bool {
        let Some(current) = self.selection.and_then(|id| self.store.node(id)) else {
            // Nothing selected: land on the first root.
            if let Some(&root) = self.store.roots().first() {
                self.selection = Some(root);
                return true;
            }
            return false;
        };
        let origin = current.center();
        let current_id = current.id;
        let best = self
            .store
            .visible_nodes()
            .into_iter()
            .filter(|candidate| candidate.id != current_id)
            .filter(|candidate| {
                let c = candidate.center();
                match direction {
                    MoveDirection::Up => c.y < origin.y,
                    MoveDirection::Down => c.y > origin.y,
                    MoveDirection::Left => c.x < origin.x,
                    MoveDirection::Right => c.x > origin.x,
                }
            })
            .min_by(|a, b| {
                a.center()
                    .distance(origin)
                    .total_cmp(&b.center().distance(origin))
            })
            .map(|node| node.id);
        match best {
            Some(id) => {
                self.selection = Some(id);
                true
            }
            None => false,
        }
    }

    // -- EasyMotion ----------------------------------------------------------

    /// Enter EasyMotion: label every visible node except the selection,
    /// shortest labels closest to the reference point (selected node's
    /// center, or the viewport center when nothing is selected).
    pub fn enter_easy_motion(&mut self) {
        let reference = self
            .selection
            .and_then(|id| self.store.node(id))
            .map_or_else(|| self.viewport_center(), Node::center);
        let candidates: Vec<(NodeId, Point)> = self
            .store
            .visible_nodes()
            .into_iter()
            .filter(|node| Some(node.id) != self.selection)
            .map(|node| (node.id, node.center()))
            .collect();
        let ranked = motion::rank_by_distance(&candidates, reference);
        let labels = motion::assign_labels(&ranked);
        if labels.len() < ranked.len() {
            trace!(
                unlabeled = ranked.len() - labels.len(),
                "more targets than labels"
            );
        }
        self.motion = Some(MotionMode::new(labels));
    }

    /// Leave EasyMotion, dropping all labels.
    pub fn exit_easy_motion(&mut self) {
        self.motion = None;
    }

    /// Whether EasyMotion is active.
    #[must_use]
    pub fn is_easy_motion_active(&self) -> bool {
        self.motion.is_some()
    }

    /// The label assigned to a node, while EasyMotion is active.
    #[must_use]
    pub fn easy_motion_label(&self, id: NodeId) -> Option<&str> {
        self.motion.as_ref().and_then(|mode| mode.label_for(id))
    }

    /// Feed one typed character into EasyMotion. A full label match jumps
    /// selection there and exits; a dead-end key exits without moving.
    pub fn easy_motion_key(&mut self, key: char) {
        let Some(mode) = self.motion.as_mut() else {
            return;
        };
        match mode.push_key(key) {
            MotionHit::Jump(id) => {
                self.motion = None;
                self.selection = Some(id);
            }
            MotionHit::Partial => {}
            MotionHit::Miss => {
                self.motion = None;
            }
        }
    }

    fn viewport_center(&self) -> Point {
        let camera = self.store.camera();
        Point::new(
            (self.viewport.0 / 2.0 - camera.x) / camera.zoom,
            (self.viewport.1 / 2.0 - camera.y) / camera.zoom,
        )
    }

    // -- keyboard dispatch ---------------------------------------------------

    /// Rebind or extend the keymap.
    pub fn keymap_mut(&mut self) -> &mut Keymap {
        &mut self.keymap
    }

    /// Dispatch one key press.
    ///
    /// EasyMotion consumes printable keys while active; edit mode consumes
    /// everything except Escape (the host's text field owns typing); all
    /// other presses go through the keymap.
    pub fn press_key(&mut self, input: KeyInput) {
        if self.is_easy_motion_active() {
            match input.key {
                Key::Escape => self.exit_easy_motion(),
                Key::Char(c) if input.modifiers.is_empty() => self.easy_motion_key(c),
                _ => {}
            }
            return;
        }
        if self.editing {
            if input.key == Key::Escape {
                self.exit_edit_mode();
            }
            return;
        }
        let Some(command) = self.keymap.lookup(input) else {
            return;
        };
        match command {
            EditorCommand::MoveNode(direction) => {
                self.move_node(direction);
            }
            EditorCommand::Navigate(direction) => {
                self.navigate(direction);
            }
            EditorCommand::Undo => {
                self.undo();
            }
            EditorCommand::Redo => {
                self.redo();
            }
            EditorCommand::Save => Self::trigger(&mut self.actions.save),
            EditorCommand::Open => Self::trigger(&mut self.actions.open),
            EditorCommand::Export => Self::trigger(&mut self.actions.export),
        }
    }

    fn trigger(handler: &mut Option<Box<dyn FnMut()>>) {
        if let Some(callback) = handler {
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bramble_doc::measure::MonospaceMeasurer;

    fn editor() -> Editor {
        Editor::new(Box::new(MonospaceMeasurer))
    }

    #[test]
    fn add_root_selects_and_enters_edit_mode() {
        let mut ed = editor();
        let root = ed.add_root("root", 0.0, 0.0);
        assert_eq!(ed.selected(), Some(root));
        assert!(ed.is_editing());
    }

    #[test]
    fn add_child_selects_the_new_node() {
        let mut ed = editor();
        let root = ed.add_root("root", 0.0, 0.0);
        ed.exit_edit_mode();
        let child = ed.add_child(root, "child").unwrap();
        assert_eq!(ed.selected(), Some(child));
        assert!(ed.is_editing());
    }

    #[test]
    fn add_child_to_unknown_parent_fails_cleanly() {
        let mut ed = editor();
        let err = ed.add_child(NodeId(42), "x").unwrap_err();
        assert!(matches!(err, StructuralViolation::MissingNode(_)));
        assert_eq!(ed.node_count(), 0);
        assert!(!ed.can_undo());
    }

    #[test]
    fn select_unknown_node_is_refused() {
        let mut ed = editor();
        assert!(!ed.select(NodeId(7)));
        assert_eq!(ed.selected(), None);
    }

    #[test]
    fn enter_edit_mode_requires_selection() {
        let mut ed = editor();
        ed.enter_edit_mode();
        assert!(!ed.is_editing());
    }

    #[test]
    fn undo_of_an_add_prunes_the_selection() {
        let mut ed = editor();
        let root = ed.add_root("root", 0.0, 0.0);
        ed.exit_edit_mode();
        let child = ed.add_child(root, "child").unwrap();
        ed.exit_edit_mode();
        assert_eq!(ed.selected(), Some(child));
        assert!(ed.undo());
        assert_eq!(ed.selected(), None);
        assert!(ed.node(child).is_none());
    }

    #[test]
    fn navigate_with_no_selection_lands_on_first_root() {
        let mut ed = editor();
        let root = ed.add_root("root", 0.0, 0.0);
        ed.exit_edit_mode();
        ed.deselect();
        assert!(ed.navigate(MoveDirection::Right));
        assert_eq!(ed.selected(), Some(root));
    }

    #[test]
    fn navigate_moves_to_nearest_node_in_direction() {
        let mut ed = editor();
        let root = ed.add_root("root", 0.0, 0.0);
        ed.exit_edit_mode();
        let near = ed.add_child(root, "near").unwrap();
        ed.exit_edit_mode();
        let far = ed.add_child(root, "far").unwrap();
        ed.exit_edit_mode();

        // Both children sit to the right; the first one is closer.
        ed.select(root);
        assert!(ed.navigate(MoveDirection::Right));
        assert_eq!(ed.selected(), Some(near));

        // Nothing lies left of the root.
        ed.select(root);
        assert!(!ed.navigate(MoveDirection::Left));
        assert_eq!(ed.selected(), Some(root));

        // From the near child, down finds its lower sibling.
        ed.select(near);
        assert!(ed.navigate(MoveDirection::Down));
        assert_eq!(ed.selected(), Some(far));
    }

    #[test]
    fn navigate_skips_collapsed_subtrees() {
        let mut ed = editor();
        let root = ed.add_root("root", 0.0, 0.0);
        ed.exit_edit_mode();
        let child = ed.add_child(root, "child").unwrap();
        ed.exit_edit_mode();
        let _grand = ed.add_child(child, "grand").unwrap();
        ed.exit_edit_mode();
        ed.toggle_collapse(child).unwrap();

        ed.select(child);
        assert!(!ed.navigate(MoveDirection::Right));
    }

    #[test]
    fn escape_leaves_edit_mode_via_dispatch() {
        let mut ed = editor();
        ed.add_root("root", 0.0, 0.0);
        assert!(ed.is_editing());
        ed.press_key(KeyInput::new(Key::Escape));
        assert!(!ed.is_editing());
    }

    #[test]
    fn set_text_is_undoable() {
        let mut ed = editor();
        let root = ed.add_root("before", 0.0, 0.0);
        ed.exit_edit_mode();
        ed.set_text(root, "after").unwrap();
        assert_eq!(ed.node(root).unwrap().text, "after");
        assert!(ed.undo());
        assert_eq!(ed.node(root).unwrap().text, "before");
    }

    #[test]
    fn toggle_collapse_round_trips_through_undo() {
        let mut ed = editor();
        let root = ed.add_root("root", 0.0, 0.0);
        ed.exit_edit_mode();
        ed.toggle_collapse(root).unwrap();
        assert!(ed.node(root).unwrap().collapsed);
        assert!(ed.undo());
        assert!(!ed.node(root).unwrap().collapsed);
    }
}
