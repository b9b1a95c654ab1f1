#![forbid(unsafe_code)]

//! Change notification for external persistence.
//!
//! Persistence layers (file autosave, browser storage, whatever the host
//! wires up) register a callback and get invoked synchronously after every
//! committed transaction, undo, and redo. Debouncing and scheduling are
//! the subscriber's problem; the core only reports that the document
//! changed.

/// What kind of history event produced the change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Commit,
    Undo,
    Redo,
}

/// A committed document change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent<'a> {
    /// Label of the transaction that produced the change.
    pub label: &'a str,
    pub kind: ChangeKind,
}

/// Handle returned by [`Subscribers::subscribe`]; pass it back to
/// [`Subscribers::unsubscribe`] to deregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registry of change callbacks.
#[derive(Default)]
pub struct Subscribers {
    next: u64,
    entries: Vec<(SubscriptionId, Box<dyn FnMut(ChangeEvent<'_>)>)>,
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.entries.len())
            .finish()
    }
}

impl Subscribers {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no subscriptions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register a callback. Returns the handle that deregisters it.
    pub fn subscribe(&mut self, callback: Box<dyn FnMut(ChangeEvent<'_>)>) -> SubscriptionId {
        let id = SubscriptionId(self.next);
        self.next += 1;
        self.entries.push((id, callback));
        id
    }

    /// Deregister a callback. Returns whether the handle was live.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Invoke every callback synchronously, in registration order.
    pub fn notify(&mut self, event: ChangeEvent<'_>) {
        for (_, callback) in &mut self.entries {
            callback(event);
        }
    }
}
