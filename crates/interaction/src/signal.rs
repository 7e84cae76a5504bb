//! Observer channels with synchronous, ordered delivery.

use std::fmt;

/// Token returned by [`Signal::connect`], used to disconnect later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Slot<E> = Box<dyn FnMut(&E)>;

/// Ordered list of callbacks invoked on every [`Signal::emit`].
///
/// Callbacks run in registration order on the caller's thread. Zero
/// subscribers is a valid state.
pub struct Signal<E> {
    next_id: u64,
    slots: Vec<(SubscriptionId, Slot<E>)>,
}

impl<E> Default for Signal<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            slots: Vec::new(),
        }
    }
}

impl<E> fmt::Debug for Signal<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("subscribers", &self.slots.len())
            .finish()
    }
}

impl<E> Signal<E> {
    /// Create a signal with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback.
    pub fn connect<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&E) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.slots.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns `false` if `id` was not connected.
    pub fn disconnect(&mut self, id: SubscriptionId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|(slot_id, _)| *slot_id != id);
        self.slots.len() != before
    }

    /// Invoke every callback with `event`.
    pub fn emit(&mut self, event: &E) {
        for (_, slot) in &mut self.slots {
            slot(event);
        }
    }

    /// Number of connected callbacks.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether nothing is connected.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Disconnect everything.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
