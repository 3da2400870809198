//! Change subscriptions for the "application initialized" flag.

use smallvec::SmallVec;

/// Handle returned by [`Subscribers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

impl SubscriptionId {
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// An ordered set of listeners. `L` is a closure for native callers or a
/// foreign function handle for the JS bridge.
pub struct Subscribers<L> {
    next_id: u32,
    entries: SmallVec<[(SubscriptionId, L); 4]>,
}

impl<L> Default for Subscribers<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> Subscribers<L> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: SmallVec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: L) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push((id, listener));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(sid, _)| *sid != id);
        self.entries.len() != before
    }

    /// Listeners in subscription order.
    pub fn listeners(&self) -> impl Iterator<Item = &L> {
        self.entries.iter().map(|(_, l)| l)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<L: FnMut(bool)> Subscribers<L> {
    /// Call every listener with the new flag value.
    pub fn notify(&mut self, initialized: bool) {
        for (_, listener) in self.entries.iter_mut() {
            listener(initialized);
        }
    }
}
