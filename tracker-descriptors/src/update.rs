//! UpdateChannel — broadcast of property write-backs.
//!
//! Every successful projection write is announced here. Listeners registered
//! with [`UpdateChannel::subscribe`] run synchronously inside the write, in
//! subscription order. Consumers that batch work (a save queue, for instance)
//! take a [`UpdateChannel::receiver`] instead and drain it later.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::trace;

use crate::entity::{AttributeValue, EntityKey};

/// Buffered updates kept for each receiver before the oldest are dropped.
pub const DEFAULT_CAPACITY: usize = 256;

/// A property value written back to an entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyUpdate {
    pub entity: EntityKey,
    pub attribute: String,
    pub value: AttributeValue,
}

/// Handle returned by [`UpdateChannel::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(&PropertyUpdate)>;

struct Inner {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    sender: broadcast::Sender<PropertyUpdate>,
}

/// Shared broadcast sink for property updates. Clones share listeners.
#[derive(Clone)]
pub struct UpdateChannel {
    inner: Rc<Inner>,
}

impl UpdateChannel {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a channel whose receivers buffer up to `capacity` updates.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            inner: Rc::new(Inner {
                next_id: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
                sender,
            }),
        }
    }

    /// Register a listener called for every update.
    pub fn subscribe(&self, listener: impl Fn(&PropertyUpdate) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Receiver of every update sent after this call.
    pub fn receiver(&self) -> broadcast::Receiver<PropertyUpdate> {
        self.inner.sender.subscribe()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Announce an update to listeners, then to receivers.
    ///
    /// The listener list is snapshotted first, so listeners may subscribe or
    /// unsubscribe while being called; changes apply from the next update.
    pub fn notify(&self, update: PropertyUpdate) {
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        trace!(
            entity = %update.entity,
            attribute = %update.attribute,
            listeners = listeners.len(),
            "property updated"
        );

        for listener in listeners {
            listener(&update);
        }

        // no receivers is fine
        let _ = self.inner.sender.send(update);
    }

    /// Whether two handles share the same channel.
    pub fn same_channel(&self, other: &UpdateChannel) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for UpdateChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UpdateChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateChannel")
            .field("listeners", &self.listener_count())
            .field("receivers", &self.inner.sender.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    fn update(attribute: &str, value: &str) -> PropertyUpdate {
        PropertyUpdate {
            entity: EntityKey::new("Task:1"),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    #[test]
    fn listeners_called_in_subscription_order() {
        let channel = UpdateChannel::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second"] {
            let seen = seen.clone();
            channel.subscribe(move |u: &PropertyUpdate| {
                seen.borrow_mut().push(format!("{tag}:{}", u.attribute))
            });
        }

        channel.notify(update("Title", "x"));
        assert_eq!(*seen.borrow(), vec!["first:Title", "second:Title"]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let channel = UpdateChannel::new();
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let id = channel.subscribe(move |_| counter.set(counter.get() + 1));

        channel.notify(update("Title", "a"));
        assert!(channel.unsubscribe(id));
        assert!(!channel.unsubscribe(id));
        channel.notify(update("Title", "b"));

        assert_eq!(count.get(), 1);
        assert_eq!(channel.listener_count(), 0);
    }

    #[test]
    fn listener_may_subscribe_during_notify() {
        let channel = UpdateChannel::new();
        let inner = channel.clone();
        channel.subscribe(move |_| {
            inner.subscribe(|_| {});
        });

        channel.notify(update("Title", "a"));
        assert_eq!(channel.listener_count(), 2);
    }

    #[test]
    fn receiver_drains_in_order() {
        let channel = UpdateChannel::new();
        let mut rx = channel.receiver();

        channel.notify(update("Title", "a"));
        channel.notify(update("Owner", "b"));

        assert_eq!(rx.try_recv().unwrap().attribute, "Title");
        assert_eq!(rx.try_recv().unwrap().attribute, "Owner");
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn lagging_receiver_loses_oldest() {
        let channel = UpdateChannel::with_capacity(1);
        let mut rx = channel.receiver();

        channel.notify(update("Title", "a"));
        channel.notify(update("Title", "b"));

        assert!(matches!(rx.try_recv(), Err(TryRecvError::Lagged(1))));
        assert_eq!(rx.try_recv().unwrap().value, "b".into());
    }

    #[test]
    fn clones_share_listeners() {
        let channel = UpdateChannel::new();
        let clone = channel.clone();
        clone.subscribe(|_| {});
        assert_eq!(channel.listener_count(), 1);
        assert!(channel.same_channel(&clone));
        assert!(!channel.same_channel(&UpdateChannel::new()));
    }
}
