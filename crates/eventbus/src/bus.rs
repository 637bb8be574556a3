//! Synchronous broadcast bus with RAII subscriptions.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

type Handler<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Registry<E> {
    next_id: u64,
    entries: Vec<(u64, Handler<E>)>,
}

impl<E> Registry<E> {
    fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == id)
    }
}

/// Broadcast bus shared by every form mounted on one page.
///
/// Cloning yields another handle to the same bus. Emission is synchronous
/// and fire-and-forget: events with no live subscriber are dropped, there
/// is no buffering and no reordering. The registry lock is released before
/// handlers run, so a handler may emit or subscribe re-entrantly.
pub struct EventBus<E> {
    inner: Arc<RwLock<Registry<E>>>,
}

impl<E: 'static> EventBus<E> {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Registers `handler` for every subsequent event.
    ///
    /// The handler stays attached for as long as the returned
    /// [`Subscription`] is alive.
    #[must_use = "dropping the subscription detaches the handler immediately"]
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = {
            let mut registry = self.inner.write();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.entries.push((id, Arc::new(handler)));
            id
        };
        tracing::trace!(subscriber = id, "bus subscriber attached");

        let registry: Weak<RwLock<Registry<E>>> = Arc::downgrade(&self.inner);
        Subscription {
            id,
            release: Some(Box::new(move || {
                if let Some(registry) = registry.upgrade() {
                    registry.write().entries.retain(|(entry, _)| *entry != id);
                    tracing::trace!(subscriber = id, "bus subscriber detached");
                }
            })),
        }
    }

    /// Delivers `event` to every live subscriber, in subscription order.
    ///
    /// Returns the number of handlers that ran. A subscriber detached by an
    /// earlier handler during the same emission is skipped.
    pub fn emit(&self, event: &E) -> usize {
        let snapshot: Vec<(u64, Handler<E>)> = self
            .inner
            .read()
            .entries
            .iter()
            .map(|(id, handler)| (*id, Arc::clone(handler)))
            .collect();

        let mut delivered = 0;
        for (id, handler) in snapshot {
            if !self.inner.read().contains(id) {
                continue;
            }
            handler(event);
            delivered += 1;
        }
        delivered
    }

    /// Number of attached subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.read().entries.len()
    }
}

impl<E: 'static> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.inner.read().entries.len())
            .finish()
    }
}

/// Guard for one bus subscription.
///
/// Dropping the guard detaches the handler; release is guaranteed even if
/// the owner unwinds. Outliving the bus is harmless.
pub struct Subscription {
    id: u64,
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Registry id, useful in traces.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Detaches the handler now.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.release.is_some())
            .finish()
    }
}
