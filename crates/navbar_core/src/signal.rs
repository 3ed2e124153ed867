//! Layout-change signal
//!
//! The host fires this signal when the viewport geometry changes (device
//! rotation, size-class change, window resize). Subscribers receive the new
//! container size.
//!
//! Subscriptions are scoped: [`LayoutSignal::subscribe`] returns a
//! [`LayoutSubscription`] guard and the handler stays registered only as long
//! as the guard is alive.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::geometry::Size;

new_key_type! {
    /// Unique identifier for a registered layout handler
    pub struct SubscriptionId;
}

/// Layout handler function type
pub type LayoutHandler = Arc<dyn Fn(Size) + Send + Sync>;

type Registry = Mutex<SlotMap<SubscriptionId, LayoutHandler>>;

fn lock(registry: &Registry) -> MutexGuard<'_, SlotMap<SubscriptionId, LayoutHandler>> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Cloneable handle to a layout-change handler registry
#[derive(Clone, Default)]
pub struct LayoutSignal {
    handlers: Arc<Registry>,
}

impl LayoutSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. It stays registered until the returned guard is dropped.
    #[must_use = "dropping the subscription unregisters the handler immediately"]
    pub fn subscribe<F>(&self, handler: F) -> LayoutSubscription
    where
        F: Fn(Size) + Send + Sync + 'static,
    {
        let id = lock(&self.handlers).insert(Arc::new(handler));
        tracing::trace!("LayoutSignal::subscribe - {:?}", id);
        LayoutSubscription {
            id,
            registry: Arc::downgrade(&self.handlers),
        }
    }

    /// Notify every live handler of a new container size.
    ///
    /// Handlers run outside the registry lock, so a handler may cancel
    /// subscriptions (its own included) while being notified.
    pub fn emit(&self, size: Size) {
        let handlers: SmallVec<[LayoutHandler; 2]> =
            lock(&self.handlers).values().cloned().collect();

        tracing::trace!(
            "LayoutSignal::emit - {}x{} to {} handler(s)",
            size.width,
            size.height,
            handlers.len()
        );

        for handler in handlers {
            handler(size);
        }
    }

    /// Get the number of registered handlers
    pub fn len(&self) -> usize {
        lock(&self.handlers).len()
    }

    /// Check if no handlers are registered
    pub fn is_empty(&self) -> bool {
        lock(&self.handlers).is_empty()
    }
}

/// Guard for a registered layout handler.
///
/// Unregisters the handler on drop. Outliving the signal is fine: the guard
/// only holds a weak reference to the registry.
pub struct LayoutSubscription {
    id: SubscriptionId,
    registry: Weak<Registry>,
}

impl LayoutSubscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Check if the handler is still registered
    pub fn is_active(&self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => {
                let active = lock(&registry).contains_key(self.id);
                active
            }
            None => false,
        }
    }

    /// Unregister the handler now rather than at drop
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for LayoutSubscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if lock(&registry).remove(self.id).is_some() {
                tracing::trace!("LayoutSubscription::drop - released {:?}", self.id);
            }
        }
    }
}

impl std::fmt::Debug for LayoutSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutSubscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_reaches_all_handlers() {
        let signal = LayoutSignal::new();
        let hits = Arc::new(Mutex::new(Vec::new()));

        let hits_a = hits.clone();
        let _a = signal.subscribe(move |size| hits_a.lock().unwrap().push(("a", size.width)));
        let hits_b = hits.clone();
        let _b = signal.subscribe(move |size| hits_b.lock().unwrap().push(("b", size.width)));

        signal.emit(Size::new(480.0, 320.0));

        let mut hits = hits.lock().unwrap().clone();
        hits.sort_by(|x, y| x.0.cmp(&y.0));
        assert_eq!(hits, vec![("a", 480.0), ("b", 480.0)]);
    }

    #[test]
    fn test_drop_unregisters() {
        let signal = LayoutSignal::new();
        let count = Arc::new(Mutex::new(0));
        let count_clone = count.clone();

        let subscription = signal.subscribe(move |_| *count_clone.lock().unwrap() += 1);
        assert_eq!(signal.len(), 1);
        assert!(subscription.is_active());

        signal.emit(Size::new(320.0, 480.0));
        subscription.cancel();
        signal.emit(Size::new(480.0, 320.0));

        assert!(signal.is_empty());
        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn test_subscription_outlives_signal() {
        let signal = LayoutSignal::new();
        let subscription = signal.subscribe(|_| {});
        drop(signal);

        assert!(!subscription.is_active());
        // Dropping after the registry is gone must not panic
        drop(subscription);
    }

    #[test]
    fn test_handler_can_cancel_itself() {
        let signal = LayoutSignal::new();
        let slot: Arc<Mutex<Option<LayoutSubscription>>> = Arc::new(Mutex::new(None));
        let slot_clone = slot.clone();

        let subscription = signal.subscribe(move |_| {
            slot_clone.lock().unwrap().take();
        });
        *slot.lock().unwrap() = Some(subscription);

        signal.emit(Size::new(320.0, 480.0));
        assert!(signal.is_empty());
    }

    #[test]
    fn test_clones_share_registry() {
        let signal = LayoutSignal::new();
        let other = signal.clone();
        let _subscription = other.subscribe(|_| {});
        assert_eq!(signal.len(), 1);
    }
}
