use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use indexmap::IndexMap;

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;
type Registry<T> = Mutex<Slots<T>>;

struct Slots<T> {
    next_id: u64,
    callbacks: IndexMap<u64, Callback<T>>,
}

/// In-process fan-out of published values to registered callbacks.
///
/// Callbacks run synchronously on the publishing task, in registration
/// order. The registry lock is released before they run, so a callback may
/// subscribe or unsubscribe without deadlocking.
pub struct Listeners<T> {
    registry: Arc<Registry<T>>,
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Slots {
                next_id: 0,
                callbacks: IndexMap::new(),
            })),
        }
    }
}

impl<T: 'static> Listeners<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback; it stays active until the returned handle is used to unsubscribe.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = {
            let mut slots = lock(&self.registry);
            let id = slots.next_id;
            slots.next_id += 1;
            slots.callbacks.insert(id, Arc::new(callback));
            id
        };

        let registry: Weak<Registry<T>> = Arc::downgrade(&self.registry);
        Subscription {
            remove: Some(Box::new(move || {
                if let Some(registry) = registry.upgrade() {
                    lock(&registry).callbacks.shift_remove(&id);
                }
            })),
        }
    }

    /// Deliver `value` to every registered callback.
    pub fn publish(&self, value: &T) {
        let callbacks: Vec<Callback<T>> = lock(&self.registry).callbacks.values().cloned().collect();
        for callback in callbacks {
            callback(value);
        }
    }

    /// Number of active callbacks.
    pub fn len(&self) -> usize {
        lock(&self.registry).callbacks.len()
    }

    /// Whether no callback is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock<T>(registry: &Registry<T>) -> MutexGuard<'_, Slots<T>> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle returned by [`Listeners::subscribe`].
///
/// Dropping the handle keeps the callback registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[must_use = "keep the handle to be able to unsubscribe"]
pub struct Subscription {
    remove: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Remove the callback from its registry. Safe after the registry is gone.
    pub fn unsubscribe(mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.remove.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn publishes_to_every_subscriber_in_order() {
        let listeners = Listeners::<u32>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first = seen.clone();
        let _a = listeners.subscribe(move |value| first.lock().unwrap().push(("a", *value)));
        let second = seen.clone();
        let _b = listeners.subscribe(move |value| second.lock().unwrap().push(("b", *value)));

        listeners.publish(&7);
        assert_eq!(*seen.lock().unwrap(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let listeners = Listeners::<u32>::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = hits.clone();
        let subscription = listeners.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        listeners.publish(&1);
        subscription.unsubscribe();
        listeners.publish(&2);

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(listeners.is_empty());
    }

    #[test]
    fn unsubscribe_after_registry_dropped() {
        let listeners = Listeners::<u32>::new();
        let subscription = listeners.subscribe(|_| {});
        drop(listeners);
        subscription.unsubscribe();
    }
}
