//! Process-wide shared state with a subscribe/notify contract.
//!
//! UI-facing state (auth tokens, connection status) is shared across
//! independently-running components. Rather than module-level mutable
//! globals, each piece of state lives in an explicit [`Store`] constructed
//! once at application start and passed by reference to consumers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

type Listener<T> = Box<dyn Fn(&T) + Send + Sync>;

/// Handle returned by [`Store::subscribe`]; pass it back to
/// [`Store::unsubscribe`] to stop receiving notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

/// A single owned state container with get/set/subscribe semantics.
///
/// Listeners run synchronously on the thread performing the write, after the
/// write lock has been released.
pub struct Store<T> {
    value: RwLock<T>,
    listeners: RwLock<Vec<(u64, Listener<T>)>>,
    next_id: AtomicU64,
}

impl<T: Clone> Store<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: RwLock::new(initial),
            listeners: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Current value (cloned out so no lock is held by the caller).
    pub fn get(&self) -> T {
        self.value.read().expect("store lock poisoned").clone()
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        {
            let mut guard = self.value.write().expect("store lock poisoned");
            *guard = value;
        }
        self.notify();
    }

    /// Mutate the value in place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        {
            let mut guard = self.value.write().expect("store lock poisoned");
            f(&mut guard);
        }
        self.notify();
    }

    /// Register a listener invoked with the new value after every write.
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .write()
            .expect("store lock poisoned")
            .push((id, Box::new(listener)));
        Subscription(id)
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.listeners
            .write()
            .expect("store lock poisoned")
            .retain(|(id, _)| *id != subscription.0);
    }

    fn notify(&self) {
        let current = self.get();
        let listeners = self.listeners.read().expect("store lock poisoned");
        for (_, listener) in listeners.iter() {
            listener(&current);
        }
    }
}

impl<T: Clone + Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[test]
    fn test_get_set_roundtrip() {
        let store = Store::new(0u32);
        assert_eq!(store.get(), 0);
        store.set(7);
        assert_eq!(store.get(), 7);
    }

    #[test]
    fn test_subscribers_notified_on_set_and_update() {
        let store = Store::new(String::new());
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = seen.clone();
        store.subscribe(move |_| {
            seen_clone.fetch_add(1, Ordering::SeqCst);
        });

        store.set("a".to_string());
        store.update(|v| v.push('b'));
        assert_eq!(seen.load(Ordering::SeqCst), 2);
        assert_eq!(store.get(), "ab");
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = Store::new(0u32);
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = seen.clone();
        let sub = store.subscribe(move |_| {
            seen_clone.fetch_add(1, Ordering::SeqCst);
        });

        store.set(1);
        store.unsubscribe(sub);
        store.set(2);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}
