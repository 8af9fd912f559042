//! Local appointment event fan-out.
//!
//! There is no realtime transport behind this; mutations publish into an
//! in-process registry and interested views subscribe. Delivery is
//! synchronous and in registration order, and a panicking subscriber is
//! contained so the remaining subscribers still hear the event.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::types::Appointment;

#[derive(Debug, Clone, PartialEq)]
pub enum AppointmentEvent {
    Created(Appointment),
    Updated(Appointment),
    Deleted { id: String },
}

type Handler = Box<dyn Fn(&AppointmentEvent) + Send + Sync>;

/// Handle returned by [`AppointmentsChannel::subscribe`]. Dropping it does
/// not unsubscribe; pass it to [`AppointmentsChannel::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(u64);

#[derive(Clone, Default)]
pub struct AppointmentsChannel {
    inner: Arc<ChannelInner>,
}

#[derive(Default)]
struct ChannelInner {
    subscribers: RwLock<Vec<(u64, Handler)>>,
    next_id: AtomicU64,
}

impl AppointmentsChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: impl Fn(&AppointmentEvent) + Send + Sync + 'static) -> SubscriberId {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let mut subscribers = self
            .inner
            .subscribers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        subscribers.push((id, Box::new(handler)));
        SubscriberId(id)
    }

    pub fn unsubscribe(&self, id: SubscriberId) {
        let mut subscribers = self
            .inner
            .subscribers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        subscribers.retain(|(subscriber_id, _)| *subscriber_id != id.0);
    }

    /// Deliver an event to every subscriber, in registration order. A
    /// subscriber that panics is logged and skipped; the rest still run.
    pub fn publish(&self, event: &AppointmentEvent) {
        let subscribers = self
            .inner
            .subscribers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for (id, handler) in subscribers.iter() {
            if catch_unwind(AssertUnwindSafe(|| handler(event))).is_err() {
                tracing::error!(subscriber = id, "Appointment subscriber panicked");
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_delivery_in_registration_order() {
        let channel = AppointmentsChannel::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for label in ["first", "second", "third"] {
            let seen = seen.clone();
            channel.subscribe(move |_| seen.lock().unwrap().push(label));
        }

        channel.publish(&AppointmentEvent::Deleted {
            id: "apt-1".to_string(),
        });
        assert_eq!(*seen.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_panicking_subscriber_does_not_block_others() {
        let channel = AppointmentsChannel::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        {
            let seen = seen.clone();
            channel.subscribe(move |_| seen.lock().unwrap().push("before"));
        }
        channel.subscribe(|_| panic!("subscriber bug"));
        {
            let seen = seen.clone();
            channel.subscribe(move |_| seen.lock().unwrap().push("after"));
        }

        channel.publish(&AppointmentEvent::Deleted {
            id: "apt-1".to_string(),
        });
        assert_eq!(*seen.lock().unwrap(), vec!["before", "after"]);
    }

    #[test]
    fn test_unsubscribe_removes_handler() {
        let channel = AppointmentsChannel::new();
        let seen = Arc::new(Mutex::new(0u32));

        let id = {
            let seen = seen.clone();
            channel.subscribe(move |_| *seen.lock().unwrap() += 1)
        };
        channel.publish(&AppointmentEvent::Deleted {
            id: "apt-1".to_string(),
        });
        channel.unsubscribe(id);
        channel.publish(&AppointmentEvent::Deleted {
            id: "apt-1".to_string(),
        });

        assert_eq!(*seen.lock().unwrap(), 1);
        assert_eq!(channel.subscriber_count(), 0);
    }
}
