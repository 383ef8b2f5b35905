//! Auth event fan-out with drop-to-unsubscribe handles.

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use super::AuthEvent;

type Listener = Arc<dyn Fn(AuthEvent) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

fn lock(listeners: &Mutex<Listeners>) -> MutexGuard<'_, Listeners> {
    listeners.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Clone, Default)]
pub struct AuthEventBus {
    listeners: Arc<Mutex<Listeners>>,
}

impl AuthEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: Box<dyn Fn(AuthEvent) + Send + Sync>) -> AuthSubscription {
        let mut guard = lock(&self.listeners);
        let id = guard.next_id;
        guard.next_id += 1;
        guard.entries.push((id, Arc::from(listener)));
        AuthSubscription {
            listeners: Arc::downgrade(&self.listeners),
            id,
        }
    }

    /// Deliver to every current listener, in subscription order
    pub fn emit(&self, event: AuthEvent) {
        // Listeners may subscribe or unsubscribe while handling the event
        let listeners: Vec<Listener> = lock(&self.listeners)
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).entries.len()
    }
}

/// Live subscription; dropping it detaches the listener
pub struct AuthSubscription {
    listeners: Weak<Mutex<Listeners>>,
    id: u64,
}

impl AuthSubscription {
    pub fn unsubscribe(self) {}
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            lock(&listeners).entries.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<AuthEvent>>>, Box<dyn Fn(AuthEvent) + Send + Sync>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, Box::new(move |event| sink.lock().unwrap().push(event)))
    }

    #[test]
    fn test_emit_reaches_subscribers() {
        let bus = AuthEventBus::new();
        let (seen, listener) = recorder();
        let _sub = bus.subscribe(listener);

        bus.emit(AuthEvent::PasswordRecovery);
        bus.emit(AuthEvent::SignedIn);

        assert_eq!(*seen.lock().unwrap(), vec![AuthEvent::PasswordRecovery, AuthEvent::SignedIn]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let bus = AuthEventBus::new();
        let (seen, listener) = recorder();
        let sub = bus.subscribe(listener);
        assert_eq!(bus.listener_count(), 1);

        sub.unsubscribe();
        bus.emit(AuthEvent::SignedOut);

        assert_eq!(bus.listener_count(), 0);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_drop_only_removes_own_listener() {
        let bus = AuthEventBus::new();
        let (first_seen, first) = recorder();
        let (second_seen, second) = recorder();
        let first_sub = bus.subscribe(first);
        let _second_sub = bus.subscribe(second);

        drop(first_sub);
        bus.emit(AuthEvent::UserUpdated);

        assert!(first_seen.lock().unwrap().is_empty());
        assert_eq!(*second_seen.lock().unwrap(), vec![AuthEvent::UserUpdated]);
    }

    #[test]
    fn test_subscription_outliving_bus_is_harmless() {
        let bus = AuthEventBus::new();
        let (_, listener) = recorder();
        let sub = bus.subscribe(listener);
        drop(bus);
        drop(sub);
    }
}
