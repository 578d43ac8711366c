// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Notification channels for fetch outcomes
//!
//! Every outcome is announced on two independent channels:
//!
//! - a [`Callback`]: a single slot, where registering a new handler replaces the previous one
//! - an [`Event`]: an ordered list of payload-free listeners, where registration is additive
//!
//! Both are invoked with no lock held, so handlers may call back into the
//! component that owns them.

use std::{
    fmt,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

type Handler<A> = Arc<dyn Fn(&A) + Send + Sync>;
type Listener = Arc<dyn Fn() + Send + Sync>;

/// Single-subscriber callback slot; the last registration wins
pub struct Callback<A: ?Sized> {
    handler: Mutex<Option<Handler<A>>>,
}

impl<A: ?Sized> Callback<A> {
    /// Create an empty slot
    pub fn new() -> Self {
        Self {
            handler: Mutex::new(None),
        }
    }

    /// Register `handler`, replacing any previous one
    pub fn set<F>(&self, handler: F)
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        *self.lock() = Some(Arc::new(handler));
    }

    /// Remove the registered handler
    pub fn clear(&self) {
        *self.lock() = None;
    }

    /// Whether a handler is registered
    pub fn is_set(&self) -> bool {
        self.lock().is_some()
    }

    /// Invoke the handler if one is registered, returning whether it ran
    pub fn invoke(&self, arg: &A) -> bool {
        let handler = self.lock().clone();
        match handler {
            Some(handler) => {
                handler(arg);
                true
            }
            None => false,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Handler<A>>> {
        self.handler.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<A: ?Sized> Default for Callback<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ?Sized> fmt::Debug for Callback<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("is_set", &self.is_set())
            .finish()
    }
}

/// Handle returned by [`Event::add_listener`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Multi-subscriber broadcast event without payload
#[derive(Default)]
pub struct Event {
    listeners: Mutex<Vec<(ListenerId, Listener)>>,
    next_id: AtomicU64,
}

impl Event {
    /// Create an event with no listeners
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener; listeners run in registration order
    pub fn add_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener, returning whether it was registered
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.lock();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    /// Remove every listener
    pub fn remove_all_listeners(&self) {
        self.lock().clear();
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.lock().len()
    }

    /// Invoke all listeners in order, returning how many ran
    pub fn invoke(&self) -> usize {
        let listeners: Vec<Listener> = self
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in &listeners {
            listener();
        }
        listeners.len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(ListenerId, Listener)>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    #[test]
    fn callback_last_registration_wins() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let callback: Callback<u32> = Callback::new();

        let counter = Arc::clone(&first);
        callback.set(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let counter = Arc::clone(&second);
        callback.set(move |value| {
            counter.fetch_add(*value as usize, Ordering::SeqCst);
        });

        assert!(callback.invoke(&5));
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn empty_callback_is_skipped() {
        let callback: Callback<str> = Callback::default();

        assert!(!callback.is_set());
        assert!(!callback.invoke("ignored"));

        callback.set(|_| {});
        assert!(callback.is_set());
        callback.clear();
        assert!(!callback.invoke("ignored"));
    }

    #[test]
    fn event_listeners_accumulate_in_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let event = Event::new();

        for name in ["a", "b", "c"] {
            let calls = Arc::clone(&calls);
            event.add_listener(move || calls.lock().unwrap().push(name));
        }

        assert_eq!(event.invoke(), 3);
        assert_eq!(*calls.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn event_listener_removal() {
        let hits = Arc::new(AtomicUsize::new(0));
        let event = Event::new();

        let counter = Arc::clone(&hits);
        let keep = event.add_listener(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let counter = Arc::clone(&hits);
        let dropped = event.add_listener(move || {
            counter.fetch_add(10, Ordering::SeqCst);
        });

        assert!(event.remove_listener(dropped));
        assert!(!event.remove_listener(dropped));
        assert_ne!(keep, dropped);

        event.invoke();
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        event.remove_all_listeners();
        assert_eq!(event.invoke(), 0);
    }

    #[test]
    fn listener_may_register_another_listener() {
        let event = Arc::new(Event::new());
        let inner = Arc::clone(&event);
        event.add_listener(move || {
            inner.add_listener(|| {});
        });

        event.invoke();
        assert_eq!(event.listener_count(), 2);
    }
}
