//! Session store — process-wide session state with observer subscription.
//!
//! The store is an explicit context object: it is created by the client
//! builder and passed to whoever needs it, never reached through ambient
//! globals. All mutation goes through the sign-in/sign-up/sign-out
//! operations on [`Auth`](crate::auth::Auth).

use super::Session;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Current auth state as observed by views.
///
/// While `loading` is true a sign-in/up/out call is in flight and `session`
/// must not be treated as settled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub session: Option<Session>,
    pub loading: bool,
}

/// Token returned by [`SessionStore::on_change`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&SessionState) + Send + Sync>;

struct StoreShared {
    state: RwLock<SessionState>,
    listeners: Mutex<HashMap<u64, Listener>>,
    next_listener: AtomicU64,
}

/// Holder of the current authenticated session. Cheap to clone; clones
/// share the same state.
pub struct SessionStore {
    inner: Arc<StoreShared>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(StoreShared {
                state: RwLock::new(SessionState::default()),
                listeners: Mutex::new(HashMap::new()),
                next_listener: AtomicU64::new(1),
            }),
        }
    }

    pub fn session(&self) -> Option<Session> {
        self.inner.state.read().session.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.read().loading
    }

    pub fn state(&self) -> SessionState {
        self.inner.state.read().clone()
    }

    /// Register a listener called synchronously after every state
    /// transition.
    pub fn on_change<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&SessionState) + Send + Sync + 'static,
    {
        let id = self.inner.next_listener.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.lock().insert(id, Arc::new(listener));
        SubscriptionId(id)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.listeners.lock().remove(&id.0);
    }

    /// Mark an auth operation as started.
    pub(crate) fn begin(&self) {
        self.inner.state.write().loading = true;
        self.notify();
    }

    /// Resolve the in-flight operation with a new session value.
    pub(crate) fn finish(&self, session: Option<Session>) {
        {
            let mut state = self.inner.state.write();
            state.session = session;
            state.loading = false;
        }
        self.notify();
    }

    /// Resolve the in-flight operation leaving the session untouched
    /// (failed sign-in/up).
    pub(crate) fn fail(&self) {
        self.inner.state.write().loading = false;
        self.notify();
    }

    fn notify(&self) {
        let state = self.inner.state.read().clone();
        let listeners: Vec<Listener> = self.inner.listeners.lock().values().cloned().collect();
        for listener in listeners {
            listener(&state);
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SessionStore {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::UserId;
    use parking_lot::Mutex as PlMutex;

    fn session() -> Session {
        Session {
            user_id: UserId::new("u1"),
            email: "a@b.com".into(),
            username: "alice".into(),
        }
    }

    #[test]
    fn test_listeners_observe_transitions() {
        let store = SessionStore::new();
        let seen: Arc<PlMutex<Vec<SessionState>>> = Arc::new(PlMutex::new(Vec::new()));
        let sink = seen.clone();
        store.on_change(move |state| sink.lock().push(state.clone()));

        store.begin();
        store.finish(Some(session()));

        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].loading && seen[0].session.is_none());
        assert!(!seen[1].loading);
        assert_eq!(seen[1].session, Some(session()));
    }

    #[test]
    fn test_fail_keeps_prior_session() {
        let store = SessionStore::new();
        store.finish(Some(session()));
        store.begin();
        store.fail();
        assert!(!store.is_loading());
        assert_eq!(store.session(), Some(session()));
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = SessionStore::new();
        let count = Arc::new(AtomicU64::new(0));
        let sink = count.clone();
        let id = store.on_change(move |_| {
            sink.fetch_add(1, Ordering::Relaxed);
        });

        store.begin();
        assert_eq!(count.load(Ordering::Relaxed), 1);
        store.unsubscribe(id);
        store.finish(None);
        assert_eq!(count.load(Ordering::Relaxed), 1);
    }
}
