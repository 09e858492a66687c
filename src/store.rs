//! Shared session store with subscriber notification.
//!
//! DESIGN
//! ======
//! One mutation entry point (`transition`) updates the snapshot and then
//! notifies every registered subscriber, so consumers observe each state
//! change exactly once. Callbacks run after the internal lock is released:
//! a subscriber may read the store, subscribe, or unsubscribe re-entrantly.
//!
//! The store is a thin consumer of [`AuthBackend`]; it does not time out a
//! `Loading` phase (that belongs to the collaborator) and it never retries a
//! failed sign-out on its own.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use uuid::Uuid;

use crate::backend::{AuthBackend, AuthError};
use crate::session::Session;

type Callback = Arc<dyn Fn(&Session) + Send + Sync>;

struct Inner {
    session: Session,
    /// Latched once the collaborator has resolved at least once; `Loading`
    /// is never observable afterwards.
    resolved: bool,
    subscribers: HashMap<Uuid, Callback>,
}

/// Page-lifetime holder of the current [`Session`].
///
/// Cloning is cheap and every clone observes the same state.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn AuthBackend>,
    inner: Arc<Mutex<Inner>>,
}

impl SessionStore {
    /// Create a store starting at [`Session::Unknown`].
    #[must_use]
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        Self {
            backend,
            inner: Arc::new(Mutex::new(Inner {
                session: Session::Unknown,
                resolved: false,
                subscribers: HashMap::new(),
            })),
        }
    }

    /// Current snapshot. Never blocks on the collaborator; while a
    /// sign-out or refresh is in flight this keeps returning the previous
    /// snapshot.
    #[must_use]
    pub fn current(&self) -> Session {
        self.lock().session.clone()
    }

    /// Register `consumer` to run on every state transition.
    ///
    /// The returned handle deregisters the consumer when
    /// [`Subscription::unsubscribe`] is invoked; merely dropping the handle
    /// leaves the consumer registered.
    #[must_use]
    pub fn subscribe<F>(&self, consumer: F) -> Subscription
    where
        F: Fn(&Session) + Send + Sync + 'static,
    {
        let id = Uuid::new_v4();
        self.lock().subscribers.insert(id, Arc::new(consumer));
        Subscription { id, inner: Arc::downgrade(&self.inner) }
    }

    /// Collaborator input: first resolution is in flight.
    ///
    /// Ignored once a resolution has occurred, so `Loading` can never follow
    /// an `Authenticated`/`Unauthenticated` snapshot.
    pub fn mark_loading(&self) {
        if self.lock().resolved {
            tracing::warn!("ignoring loading notification after session was already resolved");
            return;
        }
        self.transition(Session::Loading);
    }

    /// Collaborator input: session state is now known. `Some` means signed
    /// in as `identity`, `None` means signed out.
    pub fn resolve(&self, identity: Option<String>) {
        let next = match identity {
            Some(identity) => Session::Authenticated { identity },
            None => Session::Unauthenticated,
        };
        self.transition(next);
    }

    /// Ask the collaborator who is signed in and apply the answer.
    ///
    /// Marks `Loading` first only when no resolution has happened yet.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when the collaborator cannot answer; the stored
    /// snapshot is not rolled forward in that case.
    pub async fn refresh(&self) -> Result<Session, AuthError> {
        if !self.lock().resolved {
            self.transition(Session::Loading);
        }
        match self.backend.current_identity().await {
            Ok(identity) => {
                self.resolve(identity);
                Ok(self.current())
            }
            Err(e) => {
                tracing::warn!(error = %e, "session refresh failed");
                Err(e)
            }
        }
    }

    /// Terminate the current session.
    ///
    /// A no-op success when nobody is signed in. On provider success the
    /// snapshot becomes `Unauthenticated` and subscribers are notified.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when the provider rejects the request; the
    /// snapshot is left unchanged so the caller can surface the failure and
    /// decide whether to retry.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        if !self.current().is_authenticated() {
            tracing::debug!("sign-out requested with no authenticated session");
            return Ok(());
        }
        match self.backend.sign_out().await {
            Ok(()) => {
                self.transition(Session::Unauthenticated);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "sign-out rejected by auth provider; session unchanged");
                Err(e)
            }
        }
    }

    /// Single mutation entry point: store `next`, then notify subscribers.
    /// Equal states are not re-announced.
    fn transition(&self, next: Session) {
        let callbacks: Vec<Callback> = {
            let mut inner = self.lock();
            if inner.session == next {
                return;
            }
            if next.is_resolved() {
                inner.resolved = true;
            }
            inner.session = next.clone();
            inner.subscribers.values().cloned().collect()
        };
        tracing::debug!(status = ?next.status(), subscribers = callbacks.len(), "session transition");
        for callback in &callbacks {
            callback(&next);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Critical sections never panic mid-update, so a poisoned lock still
        // holds a coherent Inner.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Unsubscribe handle returned by [`SessionStore::subscribe`].
pub struct Subscription {
    id: Uuid,
    inner: Weak<Mutex<Inner>>,
}

impl Subscription {
    /// Deregister the consumer. Safe to invoke any number of times, and a
    /// no-op once the store itself is gone.
    pub fn unsubscribe(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .subscribers
                .remove(&self.id);
        }
    }
}
