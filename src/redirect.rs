//! Shared unauthenticated-redirect behavior.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every guarded route should kick a signed-out visitor to the sign-in
//! surface the same way. The store does not own routing, so the navigation
//! capability is injected as a closure.

#[cfg(test)]
#[path = "redirect_test.rs"]
mod redirect_test;

use std::sync::Arc;

use crate::session::Session;
use crate::store::{SessionStore, Subscription};

/// Where unauthenticated visitors are sent.
pub const SIGN_IN_PATH: &str = "/login";

/// Call `navigate` with [`SIGN_IN_PATH`] whenever the session is resolved
/// with no user present. `Loading`/`Unknown` never trigger the redirect, so
/// startup does not flash the sign-in page.
///
/// Fires immediately if the store is already resolved-and-signed-out, then on
/// every later transition into that state. Returns the subscription so the
/// caller can uninstall the behavior.
#[must_use]
pub fn install_unauth_redirect<F>(store: &SessionStore, navigate: F) -> Subscription
where
    F: Fn(&str) + Send + Sync + 'static,
{
    let navigate = Arc::new(navigate);
    let on_transition = Arc::clone(&navigate);
    let subscription = store.subscribe(move |session| {
        if wants_redirect(session) {
            on_transition(SIGN_IN_PATH);
        }
    });
    if wants_redirect(&store.current()) {
        navigate(SIGN_IN_PATH);
    }
    subscription
}

fn wants_redirect(session: &Session) -> bool {
    session.is_resolved() && !session.is_authenticated()
}
