use std::sync::{Arc, Mutex};

use super::*;
use crate::backend::{AuthBackend, AuthError};

/// Backend stub; redirect tests drive the store directly.
struct NullBackend;

#[async_trait::async_trait]
impl AuthBackend for NullBackend {
    async fn current_identity(&self) -> Result<Option<String>, AuthError> {
        Ok(None)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        Ok(())
    }
}

fn store() -> SessionStore {
    SessionStore::new(Arc::new(NullBackend))
}

fn nav_recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) + Send + Sync + 'static) {
    let visits = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&visits);
    (visits, move |path: &str| sink.lock().unwrap().push(path.to_owned()))
}

#[test]
fn redirects_when_resolved_unauthenticated() {
    let store = store();
    let (visits, navigate) = nav_recorder();
    let _sub = install_unauth_redirect(&store, navigate);

    store.resolve(None);

    assert_eq!(*visits.lock().unwrap(), vec![SIGN_IN_PATH.to_owned()]);
}

#[test]
fn loading_does_not_redirect() {
    let store = store();
    let (visits, navigate) = nav_recorder();
    let _sub = install_unauth_redirect(&store, navigate);

    store.mark_loading();

    assert!(visits.lock().unwrap().is_empty());
}

#[test]
fn authenticated_does_not_redirect() {
    let store = store();
    let (visits, navigate) = nav_recorder();
    let _sub = install_unauth_redirect(&store, navigate);

    store.resolve(Some("a@example.com".into()));

    assert!(visits.lock().unwrap().is_empty());
}

#[test]
fn fires_immediately_when_already_signed_out() {
    let store = store();
    store.resolve(None);

    let (visits, navigate) = nav_recorder();
    let _sub = install_unauth_redirect(&store, navigate);

    assert_eq!(*visits.lock().unwrap(), vec![SIGN_IN_PATH.to_owned()]);
}

#[test]
fn uninstall_stops_redirects() {
    let store = store();
    let (visits, navigate) = nav_recorder();
    let sub = install_unauth_redirect(&store, navigate);

    sub.unsubscribe();
    store.resolve(None);

    assert!(visits.lock().unwrap().is_empty());
}

#[tokio::test]
async fn sign_out_triggers_redirect_for_authenticated_user() {
    let store = store();
    store.resolve(Some("a@example.com".into()));

    let (visits, navigate) = nav_recorder();
    let _sub = install_unauth_redirect(&store, navigate);

    store.sign_out().await.unwrap();

    assert_eq!(*visits.lock().unwrap(), vec![SIGN_IN_PATH.to_owned()]);
}
