use super::*;

// =============================================================================
// DEFAULTS & STATUS
// =============================================================================

#[test]
fn default_session_is_unknown() {
    assert_eq!(Session::default(), Session::Unknown);
    assert_eq!(Session::default().status(), SessionStatus::Unknown);
}

#[test]
fn status_maps_every_variant() {
    assert_eq!(Session::Unknown.status(), SessionStatus::Unknown);
    assert_eq!(Session::Loading.status(), SessionStatus::Loading);
    assert_eq!(
        Session::Authenticated { identity: "a@example.com".into() }.status(),
        SessionStatus::Authenticated
    );
    assert_eq!(Session::Unauthenticated.status(), SessionStatus::Unauthenticated);
}

#[test]
fn loading_is_distinct_from_unauthenticated() {
    assert_ne!(Session::Loading, Session::Unauthenticated);
    assert_ne!(SessionStatus::Loading, SessionStatus::Unauthenticated);
}

// =============================================================================
// IDENTITY INVARIANT
// =============================================================================

#[test]
fn identity_present_only_when_authenticated() {
    let authed = Session::Authenticated { identity: "a@example.com".into() };
    assert_eq!(authed.identity(), Some("a@example.com"));

    assert_eq!(Session::Unknown.identity(), None);
    assert_eq!(Session::Loading.identity(), None);
    assert_eq!(Session::Unauthenticated.identity(), None);
}

#[test]
fn is_authenticated_tracks_variant() {
    assert!(Session::Authenticated { identity: "x".into() }.is_authenticated());
    assert!(!Session::Unauthenticated.is_authenticated());
    assert!(!Session::Loading.is_authenticated());
}

#[test]
fn resolved_means_authenticated_or_unauthenticated() {
    assert!(Session::Authenticated { identity: "x".into() }.is_resolved());
    assert!(Session::Unauthenticated.is_resolved());
    assert!(!Session::Unknown.is_resolved());
    assert!(!Session::Loading.is_resolved());
}

// =============================================================================
// SERDE REPRESENTATION
// =============================================================================

#[test]
fn serializes_with_lowercase_status_tag() {
    let json = serde_json::to_value(Session::Authenticated { identity: "a@example.com".into() })
        .expect("serialize");
    assert_eq!(json["status"], "authenticated");
    assert_eq!(json["identity"], "a@example.com");

    let json = serde_json::to_value(Session::Unauthenticated).expect("serialize");
    assert_eq!(json["status"], "unauthenticated");
    assert!(json.get("identity").is_none());
}

#[test]
fn deserializes_round_trip() {
    let original = Session::Authenticated { identity: "a@example.com".into() };
    let json = serde_json::to_string(&original).expect("serialize");
    let restored: Session = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, original);
}
