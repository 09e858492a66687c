//! Auth-session snapshot for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route guards and user-aware components branch on this snapshot to
//! coordinate login redirects and identity-dependent rendering. Consumers
//! must treat `Loading` as distinct from `Unauthenticated`: collapsing "not
//! yet known" into "signed out" flashes a login prompt during startup.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::{Deserialize, Serialize};

/// Resolution phase of the session, without the identity payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// No information yet; nothing has asked the auth collaborator.
    Unknown,
    /// First resolution is in flight.
    Loading,
    /// A user is signed in.
    Authenticated,
    /// Resolved: nobody is signed in.
    Unauthenticated,
}

/// Snapshot of the current authentication session.
///
/// The identity lives inside the `Authenticated` variant, so "identity
/// present iff authenticated" holds by construction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Session {
    /// No information yet.
    #[default]
    Unknown,
    /// First resolution is in flight.
    Loading,
    /// Signed in as `identity` (an opaque name chosen by the provider,
    /// typically an email or username).
    Authenticated { identity: String },
    /// Resolved: signed out.
    Unauthenticated,
}

impl Session {
    /// Resolution phase of this snapshot.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        match self {
            Self::Unknown => SessionStatus::Unknown,
            Self::Loading => SessionStatus::Loading,
            Self::Authenticated { .. } => SessionStatus::Authenticated,
            Self::Unauthenticated => SessionStatus::Unauthenticated,
        }
    }

    /// Identity of the signed-in user, if any.
    #[must_use]
    pub fn identity(&self) -> Option<&str> {
        match self {
            Self::Authenticated { identity } => Some(identity),
            _ => None,
        }
    }

    /// True when a user is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// True once the auth collaborator has answered at least once
    /// (`Authenticated` or `Unauthenticated`, never `Unknown`/`Loading`).
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Authenticated { .. } | Self::Unauthenticated)
    }
}
