//! External authentication collaborator seam.
//!
//! DESIGN
//! ======
//! The store never verifies credentials or stores tokens itself; it consumes
//! this trait. `HttpAuthBackend` is the production implementation over the
//! application's REST auth routes; tests substitute their own impls.
//!
//! ERROR HANDLING
//! ==============
//! Sign-out failures are recoverable and must reach the initiating caller so
//! it can decide on user-visible feedback or retry. Nothing here swallows a
//! failed mutation.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use async_trait::async_trait;
use serde::Deserialize;

/// Error from the external authentication collaborator.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The auth endpoint answered with an unexpected status.
    #[error("auth endpoint returned status {0}")]
    Status(u16),
    /// The request never produced a usable response.
    #[error("auth request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Capability surface of the authentication provider.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Identity of the currently signed-in user, `None` when signed out.
    async fn current_identity(&self) -> Result<Option<String>, AuthError>;

    /// Terminate the current session at the provider.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when the provider rejects the request; the
    /// session must then be assumed still live.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Payload of `GET /api/auth/me`.
#[derive(Debug, Deserialize)]
struct MeResponse {
    name: String,
}

/// REST implementation against the application server's auth routes.
pub struct HttpAuthBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthBackend {
    /// Create a backend for the server at `base_url` (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), base_url: base_url.into() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl AuthBackend for HttpAuthBackend {
    async fn current_identity(&self) -> Result<Option<String>, AuthError> {
        let resp = self.client.get(self.url("/api/auth/me")).send().await?;
        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AuthError::Status(status.as_u16()));
        }
        let me: MeResponse = resp.json().await?;
        Ok(Some(me.name))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let resp = self.client.post(self.url("/api/auth/logout")).send().await?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(AuthError::Status(status.as_u16()))
        }
    }
}
