//! # authstate
//!
//! Shared authentication-session state and database-pool lifecycle for the
//! web application, independent of any UI rendering framework.
//!
//! Two leaf components with no data-flow relationship between them:
//!
//! - [`store::SessionStore`] — page-lifetime holder of the current
//!   [`session::Session`], mutated by the external authentication
//!   collaborator behind [`backend::AuthBackend`] and observed by any number
//!   of subscribers (status bar, navigation bar, route guards).
//! - [`db::PoolGuard`] — lazily constructs at most one `PgPool` per process
//!   and refuses construction outside the server execution context.

pub mod backend;
pub mod db;
pub mod redirect;
pub mod session;
pub mod store;

pub use backend::{AuthBackend, AuthError, HttpAuthBackend};
pub use db::{ExecutionContext, PoolError, PoolGuard};
pub use session::{Session, SessionStatus};
pub use store::{SessionStore, Subscription};
