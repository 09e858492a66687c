//! Database pool lifecycle guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! The connection pool is expensive and must exist at most once per process:
//! repeated module reinitialization during dev reloads must reuse the pool
//! instead of leaking more. Construction is also a server-only capability;
//! client/browser execution contexts must be refused before anything is
//! built rather than handed a broken pool.
//!
//! DESIGN
//! ======
//! The execution context is an explicit constructor parameter, not an
//! ambient-environment probe, so the fail-fast precondition is testable.
//! [`DB`] is the single process-wide holder; no other mutable global exists
//! in this crate. There is no teardown: the pool lives for the process.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::future::Future;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::OnceCell;

const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

fn db_max_connections() -> u32 {
    match std::env::var("DB_MAX_CONNECTIONS") {
        Ok(raw) => raw.parse().unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
        Err(_) => DEFAULT_DB_MAX_CONNECTIONS,
    }
}

/// Where code is currently executing, relevant to which resources are
/// safely reachable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionContext {
    /// Long-lived server process; the database is reachable.
    Server,
    /// Browser/client context; the database must never be constructed here.
    Client,
}

/// Error from [`PoolGuard`].
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    /// Construction attempted from the client execution context. A
    /// programmer error meant to be caught in development, not recovered
    /// from at runtime.
    #[error("database pool is not constructible from the client execution context")]
    ClientContext,
    /// The pool itself could not be built.
    #[error("database connection failed: {0}")]
    Connect(#[from] sqlx::Error),
}

/// Once-per-process holder of a [`PgPool`] gated on [`ExecutionContext`].
pub struct PoolGuard {
    context: ExecutionContext,
    cell: OnceCell<PgPool>,
}

/// Process-wide pool holder used by the application server.
pub static DB: PoolGuard = PoolGuard::new(ExecutionContext::Server);

impl PoolGuard {
    /// Create an empty guard for code running in `context`.
    #[must_use]
    pub const fn new(context: ExecutionContext) -> Self {
        Self { context, cell: OnceCell::const_new() }
    }

    /// The already-constructed pool, if any.
    #[must_use]
    pub fn get(&self) -> Option<&PgPool> {
        self.cell.get()
    }

    /// Return the pool, connecting to `database_url` exactly once. Every
    /// later call returns the same instance without reconnecting.
    ///
    /// # Errors
    ///
    /// [`PoolError::ClientContext`] when this guard belongs to a client
    /// context (checked before anything is constructed), or
    /// [`PoolError::Connect`] when the connection fails — a later call may
    /// retry in that case.
    pub async fn get_or_connect(&self, database_url: &str) -> Result<&PgPool, PoolError> {
        self.get_or_try_init_with(|| async {
            let max_connections = db_max_connections();
            tracing::info!(max_connections, "constructing database pool");
            PgPoolOptions::new()
                .max_connections(max_connections)
                .connect(database_url)
                .await
        })
        .await
    }

    /// Same once-only semantics with a caller-supplied initializer.
    ///
    /// # Errors
    ///
    /// [`PoolError::ClientContext`] before `init` is ever invoked when this
    /// guard belongs to a client context, or [`PoolError::Connect`] when
    /// `init` fails.
    pub async fn get_or_try_init_with<F, Fut>(&self, init: F) -> Result<&PgPool, PoolError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<PgPool, sqlx::Error>>,
    {
        if self.context != ExecutionContext::Server {
            return Err(PoolError::ClientContext);
        }
        Ok(self.cell.get_or_try_init(init).await?)
    }
}
