//! Blocking operation helpers for the `PostgreSQL` store.
//!
//! Diesel connections are synchronous, so every repository call is moved onto
//! Tokio's blocking thread pool with a connection checked out from r2d2.

use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};

use crate::tracker::ports::{RepositoryError, RepositoryResult};

/// `PostgreSQL` connection pool type.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Pooled connection type for internal use.
pub(super) type PooledConn = PooledConnection<ConnectionManager<PgConnection>>;

/// Runs a blocking database operation on a dedicated thread pool.
pub(super) async fn run_blocking<F, T>(f: F) -> RepositoryResult<T>
where
    F: FnOnce() -> RepositoryResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(RepositoryError::persistence)?
}

/// Obtains a connection from the pool.
pub(super) fn get_conn(pool: &PgPool) -> RepositoryResult<PooledConn> {
    pool.get().map_err(RepositoryError::persistence)
}
