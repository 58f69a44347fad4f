//! `PostgreSQL` tracker store.
//!
//! Implements all three repository ports over Diesel. Task creation locks the
//! project row, bumps its `last_task_nr` high-water mark and inserts the task
//! in one transaction; the `tasks_project_nr_unique` constraint backs the
//! allocation up.

mod blocking_helpers;
mod errors;
mod models;
mod project;
mod schema;
mod tag;
mod task;

pub use blocking_helpers::PgPool;

use blocking_helpers::{get_conn, run_blocking};
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};

use crate::config::PostgresStoreConfig;
use crate::tracker::ports::{RepositoryError, RepositoryResult};

/// `PostgreSQL`-backed implementation of the tracker repositories.
#[derive(Debug, Clone)]
pub struct PostgresTrackerStore {
    pool: PgPool,
}

impl PostgresTrackerStore {
    /// Creates a store from an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Builds a connection pool from `config` and wraps it in a store.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Persistence`] when the pool cannot be
    /// built, for example because the database is unreachable.
    pub fn connect(config: &PostgresStoreConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(config.database_url.as_str());
        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .build(manager)
            .map_err(RepositoryError::persistence)?;
        Ok(Self::new(pool))
    }

    async fn with_connection<F, T>(&self, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking(move || {
            let mut connection = get_conn(&pool)?;
            f(&mut connection)
        })
        .await
    }
}
