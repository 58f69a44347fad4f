//! Runtime configuration for tracker services and stores.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for the tracker services.
///
/// Every field has a default, so a partial document deserializes cleanly.
///
/// # Examples
///
/// ```
/// use trellis::config::TrackerConfig;
///
/// let config = TrackerConfig::default();
/// assert_eq!(config.max_create_attempts(), 2);
///
/// let single_shot = TrackerConfig::no_retry();
/// assert_eq!(single_shot.max_create_attempts(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Attempts made to create a task when its number is claimed concurrently.
    /// Values below one are treated as one.
    pub max_create_attempts: u32,
    /// Pause before the first retry, in milliseconds. Doubles per retry.
    pub retry_backoff_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_create_attempts: 2,
            retry_backoff_ms: 25,
        }
    }
}

impl TrackerConfig {
    /// Creates a configuration that never retries task creation.
    #[must_use]
    pub const fn no_retry() -> Self {
        Self {
            max_create_attempts: 1,
            retry_backoff_ms: 0,
        }
    }

    /// Returns a copy with a different attempt budget.
    #[must_use]
    pub const fn with_max_create_attempts(mut self, attempts: u32) -> Self {
        self.max_create_attempts = attempts;
        self
    }

    /// Returns the effective attempt budget, never less than one.
    #[must_use]
    pub const fn max_create_attempts(&self) -> u32 {
        if self.max_create_attempts == 0 {
            1
        } else {
            self.max_create_attempts
        }
    }

    /// Returns the pause before the first retry.
    #[must_use]
    pub const fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

/// Connection settings for the `PostgreSQL` store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostgresStoreConfig {
    /// libpq connection URL.
    pub database_url: String,
    /// Maximum pooled connections.
    #[serde(default = "PostgresStoreConfig::default_pool_size")]
    pub max_pool_size: u32,
}

impl PostgresStoreConfig {
    /// Creates settings for `database_url` with the default pool size.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_pool_size: Self::default_pool_size(),
        }
    }

    /// Returns a copy with a different pool size.
    #[must_use]
    pub const fn with_max_pool_size(mut self, max_pool_size: u32) -> Self {
        self.max_pool_size = max_pool_size;
        self
    }

    const fn default_pool_size() -> u32 {
        10
    }
}
