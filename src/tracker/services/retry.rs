//! Bounded retry of task creation after number conflicts.

use crate::config::TrackerConfig;
use crate::tracker::ports::{RepositoryError, RepositoryResult};
use std::future::Future;
use tracing::warn;

/// Runs `op` until it succeeds, fails with anything other than a task number
/// conflict, or the configured attempt budget is spent.
///
/// The pause between attempts starts at the configured backoff and doubles.
pub(super) async fn retry_on_number_conflict<T, F, Fut>(
    config: &TrackerConfig,
    mut op: F,
) -> RepositoryResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = RepositoryResult<T>>,
{
    let attempts = config.max_create_attempts();
    let mut backoff = config.retry_backoff();
    let mut attempt = 1;
    loop {
        match op().await {
            Err(RepositoryError::TaskNumberConflict { project_id, number })
                if attempt < attempts =>
            {
                warn!(
                    %project_id,
                    %number,
                    attempt,
                    max_attempts = attempts,
                    "task number claimed concurrently, retrying"
                );
                tokio::time::sleep(backoff).await;
                backoff = backoff.saturating_mul(2);
                attempt += 1;
            }
            result => return result,
        }
    }
}
