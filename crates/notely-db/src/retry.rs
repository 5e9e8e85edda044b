//! Bounded retry of transactions that lost a write conflict.

use std::time::Duration;

use tracing::debug;
use uuid::Uuid;

use crate::error::DbError;

/// Upper bound on attempts for one logical operation. Every conflicting
/// round commits at least one contender, so this comfortably covers
/// bursts of concurrent writers on the same row.
pub(crate) const MAX_TXN_ATTEMPTS: u32 = 32;

/// Run `txn` until it commits, re-running it only while it fails with
/// [`DbError::TransactionConflict`]. Any other outcome is returned as is.
pub(crate) async fn retry_on_conflict<T, F, Fut>(operation: &str, mut txn: F) -> Result<T, DbError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbError>>,
{
    let mut attempt = 1;
    loop {
        match txn().await {
            Err(DbError::TransactionConflict(msg)) if attempt < MAX_TXN_ATTEMPTS => {
                debug!(operation, attempt, error = %msg, "transaction conflict, retrying");
                tokio::time::sleep(backoff(attempt)).await;
                attempt += 1;
            }
            other => return other,
        }
    }
}

/// Linear backoff with a little jitter so that contenders spread out.
fn backoff(attempt: u32) -> Duration {
    let jitter = u64::from(Uuid::new_v4().as_bytes()[0] % 4);
    Duration::from_millis(u64::from(attempt) + jitter)
}
