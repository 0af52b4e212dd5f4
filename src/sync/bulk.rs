use std::time::Duration;

use crate::error::{Error, Result};
use crate::provider::ListApi;
use crate::types::{BulkOperation, OperationStatus};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// Waits on server-side bulk list operations.
pub struct BulkOperationTracker<'a, A: ListApi + ?Sized> {
    api: &'a A,
    poll_interval: Duration,
}

impl<'a, A: ListApi + ?Sized> BulkOperationTracker<'a, A> {
    pub fn new(api: &'a A, poll_interval: Duration) -> Self {
        Self { api, poll_interval }
    }

    /// Current state of the operation, without waiting.
    pub async fn status(&self, operation_id: &str) -> Result<BulkOperation> {
        self.api.bulk_operation(operation_id).await
    }

    /// Polls every `poll_interval` until the operation completes or fails.
    ///
    /// There is no overall timeout.
    pub async fn await_completion(&self, operation_id: &str) -> Result<BulkOperation> {
        loop {
            let op = self.api.bulk_operation(operation_id).await?;
            log::info!("bulk operation {} status: {}", operation_id, op.status);

            match op.status.clone() {
                OperationStatus::Pending | OperationStatus::Running => {
                    log::info!("waiting for bulk operation to complete...");
                    tokio::time::sleep(self.poll_interval).await;
                }
                OperationStatus::Completed => {
                    log::info!("bulk operation {} completed", operation_id);
                    return Ok(op);
                }
                OperationStatus::Failed => {
                    log::error!("bulk operation {} failed: {:?}", operation_id, op);
                    return Err(Error::BulkOperationFailed {
                        reason: op
                            .error
                            .clone()
                            .unwrap_or_else(|| "no reason given".to_string()),
                        operation: Box::new(op),
                    });
                }
                OperationStatus::Unknown(status) => {
                    return Err(Error::UnknownOperationStatus {
                        id: operation_id.to_string(),
                        status,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::test_fixtures::FakeListApi;
    use tokio::time::Instant;

    const INTERVAL: Duration = Duration::from_millis(250);

    #[tokio::test(start_paused = true)]
    async fn test_await_pending_running_completed() {
        let api = FakeListApi::default().with_statuses(&["pending", "running", "completed"]);
        let tracker = BulkOperationTracker::new(&api, INTERVAL);

        let start = Instant::now();
        let op = tracker.await_completion("op-1").await.unwrap();

        assert_eq!(op.status, OperationStatus::Completed);
        let waited = start.elapsed();
        assert!(waited >= INTERVAL * 2 && waited < INTERVAL * 3, "{:?}", waited);
        assert_eq!(api.status_polls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_await_failed_stops_polling() {
        let api = FakeListApi::default().with_statuses(&["failed", "completed"]);
        let tracker = BulkOperationTracker::new(&api, INTERVAL);

        let start = Instant::now();
        let err = tracker.await_completion("op-2").await.unwrap_err();

        match err {
            Error::BulkOperationFailed { reason, operation } => {
                assert_eq!(reason, "operation failed");
                assert_eq!(operation.id, "op-2");
                assert_eq!(operation.status, OperationStatus::Failed);
                assert_eq!(operation.completed.as_deref(), Some("2020-01-01T08:00:00Z"));
            }
            e => panic!("unexpected error: {:?}", e),
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(api.status_polls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_await_unknown_status_is_terminal() {
        let api = FakeListApi::default().with_statuses(&["running", "archived", "completed"]);
        let tracker = BulkOperationTracker::new(&api, INTERVAL);

        let err = tracker.await_completion("op-3").await.unwrap_err();

        assert!(
            matches!(err, Error::UnknownOperationStatus { ref status, .. } if status == "archived"),
            "{:?}",
            err
        );
        assert_eq!(api.status_polls(), 2);
    }

    #[tokio::test]
    async fn test_status_does_not_wait() {
        let api = FakeListApi::default().with_statuses(&["pending", "completed"]);
        let tracker = BulkOperationTracker::new(&api, INTERVAL);

        let op = tracker.status("op-4").await.unwrap();
        assert_eq!(op.status, OperationStatus::Pending);
        assert_eq!(api.status_polls(), 1);
    }
}
