use std::time::Duration;

use tokio::time::{sleep_until, timeout_at, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::CctxStatusSource;
use crate::dispatch::{DispatchRecord, DispatchStatus};

/// Polling budget for one tracking call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackingPolicy {
    pub poll_interval: Duration,
    pub deadline: Duration,
    pub max_polls: u32,
}

/// Polls the bridge until a dispatch reaches a terminal status or the budget runs out.
pub struct CctxTracker<S> {
    source: S,
    policy: TrackingPolicy,
}

impl<S> CctxTracker<S>
where
    S: CctxStatusSource,
{
    pub fn new(source: S, policy: TrackingPolicy) -> Self {
        Self { source, policy }
    }

    pub fn policy(&self) -> &TrackingPolicy {
        &self.policy
    }

    pub async fn track(&self, record: DispatchRecord) -> DispatchRecord {
        self.track_with_cancel(record, &CancellationToken::new())
            .await
    }

    /// Poll until terminal, out of budget, or cancelled.
    ///
    /// Cancellation only stops local polling: the record is returned still `Pending` and can be
    /// tracked again later. Terminal records are returned unchanged without querying.
    pub async fn track_with_cancel(
        &self,
        mut record: DispatchRecord,
        cancel: &CancellationToken,
    ) -> DispatchRecord {
        if record.is_terminal() {
            return record;
        }

        let deadline = Instant::now() + self.policy.deadline;
        let mut polls = 0;
        loop {
            if cancel.is_cancelled() {
                info!("stopped tracking {}", record.origin_tx_hash);
                return record;
            }

            let query = self.source.query(record.origin_tx_hash);
            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    info!("stopped tracking {}", record.origin_tx_hash);
                    return record;
                }
                result = timeout_at(deadline, query) => result,
            };
            polls += 1;
            record.polls += 1;

            match result {
                Ok(Ok(Some(report))) => {
                    record.last_remote_status = Some(report.status);
                    record.status_message = Some(report.status_message);
                    match report.status.dispatch_status() {
                        Some(status) => {
                            info!(
                                "dispatch {} finished as {:?} (bridge status {:?})",
                                record.origin_tx_hash, status, report.status
                            );
                            record.finalize(status);
                            return record;
                        }
                        None => debug!(
                            "dispatch {} still in flight: {:?}",
                            record.origin_tx_hash, report.status
                        ),
                    }
                }
                Ok(Ok(None)) => debug!(
                    "dispatch {} not observed by the bridge yet",
                    record.origin_tx_hash
                ),
                Ok(Err(e)) => warn!(
                    "status query for {} failed, will retry: {}",
                    record.origin_tx_hash, e
                ),
                Err(_) => debug!(
                    "status query for {} did not return before the deadline",
                    record.origin_tx_hash
                ),
            }

            if polls >= self.policy.max_polls || Instant::now() >= deadline {
                warn!(
                    "dispatch {} not confirmed after {} polls, needs manual reconciliation",
                    record.origin_tx_hash, polls
                );
                record.finalize(DispatchStatus::TimedOut);
                return record;
            }

            let next_poll = (Instant::now() + self.policy.poll_interval).min(deadline);
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("stopped tracking {}", record.origin_tx_hash);
                    return record;
                }
                _ = sleep_until(next_poll) => {}
            }
        }
    }

    /// One read-only status query, for reconciling timed out dispatches.
    ///
    /// Never changes the record it is given; returns the status the bridge reports now.
    pub async fn observe(&self, record: &DispatchRecord) -> crate::error::Result<DispatchStatus> {
        let status = self
            .source
            .query(record.origin_tx_hash)
            .await?
            .and_then(|report| report.status.dispatch_status())
            .unwrap_or(DispatchStatus::Pending);
        Ok(status)
    }
}
