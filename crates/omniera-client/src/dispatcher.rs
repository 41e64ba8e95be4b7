use alloy::primitives::{Address, U256};
use futures::future::join_all;
use omniera_primitives::{encode, Descriptor, Operation};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::api::CctxStatusSource;
use crate::dispatch::{DispatchRecord, DispatchStatus};
use crate::error::Result;
use crate::relay::{relay_payload, RelaySubmitter};
use crate::tracker::{CctxTracker, TrackingPolicy};

/// Submits descriptors through the bridge relay and follows them to completion.
///
/// Never retries a submission: a second send would forward the attached value twice.
pub struct CrossChainDispatcher<R, S> {
    relay: R,
    tracker: CctxTracker<S>,
    relay_recipient: Option<Address>,
}

impl<R, S> CrossChainDispatcher<R, S>
where
    R: RelaySubmitter,
    S: CctxStatusSource,
{
    pub fn new(relay: R, status_source: S, policy: TrackingPolicy) -> Self {
        Self {
            relay,
            tracker: CctxTracker::new(status_source, policy),
            relay_recipient: None,
        }
    }

    /// Prefix every relay payload with the home-chain contract that should receive it.
    pub fn with_relay_recipient(mut self, recipient: Option<Address>) -> Self {
        self.relay_recipient = recipient;
        self
    }

    pub fn tracker(&self) -> &CctxTracker<S> {
        &self.tracker
    }

    /// Send the descriptor to the relay. Returns as soon as the transaction is broadcast.
    pub async fn submit(&self, descriptor: Descriptor, value: U256) -> Result<DispatchRecord> {
        let payload = relay_payload(&descriptor, self.relay_recipient);
        let tx_hash = self.relay.submit(payload, value).await?;
        info!("dispatched {} in {}", descriptor, tx_hash);
        Ok(DispatchRecord::pending(tx_hash, descriptor, value))
    }

    /// Encode and submit an operation.
    pub async fn dispatch(&self, operation: &Operation, value: U256) -> Result<DispatchRecord> {
        info!("dispatching {}", operation);
        self.submit(encode(operation), value).await
    }

    pub async fn track(&self, record: DispatchRecord) -> DispatchRecord {
        self.tracker.track(record).await
    }

    pub async fn track_with_cancel(
        &self,
        record: DispatchRecord,
        cancel: &CancellationToken,
    ) -> DispatchRecord {
        self.tracker.track_with_cancel(record, cancel).await
    }

    /// Track several dispatches at once. Results keep the input order whatever order the
    /// bridge completes them in.
    pub async fn track_all(&self, records: Vec<DispatchRecord>) -> Vec<DispatchRecord> {
        join_all(records.into_iter().map(|record| self.tracker.track(record))).await
    }

    pub async fn observe(&self, record: &DispatchRecord) -> Result<DispatchStatus> {
        self.tracker.observe(record).await
    }

    /// Submit, track, and surface timeouts and remote failures as errors.
    pub async fn dispatch_and_track(
        &self,
        operation: &Operation,
        value: U256,
    ) -> Result<DispatchRecord> {
        let record = self.dispatch(operation, value).await?;
        self.track(record).await.into_result()
    }
}
