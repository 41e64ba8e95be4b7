use alloy::primitives::{TxHash, U256};
use chrono::{DateTime, Utc};
use omniera_primitives::Descriptor;
use serde::{Deserialize, Serialize};

use crate::api::CctxStatus;
use crate::error::{ClientError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DispatchStatus {
    Pending,
    Confirmed,
    Failed,
    /// No terminal status seen before the deadline. The remote effect is unknown.
    TimedOut,
}

impl DispatchStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, DispatchStatus::Pending)
    }
}

/// Local bookkeeping for one submitted descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRecord {
    pub origin_tx_hash: TxHash,
    pub descriptor: Descriptor,
    pub value_sent: U256,
    pub status: DispatchStatus,
    pub submitted_at: DateTime<Utc>,
    /// Status queries made so far, across all tracking calls.
    pub polls: u32,
    pub last_remote_status: Option<CctxStatus>,
    pub status_message: Option<String>,
    pub finalized_at: Option<DateTime<Utc>>,
}

impl DispatchRecord {
    pub fn pending(origin_tx_hash: TxHash, descriptor: Descriptor, value_sent: U256) -> Self {
        Self {
            origin_tx_hash,
            descriptor,
            value_sent,
            status: DispatchStatus::Pending,
            submitted_at: Utc::now(),
            polls: 0,
            last_remote_status: None,
            status_message: None,
            finalized_at: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Move to a terminal status. Terminal records are never changed again.
    pub(crate) fn finalize(&mut self, status: DispatchStatus) {
        if self.is_terminal() {
            return;
        }
        self.status = status;
        self.finalized_at = Some(Utc::now());
    }

    /// Surface the failure modes that need manual reconciliation as errors.
    pub fn into_result(self) -> Result<Self> {
        match self.status {
            DispatchStatus::TimedOut => Err(ClientError::DispatchTimeout {
                tx_hash: self.origin_tx_hash,
                descriptor: self.descriptor,
                polls: self.polls,
            }),
            DispatchStatus::Failed => Err(ClientError::RemoteFailure {
                tx_hash: self.origin_tx_hash,
                message: self
                    .status_message
                    .unwrap_or_else(|| "no status message".to_string()),
                descriptor: self.descriptor,
            }),
            DispatchStatus::Pending | DispatchStatus::Confirmed => Ok(self),
        }
    }
}
