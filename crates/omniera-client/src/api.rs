use alloy::primitives::TxHash;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::dispatch::DispatchStatus;
use crate::error::Result;

pub mod cctx;

/// Status of a cross-chain transaction as reported by the bridge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum CctxStatus {
    PendingInbound,
    PendingOutbound,
    OutboundMined,
    PendingRevert,
    Reverted,
    Aborted,
    Unknown,
}

impl From<String> for CctxStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "PendingInbound" => CctxStatus::PendingInbound,
            "PendingOutbound" => CctxStatus::PendingOutbound,
            "OutboundMined" => CctxStatus::OutboundMined,
            "PendingRevert" => CctxStatus::PendingRevert,
            "Reverted" => CctxStatus::Reverted,
            "Aborted" => CctxStatus::Aborted,
            _ => CctxStatus::Unknown,
        }
    }
}

impl CctxStatus {
    /// Terminal dispatch status this bridge status maps to, `None` while still in flight.
    pub fn dispatch_status(&self) -> Option<DispatchStatus> {
        match self {
            CctxStatus::OutboundMined => Some(DispatchStatus::Confirmed),
            CctxStatus::Reverted | CctxStatus::Aborted => Some(DispatchStatus::Failed),
            CctxStatus::PendingInbound
            | CctxStatus::PendingOutbound
            | CctxStatus::PendingRevert
            | CctxStatus::Unknown => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CctxReport {
    /// Bridge-side identifier of the cross-chain transaction.
    pub index: String,
    pub status: CctxStatus,
    pub status_message: String,
}

/// Source of cross-chain transaction status, keyed by the origin transaction hash.
#[async_trait]
pub trait CctxStatusSource {
    /// `Ok(None)` means the bridge has not observed the transaction yet.
    async fn query(&self, origin_tx_hash: TxHash) -> Result<Option<CctxReport>>;
}
