//! Inbound notifications and the deposits they describe.

use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::sol_types::SolType;
use omniera_primitives::abi::lsp::{LSP7RecipientPayload, LSP8RecipientPayload};
use omniera_primitives::notification::{LSP7_RECIPIENT_TYPE_ID, LSP8_RECIPIENT_TYPE_ID};
use serde::{Deserialize, Serialize};

use crate::dedup::DedupKey;
use crate::error::{Result, RouterError};

/// Event handed to the router by the account it is installed on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundNotification {
    /// Asset contract that emitted the notification.
    pub notifier: Address,
    pub type_id: B256,
    pub payload: Bytes,
    /// Per-notification nonce supplied by the host.
    pub nonce: U256,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    Fungible,
    NonFungible,
}

/// A decoded incoming transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub kind: AssetKind,
    pub asset_contract: Address,
    /// Token id for non-fungible assets, zero for fungible ones.
    pub asset_id: U256,
    /// Transferred amount, one for non-fungible assets.
    pub amount: U256,
    pub operator: Address,
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
}

impl Deposit {
    pub fn decode(notification: &InboundNotification) -> Result<Self> {
        let malformed = |e: alloy::sol_types::Error| RouterError::PayloadDecodeError {
            type_id: notification.type_id,
            reason: e.to_string(),
        };

        if notification.type_id == *LSP7_RECIPIENT_TYPE_ID {
            let payload =
                <LSP7RecipientPayload as SolType>::abi_decode_params(&notification.payload, true)
                    .map_err(malformed)?;
            Ok(Self {
                kind: AssetKind::Fungible,
                asset_contract: notification.notifier,
                asset_id: U256::ZERO,
                amount: payload.amount,
                operator: payload.operator,
                from: payload.from,
                to: payload.to,
                data: payload.data,
            })
        } else if notification.type_id == *LSP8_RECIPIENT_TYPE_ID {
            let payload =
                <LSP8RecipientPayload as SolType>::abi_decode_params(&notification.payload, true)
                    .map_err(malformed)?;
            Ok(Self {
                kind: AssetKind::NonFungible,
                asset_contract: notification.notifier,
                asset_id: U256::from_be_bytes(payload.tokenId.0),
                amount: U256::from(1),
                operator: payload.operator,
                from: payload.from,
                to: payload.to,
                data: payload.data,
            })
        } else {
            Err(RouterError::PayloadDecodeError {
                type_id: notification.type_id,
                reason: "no payload layout known for this type".to_string(),
            })
        }
    }

    pub fn dedup_key(&self, nonce: U256) -> DedupKey {
        DedupKey {
            asset_contract: self.asset_contract,
            asset_id: self.asset_id,
            nonce,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::sol_types::SolValue;

    #[test]
    fn decodes_lsp8_token_id_as_asset_id() {
        let payload = (
            Address::repeat_byte(1),
            Address::repeat_byte(2),
            Address::repeat_byte(3),
            B256::from(U256::from(7).to_be_bytes::<32>()),
            Bytes::new(),
        )
            .abi_encode_params();
        let notification = InboundNotification {
            notifier: Address::repeat_byte(9),
            type_id: *LSP8_RECIPIENT_TYPE_ID,
            payload: payload.into(),
            nonce: U256::ZERO,
        };

        let deposit = Deposit::decode(&notification).unwrap();
        assert_eq!(deposit.kind, AssetKind::NonFungible);
        assert_eq!(deposit.asset_id, U256::from(7));
        assert_eq!(deposit.amount, U256::from(1));
        assert_eq!(deposit.from, Address::repeat_byte(2));
        assert_eq!(deposit.asset_contract, Address::repeat_byte(9));
    }

    #[test]
    fn truncated_payload_is_a_decode_error() {
        let notification = InboundNotification {
            notifier: Address::ZERO,
            type_id: *LSP7_RECIPIENT_TYPE_ID,
            payload: Bytes::from(vec![0u8; 40]),
            nonce: U256::ZERO,
        };
        assert!(matches!(
            Deposit::decode(&notification),
            Err(RouterError::PayloadDecodeError { .. })
        ));
    }
}
