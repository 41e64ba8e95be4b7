//! Descriptor codec: selector ‖ 32-byte argument slots.

use std::fmt;

use alloy::primitives::{Bytes, FixedBytes};
use alloy::sol_types::SolCall;
use serde::{Deserialize, Serialize};

use crate::abi::marketplace::IOmniMarketplace::{
    acceptOfferCall, buyCall, customCall, delistCall, listCall, makeOfferCall,
};
use crate::error::{CodecError, Result};
use crate::operation::{Operation, OperationKind};

pub const SELECTOR_LEN: usize = 4;
pub const SLOT_LEN: usize = 32;

/// Binary encoded remote operation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Descriptor(Bytes);

impl Descriptor {
    pub fn selector(&self) -> Option<FixedBytes<4>> {
        self.0
            .get(..SELECTOR_LEN)
            .map(FixedBytes::<4>::from_slice)
    }

    pub fn arguments(&self) -> &[u8] {
        self.0.get(SELECTOR_LEN..).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &Bytes {
        &self.0
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    pub fn decode(&self) -> Result<Operation> {
        decode(&self.0)
    }
}

impl From<Bytes> for Descriptor {
    fn from(bytes: Bytes) -> Self {
        Self(bytes)
    }
}

impl From<Vec<u8>> for Descriptor {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Bytes::from(bytes))
    }
}

impl AsRef<[u8]> for Descriptor {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Encode an operation. Total and deterministic.
pub fn encode(operation: &Operation) -> Descriptor {
    let bytes = match *operation {
        Operation::List {
            asset_contract,
            asset_id,
            payment_token,
            price,
        } => listCall {
            assetContract: asset_contract,
            assetId: asset_id,
            paymentToken: payment_token,
            price,
        }
        .abi_encode(),
        Operation::Delist { listing_id } => delistCall {
            listingId: listing_id,
        }
        .abi_encode(),
        Operation::Buy { listing_id } => buyCall {
            listingId: listing_id,
        }
        .abi_encode(),
        Operation::MakeOffer {
            listing_id,
            payment_token,
            amount,
        } => makeOfferCall {
            listingId: listing_id,
            paymentToken: payment_token,
            amount,
        }
        .abi_encode(),
        Operation::AcceptOffer {
            listing_id,
            offer_id,
        } => acceptOfferCall {
            listingId: listing_id,
            offerId: offer_id,
        }
        .abi_encode(),
        Operation::Custom { numeric_payload } => customCall {
            payload: numeric_payload,
        }
        .abi_encode(),
    };
    Descriptor::from(bytes)
}

/// Decode a descriptor back into an operation.
///
/// The argument section must be exactly `arg_slots * 32` bytes and every slot must be in
/// canonical form, otherwise `MalformedArguments` is returned.
pub fn decode(descriptor: &[u8]) -> Result<Operation> {
    if descriptor.len() < SELECTOR_LEN {
        return Err(CodecError::MissingSelector(descriptor.len()));
    }
    let (selector, args) = descriptor.split_at(SELECTOR_LEN);
    let selector: [u8; 4] = selector
        .try_into()
        .map_err(|_| CodecError::MissingSelector(descriptor.len()))?;
    let kind = OperationKind::from_selector(selector)
        .ok_or(CodecError::UnknownSelector(FixedBytes(selector)))?;

    let expected = kind.arg_slots() * SLOT_LEN;
    if args.len() != expected {
        return Err(CodecError::MalformedArguments {
            operation: kind.name(),
            reason: format!("expected {expected} argument bytes, got {}", args.len()),
        });
    }

    let malformed = |e: alloy::sol_types::Error| CodecError::MalformedArguments {
        operation: kind.name(),
        reason: e.to_string(),
    };

    let operation = match kind {
        OperationKind::List => {
            let call = listCall::abi_decode_raw(args, true).map_err(malformed)?;
            Operation::List {
                asset_contract: call.assetContract,
                asset_id: call.assetId,
                payment_token: call.paymentToken,
                price: call.price,
            }
        }
        OperationKind::Delist => {
            let call = delistCall::abi_decode_raw(args, true).map_err(malformed)?;
            Operation::Delist {
                listing_id: call.listingId,
            }
        }
        OperationKind::Buy => {
            let call = buyCall::abi_decode_raw(args, true).map_err(malformed)?;
            Operation::Buy {
                listing_id: call.listingId,
            }
        }
        OperationKind::MakeOffer => {
            let call = makeOfferCall::abi_decode_raw(args, true).map_err(malformed)?;
            Operation::MakeOffer {
                listing_id: call.listingId,
                payment_token: call.paymentToken,
                amount: call.amount,
            }
        }
        OperationKind::AcceptOffer => {
            let call = acceptOfferCall::abi_decode_raw(args, true).map_err(malformed)?;
            Operation::AcceptOffer {
                listing_id: call.listingId,
                offer_id: call.offerId,
            }
        }
        OperationKind::Custom => {
            let call = customCall::abi_decode_raw(args, true).map_err(malformed)?;
            Operation::Custom {
                numeric_payload: call.payload,
            }
        }
    };
    Ok(operation)
}
