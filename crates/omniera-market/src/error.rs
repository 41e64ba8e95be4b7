use alloy::primitives::{Address, Bytes, U256};
use omniera_primitives::{CodecError, OperationKind};
use thiserror::Error;

use crate::entities::{ListingStatus, OfferStatus};

/// Ownership, status or authorization failures. Raised before anything is mutated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{caller} does not control asset {asset_id} on {asset_contract}")]
    NotOwner {
        asset_contract: Address,
        asset_id: U256,
        caller: Address,
    },
    #[error("asset already has active listing {0}")]
    DuplicateActiveListing(U256),
    #[error("unknown listing {0}")]
    UnknownListing(U256),
    #[error("unknown offer {0}")]
    UnknownOffer(U256),
    #[error("{caller} is not the seller of listing {listing_id}")]
    NotSeller {
        listing_id: U256,
        caller: Address,
    },
    #[error("listing {listing_id} is already final ({status:?})")]
    AlreadyFinal {
        listing_id: U256,
        status: ListingStatus,
    },
    #[error("listing {listing_id} is not active ({status:?})")]
    ListingNotActive {
        listing_id: U256,
        status: ListingStatus,
    },
    #[error("offer {offer_id} is not open ({status:?})")]
    OfferNotOpen {
        offer_id: U256,
        status: OfferStatus,
    },
    #[error("offer {offer_id} does not belong to listing {listing_id}")]
    OfferListingMismatch {
        offer_id: U256,
        listing_id: U256,
    },
    #[error("no payment attached")]
    MissingPayment,
    #[error("payment token mismatch: expected {expected}, got {attached}")]
    PaymentTokenMismatch {
        expected: Address,
        attached: Address,
    },
    #[error("insufficient payment: required {required}, attached {attached}")]
    InsufficientPayment {
        required: U256,
        attached: U256,
    },
    #[error("amount must be greater than zero")]
    ZeroAmount,
    #[error("seller cannot trade with their own listing")]
    SelfTrade,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("transfer rejected: {0}")]
    Rejected(String),
    #[error("insufficient balance of {contract} for {account}")]
    InsufficientBalance {
        contract: Address,
        account: Address,
    },
    #[error("transfer collaborator unavailable: {0}")]
    Unavailable(String),
}

/// An asset or payment movement failed mid-operation.
///
/// Carries enough context for manual reconciliation. `descriptor` holds the raw call when the
/// operation arrived as a descriptor. `unwound` is false only if one of the compensating
/// transfers failed as well.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{operation:?} failed during settlement (listing {listing_id:?}, offer {offer_id:?}, unwound: {unwound}): {source}")]
pub struct TransferFailure {
    pub operation: OperationKind,
    pub listing_id: Option<U256>,
    pub offer_id: Option<U256>,
    pub descriptor: Option<Bytes>,
    pub source: TransferError,
    pub unwound: bool,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketError {
    #[error("Decode error: {0}")]
    Decode(#[from] CodecError),
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Transfer failure: {0}")]
    Transfer(#[from] TransferFailure),
}

impl MarketError {
    /// Decode and validation errors leave no trace and only need a status code.
    /// Transfer failures must be surfaced to the initiating caller.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, MarketError::Transfer(_))
    }
}

pub type Result<T> = core::result::Result<T, MarketError>;
