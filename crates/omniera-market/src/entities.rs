use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListingStatus {
    Active,
    Sold,
    Cancelled,
}

impl ListingStatus {
    pub fn is_final(&self) -> bool {
        !matches!(self, ListingStatus::Active)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OfferStatus {
    Open,
    Accepted,
    Rejected,
    Withdrawn,
}

/// An asset put up for sale. Listings are never removed, only moved to a final status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: U256,
    pub seller: Address,
    pub asset_contract: Address,
    pub asset_id: U256,
    pub payment_token: Address,
    pub price: U256,
    pub status: ListingStatus,
    pub buyer: Option<Address>,
}

impl Listing {
    pub fn asset(&self) -> (Address, U256) {
        (self.asset_contract, self.asset_id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub id: U256,
    pub listing_id: U256,
    pub offerer: Address,
    pub payment_token: Address,
    pub amount: U256,
    pub status: OfferStatus,
}
