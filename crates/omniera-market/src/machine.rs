use std::collections::{BTreeMap, HashMap};

use alloy::primitives::{Address, Bytes, U256};
use omniera_primitives::{decode, Operation, OperationKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::collaborators::{AssetTransfer, OwnershipCheck, Transfer};
use crate::entities::{Listing, ListingStatus, Offer, OfferStatus};
use crate::error::{MarketError, Result, TransferFailure, ValidationError};
use crate::settlement::settle;

/// Payment attached to a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub token: Address,
    pub amount: U256,
}

/// Who is calling and what they attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    pub caller: Address,
    pub payment: Option<Payment>,
}

impl CallContext {
    pub fn new(caller: Address) -> Self {
        Self {
            caller,
            payment: None,
        }
    }

    pub fn with_payment(mut self, token: Address, amount: U256) -> Self {
        self.payment = Some(Payment { token, amount });
        self
    }
}

/// Result of a successfully applied operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Listed {
        listing_id: U256,
    },
    Delisted {
        listing_id: U256,
        withdrawn_offers: Vec<U256>,
    },
    Sold {
        listing_id: U256,
        buyer: Address,
        rejected_offers: Vec<U256>,
    },
    OfferMade {
        listing_id: U256,
        offer_id: U256,
    },
    OfferAccepted {
        listing_id: U256,
        offer_id: U256,
        rejected_offers: Vec<U256>,
    },
    CustomAccepted {
        payload: U256,
    },
}

/// Single authority over listings and offers.
pub struct Marketplace<O, T> {
    /// Account holding escrowed offer amounts.
    escrow: Address,
    ownership: O,
    transfers: T,
    listings: BTreeMap<U256, Listing>,
    offers: BTreeMap<U256, Offer>,
    active_by_asset: HashMap<(Address, U256), U256>,
    next_listing_id: U256,
    next_offer_id: U256,
}

impl<O, T> Marketplace<O, T>
where
    O: OwnershipCheck,
    T: AssetTransfer,
{
    pub fn new(escrow: Address, ownership: O, transfers: T) -> Self {
        Self {
            escrow,
            ownership,
            transfers,
            listings: BTreeMap::new(),
            offers: BTreeMap::new(),
            active_by_asset: HashMap::new(),
            next_listing_id: U256::from(1),
            next_offer_id: U256::from(1),
        }
    }

    pub fn listing(&self, id: U256) -> Option<&Listing> {
        self.listings.get(&id)
    }

    pub fn listings(&self) -> impl Iterator<Item = &Listing> {
        self.listings.values()
    }

    pub fn offer(&self, id: U256) -> Option<&Offer> {
        self.offers.get(&id)
    }

    pub fn offers_for(&self, listing_id: U256) -> impl Iterator<Item = &Offer> {
        self.offers
            .values()
            .filter(move |offer| offer.listing_id == listing_id)
    }

    pub fn active_listing_for(&self, asset_contract: Address, asset_id: U256) -> Option<&Listing> {
        self.active_by_asset
            .get(&(asset_contract, asset_id))
            .and_then(|id| self.listings.get(id))
    }

    /// Decode a descriptor and apply it. Nothing is touched if decoding fails.
    ///
    /// A settlement failure carries the raw descriptor.
    pub fn apply_descriptor(&mut self, ctx: &CallContext, descriptor: &[u8]) -> Result<Outcome> {
        let operation = decode(descriptor)?;
        self.apply(ctx, operation).map_err(|err| match err {
            MarketError::Transfer(failure) => MarketError::Transfer(TransferFailure {
                descriptor: Some(Bytes::copy_from_slice(descriptor)),
                ..failure
            }),
            other => other,
        })
    }

    /// Apply one operation atomically.
    pub fn apply(&mut self, ctx: &CallContext, operation: Operation) -> Result<Outcome> {
        debug!("applying {} from {}", operation, ctx.caller);
        let outcome = match operation {
            Operation::List {
                asset_contract,
                asset_id,
                payment_token,
                price,
            } => self.list(ctx, asset_contract, asset_id, payment_token, price),
            Operation::Delist { listing_id } => self.delist(ctx, listing_id),
            Operation::Buy { listing_id } => self.buy(ctx, listing_id),
            Operation::MakeOffer {
                listing_id,
                payment_token,
                amount,
            } => self.make_offer(ctx, listing_id, payment_token, amount),
            Operation::AcceptOffer {
                listing_id,
                offer_id,
            } => self.accept_offer(ctx, listing_id, offer_id),
            Operation::Custom { numeric_payload } => Ok(Outcome::CustomAccepted {
                payload: numeric_payload,
            }),
        }?;
        info!("marketplace transition: {:?}", outcome);
        Ok(outcome)
    }

    fn list(
        &mut self,
        ctx: &CallContext,
        asset_contract: Address,
        asset_id: U256,
        payment_token: Address,
        price: U256,
    ) -> Result<Outcome> {
        if !self
            .ownership
            .is_controller(asset_contract, asset_id, ctx.caller)
        {
            return Err(ValidationError::NotOwner {
                asset_contract,
                asset_id,
                caller: ctx.caller,
            }
            .into());
        }
        if let Some(existing) = self.active_by_asset.get(&(asset_contract, asset_id)) {
            return Err(ValidationError::DuplicateActiveListing(*existing).into());
        }

        let id = self.next_listing_id;
        self.next_listing_id += U256::from(1);
        self.listings.insert(
            id,
            Listing {
                id,
                seller: ctx.caller,
                asset_contract,
                asset_id,
                payment_token,
                price,
                status: ListingStatus::Active,
                buyer: None,
            },
        );
        self.active_by_asset.insert((asset_contract, asset_id), id);
        Ok(Outcome::Listed { listing_id: id })
    }

    fn delist(&mut self, ctx: &CallContext, listing_id: U256) -> Result<Outcome> {
        let listing = self.existing_listing(listing_id)?;
        if listing.seller != ctx.caller {
            return Err(ValidationError::NotSeller {
                listing_id,
                caller: ctx.caller,
            }
            .into());
        }
        if listing.status.is_final() {
            return Err(ValidationError::AlreadyFinal {
                listing_id,
                status: listing.status,
            }
            .into());
        }

        let open = self.open_offer_ids(listing_id, None);
        let plan = self.release_plan(&open);
        self.settle(OperationKind::Delist, listing_id, None, &plan)?;

        self.finalize_listing(listing_id, ListingStatus::Cancelled, None);
        self.set_offer_status(&open, OfferStatus::Withdrawn);
        Ok(Outcome::Delisted {
            listing_id,
            withdrawn_offers: open,
        })
    }

    fn buy(&mut self, ctx: &CallContext, listing_id: U256) -> Result<Outcome> {
        let listing = self.active_listing(listing_id)?;
        if listing.seller == ctx.caller {
            return Err(ValidationError::SelfTrade.into());
        }
        let payment = ctx.payment.ok_or(ValidationError::MissingPayment)?;
        if payment.token != listing.payment_token {
            return Err(ValidationError::PaymentTokenMismatch {
                expected: listing.payment_token,
                attached: payment.token,
            }
            .into());
        }
        if payment.amount < listing.price {
            return Err(ValidationError::InsufficientPayment {
                required: listing.price,
                attached: payment.amount,
            }
            .into());
        }

        let mut plan = vec![
            Transfer::new(
                listing.asset_contract,
                listing.asset_id,
                listing.seller,
                ctx.caller,
            ),
            Transfer::new(
                listing.payment_token,
                listing.price,
                ctx.caller,
                listing.seller,
            ),
        ];
        let open = self.open_offer_ids(listing_id, None);
        plan.extend(self.release_plan(&open));
        self.settle(OperationKind::Buy, listing_id, None, &plan)?;

        self.finalize_listing(listing_id, ListingStatus::Sold, Some(ctx.caller));
        self.set_offer_status(&open, OfferStatus::Rejected);
        Ok(Outcome::Sold {
            listing_id,
            buyer: ctx.caller,
            rejected_offers: open,
        })
    }

    fn make_offer(
        &mut self,
        ctx: &CallContext,
        listing_id: U256,
        payment_token: Address,
        amount: U256,
    ) -> Result<Outcome> {
        let listing = self.active_listing(listing_id)?;
        if listing.seller == ctx.caller {
            return Err(ValidationError::SelfTrade.into());
        }
        if amount.is_zero() {
            return Err(ValidationError::ZeroAmount.into());
        }

        let plan = [Transfer::new(payment_token, amount, ctx.caller, self.escrow)];
        self.settle(OperationKind::MakeOffer, listing_id, None, &plan)?;

        let id = self.next_offer_id;
        self.next_offer_id += U256::from(1);
        self.offers.insert(
            id,
            Offer {
                id,
                listing_id,
                offerer: ctx.caller,
                payment_token,
                amount,
                status: OfferStatus::Open,
            },
        );
        Ok(Outcome::OfferMade {
            listing_id,
            offer_id: id,
        })
    }

    fn accept_offer(
        &mut self,
        ctx: &CallContext,
        listing_id: U256,
        offer_id: U256,
    ) -> Result<Outcome> {
        let listing = self.existing_listing(listing_id)?;
        if listing.seller != ctx.caller {
            return Err(ValidationError::NotSeller {
                listing_id,
                caller: ctx.caller,
            }
            .into());
        }
        let listing = self.active_listing(listing_id)?;
        let offer = self
            .offers
            .get(&offer_id)
            .ok_or(ValidationError::UnknownOffer(offer_id))?;
        if offer.listing_id != listing_id {
            return Err(ValidationError::OfferListingMismatch {
                offer_id,
                listing_id,
            }
            .into());
        }
        if offer.status != OfferStatus::Open {
            return Err(ValidationError::OfferNotOpen {
                offer_id,
                status: offer.status,
            }
            .into());
        }

        let buyer = offer.offerer;
        let mut plan = vec![
            Transfer::new(
                listing.asset_contract,
                listing.asset_id,
                listing.seller,
                buyer,
            ),
            Transfer::new(offer.payment_token, offer.amount, self.escrow, listing.seller),
        ];
        let siblings = self.open_offer_ids(listing_id, Some(offer_id));
        plan.extend(self.release_plan(&siblings));
        self.settle(
            OperationKind::AcceptOffer,
            listing_id,
            Some(offer_id),
            &plan,
        )?;

        self.set_offer_status(&[offer_id], OfferStatus::Accepted);
        self.set_offer_status(&siblings, OfferStatus::Rejected);
        self.finalize_listing(listing_id, ListingStatus::Sold, Some(buyer));
        Ok(Outcome::OfferAccepted {
            listing_id,
            offer_id,
            rejected_offers: siblings,
        })
    }

    fn existing_listing(&self, listing_id: U256) -> Result<Listing> {
        self.listings
            .get(&listing_id)
            .cloned()
            .ok_or_else(|| ValidationError::UnknownListing(listing_id).into())
    }

    fn active_listing(&self, listing_id: U256) -> Result<Listing> {
        let listing = self.existing_listing(listing_id)?;
        if listing.status != ListingStatus::Active {
            return Err(ValidationError::ListingNotActive {
                listing_id,
                status: listing.status,
            }
            .into());
        }
        Ok(listing)
    }

    fn open_offer_ids(&self, listing_id: U256, except: Option<U256>) -> Vec<U256> {
        self.offers_for(listing_id)
            .filter(|offer| offer.status == OfferStatus::Open && Some(offer.id) != except)
            .map(|offer| offer.id)
            .collect()
    }

    /// Escrow releases back to the offerers of `offer_ids`.
    fn release_plan(&self, offer_ids: &[U256]) -> Vec<Transfer> {
        offer_ids
            .iter()
            .filter_map(|id| self.offers.get(id))
            .map(|offer| {
                Transfer::new(offer.payment_token, offer.amount, self.escrow, offer.offerer)
            })
            .collect()
    }

    fn settle(
        &mut self,
        operation: OperationKind,
        listing_id: U256,
        offer_id: Option<U256>,
        plan: &[Transfer],
    ) -> Result<()> {
        settle(&mut self.transfers, plan).map_err(|failure| {
            MarketError::Transfer(TransferFailure {
                operation,
                listing_id: Some(listing_id),
                offer_id,
                descriptor: None,
                source: failure.source,
                unwound: failure.unwound,
            })
        })
    }

    fn finalize_listing(
        &mut self,
        listing_id: U256,
        status: ListingStatus,
        buyer: Option<Address>,
    ) {
        if let Some(listing) = self.listings.get_mut(&listing_id) {
            listing.status = status;
            listing.buyer = buyer;
            self.active_by_asset.remove(&listing.asset());
        }
    }

    fn set_offer_status(&mut self, offer_ids: &[U256], status: OfferStatus) {
        for id in offer_ids {
            if let Some(offer) = self.offers.get_mut(id) {
                offer.status = status;
            }
        }
    }
}
