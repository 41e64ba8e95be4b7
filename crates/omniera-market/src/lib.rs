//! Home-chain marketplace state machine.
//!
//! The [`Marketplace`] is the only owner of listings and offers. It is driven exclusively by
//! decoded [`Operation`](omniera_primitives::Operation)s and applies each one as a single atomic
//! step: validation happens before any asset moves, asset movements are journaled and unwound
//! on failure, and entity state is only committed once settlement succeeded.

pub mod collaborators;
pub mod entities;
pub mod error;
pub mod machine;
pub mod settlement;
pub mod shared;

pub use collaborators::{AssetTransfer, OwnershipCheck, Transfer};
pub use entities::{Listing, ListingStatus, Offer, OfferStatus};
pub use error::{MarketError, Result, TransferError, TransferFailure, ValidationError};
pub use machine::{CallContext, Marketplace, Outcome, Payment};
pub use shared::SharedMarketplace;
