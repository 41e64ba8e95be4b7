//! Universal receiver delegate reacting to incoming asset transfers.
//!
//! Unknown notification types are ignored, recognized ones are decoded into a [`Deposit`] and
//! recorded once per de-duplication key. Whether a failing action may revert the transfer is
//! decided by the [`FailurePolicy`].

pub mod config;
pub mod dedup;
pub mod deposits;
pub mod error;
pub mod install;
pub mod notification;
pub mod router;

pub use config::{FailurePolicy, RouterConfig};
pub use dedup::DedupKey;
pub use deposits::{DepositExpectation, RecordedDeposit};
pub use error::{Result, RouterError};
pub use notification::{AssetKind, Deposit, InboundNotification};
pub use router::{NotificationRouter, RouterOutcome, RouterState};
