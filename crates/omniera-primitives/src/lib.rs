//! Core types shared by the OmniEra marketplace crates
//!
//! This crate owns the remote operation model, the descriptor codec and the notification type
//! ids shared by the router and the install tooling.

pub mod abi;
pub mod codec;
pub mod env;
pub mod error;
pub mod notification;
pub mod operation;
pub mod utils;

pub use codec::{decode, encode, Descriptor};
pub use error::{CodecError, Result};
pub use operation::{Operation, OperationKind};
