use alloy::primitives::{Address, B256};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouterError {
    #[error("Config error: {0}")]
    ConfigError(String),
    #[error("Failed to decode payload for type {type_id}: {reason}")]
    PayloadDecodeError { type_id: B256, reason: String },
    #[error("Deposit addressed to {recipient}, router is installed on {account}")]
    WrongRecipient {
        account: Address,
        recipient: Address,
    },
    #[error("Deposit of zero amount from {0}")]
    EmptyDeposit(Address),
}

pub type Result<T> = core::result::Result<T, RouterError>;
