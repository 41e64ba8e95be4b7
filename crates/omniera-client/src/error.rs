use std::path::PathBuf;

use alloy::primitives::TxHash;
use omniera_primitives::{CodecError, Descriptor};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),
    #[error("Failed to parse log level: {0}")]
    LogLevelParseError(String),
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),
    #[error("Invalid tracking config: {0}")]
    InvalidTracking(String),
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to access manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse manifest: {0}")]
    ManifestParseError(#[from] serde_json::Error),
    #[error("No deployment recorded for network {0}")]
    UnknownNetwork(String),
    #[error("No contract named {name} deployed on {network}")]
    UnknownContract { name: String, network: String },
    #[error("Manifest already exists at {0}")]
    ManifestExists(PathBuf),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("Registry error: {0}")]
    RegistryError(#[from] RegistryError),
    #[error("Codec error: {0}")]
    CodecError(#[from] CodecError),
    #[error("Failed to parse intent: {0}")]
    IntentParsingError(String),
    #[error("Failed to send transaction: {0}")]
    TransactionError(String),
    #[error("Failed to parse bridge api url: {0}")]
    ApiUrlParsingError(String),
    #[error("Failed bridge api request: {0}")]
    StatusQueryError(String),
    #[error(
        "Dispatch {tx_hash} not confirmed after {polls} polls, remote effect unknown (descriptor {descriptor})"
    )]
    DispatchTimeout {
        tx_hash: TxHash,
        descriptor: Descriptor,
        polls: u32,
    },
    #[error("Dispatch {tx_hash} failed on the remote chain: {message} (descriptor {descriptor})")]
    RemoteFailure {
        tx_hash: TxHash,
        descriptor: Descriptor,
        message: String,
    },
}

pub type Result<T> = core::result::Result<T, ClientError>;
