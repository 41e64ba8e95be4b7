use alloy::primitives::FixedBytes;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Unknown selector: {0}")]
    UnknownSelector(FixedBytes<4>),
    #[error("Descriptor too short to carry a selector ({0} bytes)")]
    MissingSelector(usize),
    #[error("Malformed arguments for {operation}: {reason}")]
    MalformedArguments {
        operation: &'static str,
        reason: String,
    },
    #[error("Negative value cannot be placed in an unsigned slot: {0}")]
    NegativeValue(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

impl CodecError {
    /// Both selector failures are reported to callers as an unknown selector.
    pub fn is_unknown_selector(&self) -> bool {
        matches!(
            self,
            CodecError::UnknownSelector(_) | CodecError::MissingSelector(_)
        )
    }
}

pub type Result<T> = core::result::Result<T, CodecError>;
