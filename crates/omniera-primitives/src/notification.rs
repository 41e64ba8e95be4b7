//! Universal receiver notification identifiers.

use alloy::primitives::{fixed_bytes, keccak256, FixedBytes, B256};
use lazy_static::lazy_static;

pub const LSP7_RECIPIENT_NOTIFICATION: &str = "LSP7Tokens_RecipientNotification";
pub const LSP8_RECIPIENT_NOTIFICATION: &str = "LSP8Tokens_RecipientNotification";
pub const LSP7_SENDER_NOTIFICATION: &str = "LSP7Tokens_SenderNotification";
pub const LSP8_SENDER_NOTIFICATION: &str = "LSP8Tokens_SenderNotification";

/// `LSP1UniversalReceiverDelegatePrefix`: first 10 bytes of
/// keccak256("LSP1UniversalReceiverDelegate") followed by two zero bytes.
pub const UNIVERSAL_RECEIVER_DELEGATE_PREFIX: FixedBytes<12> =
    fixed_bytes!("0cfc51aec37c55a4d0b10000");

lazy_static! {
    pub static ref LSP7_RECIPIENT_TYPE_ID: B256 =
        keccak256(LSP7_RECIPIENT_NOTIFICATION.as_bytes());
    pub static ref LSP8_RECIPIENT_TYPE_ID: B256 =
        keccak256(LSP8_RECIPIENT_NOTIFICATION.as_bytes());
    pub static ref LSP7_SENDER_TYPE_ID: B256 = keccak256(LSP7_SENDER_NOTIFICATION.as_bytes());
    pub static ref LSP8_SENDER_TYPE_ID: B256 = keccak256(LSP8_SENDER_NOTIFICATION.as_bytes());
}

/// Data key under which an account stores the delegate responsible for `type_id`.
pub fn delegate_data_key(type_id: &B256) -> B256 {
    let mut key = [0u8; 32];
    key[..12].copy_from_slice(UNIVERSAL_RECEIVER_DELEGATE_PREFIX.as_slice());
    key[12..].copy_from_slice(&type_id[..20]);
    B256::from(key)
}
