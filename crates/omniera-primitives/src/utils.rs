use alloy::primitives::utils::{parse_units, ParseUnits};
use alloy::primitives::U256;

use crate::error::{CodecError, Result};

/// Decimals of the native currency forwarded through the bridge.
pub const NATIVE_DECIMALS: u8 = 18;

/// Parse a decimal amount (e.g. `"2.5"`) into base units.
///
/// Negative amounts are rejected here so they can never reach an unsigned argument slot.
pub fn parse_amount(amount: &str, decimals: u8) -> Result<U256> {
    match parse_units(amount.trim(), decimals)
        .map_err(|e| CodecError::InvalidAmount(format!("{amount}: {e}")))?
    {
        ParseUnits::U256(value) => Ok(value),
        ParseUnits::I256(_) => Err(CodecError::NegativeValue(amount.to_string())),
    }
}

/// Parse an integer argument given either in decimal or `0x` hex.
pub fn parse_uint(value: &str) -> Result<U256> {
    let value = value.trim();
    if value.starts_with('-') {
        return Err(CodecError::NegativeValue(value.to_string()));
    }
    value
        .parse::<U256>()
        .map_err(|e| CodecError::InvalidAmount(format!("{value}: {e}")))
}
