//! External collaborators the marketplace depends on.

use alloy::primitives::{Address, U256};

use crate::error::TransferError;

/// Answers whether an account currently controls an asset on its contract.
pub trait OwnershipCheck {
    fn is_controller(&self, asset_contract: Address, asset_id: U256, candidate: Address) -> bool;
}

/// Moves assets or payment tokens between accounts.
///
/// `id_or_amount` is the token id for non-fungible assets and the amount for payment tokens.
pub trait AssetTransfer {
    fn transfer(
        &mut self,
        asset_contract: Address,
        id_or_amount: U256,
        from: Address,
        to: Address,
    ) -> Result<(), TransferError>;
}

/// A single asset or payment movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub contract: Address,
    pub id_or_amount: U256,
    pub from: Address,
    pub to: Address,
}

impl Transfer {
    pub fn new(contract: Address, id_or_amount: U256, from: Address, to: Address) -> Self {
        Self {
            contract,
            id_or_amount,
            from,
            to,
        }
    }

    /// The movement that undoes this one.
    pub fn reversed(&self) -> Self {
        Self {
            contract: self.contract,
            id_or_amount: self.id_or_amount,
            from: self.to,
            to: self.from,
        }
    }
}
