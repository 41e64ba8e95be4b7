//! Deposit expectations registered by the account owner and the deposits recorded against them.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::dedup::DedupKey;
use crate::notification::Deposit;

/// A deposit the account is waiting for, typically the payment or asset side of a listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositExpectation {
    pub asset_contract: Address,
    pub asset_id: U256,
    /// Any sender matches when unset.
    pub expected_sender: Option<Address>,
    pub minimum_amount: U256,
    pub listing_id: Option<U256>,
}

impl DepositExpectation {
    pub fn matches(&self, deposit: &Deposit) -> bool {
        self.asset_contract == deposit.asset_contract
            && self.asset_id == deposit.asset_id
            && self.expected_sender.is_none_or(|sender| sender == deposit.from)
            && deposit.amount >= self.minimum_amount
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedDeposit {
    pub key: DedupKey,
    pub deposit: Deposit,
    /// The expectation this deposit fulfilled, if any.
    pub fulfilled: Option<DepositExpectation>,
}

#[derive(Debug, Default)]
pub struct DepositBook {
    expectations: Vec<DepositExpectation>,
    recorded: Vec<RecordedDeposit>,
}

impl DepositBook {
    pub fn expect(&mut self, expectation: DepositExpectation) {
        self.expectations.push(expectation);
    }

    pub fn pending(&self) -> &[DepositExpectation] {
        &self.expectations
    }

    pub fn recorded(&self) -> &[RecordedDeposit] {
        &self.recorded
    }

    /// Totals of everything recorded for one asset.
    pub fn total_for(&self, asset_contract: Address, asset_id: U256) -> U256 {
        self.recorded
            .iter()
            .filter(|r| {
                r.deposit.asset_contract == asset_contract && r.deposit.asset_id == asset_id
            })
            .fold(U256::ZERO, |acc, r| acc.saturating_add(r.deposit.amount))
    }

    /// Record `deposit`, consuming the oldest expectation it satisfies.
    pub fn record(&mut self, key: DedupKey, deposit: Deposit) -> RecordedDeposit {
        let position = self.expectations.iter().position(|e| e.matches(&deposit));
        let fulfilled = position.map(|index| self.expectations.remove(index));
        let recorded = RecordedDeposit {
            key,
            deposit,
            fulfilled,
        };
        self.recorded.push(recorded.clone());
        recorded
    }
}
