#![allow(dead_code)]

pub mod fixtures;

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, U256};
use omniera_market::{AssetTransfer, OwnershipCheck, TransferError};

#[derive(Default)]
struct LedgerState {
    nft_contracts: HashSet<Address>,
    owners: HashMap<(Address, U256), Address>,
    balances: HashMap<(Address, Address), U256>,
    calls: usize,
    fail_on_call: Option<usize>,
    rejected_contracts: HashSet<Address>,
}

/// In-memory token ledger serving both as ownership oracle and transfer collaborator.
#[derive(Clone, Default)]
pub struct Ledger {
    state: Arc<Mutex<LedgerState>>,
}

impl Ledger {
    pub fn mint_nft(&self, contract: Address, id: U256, owner: Address) {
        let mut state = self.state.lock().unwrap();
        state.nft_contracts.insert(contract);
        state.owners.insert((contract, id), owner);
    }

    pub fn fund(&self, token: Address, account: Address, amount: U256) {
        let mut state = self.state.lock().unwrap();
        *state.balances.entry((token, account)).or_default() += amount;
    }

    pub fn owner_of(&self, contract: Address, id: U256) -> Option<Address> {
        self.state.lock().unwrap().owners.get(&(contract, id)).copied()
    }

    pub fn balance(&self, token: Address, account: Address) -> U256 {
        self.state
            .lock()
            .unwrap()
            .balances
            .get(&(token, account))
            .copied()
            .unwrap_or_default()
    }

    /// Fail the `n`-th transfer call from now on (1-based).
    pub fn fail_on_call(&self, n: usize) {
        let mut state = self.state.lock().unwrap();
        state.fail_on_call = Some(state.calls + n);
    }

    pub fn reject_contract(&self, contract: Address) {
        self.state
            .lock()
            .unwrap()
            .rejected_contracts
            .insert(contract);
    }

    pub fn calls(&self) -> usize {
        self.state.lock().unwrap().calls
    }
}

impl OwnershipCheck for Ledger {
    fn is_controller(&self, asset_contract: Address, asset_id: U256, candidate: Address) -> bool {
        self.owner_of(asset_contract, asset_id) == Some(candidate)
    }
}

impl AssetTransfer for Ledger {
    fn transfer(
        &mut self,
        contract: Address,
        id_or_amount: U256,
        from: Address,
        to: Address,
    ) -> Result<(), TransferError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        if state.fail_on_call == Some(state.calls) {
            return Err(TransferError::Unavailable("injected failure".into()));
        }
        if state.rejected_contracts.contains(&contract) {
            return Err(TransferError::Rejected(format!("{contract} refuses transfers")));
        }

        if state.nft_contracts.contains(&contract) {
            let owner = state.owners.get(&(contract, id_or_amount)).copied();
            if owner != Some(from) {
                return Err(TransferError::Rejected(format!(
                    "{from} does not own token {id_or_amount}"
                )));
            }
            state.owners.insert((contract, id_or_amount), to);
        } else {
            let balance = state.balances.get(&(contract, from)).copied().unwrap_or_default();
            if balance < id_or_amount {
                return Err(TransferError::InsufficientBalance {
                    contract,
                    account: from,
                });
            }
            state.balances.insert((contract, from), balance - id_or_amount);
            *state.balances.entry((contract, to)).or_default() += id_or_amount;
        }
        Ok(())
    }
}
