use std::collections::HashSet;
use std::fmt;

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Identifies one processed deposit. Fungible deposits use asset id zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DedupKey {
    pub asset_contract: Address,
    pub asset_id: U256,
    pub nonce: U256,
}

impl fmt::Display for DedupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.asset_contract, self.asset_id, self.nonce)
    }
}

#[derive(Debug, Default)]
pub struct SeenKeys {
    keys: HashSet<DedupKey>,
}

impl SeenKeys {
    pub fn contains(&self, key: &DedupKey) -> bool {
        self.keys.contains(key)
    }

    /// Returns false if the key was already present.
    pub fn insert(&mut self, key: DedupKey) -> bool {
        self.keys.insert(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
