use alloy::primitives::{address, Address, U256};
use omniera_market::{CallContext, Marketplace};
use omniera_primitives::Operation;
use rstest::*;

use super::Ledger;

pub const MARKET: Address = address!("00000000000000000000000000000000000ee0ee");
pub const COLLECTION: Address = address!("aa00000000000000000000000000000000000001");
pub const TOKEN: Address = address!("bb00000000000000000000000000000000000002");
pub const SELLER: Address = address!("5e11e20000000000000000000000000000000001");
pub const ALICE: Address = address!("a11ce00000000000000000000000000000000001");
pub const BOB: Address = address!("b0b0000000000000000000000000000000000001");

pub const ASSET_ID: u64 = 2;
pub const PRICE: u64 = 2_000;
pub const STARTING_BALANCE: u64 = 10_000;

pub struct Setup {
    pub ledger: Ledger,
    pub market: Marketplace<Ledger, Ledger>,
}

/// Marketplace with one minted asset owned by the seller and two funded buyers.
#[fixture]
pub fn setup() -> Setup {
    let ledger = Ledger::default();
    ledger.mint_nft(COLLECTION, U256::from(ASSET_ID), SELLER);
    for buyer in [ALICE, BOB] {
        ledger.fund(TOKEN, buyer, U256::from(STARTING_BALANCE));
    }
    let market = Marketplace::new(MARKET, ledger.clone(), ledger.clone());
    Setup { ledger, market }
}

/// Same as [`setup`] with the asset already listed as listing 1.
#[fixture]
pub fn listed(setup: Setup) -> Setup {
    let mut setup = setup;
    setup
        .market
        .apply(&seller(), list_op())
        .expect("listing the minted asset succeeds");
    setup
}

pub fn list_op() -> Operation {
    Operation::List {
        asset_contract: COLLECTION,
        asset_id: U256::from(ASSET_ID),
        payment_token: TOKEN,
        price: U256::from(PRICE),
    }
}

pub fn seller() -> CallContext {
    CallContext::new(SELLER)
}

pub fn paying(caller: Address, amount: u64) -> CallContext {
    CallContext::new(caller).with_payment(TOKEN, U256::from(amount))
}

pub fn offer(amount: u64) -> Operation {
    Operation::MakeOffer {
        listing_id: U256::from(1),
        payment_token: TOKEN,
        amount: U256::from(amount),
    }
}
