use alloy::primitives::U256;
use common::fixtures::*;
use omniera_market::{
    CallContext, ListingStatus, MarketError, OfferStatus, SharedMarketplace, TransferError,
};
use omniera_primitives::{encode, Operation, OperationKind};
use rstest::*;

mod common;

fn buy() -> Operation {
    Operation::Buy {
        listing_id: U256::from(1),
    }
}

#[rstest]
fn test_failed_payment_rolls_back_asset(listed: Setup) {
    let Setup { ledger, mut market } = listed;
    // asset moves first, payment is the second transfer
    ledger.fail_on_call(2);

    let err = market.apply(&paying(ALICE, PRICE), buy()).unwrap_err();
    let failure = match err {
        MarketError::Transfer(failure) => failure,
        other => panic!("expected a transfer failure, got {other:?}"),
    };
    assert_eq!(failure.operation, OperationKind::Buy);
    assert_eq!(failure.listing_id, Some(U256::from(1)));
    assert!(failure.unwound);
    assert_eq!(failure.descriptor, None);
    assert!(matches!(failure.source, TransferError::Unavailable(_)));

    assert_eq!(
        market.listing(U256::from(1)).unwrap().status,
        ListingStatus::Active
    );
    assert_eq!(ledger.owner_of(COLLECTION, U256::from(ASSET_ID)), Some(SELLER));
    assert_eq!(ledger.balance(TOKEN, ALICE), U256::from(STARTING_BALANCE));
    assert_eq!(ledger.balance(TOKEN, SELLER), U256::ZERO);
}

#[rstest]
fn test_rejected_asset_transfer_leaves_everything_untouched(listed: Setup) {
    let Setup { ledger, mut market } = listed;
    market.apply(&CallContext::new(BOB), offer(1_000)).unwrap();
    market.apply(&CallContext::new(ALICE), offer(1_200)).unwrap();
    ledger.reject_contract(COLLECTION);

    let err = market
        .apply(
            &seller(),
            Operation::AcceptOffer {
                listing_id: U256::from(1),
                offer_id: U256::from(2),
            },
        )
        .unwrap_err();
    assert!(matches!(
        err,
        MarketError::Transfer(ref failure)
            if failure.offer_id == Some(U256::from(2)) && failure.unwound
    ));
    assert!(!err.is_recoverable());

    assert_eq!(
        market.listing(U256::from(1)).unwrap().status,
        ListingStatus::Active
    );
    assert!(market
        .offers_for(U256::from(1))
        .all(|o| o.status == OfferStatus::Open));
    assert_eq!(ledger.balance(TOKEN, MARKET), U256::from(2_200));
}

#[rstest]
fn test_failed_refund_unwinds_sale(listed: Setup) {
    let Setup { ledger, mut market } = listed;
    market.apply(&CallContext::new(BOB), offer(1_000)).unwrap();
    // asset, payment, then the refund of Bob's offer fails
    ledger.fail_on_call(3);

    let err = market.apply(&paying(ALICE, PRICE), buy()).unwrap_err();
    assert!(matches!(err, MarketError::Transfer(ref f) if f.unwound));

    assert_eq!(ledger.owner_of(COLLECTION, U256::from(ASSET_ID)), Some(SELLER));
    assert_eq!(ledger.balance(TOKEN, ALICE), U256::from(STARTING_BALANCE));
    assert_eq!(ledger.balance(TOKEN, MARKET), U256::from(1_000));
    assert_eq!(
        market.offer(U256::from(1)).unwrap().status,
        OfferStatus::Open
    );
    assert!(market
        .active_listing_for(COLLECTION, U256::from(ASSET_ID))
        .is_some());
}

#[rstest]
fn test_descriptor_failure_carries_descriptor(listed: Setup) {
    let Setup { ledger, mut market } = listed;
    let descriptor = encode(&buy());
    ledger.fail_on_call(2);

    let err = market
        .apply_descriptor(&paying(ALICE, PRICE), descriptor.as_ref())
        .unwrap_err();
    let failure = match err {
        MarketError::Transfer(failure) => failure,
        other => panic!("expected a transfer failure, got {other:?}"),
    };
    assert_eq!(failure.descriptor.as_ref(), Some(descriptor.as_bytes()));
    assert_eq!(failure.operation, OperationKind::Buy);
    assert_eq!(failure.listing_id, Some(U256::from(1)));
    assert!(failure.unwound);
    assert_eq!(
        market.listing(U256::from(1)).unwrap().status,
        ListingStatus::Active
    );
}

#[rstest]
fn test_validation_errors_are_recoverable(listed: Setup) {
    let Setup { mut market, .. } = listed;
    let err = market.apply(&CallContext::new(ALICE), buy()).unwrap_err();
    assert!(err.is_recoverable());
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_buys_sell_once(listed: Setup) {
    let Setup { ledger, market } = listed;
    let shared = SharedMarketplace::new(market);

    let handles: Vec<_> = [ALICE, BOB]
        .into_iter()
        .map(|buyer| {
            let shared = shared.clone();
            tokio::spawn(async move { shared.apply(paying(buyer, PRICE), buy()).await })
        })
        .collect();

    let mut sold = 0;
    let mut not_active = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => sold += 1,
            Err(MarketError::Validation(_)) => not_active += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    assert_eq!((sold, not_active), (1, 1));

    let market = shared.lock().await;
    let buyer = market.listing(U256::from(1)).unwrap().buyer.unwrap();
    assert_eq!(ledger.owner_of(COLLECTION, U256::from(ASSET_ID)), Some(buyer));
    assert_eq!(ledger.balance(TOKEN, SELLER), U256::from(PRICE));
}
