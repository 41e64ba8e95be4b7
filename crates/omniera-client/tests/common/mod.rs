#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::{address, Address, Bytes, TxHash, U256};
use async_trait::async_trait;
use omniera_client::{
    CctxReport, CctxStatus, CctxStatusSource, ClientError, RelaySubmitter, Result,
    TrackingPolicy,
};
use omniera_market::{
    AssetTransfer, CallContext, Marketplace, OwnershipCheck, SharedMarketplace, TransferError,
};

pub const SENDER: Address = address!("5e11e20000000000000000000000000000000001");
pub const MARKET: Address = address!("00000000000000000000000000000000000ee0ee");

/// Every candidate controls every asset.
pub struct AnyController;

impl OwnershipCheck for AnyController {
    fn is_controller(&self, _: Address, _: U256, _: Address) -> bool {
        true
    }
}

pub struct NoopTransfers;

impl AssetTransfer for NoopTransfers {
    fn transfer(
        &mut self,
        _: Address,
        _: U256,
        _: Address,
        _: Address,
    ) -> std::result::Result<(), TransferError> {
        Ok(())
    }
}

pub type TestMarket = SharedMarketplace<AnyController, NoopTransfers>;

pub fn home_market() -> TestMarket {
    SharedMarketplace::new(Marketplace::new(MARKET, AnyController, NoopTransfers))
}

/// Scripted answer of the bridge api. The last entry of a script repeats forever.
#[derive(Clone, Debug)]
pub enum Reply {
    NotObserved,
    Status(CctxStatus),
    Error,
}

#[derive(Default)]
struct BridgeState {
    submitted: Vec<(TxHash, Bytes, U256)>,
    scripts: HashMap<TxHash, VecDeque<Reply>>,
    queries: HashMap<TxHash, u32>,
    delivered: HashSet<TxHash>,
}

/// In-memory bridge acting as relay and status api. Once a transaction is reported as
/// `OutboundMined` its payload is delivered to the home market, if one is attached.
#[derive(Clone, Default)]
pub struct MockBridge {
    state: Arc<Mutex<BridgeState>>,
    market: Option<TestMarket>,
}

impl MockBridge {
    pub fn with_market(market: TestMarket) -> Self {
        Self {
            state: Arc::default(),
            market: Some(market),
        }
    }

    pub fn script(&self, tx_hash: TxHash, replies: Vec<Reply>) {
        self.state
            .lock()
            .unwrap()
            .scripts
            .insert(tx_hash, replies.into());
    }

    pub fn submissions(&self) -> Vec<(TxHash, Bytes, U256)> {
        self.state.lock().unwrap().submitted.clone()
    }

    pub fn queries(&self, tx_hash: TxHash) -> u32 {
        self.state
            .lock()
            .unwrap()
            .queries
            .get(&tx_hash)
            .copied()
            .unwrap_or_default()
    }
}

#[async_trait]
impl RelaySubmitter for MockBridge {
    async fn submit(&self, payload: Bytes, value: U256) -> Result<TxHash> {
        let mut state = self.state.lock().unwrap();
        let tx_hash = TxHash::with_last_byte(state.submitted.len() as u8 + 1);
        state.submitted.push((tx_hash, payload, value));
        Ok(tx_hash)
    }
}

#[async_trait]
impl CctxStatusSource for MockBridge {
    async fn query(&self, origin_tx_hash: TxHash) -> Result<Option<CctxReport>> {
        let (reply, delivery) = {
            let mut state = self.state.lock().unwrap();
            *state.queries.entry(origin_tx_hash).or_default() += 1;
            let reply = match state.scripts.get_mut(&origin_tx_hash) {
                Some(script) if script.len() > 1 => script.pop_front().unwrap(),
                Some(script) => script.front().cloned().unwrap_or(Reply::NotObserved),
                None => Reply::NotObserved,
            };
            let delivery = match reply {
                Reply::Status(CctxStatus::OutboundMined)
                    if state.delivered.insert(origin_tx_hash) =>
                {
                    state
                        .submitted
                        .iter()
                        .find(|(hash, _, _)| *hash == origin_tx_hash)
                        .map(|(_, payload, _)| payload.clone())
                }
                _ => None,
            };
            (reply, delivery)
        };

        if let (Some(market), Some(payload)) = (&self.market, delivery) {
            market
                .apply_descriptor(CallContext::new(SENDER), &payload)
                .await
                .map_err(|e| {
                    ClientError::StatusQueryError(format!("home chain call failed: {e}"))
                })?;
        }

        match reply {
            Reply::NotObserved => Ok(None),
            Reply::Status(status) => Ok(Some(CctxReport {
                index: format!("cctx-{origin_tx_hash}"),
                status,
                status_message: format!("{status:?}"),
            })),
            Reply::Error => Err(ClientError::StatusQueryError("connection reset".to_string())),
        }
    }
}

pub fn policy(poll_secs: u64, deadline_secs: u64, max_polls: u32) -> TrackingPolicy {
    TrackingPolicy {
        poll_interval: Duration::from_secs(poll_secs),
        deadline: Duration::from_secs(deadline_secs),
        max_polls,
    }
}
