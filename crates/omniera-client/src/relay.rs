use std::marker::PhantomData;

use alloy::network::{Network, TransactionBuilder};
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::providers::Provider;
use alloy::transports::Transport;
use async_trait::async_trait;
use omniera_primitives::Descriptor;

use crate::error::{ClientError, Result};

/// Sends value-bearing transactions to the bridge relay.
#[async_trait]
pub trait RelaySubmitter {
    /// Broadcast `payload` with `value` attached and return the origin transaction hash
    /// without waiting for inclusion.
    async fn submit(&self, payload: Bytes, value: U256) -> Result<TxHash>;
}

/// Transaction data for a descriptor, optionally addressed to a home-chain contract.
pub fn relay_payload(descriptor: &Descriptor, recipient: Option<Address>) -> Bytes {
    match recipient {
        Some(recipient) => {
            let mut payload = Vec::with_capacity(20 + descriptor.len());
            payload.extend_from_slice(recipient.as_slice());
            payload.extend_from_slice(descriptor.as_ref());
            payload.into()
        }
        None => descriptor.as_bytes().clone(),
    }
}

pub struct AlloyRelaySubmitter<T, P, N> {
    rpc_provider: P,
    relay_address: Address,
    phantom_data: PhantomData<(T, N)>,
}

impl<T, P, N> AlloyRelaySubmitter<T, P, N>
where
    T: Transport + Clone,
    P: Provider<T, N> + Clone,
    N: Network + Clone,
{
    pub fn new(rpc_provider: P, relay_address: Address) -> Self {
        Self {
            rpc_provider,
            relay_address,
            phantom_data: PhantomData,
        }
    }

    pub fn relay_address(&self) -> Address {
        self.relay_address
    }
}

#[async_trait]
impl<T, P, N> RelaySubmitter for AlloyRelaySubmitter<T, P, N>
where
    T: Transport + Clone,
    P: Provider<T, N> + Clone,
    N: Network + Clone,
{
    async fn submit(&self, payload: Bytes, value: U256) -> Result<TxHash> {
        let tx = N::TransactionRequest::default()
            .with_to(self.relay_address)
            .with_input(payload)
            .with_value(value);

        let pending = self
            .rpc_provider
            .send_transaction(tx)
            .await
            .map_err(|e| ClientError::TransactionError(e.to_string()))?;

        let tx_hash = *pending.tx_hash();
        tracing::info!(
            "relay transaction {} sent to {} with value {}",
            tx_hash,
            self.relay_address,
            value
        );
        Ok(tx_hash)
    }
}
