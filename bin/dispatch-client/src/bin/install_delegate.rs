use std::env;
use std::str::FromStr;

use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use color_eyre::Result;
use dotenv::dotenv;
use omniera_client::{AddressRegistry, ChainConfigProvider, Config};
use omniera_primitives::notification::{LSP7_RECIPIENT_TYPE_ID, LSP8_RECIPIENT_TYPE_ID};
use omniera_router::install::install_calls;
use tracing::Level;
use tracing_subscriber::EnvFilter;

const DELEGATE_CONTRACT: &str = "UniversalReceiverDelegate";

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    // setup tracing for client execution
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_max_level(Level::INFO)
        .init();

    // Load environment variables from the `.env` file
    dotenv().ok();
    let config = Config::from_file(env::var("CONFIG_PATH")?)?;
    let network_name = env::var("NETWORK")?;
    let network = config.network(&network_name)?;
    let registry = AddressRegistry::load(env::var("MANIFEST_PATH")?)?;
    let account = Address::from_str(&env::var("UP_ADDR")?)?;
    let delegate = registry.resolve(DELEGATE_CONTRACT, &network_name)?;

    let signer = PrivateKeySigner::from_str(&env::var("PRIVATE_KEY")?)?;
    let rpc_provider = ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(EthereumWallet::new(signer))
        .on_http(network.rpc_url.clone());

    let type_ids = [*LSP7_RECIPIENT_TYPE_ID, *LSP8_RECIPIENT_TYPE_ID];
    for (type_id, call) in type_ids.iter().zip(install_calls(&type_ids, delegate)) {
        let tx = TransactionRequest::default()
            .with_to(account)
            .with_input(call);
        let receipt = rpc_provider
            .send_transaction(tx)
            .await?
            .get_receipt()
            .await?;
        tracing::info!(
            "delegate {} registered on {} for type {} in {}",
            delegate,
            account,
            type_id,
            receipt.transaction_hash
        );
    }
    Ok(())
}
