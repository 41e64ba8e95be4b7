use std::env;
use std::str::FromStr;

use alloy::network::EthereumWallet;
use alloy::providers::ProviderBuilder;
use alloy::signers::local::PrivateKeySigner;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use dotenv::dotenv;
use omniera_client::{
    parse_operation, AddressRegistry, AlloyRelaySubmitter, CctxApiClient, ChainConfigProvider,
    Config, CrossChainDispatcher,
};
use omniera_primitives::env::Environment;
use omniera_primitives::utils::{parse_amount, NATIVE_DECIMALS};
use tracing_subscriber::EnvFilter;

/// Path from the environment, falling back to `default` outside of production.
fn path_var(name: &str, default: &str, environment: Environment) -> Result<String> {
    match env::var(name) {
        Ok(path) => Ok(path),
        Err(_) if !environment.is_production() => Ok(default.to_string()),
        Err(_) => Err(eyre!("{name} must be set in production")),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    // Load environment variables from the `.env` file
    dotenv().ok();
    let environment = Environment::from_env_var();

    let config = Config::from_file(path_var("CONFIG_PATH", "config.json", environment)?)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_max_level(config.log_level()?)
        .init();

    let mut args = env::args().skip(1);
    let kind = args
        .next()
        .ok_or_else(|| eyre!("usage: dispatch <operation> [arguments...]"))?;
    let operation_args: Vec<String> = args.collect();

    let network_name = env::var("NETWORK")?;
    let network = config.network(&network_name)?;
    let registry =
        AddressRegistry::load(path_var("MANIFEST_PATH", "contracts.json", environment)?)?;
    let operation = parse_operation(&kind, &operation_args, &registry, &network_name)?;
    let value = parse_amount(
        &env::var("AMOUNT").unwrap_or_else(|_| "0".to_string()),
        NATIVE_DECIMALS,
    )?;

    // build signer, wallet and provider
    let signer = PrivateKeySigner::from_str(&env::var("PRIVATE_KEY")?)?;
    tracing::info!("using account {}", signer.address());
    let rpc_provider = ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(EthereumWallet::new(signer))
        .on_http(network.rpc_url.clone());

    let dispatcher = CrossChainDispatcher::new(
        AlloyRelaySubmitter::new(rpc_provider, network.relay_address),
        CctxApiClient::new(network.cctx_api_url.clone())?,
        config.tracking_policy()?,
    )
    .with_relay_recipient(network.relay_recipient);

    let record = dispatcher.dispatch(&operation, value).await?;
    tracing::info!(
        "submitted {} on {}: {}",
        operation,
        network_name,
        record.origin_tx_hash
    );

    let record = dispatcher.track(record).await.into_result()?;
    tracing::info!(
        "dispatch {} finished as {:?} after {} polls",
        record.origin_tx_hash,
        record.status,
        record.polls
    );
    Ok(())
}
