//! Origin-chain client: resolves addresses, submits descriptors to the bridge relay and tracks
//! the resulting cross-chain transactions.

pub mod api;
pub mod config;
pub mod dispatch;
pub mod dispatcher;
pub mod error;
pub mod intent;
pub mod registry;
pub mod relay;
pub mod tracker;

pub use api::{cctx::CctxApiClient, CctxReport, CctxStatus, CctxStatusSource};
pub use config::{ChainConfigProvider, Config, NetworkConfig, TrackingConfig};
pub use dispatch::{DispatchRecord, DispatchStatus};
pub use dispatcher::CrossChainDispatcher;
pub use error::{ClientError, ConfigError, RegistryError, Result};
pub use intent::parse_operation;
pub use registry::AddressRegistry;
pub use relay::{AlloyRelaySubmitter, RelaySubmitter};
pub use tracker::{CctxTracker, TrackingPolicy};
