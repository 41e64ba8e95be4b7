//! Client Configurations

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use tracing::Level;
use url::Url;

use crate::error::ConfigError;
use crate::tracker::TrackingPolicy;

/// Endpoints and relay of one origin network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub rpc_url: Url,
    pub chain_id: u64,
    /// Bridge relay (TSS) address receiving dispatch transactions.
    pub relay_address: Address,
    pub cctx_api_url: Url,
    /// When set, the relay payload is prefixed with this home-chain contract address.
    #[serde(default)]
    pub relay_recipient: Option<Address>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingConfig {
    pub poll_interval_secs: u64,
    pub deadline_secs: u64,
    pub max_polls: u32,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 15,
            deadline_secs: 900,
            max_polls: 60,
        }
    }
}

impl TrackingConfig {
    pub fn policy(&self) -> Result<TrackingPolicy, ConfigError> {
        if self.poll_interval_secs == 0 || self.max_polls == 0 {
            return Err(ConfigError::InvalidTracking(
                "poll interval and max polls must be non-zero".to_string(),
            ));
        }
        if self.deadline_secs < self.poll_interval_secs {
            return Err(ConfigError::InvalidTracking(format!(
                "deadline of {}s is shorter than the poll interval of {}s",
                self.deadline_secs, self.poll_interval_secs
            )));
        }
        Ok(TrackingPolicy {
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            deadline: Duration::from_secs(self.deadline_secs),
            max_polls: self.max_polls,
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub log_level: String,
    pub networks: BTreeMap<String, NetworkConfig>,
    #[serde(default)]
    pub tracking: TrackingConfig,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&data)?;
        Ok(config)
    }

    pub fn log_level(&self) -> Result<Level, ConfigError> {
        Level::from_str(&self.log_level)
            .map_err(|_| ConfigError::LogLevelParseError(self.log_level.clone()))
    }

    pub fn tracking_policy(&self) -> Result<TrackingPolicy, ConfigError> {
        self.tracking.policy()
    }
}

/// Resolves a symbolic network name to its configuration.
pub trait ChainConfigProvider {
    fn network(&self, name: &str) -> Result<&NetworkConfig, ConfigError>;
}

impl ChainConfigProvider for Config {
    fn network(&self, name: &str) -> Result<&NetworkConfig, ConfigError> {
        self.networks
            .get(name)
            .ok_or_else(|| ConfigError::UnknownNetwork(name.to_string()))
    }
}
