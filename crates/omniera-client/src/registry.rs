//! Deployment manifest mapping contract names to addresses per network.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::str::FromStr;

use alloy::primitives::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    pub timestamp: DateTime<Utc>,
    pub contracts: BTreeMap<String, Address>,
}

/// Read-only view of deployed addresses, passed explicitly to whoever needs it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressRegistry {
    deployments: BTreeMap<String, Deployment>,
}

impl AddressRegistry {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn resolve(&self, name: &str, network: &str) -> Result<Address, RegistryError> {
        let deployment = self
            .deployments
            .get(network)
            .ok_or_else(|| RegistryError::UnknownNetwork(network.to_string()))?;
        deployment
            .contracts
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::UnknownContract {
                name: name.to_string(),
                network: network.to_string(),
            })
    }

    /// Accepts either a hex address or a contract name.
    pub fn resolve_or_parse(&self, value: &str, network: &str) -> Result<Address, RegistryError> {
        match Address::from_str(value) {
            Ok(address) => Ok(address),
            Err(_) => self.resolve(value, network),
        }
    }

    pub fn deployment(&self, network: &str) -> Option<&Deployment> {
        self.deployments.get(network)
    }

    /// Record a deployment run, replacing any previous one for `network`.
    pub fn record_deployment(
        &mut self,
        network: &str,
        contracts: impl IntoIterator<Item = (String, Address)>,
    ) -> &Deployment {
        let deployment = Deployment {
            timestamp: Utc::now(),
            contracts: contracts.into_iter().collect(),
        };
        self.deployments.insert(network.to_string(), deployment);
        &self.deployments[network]
    }

    /// Write the manifest to a new file. Never overwrites an existing manifest.
    pub fn save_new<P: AsRef<Path>>(&self, path: P) -> Result<(), RegistryError> {
        let path = path.as_ref();
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => RegistryError::ManifestExists(path.to_path_buf()),
                _ => RegistryError::Io(e),
            })?;
        let data = serde_json::to_string_pretty(self)?;
        file.write_all(data.as_bytes())?;
        Ok(())
    }
}
