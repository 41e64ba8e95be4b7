use std::fs;
use std::path::Path;

use alloy::primitives::B256;
use omniera_primitives::notification::{LSP7_RECIPIENT_TYPE_ID, LSP8_RECIPIENT_TYPE_ID};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RouterError};

/// What to do when the router's own action fails for a recognized notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Drop the side effect and let the transfer go through.
    #[default]
    SkipAction,
    /// Return the error to the host, which reverts the transfer.
    RejectTransfer,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    #[serde(default = "default_allowed_type_ids")]
    pub allowed_type_ids: Vec<B256>,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

fn default_allowed_type_ids() -> Vec<B256> {
    vec![*LSP7_RECIPIENT_TYPE_ID, *LSP8_RECIPIENT_TYPE_ID]
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            allowed_type_ids: default_allowed_type_ids(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl RouterConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| RouterError::ConfigError(format!("{}: {e}", path.as_ref().display())))?;
        serde_json::from_str(&contents).map_err(|e| RouterError::ConfigError(e.to_string()))
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn is_allowed(&self, type_id: &B256) -> bool {
        self.allowed_type_ids.contains(type_id)
    }
}
