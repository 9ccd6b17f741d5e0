// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Deploy.toml manifest definitions.

use std::{collections::BTreeMap, fs, path::Path, time::Duration};

use alloy::primitives::Address;
use serde::Deserialize;

use crate::{
    core::{
        accounts::AccountSpec,
        verification::{VerificationConfig, DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL},
    },
    scripts::BookManagerParams,
};

/// Default filename of the manifest
pub const FILENAME: &str = "Deploy.toml";

/// Environment variable holding the verification API key, unless configured otherwise.
pub const DEFAULT_API_KEY_ENV: &str = "ETHERSCAN_API_KEY";

#[derive(Debug, Default, Deserialize)]
pub struct DeployManifest {
    #[serde(default)]
    pub networks: BTreeMap<String, TomlNetwork>,
    #[serde(default)]
    pub named_accounts: BTreeMap<String, AccountSpec>,
    #[serde(default)]
    pub book_manager: TomlBookManager,
}

#[derive(Debug, Deserialize)]
pub struct TomlNetwork {
    pub endpoint: String,
    /// Expected chain id, checked against the node before deploying.
    pub chain_id: Option<u64>,
    pub verify: Option<TomlVerify>,
    #[serde(default)]
    pub book_manager: TomlBookManager,
}

#[derive(Debug, Deserialize)]
pub struct TomlVerify {
    pub api_url: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    pub poll_interval_secs: Option<u64>,
    pub max_attempts: Option<u32>,
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_owned()
}

/// Overrides of [`BookManagerParams`]; unset fields keep their default.
#[derive(Debug, Default, Deserialize)]
pub struct TomlBookManager {
    pub default_provider: Option<Address>,
    pub nft_orders_url: Option<String>,
    pub contract_info_url: Option<String>,
    pub name: Option<String>,
    pub symbol: Option<String>,
}

impl TomlBookManager {
    fn apply(&self, params: &mut BookManagerParams) {
        if let Some(default_provider) = self.default_provider {
            params.default_provider = default_provider;
        }
        if let Some(url) = &self.nft_orders_url {
            params.nft_orders_url = url.clone();
        }
        if let Some(url) = &self.contract_info_url {
            params.contract_info_url = url.clone();
        }
        if let Some(name) = &self.name {
            params.name = name.clone();
        }
        if let Some(symbol) = &self.symbol {
            params.symbol = symbol.clone();
        }
    }
}

impl DeployManifest {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        if !path.as_ref().exists() {
            return Err(ManifestError::Missing);
        }
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Load the manifest, or use an empty one if the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        match Self::load(path) {
            Err(ManifestError::Missing) => Ok(Self::default()),
            result => result,
        }
    }

    pub fn network(&self, name: &str) -> Result<&TomlNetwork, ManifestError> {
        self.networks
            .get(name)
            .ok_or_else(|| ManifestError::UnknownNetwork(name.to_owned()))
    }

    /// Check the chain id reported by the node against the configured one, if any.
    pub fn check_chain_id(&self, network: &str, actual: u64) -> Result<(), ManifestError> {
        match self.networks.get(network).and_then(|n| n.chain_id) {
            Some(expected) if expected != actual => Err(ManifestError::ChainIdMismatch {
                network: network.to_owned(),
                expected,
                actual,
            }),
            _ => Ok(()),
        }
    }

    /// BookManager parameters for `network`: defaults, then global, then network overrides.
    pub fn book_manager_params(&self, network: &str) -> BookManagerParams {
        let mut params = BookManagerParams::default();
        self.book_manager.apply(&mut params);
        if let Some(network) = self.networks.get(network) {
            network.book_manager.apply(&mut params);
        }
        params
    }

    /// Verification settings for `network`, or `None` if it has no `[verify]` table.
    pub fn verification(
        &self,
        network: &str,
        chain_id: u64,
    ) -> Result<Option<VerificationConfig>, ManifestError> {
        let Some(verify) = self.networks.get(network).and_then(|n| n.verify.as_ref()) else {
            return Ok(None);
        };
        let api_key =
            std::env::var(&verify.api_key_env).map_err(|_| ManifestError::MissingApiKey {
                network: network.to_owned(),
                var: verify.api_key_env.clone(),
            })?;
        Ok(Some(VerificationConfig {
            api_url: verify.api_url.clone(),
            api_key,
            chain_id,
            poll_interval: verify
                .poll_interval_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_POLL_INTERVAL),
            max_attempts: verify.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS),
        }))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml read error: {0}")]
    TomlRead(#[from] toml::de::Error),

    #[error("missing {file}", file = FILENAME)]
    Missing,
    #[error("network {0} is not configured in {file}", file = FILENAME)]
    UnknownNetwork(String),
    #[error("network {network} expects chain {expected}, but the node reports chain {actual}")]
    ChainIdMismatch {
        network: String,
        expected: u64,
        actual: u64,
    },
    #[error("network {0} has no [verify] settings")]
    NoVerification(String),
    #[error("verification on {network} needs an api key in ${var}")]
    MissingApiKey { network: String, var: String },
}
