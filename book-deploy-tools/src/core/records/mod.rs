// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Deployment records.
//!
//! A record is written once, after the first successful deployment of a contract on a network,
//! and is never modified afterward. The presence of a record is what makes deployment scripts
//! idempotent.

use std::collections::BTreeMap;

use alloy::primitives::{Address, Bytes, TxHash};
use serde::{Deserialize, Serialize};

pub use file::FileStore;
pub use memory::MemoryStore;

mod file;
mod memory;

/// A contract deployed on a specific chain.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub name: String,
    pub address: Address,
    pub chain_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<TxHash>,
    /// Constructor arguments, rendered for display.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    /// ABI-encoded constructor arguments exactly as deployed.
    #[serde(default)]
    pub constructor_args: Bytes,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub libraries: BTreeMap<String, Address>,
}

/// Storage for deployment records of a single network.
pub trait DeploymentStore {
    /// Get the record for `name`, if the contract was deployed.
    fn get(&self, name: &str) -> Result<Option<DeploymentRecord>, StoreError>;

    fn save(&self, record: &DeploymentRecord) -> Result<(), StoreError>;

    /// All records, sorted by name.
    fn list(&self) -> Result<Vec<DeploymentRecord>, StoreError>;
}

impl<S: DeploymentStore + ?Sized> DeploymentStore for &S {
    fn get(&self, name: &str) -> Result<Option<DeploymentRecord>, StoreError> {
        (**self).get(name)
    }

    fn save(&self, record: &DeploymentRecord) -> Result<(), StoreError> {
        (**self).save(record)
    }

    fn list(&self) -> Result<Vec<DeploymentRecord>, StoreError> {
        (**self).list()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(
        "deployments for network {network} belong to chain {found}, but the node reports chain {expected}"
    )]
    ChainIdMismatch {
        network: String,
        expected: u64,
        found: u64,
    },
    #[error("invalid chain id file contents: {0:?}")]
    InvalidChainId(String),
    #[error("no deployments found for network {0}")]
    UnknownNetwork(String),
}
