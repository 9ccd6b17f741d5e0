// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use super::Paths;
use crate::{
    core::records::{DeploymentRecord, DeploymentStore, FileStore},
    Result,
};

/// Every deployment recorded for `network`, sorted by name.
pub fn status(network: &str, paths: &Paths) -> Result<Vec<DeploymentRecord>> {
    let store = FileStore::open_existing(&paths.deployments, network)?;
    Ok(store.list()?)
}
