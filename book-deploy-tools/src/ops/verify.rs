// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use super::Paths;
use crate::{
    core::{
        artifact::ArtifactStore,
        manifest::{DeployManifest, ManifestError},
        records::{DeploymentStore, FileStore},
        verification::Verifier,
    },
    Error, Result,
};

/// Submit a recorded deployment for source verification again.
pub async fn verify(
    network: &str,
    manifest: &DeployManifest,
    paths: &Paths,
    contract: &str,
) -> Result<()> {
    let store = FileStore::open_existing(&paths.deployments, network)?;
    let record = store.get(contract)?.ok_or_else(|| Error::NotDeployed {
        name: contract.to_owned(),
        network: network.to_owned(),
    })?;
    let config = manifest
        .verification(network, store.chain_id())?
        .ok_or_else(|| ManifestError::NoVerification(network.to_owned()))?;

    Verifier::new(config, ArtifactStore::new(&paths.artifacts))
        .verify(
            contract,
            record.address,
            &record.constructor_args,
            &record.libraries,
        )
        .await?;
    Ok(())
}
