// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::providers::{Provider, WalletProvider};

use super::Paths;
use crate::{
    core::{
        accounts::NamedAccounts,
        artifact::ArtifactStore,
        deployment::{DeploymentConfig, RpcDeployer},
        environment::DeployEnv,
        manifest::DeployManifest,
        records::{DeploymentStore, FileStore, MemoryStore},
        runner::{run_scripts, DeployScript},
        verification::Verifier,
    },
    scripts::BookManagerScript,
    Result,
};

type RpcEnv<'s, P> = DeployEnv<&'s dyn DeploymentStore, RpcDeployer<P>, NamedAccounts>;

/// Run the deployment scripts selected by `tags` against `network`.
pub async fn deploy<P: Provider + WalletProvider>(
    network: &str,
    manifest: &DeployManifest,
    paths: &Paths,
    tags: &[String],
    verify: bool,
    config: DeploymentConfig,
    provider: P,
) -> Result<()> {
    let chain_id = provider.get_chain_id().await?;
    manifest.check_chain_id(network, chain_id)?;
    debug!(@grey, "connected to {network} (chain {chain_id})");

    // estimates see existing records but must not create any
    let file_store;
    let memory_store;
    let store: &dyn DeploymentStore = if config.estimate_gas {
        memory_store = match FileStore::open_if_exists(&paths.deployments, network, chain_id)? {
            Some(existing) => MemoryStore::with_records(existing.list()?),
            None => MemoryStore::new(),
        };
        &memory_store
    } else {
        file_store = FileStore::open(&paths.deployments, network, chain_id)?;
        &file_store
    };
    let signers = [provider.default_signer_address()];
    let accounts = NamedAccounts::resolve(&manifest.named_accounts, &signers)?;
    let artifacts = ArtifactStore::new(&paths.artifacts);

    let verify = verify && !config.estimate_gas;
    let verifier = if verify {
        manifest
            .verification(network, chain_id)?
            .map(|verification| Verifier::new(verification, artifacts.clone()))
    } else {
        None
    };
    if verify && verifier.is_none() {
        warn!(@yellow, "no [verify] settings for {network}, skipping verification");
    }

    let deployer = RpcDeployer::builder()
        .provider(provider)
        .artifacts(artifacts)
        .config(config)
        .build();
    let env = DeployEnv::new(network, chain_id, store, deployer, accounts).with_verifier(verifier);

    let book_manager = BookManagerScript::new(manifest.book_manager_params(network));
    let scripts: [&dyn DeployScript<RpcEnv<P>>; 1] = [&book_manager];
    run_scripts(&env, &scripts, tags).await
}
