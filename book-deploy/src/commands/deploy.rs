// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use book_deploy_tools::ops;

use crate::{
    common_args::{AuthArgs, NetworkArgs, PathArgs, ProviderArgs},
    error::BookDeployResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Only run scripts carrying one of these tags, plus their dependencies.
    #[arg(long, value_delimiter = ',')]
    tags: Vec<String>,
    /// Only perform gas estimation; nothing is sent or recorded.
    #[arg(long)]
    estimate_gas: bool,
    /// Skip source verification of new deployments.
    #[arg(long)]
    no_verify: bool,

    /// Wallet source to use.
    #[command(flatten)]
    auth: AuthArgs,
    #[command(flatten)]
    network: NetworkArgs,
    #[command(flatten)]
    provider: ProviderArgs,
    #[command(flatten)]
    paths: PathArgs,
}

pub async fn exec(args: Args) -> BookDeployResult {
    let manifest = args.network.manifest()?;
    let provider = args
        .provider
        .build_provider_with_wallet(&args.network, &manifest, &args.auth)
        .await?;
    let config = args.auth.deployment_config(args.estimate_gas)?;
    ops::deploy(
        &args.network.network,
        &manifest,
        &args.paths.paths(),
        &args.tags,
        !args.no_verify,
        config,
        provider,
    )
    .await?;
    Ok(())
}
