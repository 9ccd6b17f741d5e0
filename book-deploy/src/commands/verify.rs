// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use book_deploy_tools::{ops, scripts::book_manager::BOOK_MANAGER};

use crate::{
    common_args::{NetworkArgs, PathArgs},
    error::BookDeployResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Name of the recorded contract to verify
    #[arg(long, default_value = BOOK_MANAGER)]
    contract: String,

    #[command(flatten)]
    network: NetworkArgs,
    #[command(flatten)]
    paths: PathArgs,
}

pub async fn exec(args: Args) -> BookDeployResult {
    let manifest = args.network.manifest()?;
    ops::verify(
        &args.network.network,
        &manifest,
        &args.paths.paths(),
        &args.contract,
    )
    .await?;
    Ok(())
}
