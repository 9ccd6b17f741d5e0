// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::error::BookDeployResult;

mod deploy;
mod status;
mod verify;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Run the deployment scripts against a network
    #[clap(visible_alias = "d")]
    Deploy(deploy::Args),
    /// List the deployments recorded for a network
    #[clap(visible_alias = "s")]
    Status(status::Args),
    /// Submit a recorded deployment for source verification
    Verify(verify::Args),
}

pub async fn exec(cmd: Command) -> BookDeployResult {
    match cmd {
        Command::Deploy(args) => deploy::exec(args).await,
        Command::Status(args) => status::exec(args),
        Command::Verify(args) => verify::exec(args).await,
    }
}
