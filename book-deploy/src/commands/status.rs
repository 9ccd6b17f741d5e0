// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use book_deploy_tools::{ops, utils::color::Color};

use crate::{
    common_args::PathArgs,
    error::BookDeployResult,
    utils::{BOLD, HEADER},
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Network whose deployments to list
    #[arg(short, long, default_value = crate::constants::LOCALHOST_NETWORK)]
    network: String,

    #[command(flatten)]
    paths: PathArgs,
}

pub fn exec(args: Args) -> BookDeployResult {
    let records = ops::status(&args.network, &args.paths.paths())?;
    if records.is_empty() {
        println!("no deployments recorded for {}", args.network);
        return Ok(());
    }

    println!("{HEADER}{}{HEADER:#}", args.network);
    for record in records {
        println!("{BOLD}{}{BOLD:#}: {}", record.name, record.address.mint());
        if let Some(tx_hash) = record.transaction_hash {
            println!("  tx: {}", tx_hash.grey());
        }
        if !record.args.is_empty() {
            println!("  args: {}", record.args.join(", "));
        }
        for (library, address) in &record.libraries {
            println!("  library {library}: {}", address.lavender());
        }
    }
    Ok(())
}
