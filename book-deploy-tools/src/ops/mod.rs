// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! High-level operations, one per CLI command.

use std::path::PathBuf;

pub use deploy::deploy;
pub use status::status;
pub use verify::verify;

mod deploy;
mod status;
mod verify;

/// Default directory of per-network deployment records.
pub const DEFAULT_DEPLOYMENTS_DIR: &str = "deployments";

/// Default directory of compiled artifacts.
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Locations of deployment records and compiled artifacts.
#[derive(Clone, Debug)]
pub struct Paths {
    pub deployments: PathBuf,
    pub artifacts: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            deployments: DEFAULT_DEPLOYMENTS_DIR.into(),
            artifacts: DEFAULT_ARTIFACTS_DIR.into(),
        }
    }
}
