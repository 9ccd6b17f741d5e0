// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Tools for deploying the Book library and the BookManager contract.
//!
//! Deployments are idempotent: every deployed contract is recorded per network, and deployment
//! scripts skip whatever is already recorded.

#[macro_use]
mod macros;

pub mod core;
pub(crate) mod error;
pub mod ops;
pub mod scripts;
pub mod utils;

pub use error::{Error, Result};
