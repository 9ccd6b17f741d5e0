// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

pub mod accounts;
pub mod artifact;
pub mod deployment;
pub mod environment;
pub mod manifest;
pub mod records;
pub mod runner;
pub mod verification;
