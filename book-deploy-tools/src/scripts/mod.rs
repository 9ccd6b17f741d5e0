// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Deployment scripts.

pub mod book_manager;

pub use book_manager::{BookManagerParams, BookManagerScript};
