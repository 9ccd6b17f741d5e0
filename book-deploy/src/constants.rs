// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

/// Network name that falls back to a local node when not configured.
pub const LOCALHOST_NETWORK: &str = "localhost";

/// The default endpoint for connections to a local development node.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8545";
