// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! General purpose utilities.

use alloy::primitives::U256;

use color::Color;

pub mod color;

/// Pretty-prints a gas estimate and the fee it implies.
pub fn format_gas_cost(gas: u64, gas_price_wei: u128) -> String {
    let cost = U256::from(gas) * U256::from(gas_price_wei);
    let Ok(cost_gwei): Result<u64, _> = (cost / U256::from(1_000_000_000u64)).try_into() else {
        return format!("{gas} gas ({})", "???".red());
    };
    let eth = cost_gwei as f64 / 1e9;
    format!("{} gas ({})", gas.lavender(), format!("{eth:.6} ETH").mint())
}

/// Decodes hex text with an optional `0x` prefix.
pub fn decode0x(text: impl AsRef<str>) -> Result<Vec<u8>, hex::FromHexError> {
    let text = text.as_ref().trim();
    let text = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(text)
}
