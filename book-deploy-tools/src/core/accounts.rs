// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Named accounts, mapping roles such as `deployer` to addresses.

use std::collections::{BTreeMap, HashMap};

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// Role of the account sending deployment transactions.
pub const DEPLOYER: &str = "deployer";

/// How a role is configured in `Deploy.toml`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AccountSpec {
    /// Index into the loaded signers.
    Index(usize),
    Address(Address),
}

pub trait AccountResolver {
    fn named_account(&self, role: &str) -> Result<Address, AccountError>;
}

#[derive(Clone, Debug, Default)]
pub struct NamedAccounts {
    accounts: HashMap<String, Address>,
}

impl NamedAccounts {
    /// Resolve configured roles against the available signers.
    ///
    /// `deployer` defaults to the first signer when not configured.
    pub fn resolve(
        specs: &BTreeMap<String, AccountSpec>,
        signers: &[Address],
    ) -> Result<Self, AccountError> {
        let mut accounts = HashMap::with_capacity(specs.len() + 1);
        for (role, spec) in specs {
            let address = match spec {
                AccountSpec::Index(index) => {
                    *signers
                        .get(*index)
                        .ok_or_else(|| AccountError::UnknownSignerIndex {
                            role: role.clone(),
                            index: *index,
                            signers: signers.len(),
                        })?
                }
                AccountSpec::Address(address) => *address,
            };
            accounts.insert(role.clone(), address);
        }
        if let (false, Some(first)) = (accounts.contains_key(DEPLOYER), signers.first()) {
            accounts.insert(DEPLOYER.to_owned(), *first);
        }
        Ok(Self { accounts })
    }
}

impl AccountResolver for NamedAccounts {
    fn named_account(&self, role: &str) -> Result<Address, AccountError> {
        self.accounts
            .get(role)
            .copied()
            .ok_or_else(|| AccountError::UnknownRole(role.to_owned()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("no named account configured for role {0}")]
    UnknownRole(String),
    #[error("role {role} uses signer index {index}, but only {signers} signer(s) are loaded")]
    UnknownSignerIndex {
        role: String,
        index: usize,
        signers: usize,
    },
}
