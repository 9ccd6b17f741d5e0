// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! The environment deployment scripts run against.

use alloy::{dyn_abi::DynSolValue, primitives::Address};

use crate::{
    core::{
        accounts::AccountResolver,
        artifact::format_arg,
        deployment::{ContractDeployer, DeployOptions},
        records::{DeploymentRecord, DeploymentStore},
        verification::Verifier,
    },
    utils::color::DebugColor,
    Result,
};

/// Everything a deployment script may do on a network.
#[allow(async_fn_in_trait)]
pub trait Environment {
    /// Name of the target network.
    fn network(&self) -> &str;

    fn chain_id(&self) -> u64;

    /// Get the record for `name`, or `None` if it was never deployed on this network.
    async fn get_or_null(&self, name: &str) -> Result<Option<DeploymentRecord>>;

    /// Deploy, record and verify a contract, returning its address.
    async fn deploy(
        &self,
        name: &str,
        args: Vec<DynSolValue>,
        options: DeployOptions,
    ) -> Result<Address>;

    fn named_account(&self, role: &str) -> Result<Address>;
}

/// [`Environment`] composed from a record store, a deployer and named accounts.
pub struct DeployEnv<S, D, A> {
    network: String,
    chain_id: u64,
    store: S,
    deployer: D,
    accounts: A,
    verifier: Option<Verifier>,
}

impl<S, D, A> DeployEnv<S, D, A> {
    pub fn new(network: impl Into<String>, chain_id: u64, store: S, deployer: D, accounts: A) -> Self {
        Self {
            network: network.into(),
            chain_id,
            store,
            deployer,
            accounts,
            verifier: None,
        }
    }

    pub fn with_verifier(mut self, verifier: Option<Verifier>) -> Self {
        self.verifier = verifier;
        self
    }

    pub fn deployer(&self) -> &D {
        &self.deployer
    }
}

impl<S, D, A> Environment for DeployEnv<S, D, A>
where
    S: DeploymentStore,
    D: ContractDeployer,
    A: AccountResolver,
{
    fn network(&self) -> &str {
        &self.network
    }

    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    async fn get_or_null(&self, name: &str) -> Result<Option<DeploymentRecord>> {
        Ok(self.store.get(name)?)
    }

    async fn deploy(
        &self,
        name: &str,
        args: Vec<DynSolValue>,
        options: DeployOptions,
    ) -> Result<Address> {
        info!(@grey, "deploying {name} on {}", self.network);
        let deployed = self.deployer.deploy(name, &args, &options).await?;
        let Some(transaction_hash) = deployed.transaction_hash else {
            // estimate only, nothing was sent
            return Ok(deployed.address);
        };

        // record before verifying: a failed verification must not lead to a redeploy
        self.store.save(&DeploymentRecord {
            name: name.to_owned(),
            address: deployed.address,
            chain_id: self.chain_id,
            transaction_hash: Some(transaction_hash),
            args: args.iter().map(format_arg).collect(),
            constructor_args: deployed.constructor_args.clone(),
            libraries: options.libraries.clone(),
        })?;

        if let Some(verifier) = &self.verifier {
            verifier
                .verify(
                    name,
                    deployed.address,
                    &deployed.constructor_args,
                    &options.libraries,
                )
                .await?;
        }
        Ok(deployed.address)
    }

    fn named_account(&self, role: &str) -> Result<Address> {
        let address = self.accounts.named_account(role)?;
        debug!(@grey, "named account {role}: {}", address.debug_lavender());
        Ok(address)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, time::Duration};

    use alloy::primitives::{address, Bytes, B256};

    use super::*;
    use crate::{
        core::{
            accounts::NamedAccounts,
            artifact::{ArtifactError, ArtifactStore},
            deployment::{DeployedContract, DeploymentError},
            records::MemoryStore,
            verification::{VerificationConfig, VerificationError},
        },
        Error,
    };

    const BOOK: Address = address!("00000000000000000000000000000000000000b0");

    struct Deployer;

    impl ContractDeployer for Deployer {
        async fn deploy(
            &self,
            _name: &str,
            _args: &[DynSolValue],
            _options: &DeployOptions,
        ) -> Result<DeployedContract, DeploymentError> {
            Ok(DeployedContract {
                address: BOOK,
                transaction_hash: Some(B256::with_last_byte(1)),
                constructor_args: Bytes::from_static(&[0xab, 0xcd]),
            })
        }
    }

    fn accounts() -> NamedAccounts {
        NamedAccounts::resolve(&BTreeMap::new(), &[Address::with_last_byte(1)]).unwrap()
    }

    #[tokio::test]
    async fn failed_verification_keeps_the_record() {
        // no artifacts, so verification fails before any request is sent
        let artifacts = tempfile::tempdir().unwrap();
        let verifier = Verifier::new(
            VerificationConfig {
                api_url: "http://127.0.0.1:9/api".to_owned(),
                api_key: "key".to_owned(),
                chain_id: 146,
                poll_interval: Duration::ZERO,
                max_attempts: 1,
            },
            ArtifactStore::new(artifacts.path()),
        );
        let store = MemoryStore::new();
        let env =
            DeployEnv::new("sonic", 146, &store, Deployer, accounts()).with_verifier(Some(verifier));

        let err = env
            .deploy("Book", Vec::new(), DeployOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Verification(VerificationError::Artifact(ArtifactError::NotFound(name)))
                if name == "Book"
        ));

        let record = env.get_or_null("Book").await.unwrap().unwrap();
        assert_eq!(record.address, BOOK);
        assert_eq!(record.chain_id, 146);
        assert_eq!(record.constructor_args, Bytes::from_static(&[0xab, 0xcd]));
    }

    #[tokio::test]
    async fn records_deployments_without_verifier() {
        let store = MemoryStore::new();
        let env = DeployEnv::new("sonic", 146, &store, Deployer, accounts());

        let book = Address::with_last_byte(0x42);
        let address = env
            .deploy(
                "BookManager",
                vec![DynSolValue::String("  \"quoted\"  ".to_owned())],
                DeployOptions::default().with_library("Book", book),
            )
            .await
            .unwrap();
        assert_eq!(address, BOOK);
        assert_eq!(env.network(), "sonic");

        let record = store.get("BookManager").unwrap().unwrap();
        assert_eq!(record.args, ["  \"quoted\"  "]);
        assert_eq!(record.libraries["Book"], book);
        assert_eq!(record.transaction_hash, Some(B256::with_last_byte(1)));
    }
}
