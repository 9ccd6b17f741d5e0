// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Deployment of the `BookManager` contract and its `Book` library.

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{address, Address},
};
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        accounts::DEPLOYER,
        deployment::DeployOptions,
        environment::Environment,
        runner::{DeployScript, ScriptFuture},
    },
    utils::color::DebugColor,
    Result,
};

pub const BOOK: &str = "Book";
pub const BOOK_MANAGER: &str = "BookManager";

/// Provider registered as the default fee provider when none is configured.
pub const DEFAULT_PROVIDER: Address = address!("cc92364b6b886158e71fd4e4da5c682d33d1491e");

/// Deployment parameters of `BookManager`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct BookManagerParams {
    pub default_provider: Address,
    pub nft_orders_url: String,
    pub contract_info_url: String,
    pub name: String,
    pub symbol: String,
}

impl Default for BookManagerParams {
    fn default() -> Self {
        Self {
            default_provider: DEFAULT_PROVIDER,
            nft_orders_url: "https://sonic.market/api/nft/chains/146/orders/".to_owned(),
            contract_info_url: "https://sonic.market/api/contract/chains/146".to_owned(),
            name: "Sonic Market Orderbook Maker Order".to_owned(),
            symbol: "SONIC-MARKET-ORDER".to_owned(),
        }
    }
}

/// Deploys `Book` if needed, then `BookManager` linked against it.
///
/// Does nothing once `BookManager` is deployed. If a previous run deployed `Book` but failed
/// before `BookManager`, the recorded `Book` is reused.
#[derive(Clone, Debug, Default)]
pub struct BookManagerScript {
    params: BookManagerParams,
}

impl BookManagerScript {
    pub fn new(params: BookManagerParams) -> Self {
        Self { params }
    }

    /// `BookManager` constructor arguments, in declaration order.
    pub fn constructor_args(&self, owner: Address) -> Vec<DynSolValue> {
        let params = &self.params;
        vec![
            DynSolValue::Address(owner),
            DynSolValue::Address(params.default_provider),
            DynSolValue::String(params.nft_orders_url.clone()),
            DynSolValue::String(params.contract_info_url.clone()),
            DynSolValue::String(params.name.clone()),
            DynSolValue::String(params.symbol.clone()),
        ]
    }

    async fn ensure_deployed(&self, env: &impl Environment) -> Result<()> {
        debug!(@grey, "checking {BOOK_MANAGER} on {} (chain {})", env.network(), env.chain_id());
        let owner = env.named_account(DEPLOYER)?;

        if let Some(record) = env.get_or_null(BOOK_MANAGER).await? {
            info!(@grey, "{BOOK_MANAGER} already deployed at {}", record.address.debug_lavender());
            return Ok(());
        }

        let book = match env.get_or_null(BOOK).await? {
            Some(record) => {
                info!(@grey, "reusing {BOOK} at {}", record.address.debug_lavender());
                record.address
            }
            None => env.deploy(BOOK, Vec::new(), DeployOptions::default()).await?,
        };

        env.deploy(
            BOOK_MANAGER,
            self.constructor_args(owner),
            DeployOptions::default().with_library(BOOK, book),
        )
        .await?;
        Ok(())
    }
}

impl<E: Environment> DeployScript<E> for BookManagerScript {
    fn id(&self) -> &str {
        BOOK_MANAGER
    }

    fn tags(&self) -> &[&str] {
        &[BOOK_MANAGER]
    }

    fn dependencies(&self) -> &[&str] {
        &[]
    }

    fn run<'a>(&'a self, env: &'a E) -> ScriptFuture<'a> {
        Box::pin(self.ensure_deployed(env))
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::BTreeMap};

    use alloy::primitives::{Bytes, TxHash, B256};

    use super::*;
    use crate::{
        core::{
            accounts::{AccountError, NamedAccounts},
            deployment::{ContractDeployer, DeployedContract, DeploymentError},
            environment::DeployEnv,
            records::{DeploymentRecord, DeploymentStore, MemoryStore},
        },
        Error,
    };

    const SIGNER: Address = address!("1111111111111111111111111111111111111111");

    #[derive(Clone, Debug, PartialEq)]
    struct Call {
        name: String,
        args: Vec<DynSolValue>,
        options: DeployOptions,
    }

    /// Hands out sequential addresses and remembers every call.
    #[derive(Default)]
    struct MockDeployer {
        calls: RefCell<Vec<Call>>,
        fail_on: Option<&'static str>,
    }

    impl MockDeployer {
        fn failing_on(name: &'static str) -> Self {
            Self {
                fail_on: Some(name),
                ..Default::default()
            }
        }

        fn names(&self) -> Vec<String> {
            self.calls.borrow().iter().map(|call| call.name.clone()).collect()
        }
    }

    impl ContractDeployer for MockDeployer {
        async fn deploy(
            &self,
            name: &str,
            args: &[DynSolValue],
            options: &DeployOptions,
        ) -> Result<DeployedContract, DeploymentError> {
            if self.fail_on == Some(name) {
                return Err(DeploymentError::Reverted {
                    tx_hash: TxHash::ZERO,
                });
            }
            let mut calls = self.calls.borrow_mut();
            calls.push(Call {
                name: name.to_owned(),
                args: args.to_vec(),
                options: options.clone(),
            });
            let n = calls.len() as u8;
            Ok(DeployedContract {
                address: Address::with_last_byte(0xa0 + n),
                transaction_hash: Some(B256::with_last_byte(n)),
                constructor_args: Bytes::from(vec![n]),
            })
        }
    }

    fn env(
        store: &MemoryStore,
        deployer: MockDeployer,
    ) -> DeployEnv<&MemoryStore, MockDeployer, NamedAccounts> {
        let accounts = NamedAccounts::resolve(&BTreeMap::new(), &[SIGNER]).unwrap();
        DeployEnv::new("sonic", 146, store, deployer, accounts)
    }

    fn book_record(address: Address) -> DeploymentRecord {
        DeploymentRecord {
            name: BOOK.to_owned(),
            address,
            chain_id: 146,
            transaction_hash: None,
            args: vec![],
            constructor_args: Default::default(),
            libraries: Default::default(),
        }
    }

    #[tokio::test]
    async fn deploys_book_then_manager_linked_to_it() {
        let store = MemoryStore::new();
        let env = env(&store, MockDeployer::default());
        let script = BookManagerScript::default();

        script.run(&env).await.unwrap();

        let calls = env.deployer().calls.borrow();
        assert_eq!(env.deployer().names(), [BOOK, BOOK_MANAGER]);
        assert!(calls[0].args.is_empty());
        assert_eq!(calls[0].options, DeployOptions::default());

        let book = store.get(BOOK).unwrap().unwrap();
        let manager = store.get(BOOK_MANAGER).unwrap().unwrap();
        assert_eq!(calls[1].options.libraries[BOOK], book.address);
        assert_eq!(manager.libraries[BOOK], book.address);
        assert_eq!(manager.chain_id, 146);
        assert_eq!(manager.constructor_args, Bytes::from(vec![2]));
        assert_ne!(manager.address, book.address);
    }

    #[tokio::test]
    async fn reuses_existing_book() {
        let existing = Address::with_last_byte(0x42);
        let store = MemoryStore::with_records([book_record(existing)]);
        let env = env(&store, MockDeployer::default());

        BookManagerScript::default().run(&env).await.unwrap();

        assert_eq!(env.deployer().names(), [BOOK_MANAGER]);
        assert_eq!(
            env.deployer().calls.borrow()[0].options.libraries[BOOK],
            existing
        );
        assert_eq!(store.get(BOOK).unwrap().unwrap().address, existing);
    }

    #[tokio::test]
    async fn skips_when_manager_exists() {
        let store = MemoryStore::with_records([DeploymentRecord {
            name: BOOK_MANAGER.to_owned(),
            ..book_record(Address::with_last_byte(0x43))
        }]);
        let env = env(&store, MockDeployer::default());

        BookManagerScript::default().run(&env).await.unwrap();

        assert!(env.deployer().names().is_empty());
        assert!(store.get(BOOK).unwrap().is_none());
    }

    #[tokio::test]
    async fn manager_args_are_fixed_and_ordered() {
        let store = MemoryStore::new();
        let env = env(&store, MockDeployer::default());
        BookManagerScript::default().run(&env).await.unwrap();

        let calls = env.deployer().calls.borrow();
        let params = BookManagerParams::default();
        assert_eq!(
            calls[1].args,
            [
                DynSolValue::Address(SIGNER),
                DynSolValue::Address(DEFAULT_PROVIDER),
                DynSolValue::String("https://sonic.market/api/nft/chains/146/orders/".to_owned()),
                DynSolValue::String("https://sonic.market/api/contract/chains/146".to_owned()),
                DynSolValue::String(params.name),
                DynSolValue::String(params.symbol),
            ]
        );
        assert_eq!(
            store.get(BOOK_MANAGER).unwrap().unwrap().args[5],
            "SONIC-MARKET-ORDER"
        );
    }

    #[tokio::test]
    async fn rerunning_is_a_no_op() {
        let store = MemoryStore::new();
        let script = BookManagerScript::default();

        let first = env(&store, MockDeployer::default());
        script.run(&first).await.unwrap();
        let after_first = store.list().unwrap();

        let second = env(&store, MockDeployer::default());
        script.run(&second).await.unwrap();
        script.run(&second).await.unwrap();

        assert!(second.deployer().names().is_empty());
        assert_eq!(store.list().unwrap(), after_first);
    }

    #[tokio::test]
    async fn resumes_after_manager_failure() {
        let store = MemoryStore::new();
        let script = BookManagerScript::default();

        let failing = env(&store, MockDeployer::failing_on(BOOK_MANAGER));
        let err = script.run(&failing).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Deployment(DeploymentError::Reverted { .. })
        ));
        let book = store.get(BOOK).unwrap().unwrap();
        assert!(store.get(BOOK_MANAGER).unwrap().is_none());

        let retry = env(&store, MockDeployer::default());
        script.run(&retry).await.unwrap();
        assert_eq!(retry.deployer().names(), [BOOK_MANAGER]);
        assert_eq!(
            store.get(BOOK_MANAGER).unwrap().unwrap().libraries[BOOK],
            book.address
        );
    }

    #[tokio::test]
    async fn estimates_are_not_recorded() {
        struct Estimator;

        impl ContractDeployer for Estimator {
            async fn deploy(
                &self,
                _name: &str,
                _args: &[DynSolValue],
                _options: &DeployOptions,
            ) -> Result<DeployedContract, DeploymentError> {
                Ok(DeployedContract {
                    address: Address::with_last_byte(1),
                    transaction_hash: None,
                    constructor_args: Bytes::new(),
                })
            }
        }

        let store = MemoryStore::new();
        let accounts = NamedAccounts::resolve(&BTreeMap::new(), &[SIGNER]).unwrap();
        let env = DeployEnv::new("sonic", 146, &store, Estimator, accounts);
        BookManagerScript::default().run(&env).await.unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unresolved_deployer_deploys_nothing() {
        let store = MemoryStore::new();
        let accounts = NamedAccounts::resolve(&BTreeMap::new(), &[]).unwrap();
        let env = DeployEnv::new("sonic", 146, &store, MockDeployer::default(), accounts);

        let err = BookManagerScript::default().run(&env).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Account(AccountError::UnknownRole(role)) if role == DEPLOYER
        ));
        assert!(env.deployer().names().is_empty());
        assert!(store.list().unwrap().is_empty());
    }
}
