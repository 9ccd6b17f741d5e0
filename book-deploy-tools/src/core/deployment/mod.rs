// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Contract deployment.

use std::collections::BTreeMap;

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{Address, Bytes, TxHash},
    providers::{Provider, WalletProvider},
};
use typed_builder::TypedBuilder;

use crate::{
    core::artifact::{ArtifactError, ArtifactStore},
    utils::{color::DebugColor, format_gas_cost},
};
pub use request::DeploymentRequest;

pub mod request;

/// Options for a single deployment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeployOptions {
    /// Library addresses to link into the bytecode, by library name.
    pub libraries: BTreeMap<String, Address>,
}

impl DeployOptions {
    pub fn with_library(mut self, name: impl Into<String>, address: Address) -> Self {
        self.libraries.insert(name.into(), address);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployedContract {
    pub address: Address,
    /// Hash of the creation transaction, or `None` if the deployment was only estimated.
    pub transaction_hash: Option<TxHash>,
    /// ABI-encoded constructor arguments appended to the init code.
    pub constructor_args: Bytes,
}

/// Deploys a contract by artifact name.
#[allow(async_fn_in_trait)]
pub trait ContractDeployer {
    async fn deploy(
        &self,
        name: &str,
        args: &[DynSolValue],
        options: &DeployOptions,
    ) -> Result<DeployedContract, DeploymentError>;
}

#[derive(Debug, Default)]
pub struct DeploymentConfig {
    pub max_fee_per_gas_wei: Option<u128>,
    /// Only estimate gas; send nothing.
    pub estimate_gas: bool,
}

/// Deploys compiled artifacts through an RPC provider.
#[derive(TypedBuilder)]
pub struct RpcDeployer<P> {
    provider: P,
    artifacts: ArtifactStore,
    #[builder(default)]
    config: DeploymentConfig,
}

impl<P: Provider + WalletProvider> ContractDeployer for RpcDeployer<P> {
    async fn deploy(
        &self,
        name: &str,
        args: &[DynSolValue],
        options: &DeployOptions,
    ) -> Result<DeployedContract, DeploymentError> {
        let artifact = self.artifacts.load(name)?;
        let constructor_args = Bytes::from(artifact.encode_constructor(args)?);
        let init_code = artifact.init_code(&options.libraries, &constructor_args)?;
        let sender = self.provider.default_signer_address();
        debug!(@grey, "sender address: {}", sender.debug_lavender());

        let req = DeploymentRequest::new(sender, init_code, self.config.max_fee_per_gas_wei);
        if self.config.estimate_gas {
            let gas = req.estimate_gas(&self.provider).await?;
            let gas_price = req.fee_per_gas(&self.provider).await?;
            info!(@grey, "estimated {name} deployment: {}", format_gas_cost(gas, gas_price));
            let nonce = self.provider.get_transaction_count(sender).await?;
            return Ok(DeployedContract {
                address: sender.create(nonce),
                transaction_hash: None,
                constructor_args,
            });
        }

        let receipt = req.exec(&self.provider).await?;
        let address = receipt
            .contract_address
            .ok_or(DeploymentError::MissingReceiptAddress)?;
        info!(@grey, "deployed {name} at address: {}", address.debug_lavender());
        debug!(@grey, "gas used: {}", receipt.gas_used);
        info!(@grey, "deployment tx hash: {}", receipt.transaction_hash.debug_lavender());

        Ok(DeployedContract {
            address,
            transaction_hash: Some(receipt.transaction_hash),
            constructor_args,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),
    #[error("{0}")]
    Artifact(#[from] ArtifactError),

    #[error("tx failed to complete")]
    FailedToComplete,
    #[error("deploy tx reverted {}", .tx_hash.debug_red())]
    Reverted { tx_hash: TxHash },
    #[error("missing contract address in receipt")]
    MissingReceiptAddress,
}
