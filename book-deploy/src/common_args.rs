// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{fs, path::PathBuf};

use alloy::{
    network::EthereumWallet,
    primitives::FixedBytes,
    providers::{Provider, ProviderBuilder, WalletProvider},
    signers::{
        local::{LocalSigner, PrivateKeySigner},
        Signer,
    },
};
use book_deploy_tools::{
    core::{
        deployment::DeploymentConfig,
        manifest::{self, DeployManifest, ManifestError},
    },
    ops::{Paths, DEFAULT_ARTIFACTS_DIR, DEFAULT_DEPLOYMENTS_DIR},
    utils::decode0x,
};
use eyre::{eyre, Context};

use crate::{
    constants::{DEFAULT_ENDPOINT, LOCALHOST_NETWORK},
    utils::convert_gwei_to_wei,
};

#[derive(Debug, clap::Args)]
pub struct AuthArgs {
    /// File path to a text file containing a hex-encoded private key
    #[arg(long)]
    private_key_path: Option<PathBuf>,
    /// Private key as a hex string. Warning: this exposes your key to shell history
    #[arg(long)]
    private_key: Option<String>,
    /// Path to an Ethereum wallet keystore file (e.g. clef)
    #[arg(long)]
    keystore_path: Option<String>,
    /// Keystore password file
    #[arg(long)]
    keystore_password_path: Option<PathBuf>,
    /// Optional max fee per gas in gwei units.
    #[arg(long)]
    max_fee_per_gas_gwei: Option<String>,
}

impl AuthArgs {
    fn build_wallet(&self, chain_id: u64) -> eyre::Result<EthereumWallet> {
        if let Some(key) = &self.private_key {
            if key.is_empty() {
                return Err(eyre!("empty private key"));
            }
            return Self::key_wallet(key, chain_id);
        }

        if let Some(file) = &self.private_key_path {
            let key = fs::read_to_string(file).wrap_err("could not open private key file")?;
            return Self::key_wallet(&key, chain_id);
        }

        let keystore = self
            .keystore_path
            .as_ref()
            .ok_or(eyre!("no deployer key given"))?;
        let password = self
            .keystore_password_path
            .as_ref()
            .map(fs::read_to_string)
            .unwrap_or(Ok("".into()))?;

        let signer =
            LocalSigner::decrypt_keystore(keystore, password)?.with_chain_id(Some(chain_id));
        Ok(EthereumWallet::new(signer))
    }

    fn key_wallet(key: &str, chain_id: u64) -> eyre::Result<EthereumWallet> {
        let bytes = decode0x(key).wrap_err("invalid private key")?;
        if bytes.len() != 32 {
            return Err(eyre!("private key must be 32 bytes, got {}", bytes.len()));
        }
        let priv_key_bytes: FixedBytes<32> = FixedBytes::from_slice(&bytes);
        let signer = PrivateKeySigner::from_bytes(&priv_key_bytes)?.with_chain_id(Some(chain_id));
        Ok(EthereumWallet::new(signer))
    }

    pub fn get_max_fee_per_gas_wei(&self) -> eyre::Result<Option<u128>> {
        self.max_fee_per_gas_gwei
            .as_ref()
            .map(|fee_str| convert_gwei_to_wei(fee_str))
            .transpose()
    }

    pub fn deployment_config(&self, estimate_gas: bool) -> eyre::Result<DeploymentConfig> {
        Ok(DeploymentConfig {
            max_fee_per_gas_wei: self.get_max_fee_per_gas_wei()?,
            estimate_gas,
        })
    }
}

#[derive(Debug, clap::Args)]
pub struct NetworkArgs {
    /// Network to operate on, as named in the manifest
    #[arg(short, long, default_value = LOCALHOST_NETWORK)]
    pub network: String,
    /// Path to the deployment manifest
    #[arg(long, default_value = manifest::FILENAME)]
    pub config: PathBuf,
}

impl NetworkArgs {
    pub fn manifest(&self) -> Result<DeployManifest, ManifestError> {
        DeployManifest::load_or_default(&self.config)
    }
}

#[derive(Debug, clap::Args)]
pub struct ProviderArgs {
    /// RPC endpoint, overriding the one configured for the network
    #[arg(short, long)]
    pub endpoint: Option<String>,
}

impl ProviderArgs {
    /// The endpoint to connect to: flag, then manifest, then the local node for `localhost`.
    pub fn endpoint(
        &self,
        network: &str,
        manifest: &DeployManifest,
    ) -> Result<String, ManifestError> {
        if let Some(endpoint) = &self.endpoint {
            return Ok(endpoint.clone());
        }
        match manifest.network(network) {
            Ok(config) => Ok(config.endpoint.clone()),
            Err(ManifestError::UnknownNetwork(_)) if network == LOCALHOST_NETWORK => {
                Ok(DEFAULT_ENDPOINT.to_owned())
            }
            Err(err) => Err(err),
        }
    }

    pub async fn build_provider_with_wallet(
        &self,
        network: &NetworkArgs,
        manifest: &DeployManifest,
        auth: &AuthArgs,
    ) -> eyre::Result<impl Provider + WalletProvider> {
        let endpoint = self.endpoint(&network.network, manifest)?;
        let provider = ProviderBuilder::new().connect(&endpoint).await?;
        let chain_id = provider.get_chain_id().await?;
        let wallet = auth.build_wallet(chain_id)?;
        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect(&endpoint)
            .await?;
        Ok(provider)
    }
}

#[derive(Debug, clap::Args)]
pub struct PathArgs {
    /// Directory holding per-network deployment records
    #[arg(long, default_value = DEFAULT_DEPLOYMENTS_DIR)]
    deployments_dir: PathBuf,
    /// Directory holding compiled contract artifacts
    #[arg(long, default_value = DEFAULT_ARTIFACTS_DIR)]
    artifacts_dir: PathBuf,
}

impl PathArgs {
    pub fn paths(&self) -> Paths {
        Paths {
            deployments: self.deployments_dir.clone(),
            artifacts: self.artifacts_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_args(endpoint: Option<&str>) -> ProviderArgs {
        ProviderArgs {
            endpoint: endpoint.map(str::to_owned),
        }
    }

    #[test]
    fn resolves_endpoint() {
        let manifest: DeployManifest = toml::from_str(
            r#"
            [networks.sonic]
            endpoint = "https://rpc.soniclabs.com"
            "#,
        )
        .unwrap();

        let configured = provider_args(None);
        assert_eq!(
            configured.endpoint("sonic", &manifest).unwrap(),
            "https://rpc.soniclabs.com"
        );
        assert_eq!(
            configured.endpoint(LOCALHOST_NETWORK, &manifest).unwrap(),
            DEFAULT_ENDPOINT
        );
        assert!(matches!(
            configured.endpoint("mainnet", &manifest),
            Err(ManifestError::UnknownNetwork(_))
        ));

        let overridden = provider_args(Some("http://127.0.0.1:9545"));
        assert_eq!(
            overridden.endpoint("sonic", &manifest).unwrap(),
            "http://127.0.0.1:9545"
        );
    }
}
