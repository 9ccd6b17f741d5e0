// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Source verification through an Etherscan-compatible API.

use std::{collections::BTreeMap, future::Future, time::Duration};

use alloy::primitives::Address;
use serde::Deserialize;

use crate::{
    core::artifact::{Artifact, ArtifactError, ArtifactStore, BuildInfo},
    utils::color::DebugColor,
};

/// Default delay between verification status checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Default number of verification status checks before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 20;

#[derive(Clone, Debug)]
pub struct VerificationConfig {
    pub api_url: String,
    pub api_key: String,
    pub chain_id: u64,
    pub poll_interval: Duration,
    pub max_attempts: u32,
}

/// Raw response of the verification API.
#[derive(Clone, Debug, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
    pub result: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Submission {
    /// Submitted, the status can be polled with this GUID.
    Pending(String),
    AlreadyVerified,
}

#[derive(Debug, PartialEq, Eq)]
pub enum VerificationStatus {
    Pending,
    Verified,
    AlreadyVerified,
}

impl Submission {
    pub fn from_response(response: ApiResponse) -> Result<Self, VerificationError> {
        if is_already_verified(&response.result) {
            Ok(Self::AlreadyVerified)
        } else if response.status == "1" {
            Ok(Self::Pending(response.result))
        } else {
            Err(VerificationError::Rejected(response.result))
        }
    }
}

impl VerificationStatus {
    pub fn from_response(response: ApiResponse) -> Result<Self, VerificationError> {
        if response.result.to_lowercase().contains("pending in queue") {
            Ok(Self::Pending)
        } else if is_already_verified(&response.result) {
            Ok(Self::AlreadyVerified)
        } else if response.status == "1" {
            Ok(Self::Verified)
        } else {
            Err(VerificationError::Failed(response.result))
        }
    }
}

fn is_already_verified(result: &str) -> bool {
    result.to_lowercase().contains("already verified")
}

/// Submits deployed contracts for source verification.
#[derive(Clone, Debug)]
pub struct Verifier {
    client: reqwest::Client,
    config: VerificationConfig,
    artifacts: ArtifactStore,
}

impl Verifier {
    pub fn new(config: VerificationConfig, artifacts: ArtifactStore) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            artifacts,
        }
    }

    /// Verify the contract `name` deployed at `address`, waiting for the result.
    pub async fn verify(
        &self,
        name: &str,
        address: Address,
        constructor_args: &[u8],
        libraries: &BTreeMap<String, Address>,
    ) -> Result<(), VerificationError> {
        let artifact = self.artifacts.load(name)?;
        let build_info = artifact.build_info()?;
        let form = submission_form(
            &artifact,
            &build_info,
            address,
            constructor_args,
            libraries,
            &self.config.api_key,
        )?;

        info!(@grey, "verifying {name} at address: {}", address.debug_lavender());
        let response: ApiResponse = self
            .client
            .post(&self.config.api_url)
            .query(&[("chainid", self.config.chain_id)])
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let guid = match Submission::from_response(response)? {
            Submission::Pending(guid) => guid,
            Submission::AlreadyVerified => {
                info!(@grey, "{name} is already verified");
                return Ok(());
            }
        };
        debug!(@grey, "verification guid: {guid}");

        let status = poll_status(
            &guid,
            self.config.poll_interval,
            self.config.max_attempts,
            || self.check_status(&guid),
        )
        .await?;
        if status == VerificationStatus::AlreadyVerified {
            info!(@grey, "{name} is already verified");
        } else {
            info!(@mint, "verified {name}");
        }
        Ok(())
    }

    async fn check_status(&self, guid: &str) -> Result<VerificationStatus, VerificationError> {
        let chain_id = self.config.chain_id.to_string();
        let response: ApiResponse = self
            .client
            .get(&self.config.api_url)
            .query(&[
                ("chainid", chain_id.as_str()),
                ("module", "contract"),
                ("action", "checkverifystatus"),
                ("guid", guid),
                ("apikey", self.config.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        VerificationStatus::from_response(response)
    }
}

/// Run `check` every `interval` until the status is no longer pending.
///
/// Gives up with [`VerificationError::Timeout`] after `max_attempts` checks.
async fn poll_status<F, Fut>(
    guid: &str,
    interval: Duration,
    max_attempts: u32,
    mut check: F,
) -> Result<VerificationStatus, VerificationError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<VerificationStatus, VerificationError>>,
{
    for attempt in 1..=max_attempts {
        tokio::time::sleep(interval).await;
        match check().await? {
            VerificationStatus::Pending => {
                debug!(@grey, "verification pending ({attempt}/{max_attempts})");
            }
            status => return Ok(status),
        }
    }
    Err(VerificationError::Timeout(guid.to_owned()))
}

/// Build the `verifysourcecode` request body.
///
/// Linked libraries are written into the compiler settings of the standard JSON input, which is
/// how the compiler itself received them.
pub fn submission_form(
    artifact: &Artifact,
    build_info: &BuildInfo,
    address: Address,
    constructor_args: &[u8],
    libraries: &BTreeMap<String, Address>,
    api_key: &str,
) -> Result<Vec<(&'static str, String)>, VerificationError> {
    let mut input = build_info.input.clone();
    for (source, library) in artifact.library_sources() {
        let qualified = format!("{source}:{library}");
        let Some(address) = libraries
            .get(library)
            .or_else(|| libraries.get(&qualified))
        else {
            continue;
        };
        input["settings"]["libraries"][source][library] = address.to_checksum(None).into();
    }

    Ok(vec![
        ("apikey", api_key.to_owned()),
        ("module", "contract".to_owned()),
        ("action", "verifysourcecode".to_owned()),
        ("contractaddress", address.to_checksum(None)),
        ("sourceCode", serde_json::to_string(&input)?),
        ("codeformat", "solidity-standard-json-input".to_owned()),
        (
            "contractname",
            format!("{}:{}", artifact.source_name, artifact.contract_name),
        ),
        ("compilerversion", format!("v{}", build_info.solc_long_version)),
        ("constructorArguements", hex::encode(constructor_args)),
    ])
}

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Artifact(#[from] ArtifactError),

    #[error("verification request rejected: {0}")]
    Rejected(String),
    #[error("verification failed: {0}")]
    Failed(String),
    #[error("verification still pending after polling, guid {0}")]
    Timeout(String),
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    fn response(status: &str, result: &str) -> ApiResponse {
        ApiResponse {
            status: status.to_owned(),
            message: String::new(),
            result: result.to_owned(),
        }
    }

    #[test]
    fn classifies_submissions() {
        assert_eq!(
            Submission::from_response(response("1", "abc123")).unwrap(),
            Submission::Pending("abc123".to_owned())
        );
        assert_eq!(
            Submission::from_response(response("0", "Contract source code already verified"))
                .unwrap(),
            Submission::AlreadyVerified
        );
        assert!(matches!(
            Submission::from_response(response("0", "Invalid API Key")),
            Err(VerificationError::Rejected(_))
        ));
    }

    #[test]
    fn classifies_statuses() {
        assert_eq!(
            VerificationStatus::from_response(response("0", "Pending in queue")).unwrap(),
            VerificationStatus::Pending
        );
        assert_eq!(
            VerificationStatus::from_response(response("1", "Pass - Verified")).unwrap(),
            VerificationStatus::Verified
        );
        assert_eq!(
            VerificationStatus::from_response(response("1", "Already Verified")).unwrap(),
            VerificationStatus::AlreadyVerified
        );
        assert!(matches!(
            VerificationStatus::from_response(response("0", "Fail - Unable to verify")),
            Err(VerificationError::Failed(_))
        ));
    }

    #[tokio::test]
    async fn polls_until_status_settles() {
        let mut responses = vec![
            Ok(VerificationStatus::Verified),
            Ok(VerificationStatus::Pending),
            Ok(VerificationStatus::Pending),
        ];
        let status = poll_status("abc123", Duration::ZERO, 5, || {
            let next = responses.pop();
            async move { next.unwrap() }
        })
        .await
        .unwrap();
        assert_eq!(status, VerificationStatus::Verified);
        assert!(responses.is_empty());
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let mut checks = 0;
        let err = poll_status("abc123", Duration::ZERO, 3, || {
            checks += 1;
            async { Ok(VerificationStatus::Pending) }
        })
        .await
        .unwrap_err();
        assert!(matches!(err, VerificationError::Timeout(guid) if guid == "abc123"));
        assert_eq!(checks, 3);
    }

    #[tokio::test]
    async fn failures_stop_polling() {
        let mut checks = 0;
        let err = poll_status("abc123", Duration::ZERO, 3, || {
            checks += 1;
            async { VerificationStatus::from_response(response("0", "Fail - Unable to verify")) }
        })
        .await
        .unwrap_err();
        assert!(matches!(err, VerificationError::Failed(_)));
        assert_eq!(checks, 1);
    }

    #[test]
    fn form_links_libraries_into_compiler_settings() {
        let book = address!("00000000000000000000000000000000000000b0");
        let manager = address!("00000000000000000000000000000000000000c0");
        let artifact: Artifact = serde_json::from_value(serde_json::json!({
            "contractName": "BookManager",
            "sourceName": "contracts/BookManager.sol",
            "abi": [],
            "bytecode": "0x",
            "linkReferences": {
                "contracts/libraries/Book.sol": { "Book": [{ "start": 0, "length": 20 }] }
            }
        }))
        .unwrap();
        let build_info = BuildInfo {
            solc_long_version: "0.8.25+commit.b61c2a91".to_owned(),
            input: serde_json::json!({ "language": "Solidity", "settings": { "optimizer": {} } }),
        };
        let libraries = BTreeMap::from([("Book".to_owned(), book)]);

        let form = submission_form(
            &artifact,
            &build_info,
            manager,
            &[0xab, 0xcd],
            &libraries,
            "key",
        )
        .unwrap();
        let field = |name: &str| {
            form.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.clone())
                .unwrap()
        };

        assert_eq!(field("contractname"), "contracts/BookManager.sol:BookManager");
        assert_eq!(field("compilerversion"), "v0.8.25+commit.b61c2a91");
        assert_eq!(field("constructorArguements"), "abcd");
        assert_eq!(field("contractaddress"), manager.to_checksum(None));
        let source: serde_json::Value = serde_json::from_str(&field("sourceCode")).unwrap();
        assert_eq!(
            source["settings"]["libraries"]["contracts/libraries/Book.sol"]["Book"],
            book.to_checksum(None)
        );
        assert!(source["settings"]["optimizer"].is_object());
    }
}
