// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Compiled contract artifacts.
//!
//! Artifacts follow the Hardhat format: a JSON file per contract holding the ABI, the unlinked
//! creation bytecode and the offsets of library placeholders within it.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt},
    json_abi::{Constructor, JsonAbi},
    primitives::{Address, Bytes},
};
use serde::Deserialize;

/// Length of a library address placeholder in bytes.
const LIBRARY_PLACEHOLDER_LENGTH: usize = 20;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    pub source_name: String,
    pub abi: JsonAbi,
    pub bytecode: String,
    /// Placeholder offsets, keyed by library source name then library name.
    #[serde(default)]
    pub link_references: BTreeMap<String, BTreeMap<String, Vec<LinkReference>>>,

    #[serde(skip)]
    path: PathBuf,
}

/// Byte range of a library placeholder in the creation bytecode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct LinkReference {
    pub start: usize,
    pub length: usize,
}

/// Compiler input and version, as recorded in a Hardhat build-info file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    pub solc_long_version: String,
    pub input: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct DebugFile {
    #[serde(rename = "buildInfo")]
    build_info: PathBuf,
}

impl Artifact {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let mut artifact: Self = serde_json::from_str(&contents)?;
        artifact.path = path.to_owned();
        Ok(artifact)
    }

    pub fn constructor(&self) -> Option<&Constructor> {
        self.abi.constructor.as_ref()
    }

    /// Source name of each library the bytecode must be linked against.
    pub fn library_sources(&self) -> impl Iterator<Item = (&str, &str)> {
        self.link_references.iter().flat_map(|(source, libraries)| {
            libraries
                .keys()
                .map(move |library| (source.as_str(), library.as_str()))
        })
    }

    /// Creation bytecode with every library placeholder replaced by its address.
    ///
    /// Libraries may be keyed by name (`Book`) or fully qualified (`contracts/Book.sol:Book`).
    pub fn link(&self, libraries: &BTreeMap<String, Address>) -> Result<Bytes, ArtifactError> {
        let mut code = self
            .bytecode
            .strip_prefix("0x")
            .unwrap_or(&self.bytecode)
            .to_owned();
        let mut used = BTreeSet::new();
        for (source, library) in self.library_sources() {
            let qualified = format!("{source}:{library}");
            let (key, address) = libraries
                .get_key_value(library)
                .or_else(|| libraries.get_key_value(&qualified))
                .ok_or_else(|| ArtifactError::MissingLibrary {
                    contract: self.contract_name.clone(),
                    library: library.to_owned(),
                })?;
            used.insert(key.as_str());

            let address = hex::encode(address);
            for reference in &self.link_references[source][library] {
                let start = reference.start * 2;
                let end = start + LIBRARY_PLACEHOLDER_LENGTH * 2;
                if reference.length != LIBRARY_PLACEHOLDER_LENGTH || end > code.len() {
                    return Err(ArtifactError::InvalidLinkReference {
                        contract: self.contract_name.clone(),
                        library: library.to_owned(),
                        reference: *reference,
                    });
                }
                code.replace_range(start..end, &address);
            }
        }
        if let Some(unknown) = libraries.keys().find(|key| !used.contains(key.as_str())) {
            return Err(ArtifactError::UnknownLibrary {
                contract: self.contract_name.clone(),
                library: unknown.clone(),
            });
        }
        Ok(hex::decode(code)?.into())
    }

    /// ABI-encode constructor arguments, without a selector.
    pub fn encode_constructor(&self, args: &[DynSolValue]) -> Result<Vec<u8>, ArtifactError> {
        let Some(constructor) = self.constructor() else {
            if args.is_empty() {
                return Ok(Vec::new());
            }
            return Err(ArtifactError::InvalidConstructor(format!(
                "{} has no constructor but got {} argument(s)",
                self.contract_name,
                args.len(),
            )));
        };
        if args.len() != constructor.inputs.len() {
            return Err(ArtifactError::InvalidConstructor(format!(
                "mismatch number of constructor arguments (want {}; got {})",
                constructor.inputs.len(),
                args.len(),
            )));
        }
        constructor
            .abi_encode_input_raw(args)
            .map_err(|err| ArtifactError::InvalidConstructor(err.to_string()))
    }

    /// Linked bytecode followed by the encoded constructor arguments.
    pub fn init_code(
        &self,
        libraries: &BTreeMap<String, Address>,
        constructor_args: &[u8],
    ) -> Result<Bytes, ArtifactError> {
        let mut code = self.link(libraries)?.to_vec();
        code.extend_from_slice(constructor_args);
        Ok(code.into())
    }

    /// Load the build info referenced by this artifact's `.dbg.json` file.
    pub fn build_info(&self) -> Result<BuildInfo, ArtifactError> {
        let dir = self.path.parent().unwrap_or(Path::new("."));
        let debug_path = dir.join(format!("{}.dbg.json", self.contract_name));
        if !debug_path.exists() {
            return Err(ArtifactError::MissingBuildInfo(debug_path));
        }
        let debug: DebugFile = serde_json::from_str(&fs::read_to_string(debug_path)?)?;
        let contents = fs::read_to_string(dir.join(debug.build_info))?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Render a constructor argument for display in a deployment record.
pub fn format_arg(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Address(address) => address.to_checksum(None),
        DynSolValue::String(s) => s.clone(),
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Uint(n, _) => n.to_string(),
        DynSolValue::Int(n, _) => n.to_string(),
        DynSolValue::FixedBytes(word, size) => format!("0x{}", hex::encode(&word[..*size])),
        DynSolValue::Bytes(bytes) => format!("0x{}", hex::encode(bytes)),
        other => format!("{other:?}"),
    }
}

/// Directory of compiled artifacts.
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Find the artifact for a contract.
    ///
    /// Accepts flat layouts (`<root>/Book.json`), Hardhat layouts (`<root>/**/Book.json`) and fully
    /// qualified names (`contracts/Book.sol:Book`).
    pub fn find(&self, name: &str) -> Result<PathBuf, ArtifactError> {
        if let Some((source, contract)) = name.split_once(':') {
            let path = self.root.join(source).join(format!("{contract}.json"));
            if !path.exists() {
                return Err(ArtifactError::NotFound(name.to_owned()));
            }
            return Ok(path);
        }

        let flat = self.root.join(format!("{name}.json"));
        if flat.exists() {
            return Ok(flat);
        }

        let pattern = self.root.join("**").join(format!("{name}.json"));
        let pattern = pattern.to_string_lossy();
        let mut matches = glob::glob(&pattern)?
            .filter_map(Result::ok)
            .filter(|path| !path.components().any(|c| c.as_os_str() == "build-info"));
        match (matches.next(), matches.next()) {
            (Some(path), None) => Ok(path),
            (None, _) => Err(ArtifactError::NotFound(name.to_owned())),
            (Some(_), Some(_)) => Err(ArtifactError::Ambiguous(name.to_owned())),
        }
    }

    pub fn load(&self, name: &str) -> Result<Artifact, ArtifactError> {
        let path = self.find(name)?;
        debug!(@grey, "loading artifact {}", path.display());
        Artifact::load(path)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid artifact search pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("invalid bytecode: {0}")]
    Bytecode(#[from] hex::FromHexError),

    #[error("no artifact found for {0}")]
    NotFound(String),
    #[error("multiple artifacts found for {0}, use a fully qualified name")]
    Ambiguous(String),
    #[error("missing build info: {}", .0.display())]
    MissingBuildInfo(PathBuf),
    #[error("{contract} must be linked against library {library}, but no address was given")]
    MissingLibrary { contract: String, library: String },
    #[error("{contract} does not use library {library}")]
    UnknownLibrary { contract: String, library: String },
    #[error("invalid link reference for {library} in {contract}: {reference:?}")]
    InvalidLinkReference {
        contract: String,
        library: String,
        reference: LinkReference,
    },
    #[error("invalid constructor: {0}")]
    InvalidConstructor(String),
}
