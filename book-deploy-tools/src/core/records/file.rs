// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use super::{DeploymentRecord, DeploymentStore, StoreError};

/// Name of the file pinning a network's deployment directory to a chain id.
pub const CHAIN_ID_FILENAME: &str = ".chainId";

/// Stores one JSON file per contract under `<root>/<network>/`.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    chain_id: u64,
}

impl FileStore {
    /// Open the store for `network`, creating it if needed.
    ///
    /// Fails if the directory was previously used for a different chain.
    pub fn open(
        root: impl AsRef<Path>,
        network: &str,
        chain_id: u64,
    ) -> Result<Self, StoreError> {
        let dir = root.as_ref().join(network);
        fs::create_dir_all(&dir)?;
        let chain_id_path = dir.join(CHAIN_ID_FILENAME);
        if chain_id_path.exists() {
            let found = read_chain_id(&chain_id_path)?;
            if found != chain_id {
                return Err(StoreError::ChainIdMismatch {
                    network: network.to_owned(),
                    expected: chain_id,
                    found,
                });
            }
        } else {
            fs::write(&chain_id_path, chain_id.to_string())?;
        }
        Ok(Self { dir, chain_id })
    }

    /// Open an existing store without connecting to the chain.
    pub fn open_existing(root: impl AsRef<Path>, network: &str) -> Result<Self, StoreError> {
        let dir = root.as_ref().join(network);
        let chain_id_path = dir.join(CHAIN_ID_FILENAME);
        if !chain_id_path.exists() {
            return Err(StoreError::UnknownNetwork(network.to_owned()));
        }
        let chain_id = read_chain_id(&chain_id_path)?;
        Ok(Self { dir, chain_id })
    }

    /// Open the store for `network` only if it already exists, creating nothing.
    ///
    /// Fails if the directory belongs to a different chain.
    pub fn open_if_exists(
        root: impl AsRef<Path>,
        network: &str,
        chain_id: u64,
    ) -> Result<Option<Self>, StoreError> {
        let store = match Self::open_existing(root, network) {
            Ok(store) => store,
            Err(StoreError::UnknownNetwork(_)) => return Ok(None),
            Err(err) => return Err(err),
        };
        if store.chain_id != chain_id {
            return Err(StoreError::ChainIdMismatch {
                network: network.to_owned(),
                expected: chain_id,
                found: store.chain_id,
            });
        }
        Ok(Some(store))
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }
}

impl DeploymentStore for FileStore {
    fn get(&self, name: &str) -> Result<Option<DeploymentRecord>, StoreError> {
        let path = self.record_path(name);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn save(&self, record: &DeploymentRecord) -> Result<(), StoreError> {
        // write then rename, so readers never observe a partial record
        let mut file = NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer_pretty(&mut file, record)?;
        file.persist(self.record_path(&record.name))
            .map_err(|err| err.error)?;
        debug!(@grey, "saved deployment record for {}", record.name);
        Ok(())
    }

    fn list(&self) -> Result<Vec<DeploymentRecord>, StoreError> {
        let mut records = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let contents = fs::read_to_string(&path)?;
            records.push(serde_json::from_str::<DeploymentRecord>(&contents)?);
        }
        records.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(records)
    }
}

fn read_chain_id(path: &Path) -> Result<u64, StoreError> {
    let contents = fs::read_to_string(path)?;
    let contents = contents.trim();
    contents
        .parse()
        .map_err(|_| StoreError::InvalidChainId(contents.to_owned()))
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{Address, B256};

    use super::*;

    fn record(name: &str, last_byte: u8) -> DeploymentRecord {
        DeploymentRecord {
            name: name.to_owned(),
            address: Address::with_last_byte(last_byte),
            chain_id: 146,
            transaction_hash: Some(B256::with_last_byte(last_byte)),
            args: vec![],
            constructor_args: Default::default(),
            libraries: Default::default(),
        }
    }

    #[test]
    fn missing_record_is_none() {
        let root = tempfile::tempdir().unwrap();
        let store = FileStore::open(root.path(), "sonic", 146).unwrap();
        assert_eq!(store.get("Book").unwrap(), None);
    }

    #[test]
    fn saved_records_are_listed_by_name() {
        let root = tempfile::tempdir().unwrap();
        let store = FileStore::open(root.path(), "sonic", 146).unwrap();
        let mut manager = record("BookManager", 2);
        manager
            .libraries
            .insert("Book".to_owned(), Address::with_last_byte(1));
        manager.args = vec!["0x0000000000000000000000000000000000000001".to_owned()];
        store.save(&manager).unwrap();
        store.save(&record("Book", 1)).unwrap();

        assert_eq!(store.get("BookManager").unwrap(), Some(manager.clone()));
        let names: Vec<_> = store
            .list()
            .unwrap()
            .into_iter()
            .map(|record| record.name)
            .collect();
        assert_eq!(names, ["Book", "BookManager"]);

        // records survive reopening the store
        let reopened = FileStore::open_existing(root.path(), "sonic").unwrap();
        assert_eq!(reopened.chain_id(), 146);
        assert_eq!(reopened.get("BookManager").unwrap(), Some(manager));
    }

    #[test]
    fn rejects_different_chain() {
        let root = tempfile::tempdir().unwrap();
        FileStore::open(root.path(), "sonic", 146).unwrap();
        let err = FileStore::open(root.path(), "sonic", 1).unwrap_err();
        assert!(matches!(
            err,
            StoreError::ChainIdMismatch {
                expected: 1,
                found: 146,
                ..
            }
        ));
    }

    #[test]
    fn open_existing_requires_chain_id_file() {
        let root = tempfile::tempdir().unwrap();
        let err = FileStore::open_existing(root.path(), "sonic").unwrap_err();
        assert!(matches!(err, StoreError::UnknownNetwork(network) if network == "sonic"));
    }

    #[test]
    fn open_if_exists_creates_nothing() {
        let root = tempfile::tempdir().unwrap();
        assert!(FileStore::open_if_exists(root.path(), "sonic", 146)
            .unwrap()
            .is_none());
        assert!(!root.path().join("sonic").exists());

        let store = FileStore::open(root.path(), "sonic", 146).unwrap();
        store.save(&record("Book", 1)).unwrap();
        let existing = FileStore::open_if_exists(root.path(), "sonic", 146)
            .unwrap()
            .unwrap();
        assert_eq!(existing.get("Book").unwrap(), Some(record("Book", 1)));

        assert!(matches!(
            FileStore::open_if_exists(root.path(), "sonic", 1),
            Err(StoreError::ChainIdMismatch {
                expected: 1,
                found: 146,
                ..
            })
        ));
    }
}
