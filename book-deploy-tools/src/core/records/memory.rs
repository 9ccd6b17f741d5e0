// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::collections::BTreeMap;

use parking_lot::Mutex;

use super::{DeploymentRecord, DeploymentStore, StoreError};

/// In-memory record store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<String, DeploymentRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = DeploymentRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.name.clone(), record))
            .collect();
        Self {
            records: Mutex::new(records),
        }
    }
}

impl DeploymentStore for MemoryStore {
    fn get(&self, name: &str) -> Result<Option<DeploymentRecord>, StoreError> {
        Ok(self.records.lock().get(name).cloned())
    }

    fn save(&self, record: &DeploymentRecord) -> Result<(), StoreError> {
        self.records
            .lock()
            .insert(record.name.clone(), record.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<DeploymentRecord>, StoreError> {
        Ok(self.records.lock().values().cloned().collect())
    }
}
