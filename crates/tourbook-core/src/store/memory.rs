//! In-memory credential store.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use super::{CredentialStore, StoredValue};
use crate::Result;
use crate::error::StorageError;

/// A process-local credential store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, StoredValue>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.read().map_err(|_| StorageError::Poisoned)?;
        Ok(values
            .get(key)
            .filter(|v| !v.is_expired_at(Utc::now()))
            .map(|v| v.value.clone()))
    }

    fn set(&self, key: &str, value: StoredValue) -> Result<()> {
        let mut values = self.values.write().map_err(|_| StorageError::Poisoned)?;
        values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.write().map_err(|_| StorageError::Poisoned)?;
        values.remove(key);
        Ok(())
    }
}
