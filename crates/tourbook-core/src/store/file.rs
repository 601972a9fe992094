//! File-backed credential store.
//!
//! Values live in a single JSON object on disk. Every operation re-reads the
//! file under an exclusive lock so that concurrent CLI invocations never lose
//! each other's writes, and writes go through a temporary file plus rename.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use fs2::FileExt;
use tracing::{debug, trace};

use super::{CredentialStore, StoredValue};
use crate::Result;
use crate::error::{Error, StorageError};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

type Values = BTreeMap<String, StoredValue>;

/// A credential store persisted as JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by `path`. The file is created on first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn io_error(&self, err: std::io::Error) -> Error {
        StorageError::Io {
            path: self.path.display().to_string(),
            message: err.to_string(),
        }
        .into()
    }

    /// Run `f` while holding the store's exclusive lock.
    fn with_lock<T>(&self, f: impl FnOnce(&Self) -> Result<T>) -> Result<T> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(|e| self.io_error(e))?;

        lock_file.lock_exclusive().map_err(|e| self.io_error(e))?;
        let result = f(self);
        lock_file.unlock().map_err(|e| self.io_error(e))?;

        result
    }

    fn read_values(&self) -> Result<Values> {
        if !self.path.exists() {
            return Ok(Values::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        if contents.trim().is_empty() {
            return Ok(Values::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            StorageError::Corrupt {
                path: self.path.display().to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    fn write_values(&self, values: &Values) -> Result<()> {
        let json = serde_json::to_string_pretty(values).map_err(|e| StorageError::Corrupt {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        let temp_path = self.path.with_extension("tmp");
        let mut file = File::create(&temp_path).map_err(|e| self.io_error(e))?;

        #[cfg(unix)]
        {
            let mut perms = file.metadata().map_err(|e| self.io_error(e))?.permissions();
            perms.set_mode(0o600);
            file.set_permissions(perms).map_err(|e| self.io_error(e))?;
        }

        file.write_all(json.as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(|e| self.io_error(e))?;
        drop(file);

        fs::rename(&temp_path, &self.path).map_err(|e| self.io_error(e))?;

        trace!(path = %self.path.display(), keys = values.len(), "Wrote credential file");
        Ok(())
    }
}

impl CredentialStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_lock(|store| {
            let values = store.read_values()?;
            Ok(values
                .get(key)
                .filter(|v| !v.is_expired_at(Utc::now()))
                .map(|v| v.value.clone()))
        })
    }

    fn set(&self, key: &str, value: StoredValue) -> Result<()> {
        self.with_lock(|store| {
            let mut values = store.read_values()?;
            values.insert(key.to_string(), value);
            store.write_values(&values)
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.with_lock(|store| {
            let mut values = store.read_values()?;
            if values.remove(key).is_some() {
                debug!(key, "Removed stored credential");
                store.write_values(&values)?;
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileStore {
        FileStore::new(dir.path().join("nested").join("credentials.json"))
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get("access_token").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn values_persist_across_instances() {
        let dir = TempDir::new().unwrap();
        store_in(&dir)
            .set("refresh_token", StoredValue::new("r1", None))
            .unwrap();

        let reopened = store_in(&dir);
        assert_eq!(
            reopened.get("refresh_token").unwrap().as_deref(),
            Some("r1")
        );
    }

    #[test]
    fn remove_only_touches_one_key() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("a", StoredValue::new("1", None)).unwrap();
        store.set("b", StoredValue::new("2", None)).unwrap();

        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn expired_values_read_as_absent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let past = Utc::now() - Duration::seconds(5);
        store.set("a", StoredValue::new("1", Some(past))).unwrap();
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{not json").unwrap();

        let err = store.get("a").unwrap_err();
        assert!(matches!(err, Error::Storage(StorageError::Corrupt { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn file_is_private_to_owner() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("a", StoredValue::new("1", None)).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
