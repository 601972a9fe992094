//! Credential storage.
//!
//! A [`CredentialStore`] is a small keyed store of string values with an
//! optional expiry, the same shape as browser cookies. Expired values read as
//! absent. Two implementations ship with the crate: [`MemoryStore`] for tests
//! and short-lived processes, and [`FileStore`] for persisting credentials
//! between CLI invocations.

mod file;
mod memory;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Result;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Key under which the access token is stored.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Key under which the refresh token is stored.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Key under which the CSRF token is stored.
pub const CSRF_TOKEN_KEY: &str = "csrftoken";

/// A stored value with an optional expiry instant.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredValue {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredValue {
    pub fn new(value: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// Whether the value has expired as of `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

// Stored values are credentials.
impl std::fmt::Debug for StoredValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredValue")
            .field("value", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Keyed storage for credentials.
pub trait CredentialStore: Send + Sync {
    /// Read a value. Missing and expired values both return `None`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: StoredValue) -> Result<()>;

    /// Remove a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
