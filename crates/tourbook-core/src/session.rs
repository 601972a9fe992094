//! Credential session.
//!
//! A [`Session`] is the explicit owner of the stored credential pair. HTTP
//! clients hold one instead of reaching into ambient global storage, and all
//! lifecycle transitions (`init`, access-token rotation, `clear`) go through it.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info};

use crate::Result;
use crate::store::{
    ACCESS_TOKEN_KEY, CSRF_TOKEN_KEY, CredentialStore, MemoryStore, REFRESH_TOKEN_KEY, StoredValue,
};
use crate::tokens::{ACCESS_TOKEN_LIFETIME_MINUTES, AccessToken, RefreshToken, TokenPair};

/// Shared handle to the credential store.
///
/// Sessions are cheap to clone (they use an internal `Arc`); clones observe
/// the same credentials.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn CredentialStore>,
}

impl Session {
    /// Create a session over an existing store.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Create a session backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Store a freshly issued credential pair, replacing whatever was there.
    pub fn init(&self, tokens: &TokenPair) -> Result<()> {
        self.set_access_token(&tokens.access)?;
        self.store.set(
            REFRESH_TOKEN_KEY,
            StoredValue::new(tokens.refresh.as_str(), None),
        )?;
        info!("Session initialised");
        Ok(())
    }

    /// Returns the current access token, if present and not expired.
    pub fn access_token(&self) -> Result<Option<AccessToken>> {
        Ok(self.store.get(ACCESS_TOKEN_KEY)?.map(AccessToken::new))
    }

    /// Returns the refresh token, if present.
    pub fn refresh_token(&self) -> Result<Option<RefreshToken>> {
        Ok(self.store.get(REFRESH_TOKEN_KEY)?.map(RefreshToken::new))
    }

    /// Returns the CSRF token, if one has been stored.
    pub fn csrf_token(&self) -> Result<Option<String>> {
        self.store.get(CSRF_TOKEN_KEY)
    }

    /// Store a CSRF token to mirror into outgoing requests.
    pub fn set_csrf_token(&self, token: impl Into<String>) -> Result<()> {
        self.store
            .set(CSRF_TOKEN_KEY, StoredValue::new(token, None))
    }

    /// Store a new access token with the standard expiry hint.
    pub fn set_access_token(&self, token: &AccessToken) -> Result<()> {
        let expires_at = Utc::now() + Duration::minutes(ACCESS_TOKEN_LIFETIME_MINUTES);
        self.store.set(
            ACCESS_TOKEN_KEY,
            StoredValue::new(token.as_str(), Some(expires_at)),
        )?;
        debug!(%expires_at, "Stored access token");
        Ok(())
    }

    /// Whether any credential is present.
    pub fn is_logged_in(&self) -> Result<bool> {
        Ok(self.access_token()?.is_some() || self.refresh_token()?.is_some())
    }

    /// Remove both tokens. The CSRF token is left alone.
    ///
    /// Both removals are attempted even if the first fails; the first error
    /// is returned.
    pub fn clear(&self) -> Result<()> {
        let access = self.store.remove(ACCESS_TOKEN_KEY);
        let refresh = self.store.remove(REFRESH_TOKEN_KEY);
        access.and(refresh)?;
        info!("Session cleared");
        Ok(())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_then_clear() {
        let session = Session::in_memory();
        assert!(!session.is_logged_in().unwrap());

        session.init(&TokenPair::new("acc", "ref")).unwrap();
        assert_eq!(session.access_token().unwrap(), Some(AccessToken::new("acc")));
        assert_eq!(session.refresh_token().unwrap(), Some(RefreshToken::new("ref")));
        assert!(session.is_logged_in().unwrap());

        session.clear().unwrap();
        assert_eq!(session.access_token().unwrap(), None);
        assert_eq!(session.refresh_token().unwrap(), None);
        assert!(!session.is_logged_in().unwrap());
    }

    #[test]
    fn access_token_can_be_absent_while_refresh_remains() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(REFRESH_TOKEN_KEY, StoredValue::new("ref", None))
            .unwrap();
        let session = Session::new(store);

        assert_eq!(session.access_token().unwrap(), None);
        assert_eq!(session.refresh_token().unwrap(), Some(RefreshToken::new("ref")));
        assert!(session.is_logged_in().unwrap());
    }

    #[test]
    fn rotating_access_token_keeps_refresh_token() {
        let session = Session::in_memory();
        session.init(&TokenPair::new("old", "ref")).unwrap();
        session.set_access_token(&AccessToken::new("new")).unwrap();

        assert_eq!(session.access_token().unwrap(), Some(AccessToken::new("new")));
        assert_eq!(session.refresh_token().unwrap(), Some(RefreshToken::new("ref")));
    }

    #[test]
    fn clones_share_credentials() {
        let session = Session::in_memory();
        let other = session.clone();
        session.init(&TokenPair::new("acc", "ref")).unwrap();
        assert_eq!(other.access_token().unwrap(), Some(AccessToken::new("acc")));
    }

    #[test]
    fn clear_keeps_csrf_token() {
        let session = Session::in_memory();
        session.set_csrf_token("csrf").unwrap();
        session.init(&TokenPair::new("acc", "ref")).unwrap();
        session.clear().unwrap();
        assert_eq!(session.csrf_token().unwrap().as_deref(), Some("csrf"));
    }

    #[test]
    fn debug_is_redacted() {
        let session = Session::in_memory();
        session.init(&TokenPair::new("secret-acc", "secret-ref")).unwrap();
        let debug = format!("{:?}", session);
        assert!(!debug.contains("secret"));
    }

    /// Memory store whose removal of one key always fails.
    struct StuckKey {
        inner: MemoryStore,
        stuck: &'static str,
    }

    impl CredentialStore for StuckKey {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: StoredValue) -> Result<()> {
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<()> {
            if key == self.stuck {
                return Err(crate::error::StorageError::Poisoned.into());
            }
            self.inner.remove(key)
        }
    }

    #[test]
    fn clear_removes_refresh_token_even_if_access_removal_fails() {
        let session = Session::new(Arc::new(StuckKey {
            inner: MemoryStore::new(),
            stuck: ACCESS_TOKEN_KEY,
        }));
        session.init(&TokenPair::new("a1", "r1")).unwrap();

        assert!(session.clear().is_err());
        assert!(session.refresh_token().unwrap().is_none());
        assert!(session.access_token().unwrap().is_some());
    }
}
