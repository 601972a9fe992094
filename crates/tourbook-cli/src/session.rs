//! Persisted login state for the CLI.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::debug;

use tourbook_core::{ApiUrl, FileStore, Session};
use tourbook_http::ApiClient;

/// Overrides the credentials file location.
pub const CREDENTIALS_ENV: &str = "TOURBOOK_CREDENTIALS";

/// Get the credentials file path, creating its directory if needed.
pub fn credentials_path() -> Result<PathBuf> {
    let path = match std::env::var_os(CREDENTIALS_ENV) {
        Some(path) => PathBuf::from(path),
        None => {
            let dirs = ProjectDirs::from("", "", "tourbook")
                .context("Could not determine data directory")?;
            dirs.data_dir().join("credentials.json")
        }
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).context("Failed to create data directory")?;
    }

    Ok(path)
}

/// Open the file-backed session.
pub fn open_session() -> Result<Session> {
    let path = credentials_path()?;
    debug!(path = %path.display(), "Using credentials file");
    Ok(Session::new(Arc::new(FileStore::new(path))))
}

/// Build an API client over the persisted session.
pub fn client(api: &ApiUrl) -> Result<ApiClient> {
    let session = open_session()?;
    ApiClient::new(api.clone(), session).context("Failed to build HTTP client")
}
