//! tourbook-core - Core types for the tourbook API client.
//!
//! This crate holds the pieces shared by the HTTP client and the CLI: the
//! unified [`Error`], bearer token types, the [`CredentialStore`] seam and the
//! [`Session`] that owns stored credentials.

pub mod credentials;
pub mod error;
pub mod session;
pub mod store;
pub mod tokens;
pub mod types;

pub use credentials::Credentials;
pub use error::Error;
pub use session::Session;
pub use store::{CredentialStore, FileStore, MemoryStore, StoredValue};
pub use tokens::{AccessToken, RefreshToken, TokenPair};
pub use types::{ApiUrl, DEFAULT_API_URL};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
