//! tourbook-http - HTTP client for the tour-booking API.
//!
//! Calls are plain [`ApiRequest`] values sent through a [`Transport`]. The
//! reqwest-backed [`HttpTransport`] talks to the server; [`Authenticated`]
//! decorates any transport with bearer credentials and the refresh-and-retry
//! flow; [`ApiClient`] bundles both behind typed endpoints.

mod auth;
mod client;
pub mod endpoints;
mod request;
mod transport;

pub use auth::Authenticated;
pub use client::ApiClient;
pub use endpoints::{Registration, UserProfile};
pub use request::{ApiRequest, ApiResponse, CSRF_HEADER};
pub use transport::{HttpTransport, Transport};

pub use reqwest::{Method, StatusCode};
