//! The transport seam and its reqwest implementation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, instrument, trace};

use tourbook_core::error::{Error, StatusError, TransportError};
use tourbook_core::{ApiUrl, Result};

use crate::endpoints::ErrorBody;
use crate::request::{ApiRequest, ApiResponse};

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Anything that can carry an [`ApiRequest`] to the API.
///
/// Implementations return `Ok` only for 2xx responses; any other status comes
/// back as [`Error::Status`] and a missing response as [`Error::Transport`].
/// Middleware such as [`Authenticated`](crate::Authenticated) implements this
/// trait around another transport.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        (**self).send(request).await
    }
}

/// Converts a reqwest failure into a transport error.
fn transport_error(err: reqwest::Error) -> Error {
    let err = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(err)
}

/// JSON-over-HTTP transport rooted at an API base URL.
/// Clone is cheap; `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    api: ApiUrl,
}

impl HttpTransport {
    /// Create a transport for the given API.
    pub fn new(api: ApiUrl) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .user_agent(concat!("tourbook/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(transport_error)?;

        Ok(Self { client, api })
    }

    /// Returns the API base URL.
    pub fn api(&self) -> &ApiUrl {
        &self.api
    }

    /// Build an error from a non-success response.
    async fn status_error(&self, url: String, response: reqwest::Response) -> Error {
        let status = response.status().as_u16();
        let body = response.bytes().await.unwrap_or_default();
        let parsed: ErrorBody = serde_json::from_slice(&body).unwrap_or_default();
        Error::Status(StatusError::new(status, url, parsed.code, parsed.detail))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method(), path = request.path(), attempt = request.attempt()))]
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.api.endpoint(request.path());
        debug!(%url, "API request");

        let mut builder = self
            .client
            .request(request.method().clone(), &url)
            .headers(request.headers().clone());

        if !request.query_pairs().is_empty() {
            builder = builder.query(request.query_pairs());
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        trace!(%status, "API response");

        if !status.is_success() {
            return Err(self.status_error(url, response).await);
        }

        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(transport_error)?;
        Ok(ApiResponse::new(status, headers, body))
    }
}
