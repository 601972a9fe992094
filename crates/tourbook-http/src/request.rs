//! Request and response values passed through a [`Transport`](crate::Transport).

use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use tourbook_core::error::InvalidInputError;
use tourbook_core::{AccessToken, Error, Result};

/// Header carrying the CSRF token.
pub const CSRF_HEADER: &str = "x-csrftoken";

/// An outgoing API call.
///
/// Requests are values: attaching headers or marking a retry returns a new
/// request and leaves the original untouched. The `attempt` counter starts at
/// zero and is bumped by [`ApiRequest::retry`]; it is what stops a call from
/// being refreshed and replayed more than once.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Option<serde_json::Value>,
    attempt: u32,
}

impl ApiRequest {
    /// Create a request for `path`, relative to the API base URL.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
            attempt: 0,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(|e| InvalidInputError::Other {
            message: format!("request body is not serializable: {}", e),
        })?;
        self.body = Some(value);
        Ok(self)
    }

    /// Set a header, replacing any previous value.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self> {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|_| InvalidInputError::HeaderValue {
                name: name.to_string(),
            })?;
        let header_value =
            HeaderValue::from_str(value).map_err(|_| InvalidInputError::HeaderValue {
                name: name.to_string(),
            })?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Attach `token` as the bearer credential.
    ///
    /// The header value is marked sensitive so it never shows up in Debug output.
    pub fn with_bearer(mut self, token: &AccessToken) -> Result<Self> {
        let mut value =
            HeaderValue::from_str(&token.bearer()).map_err(|_| InvalidInputError::HeaderValue {
                name: AUTHORIZATION.to_string(),
            })?;
        value.set_sensitive(true);
        self.headers.insert(AUTHORIZATION, value);
        Ok(self)
    }

    /// The same call, marked as a replay.
    pub fn retry(&self) -> Self {
        Self {
            attempt: self.attempt + 1,
            ..self.clone()
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// How many times this call has already been replayed.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn is_retry(&self) -> bool {
        self.attempt > 0
    }
}

/// A successful API response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// A 200 response with a JSON body. Handy for scripted transports.
    pub fn ok_json(value: &serde_json::Value) -> Self {
        Self::new(StatusCode::OK, HeaderMap::new(), value.to_string())
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// The body as UTF-8 text (lossy).
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON. An empty body decodes as JSON `null`.
    pub fn json<R: DeserializeOwned>(&self) -> Result<R> {
        let body: &[u8] = if self.body.is_empty() {
            b"null"
        } else {
            &self.body
        };
        serde_json::from_slice(body).map_err(|e| Error::Decode(e.to_string()))
    }
}
