//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// Default base URL of the tour-booking API.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api/";

/// A validated API base URL.
///
/// The URL is absolute, uses HTTPS (or HTTP for localhost), and always ends
/// with a `/` so that relative endpoint paths like `token/refresh/` join
/// underneath it instead of replacing the last segment.
///
/// # Example
///
/// ```
/// use tourbook_core::ApiUrl;
///
/// let api = ApiUrl::new("https://tours.example.com/api").unwrap();
/// assert_eq!(api.endpoint("token/refresh/"),
///            "https://tours.example.com/api/token/refresh/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new API URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let mut url = Url::parse(s).map_err(|e| InvalidInputError::ApiUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        url.set_query(None);
        url.set_fragment(None);
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self(url))
    }

    /// Returns the absolute URL of an endpoint path relative to this base.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.0.as_str(), path.trim_start_matches('/'))
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();
        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl Default for ApiUrl {
    fn default() -> Self {
        Self(Url::parse(DEFAULT_API_URL).expect("default API URL is valid"))
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let api = ApiUrl::new("https://tours.example.com/api/").unwrap();
        assert_eq!(api.as_str(), "https://tours.example.com/api/");
    }

    #[test]
    fn valid_localhost_http() {
        let api = ApiUrl::new("http://127.0.0.1:8000/api/").unwrap();
        assert_eq!(api.as_str(), "http://127.0.0.1:8000/api/");
    }

    #[test]
    fn default_points_at_local_dev_server() {
        assert_eq!(ApiUrl::default().as_str(), DEFAULT_API_URL);
    }

    #[test]
    fn appends_missing_trailing_slash() {
        let api = ApiUrl::new("http://localhost:8000/api").unwrap();
        assert_eq!(api.as_str(), "http://localhost:8000/api/");
        assert_eq!(
            api.endpoint("token/refresh/"),
            "http://localhost:8000/api/token/refresh/"
        );
    }

    #[test]
    fn endpoint_ignores_leading_slash() {
        let api = ApiUrl::new("http://localhost:8000/api/").unwrap();
        assert_eq!(api.endpoint("/user/"), "http://localhost:8000/api/user/");
    }

    #[test]
    fn drops_query_and_fragment() {
        let api = ApiUrl::new("https://tours.example.com/api/?x=1#top").unwrap();
        assert_eq!(api.as_str(), "https://tours.example.com/api/");
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(ApiUrl::new("http://tours.example.com/api/").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(ApiUrl::new("/api/").is_err());
    }

    #[test]
    fn serde_roundtrip_validates() {
        let api: ApiUrl = serde_json::from_str("\"https://tours.example.com/api\"").unwrap();
        assert_eq!(api.as_str(), "https://tours.example.com/api/");
        assert!(serde_json::from_str::<ApiUrl>("\"ftp://x\"").is_err());
    }
}
