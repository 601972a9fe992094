//! API endpoint paths and request/response bodies.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::{Deserialize, Serialize};

use tourbook_core::Result;
use tourbook_core::error::InvalidInputError;

/// Characters escaped when a slug is written into a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'\\')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

// ============================================================================
// Endpoint Paths (relative to the API base URL)
// ============================================================================

/// Exchange login and password for a token pair.
pub const TOKEN_OBTAIN: &str = "token/";

/// Exchange a refresh token for a new access token.
pub const TOKEN_REFRESH: &str = "token/refresh/";

/// Create a customer account.
pub const REGISTER: &str = "register/";

/// The authenticated customer's profile.
pub const CURRENT_USER: &str = "user/";

/// Tour catalogue.
pub const TOURS: &str = "tour/";

/// Tour operators.
pub const COMPANIES: &str = "company/";

/// The customer's wishlist.
pub const FAVOURITES: &str = "favourite/";

/// Countries tours can be filtered by.
pub const COUNTRIES: &str = "country/";

/// Path of a single tour.
pub fn tour(slug: &str) -> Result<String> {
    detail(TOURS, slug)
}

/// Path of a single company.
pub fn company(slug: &str) -> Result<String> {
    detail(COMPANIES, slug)
}

/// `<collection><slug>/`, with the slug confined to one path segment.
fn detail(collection: &str, slug: &str) -> Result<String> {
    // Dot segments are resolved by URL parsing even when escaped.
    if slug.is_empty() || slug.trim_matches('.').is_empty() {
        return Err(InvalidInputError::Other {
            message: format!("invalid slug '{slug}'"),
        }
        .into());
    }
    Ok(format!(
        "{}{}/",
        collection,
        utf8_percent_encode(slug, SEGMENT)
    ))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for token obtain.
#[derive(Serialize)]
pub struct TokenObtainRequest<'a> {
    pub login: &'a str,
    pub password: &'a str,
}

/// Response from token obtain.
#[derive(Deserialize)]
pub struct TokenObtainResponse {
    pub access: String,
    pub refresh: String,
}

/// Request body for token refresh.
#[derive(Serialize)]
pub struct TokenRefreshRequest<'a> {
    pub refresh: &'a str,
}

/// Response from token refresh.
#[derive(Deserialize)]
pub struct TokenRefreshResponse {
    pub access: String,
}

/// Error body shape used by the API for failed requests.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

/// A customer profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Request body for account registration.
#[derive(Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("phone", &self.phone)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_paths() {
        assert_eq!(tour("altai-trek").unwrap(), "tour/altai-trek/");
        assert_eq!(company("north-co").unwrap(), "company/north-co/");
    }

    #[test]
    fn slugs_stay_inside_one_segment() {
        assert_eq!(
            tour("a/../../user").unwrap(),
            "tour/a%2F..%2F..%2Fuser/"
        );
        assert_eq!(company("x?y#z").unwrap(), "company/x%3Fy%23z/");
        assert_eq!(tour("lake baikal").unwrap(), "tour/lake%20baikal/");

        for bad in ["", ".", ".."] {
            assert!(tour(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn registration_debug_hides_password() {
        let registration = Registration {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "hunter2".into(),
            phone: None,
        };
        let debug = format!("{:?}", registration);
        assert!(!debug.contains("hunter2"));

        let body = serde_json::to_value(&registration).unwrap();
        assert!(body.get("phone").is_none());
        assert_eq!(body["password"], "hunter2");
    }

    #[test]
    fn error_body_tolerates_missing_fields() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail": "nope"}"#).unwrap();
        assert_eq!(body.detail.as_deref(), Some("nope"));
        assert!(body.code.is_none());
    }
}
