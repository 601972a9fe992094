//! High-level API client.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, instrument};

use tourbook_core::{AccessToken, ApiUrl, Credentials, Result, Session, TokenPair};

use crate::auth::Authenticated;
use crate::endpoints::{
    self, COMPANIES, COUNTRIES, CURRENT_USER, FAVOURITES, REGISTER, Registration, TOKEN_OBTAIN,
    TOURS, TokenObtainRequest, TokenObtainResponse, UserProfile,
};
use crate::request::{ApiRequest, ApiResponse};
use crate::transport::{HttpTransport, Transport};

/// Client for the tour-booking API.
///
/// Holds two paths to the server: a plain one for public endpoints and the
/// token exchange, and an [`Authenticated`] one for everything that needs the
/// customer's credentials. Both share one connection pool.
///
/// Cheap to clone; clones share the session and the refresh lock.
///
/// # Example
///
/// ```no_run
/// use tourbook_core::{ApiUrl, Credentials, Session};
/// use tourbook_http::ApiClient;
///
/// # async fn example() -> Result<(), tourbook_core::Error> {
/// let api = ApiUrl::new("http://127.0.0.1:8000/api/")?;
/// let client = ApiClient::new(api, Session::in_memory())?;
/// client.login(&Credentials::new("alice", "hunter2")).await?;
///
/// let me = client.current_user().await?;
/// println!("Logged in as {}", me.username);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    public: HttpTransport,
    authed: Authenticated<HttpTransport>,
}

impl ApiClient {
    /// Create a client for `api` whose credentials live in `session`.
    pub fn new(api: ApiUrl, session: Session) -> Result<Self> {
        let public = HttpTransport::new(api)?;
        let authed = Authenticated::new(public.clone(), session);
        Ok(Self {
            inner: Arc::new(ClientInner { public, authed }),
        })
    }

    /// Returns the API base URL.
    pub fn api(&self) -> &ApiUrl {
        self.inner.public.api()
    }

    /// Returns the credential session.
    pub fn session(&self) -> &Session {
        self.inner.authed.session()
    }

    // ========================================================================
    // Session Lifecycle
    // ========================================================================

    /// Exchange credentials for a token pair and store it in the session.
    #[instrument(skip(self, credentials), fields(login = credentials.login()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<()> {
        let request = ApiRequest::post(TOKEN_OBTAIN).json(&TokenObtainRequest {
            login: credentials.login(),
            password: credentials.password(),
        })?;

        let response: TokenObtainResponse = self.inner.public.send(request).await?.json()?;
        self.session()
            .init(&TokenPair::new(response.access, response.refresh))?;

        info!("Logged in");
        Ok(())
    }

    /// Forget the stored credentials.
    pub fn logout(&self) -> Result<()> {
        self.session().clear()
    }

    /// Renew the access token using the stored refresh token.
    pub async fn refresh(&self) -> Result<AccessToken> {
        self.inner.authed.refresh().await
    }

    /// Create an account. Does not log in.
    #[instrument(skip(self, registration), fields(username = %registration.username))]
    pub async fn register(&self, registration: &Registration) -> Result<UserProfile> {
        let request = ApiRequest::post(REGISTER).json(registration)?;
        self.inner.public.send(request).await?.json()
    }

    // ========================================================================
    // Resources
    // ========================================================================

    /// The logged-in customer's profile.
    pub async fn current_user(&self) -> Result<UserProfile> {
        self.get_json(CURRENT_USER).await
    }

    /// The tour catalogue.
    pub async fn tours(&self) -> Result<serde_json::Value> {
        self.public_json(TOURS).await
    }

    /// A single tour by slug.
    pub async fn tour(&self, slug: &str) -> Result<serde_json::Value> {
        self.public_json(&endpoints::tour(slug)?).await
    }

    /// All tour operators.
    pub async fn companies(&self) -> Result<serde_json::Value> {
        self.public_json(COMPANIES).await
    }

    /// A single tour operator by slug.
    pub async fn company(&self, slug: &str) -> Result<serde_json::Value> {
        self.public_json(&endpoints::company(slug)?).await
    }

    /// Countries known to the catalogue.
    pub async fn countries(&self) -> Result<serde_json::Value> {
        self.public_json(COUNTRIES).await
    }

    /// The customer's wishlist.
    pub async fn favourites(&self) -> Result<serde_json::Value> {
        self.get_json(FAVOURITES).await
    }

    // ========================================================================
    // Generic Authenticated Calls
    // ========================================================================

    /// Send an arbitrary request through the authenticated path.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.inner.authed.send(request).await
    }

    /// Authenticated GET decoded as JSON.
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        self.send(ApiRequest::get(path)).await?.json()
    }

    /// Authenticated POST with a JSON body, decoded as JSON.
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(ApiRequest::post(path).json(body)?).await?.json()
    }

    /// Authenticated DELETE.
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(ApiRequest::delete(path)).await?;
        Ok(())
    }

    async fn public_json(&self, path: &str) -> Result<serde_json::Value> {
        self.inner.public.send(ApiRequest::get(path)).await?.json()
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("api", self.api())
            .field("session", self.session())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let api = ApiUrl::new("http://127.0.0.1:8000/api/").unwrap();
        let client = ApiClient::new(api.clone(), Session::in_memory()).unwrap();
        assert_eq!(client.api(), &api);
        assert!(!client.session().is_logged_in().unwrap());
    }
}
