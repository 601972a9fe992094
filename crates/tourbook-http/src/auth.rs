//! Bearer authentication middleware with refresh-and-retry.
//!
//! [`Authenticated`] wraps another [`Transport`]. On the way out it attaches
//! the session's access token (and CSRF token, if any). When a first attempt
//! comes back 401 it renews the access token once via the refresh endpoint and
//! replays the call with the new token.
//!
//! Refreshes are serialized: a call that was waiting on another call's refresh
//! sees that the stored access token changed under it and replays with the new
//! token instead of refreshing again.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use tourbook_core::error::AuthError;
use tourbook_core::{AccessToken, Error, RefreshToken, Result, Session};

use crate::endpoints::{TOKEN_REFRESH, TokenRefreshRequest, TokenRefreshResponse};
use crate::request::{ApiRequest, ApiResponse, CSRF_HEADER};
use crate::transport::Transport;

/// A transport that authenticates calls from a [`Session`].
pub struct Authenticated<T> {
    inner: T,
    session: Session,
    refresh_lock: Mutex<()>,
}

impl<T: Transport> Authenticated<T> {
    /// Wrap `inner`, reading credentials from `session`.
    pub fn new(inner: T, session: Session) -> Self {
        Self {
            inner,
            session,
            refresh_lock: Mutex::new(()),
        }
    }

    /// The session credentials are read from and written to.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The wrapped, unauthenticated transport.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Renew the access token now.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingRefreshToken`] when no refresh token is
    /// stored. A failed refresh call clears both credentials and returns the
    /// refresh error.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<AccessToken> {
        let _guard = self.refresh_lock.lock().await;
        let refresh_token = self
            .session
            .refresh_token()?
            .ok_or(AuthError::MissingRefreshToken)?;
        self.refresh_with(&refresh_token).await
    }

    /// Attach the bearer and CSRF headers.
    fn prepare(&self, request: ApiRequest, token: Option<&AccessToken>) -> Result<ApiRequest> {
        let request = match token {
            Some(token) => request.with_bearer(token)?,
            None => request,
        };
        match self.session.csrf_token()? {
            Some(csrf) => request.header(CSRF_HEADER, &csrf),
            None => Ok(request),
        }
    }

    /// Call the refresh endpoint through the inner transport and store the
    /// new access token. Clears the session if the call fails.
    async fn refresh_with(&self, refresh_token: &RefreshToken) -> Result<AccessToken> {
        info!("Refreshing access token");

        let outcome = async {
            let request = ApiRequest::post(TOKEN_REFRESH).json(&TokenRefreshRequest {
                refresh: refresh_token.as_str(),
            })?;
            let response = self.inner.send(request).await?;
            let body: TokenRefreshResponse = response.json()?;
            Ok::<_, Error>(AccessToken::new(body.access))
        }
        .await;

        match outcome {
            Ok(token) => {
                self.session.set_access_token(&token)?;
                debug!("Access token refreshed");
                Ok(token)
            }
            Err(err) => {
                warn!(error = %err, "Token refresh failed, clearing credentials");
                self.clear_session();
                Err(err)
            }
        }
    }

    /// Handle a 401 on a first attempt: obtain a fresh access token and
    /// replay `retry` exactly once.
    async fn recover(
        &self,
        retry: ApiRequest,
        sent_with: Option<AccessToken>,
        original: Error,
    ) -> Result<ApiResponse> {
        let token = {
            let _guard = self.refresh_lock.lock().await;

            match self.session.access_token()? {
                Some(current) if sent_with.as_ref() != Some(&current) => {
                    debug!("Access token was rotated concurrently, replaying with it");
                    current
                }
                _ => match self.session.refresh_token()? {
                    Some(refresh_token) => self.refresh_with(&refresh_token).await?,
                    None => {
                        warn!("Unauthorized with no refresh token, clearing credentials");
                        self.clear_session();
                        return Err(original);
                    }
                },
            }
        };

        debug!(attempt = retry.attempt(), "Replaying request with new access token");
        let prepared = self.prepare(retry, Some(&token))?;
        self.inner.send(prepared).await
    }

    fn clear_session(&self) {
        if let Err(err) = self.session.clear() {
            warn!(error = %err, "Failed to clear stored credentials");
        }
    }
}

#[async_trait]
impl<T: Transport> Transport for Authenticated<T> {
    #[instrument(skip(self, request), fields(method = %request.method(), path = request.path()))]
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let token = self.session.access_token()?;
        let prepared = self.prepare(request.clone(), token.as_ref())?;

        match self.inner.send(prepared).await {
            Err(err) if err.is_unauthorized() && !request.is_retry() => {
                debug!("Unauthorized, attempting token refresh");
                self.recover(request.retry(), token, err).await
            }
            result => result,
        }
    }
}

impl<T> std::fmt::Debug for Authenticated<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticated")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
