//! Shared access-token cache with single-flight refresh.

use tokio::sync::Mutex;

use crate::credentials::{AccessToken, ClientCredentials};
use crate::error::GetnetError;
use crate::rest::RestClient;

/// Hands out credentials carrying a fresh access token.
///
/// The refresh runs while the lock is held, so concurrent callers that find
/// the token expired wait for one token request instead of issuing their
/// own, and never see a half-replaced token.
pub struct TokenManager {
    credentials: ClientCredentials,
    rest: RestClient,
    token: Mutex<Option<AccessToken>>,
}

impl TokenManager {
    /// Any token already on `credentials` seeds the cache.
    pub fn new(mut credentials: ClientCredentials, rest: RestClient) -> Self {
        let token = credentials.access_token.take();
        Self {
            credentials,
            rest,
            token: Mutex::new(token),
        }
    }

    pub fn rest(&self) -> &RestClient {
        &self.rest
    }

    /// Current token, refreshed first if missing or expired.
    pub async fn token(&self) -> Result<AccessToken, GetnetError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| !t.is_expired()) {
            return Ok(token.clone());
        }

        tracing::debug!(client_id = %self.credentials.client_id, "refreshing access token");
        let fresh = self.credentials.acquire_token(&self.rest).await?;
        *cached = Some(fresh.clone());
        Ok(fresh)
    }

    /// Snapshot of the credentials with a fresh token attached.
    pub async fn credentials(&self) -> Result<ClientCredentials, GetnetError> {
        let token = self.token().await?;
        Ok(self.credentials.clone().with_access_token(token))
    }

    /// Drop the cached token; the next call re-authenticates.
    pub async fn invalidate(&self) {
        self.token.lock().await.take();
    }
}
