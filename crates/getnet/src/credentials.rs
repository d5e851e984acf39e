//! Client identity and OAuth2 access tokens.

use std::time::{Duration, Instant};

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::constants::{
    OAUTH_GRANT_TYPE, OAUTH_SCOPE, PRODUCTION_URL, SANDBOX_URL, TOKEN_EXPIRY_MARGIN_SECS,
};
use crate::error::GetnetError;
use crate::error_schema::Endpoint;
use crate::nullable::null_as_default;
use crate::rest::RestClient;

/// Application credentials issued by the gateway, plus the current token.
///
/// Owned by the caller and passed to every call. Cloning is cheap enough
/// to hand each concurrent task its own copy.
#[derive(Clone, Default)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub seller_id: String,
    pub sandbox: bool,
    pub access_token: Option<AccessToken>,
    /// Origin override; replaces the sandbox/production origin when set.
    pub base_url: Option<String>,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("seller_id", &self.seller_id)
            .field("sandbox", &self.sandbox)
            .field("access_token", &self.access_token)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ClientCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            ..Default::default()
        }
    }

    pub fn with_seller(mut self, seller_id: impl Into<String>) -> Self {
        self.seller_id = seller_id.into();
        self
    }

    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// `Authorization` value for the token endpoint.
    pub fn basic_auth_header(&self) -> String {
        let pair = format!("{}:{}", self.client_id, self.client_secret);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(pair)
        )
    }

    /// `Authorization` value for API calls. The token is not checked here.
    pub fn bearer_auth_header(&self) -> String {
        let token = self
            .access_token
            .as_ref()
            .map(|t| t.access_token.as_str())
            .unwrap_or_default();
        format!("Bearer {token}")
    }

    pub fn has_seller(&self) -> bool {
        !self.seller_id.trim().is_empty()
    }

    pub fn base_url(&self) -> &str {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/'),
            None if self.sandbox => SANDBOX_URL,
            None => PRODUCTION_URL,
        }
    }

    /// Run a client-credentials grant and return the new token.
    ///
    /// The returned token is not stored; callers replace
    /// [`ClientCredentials::access_token`] themselves or use a
    /// [`crate::TokenManager`].
    pub async fn acquire_token(&self, rest: &RestClient) -> Result<AccessToken, GetnetError> {
        let form = [("scope", OAUTH_SCOPE), ("grant_type", OAUTH_GRANT_TYPE)];
        let response = rest.send_form(self, &Endpoint::oauth_token(), &form).await?;
        let token: AccessToken = response.json()?;
        tracing::info!(
            token_type = %token.token_type,
            expires_in = token.expires_in,
            scope = %token.scope,
            "acquired access token"
        );
        Ok(token)
    }
}

/// OAuth2 access token as returned by the token endpoint.
///
/// `issued_at` is not on the wire; it is stamped when the token is decoded.
#[derive(Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds.
    pub expires_in: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scope: String,
    #[serde(skip, default = "Instant::now")]
    issued_at: Instant,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

impl AccessToken {
    pub fn new(
        access_token: impl Into<String>,
        token_type: impl Into<String>,
        expires_in: i64,
        scope: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: token_type.into(),
            expires_in,
            scope: scope.into(),
            issued_at: Instant::now(),
        }
    }

    /// Same token, issued at `issued_at`.
    pub fn issued(mut self, issued_at: Instant) -> Self {
        self.issued_at = issued_at;
        self
    }

    pub fn issued_at(&self) -> Instant {
        self.issued_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_after(self.issued_at.elapsed())
    }

    /// Expiry check for a given time since issuance.
    ///
    /// Lifetimes at or below the margin are always expired.
    pub fn is_expired_after(&self, elapsed: Duration) -> bool {
        let usable = self.expires_in - TOKEN_EXPIRY_MARGIN_SECS;
        if usable <= 0 {
            return true;
        }
        elapsed > Duration::from_secs(usable as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_credentials() -> ClientCredentials {
        ClientCredentials::new("client-credentials-id-1", "client-credentials-secret-A")
            .sandbox(true)
    }

    #[test]
    fn test_basic_header_is_base64_of_id_and_secret() {
        let header = fixture_credentials().basic_auth_header();
        let encoded = header.strip_prefix("Basic ").unwrap();
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        assert_eq!(
            String::from_utf8(decoded).unwrap(),
            "client-credentials-id-1:client-credentials-secret-A"
        );
        assert_eq!(header, fixture_credentials().basic_auth_header());
    }

    #[test]
    fn test_bearer_header() {
        let creds = fixture_credentials()
            .with_access_token(AccessToken::new("abc", "Bearer", 3600, "oob"));
        assert_eq!(creds.bearer_auth_header(), "Bearer abc");
        assert_eq!(fixture_credentials().bearer_auth_header(), "Bearer ");
    }

    #[test]
    fn test_has_seller_ignores_whitespace() {
        assert!(!fixture_credentials().has_seller());
        assert!(!fixture_credentials().with_seller("   ").has_seller());
        assert!(fixture_credentials().with_seller("6eb2412c").has_seller());
    }

    #[test]
    fn test_base_url_selection() {
        assert_eq!(fixture_credentials().base_url(), SANDBOX_URL);
        assert_eq!(fixture_credentials().sandbox(false).base_url(), PRODUCTION_URL);
        assert_eq!(
            fixture_credentials()
                .with_base_url("http://127.0.0.1:8080/")
                .base_url(),
            "http://127.0.0.1:8080"
        );
    }

    #[test]
    fn test_expiry_boundary() {
        let token = AccessToken::new("t", "Bearer", 3600, "oob");
        assert!(!token.is_expired());
        assert!(!token.is_expired_after(Duration::from_secs(3590)));
        assert!(token.is_expired_after(Duration::from_secs(3590) + Duration::from_millis(1)));
        assert!(token.is_expired_after(Duration::from_secs(3600)));
    }

    #[test]
    fn test_short_lifetime_always_expired() {
        for lifetime in [-5, 0, 5, 10] {
            let token = AccessToken::new("t", "Bearer", lifetime, "oob");
            assert!(token.is_expired_after(Duration::ZERO));
        }
        let token = AccessToken::new("t", "Bearer", 11, "oob");
        assert!(!token.is_expired_after(Duration::ZERO));
        assert!(token.is_expired_after(Duration::from_millis(1001)));
    }

    #[test]
    fn test_issued_in_the_past_is_expired() {
        // Instant cannot go below the platform epoch right after boot.
        if let Some(issued) = Instant::now().checked_sub(Duration::from_secs(120)) {
            let token = AccessToken::new("t", "Bearer", 60, "oob").issued(issued);
            assert!(token.is_expired());
        }
    }

    #[test]
    fn test_decoding_stamps_issue_time() {
        let before = Instant::now();
        let token: AccessToken = serde_json::from_str(
            r#"{"access_token": "T", "token_type": "Bearer", "expires_in": 3600, "scope": "oob"}"#,
        )
        .unwrap();
        assert!(token.issued_at() >= before);
        assert_eq!(token.access_token, "T");
        assert!(!token.is_expired());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = fixture_credentials()
            .with_access_token(AccessToken::new("super-token", "Bearer", 3600, "oob"));
        let debug = format!("{creds:?}");
        assert!(!debug.contains("client-credentials-secret-A"));
        assert!(!debug.contains("super-token"));
    }
}
