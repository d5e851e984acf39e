use std::env;
use std::time::Duration;

use url::Url;

use crate::credentials::ClientCredentials;
use crate::rest::RestClient;

#[derive(Clone)]
pub struct GetnetConfig {
    /// OAuth2 client identifier
    pub client_id: String,
    /// OAuth2 client secret
    pub client_secret: String,
    /// Seller identifier sent as `seller_id` (empty = not sent)
    pub seller_id: String,
    /// Use the sandbox origin instead of production
    pub sandbox: bool,
    /// Origin override (e.g. a local mock gateway)
    pub base_url: Option<String>,
    /// Per-request deadline (None = no deadline)
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for GetnetConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GetnetConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("seller_id", &self.seller_id)
            .field("sandbox", &self.sandbox)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GetnetConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup; `from_env` uses the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        // Required: client credentials
        let client_id =
            non_empty("GETNET_CLIENT_ID").ok_or(ConfigError::MissingRequired("GETNET_CLIENT_ID"))?;
        let client_secret = non_empty("GETNET_CLIENT_SECRET")
            .ok_or(ConfigError::MissingRequired("GETNET_CLIENT_SECRET"))?;

        // Optional: seller
        let seller_id = non_empty("GETNET_SELLER_ID").unwrap_or_default();

        // Optional: environment, sandbox unless told otherwise
        let sandbox = match non_empty("GETNET_SANDBOX") {
            None => true,
            Some(v) => match v.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => return Err(ConfigError::InvalidValue("GETNET_SANDBOX", v)),
            },
        };

        // Optional: origin override
        let base_url = non_empty("GETNET_BASE_URL");
        if let Some(ref url) = base_url {
            Url::parse(url).map_err(|_| ConfigError::InvalidUrl(url.clone()))?;
        }

        // Optional: request timeout
        let timeout = match non_empty("GETNET_TIMEOUT_SECS") {
            None => None,
            Some(v) => Some(Duration::from_secs(
                v.parse()
                    .map_err(|_| ConfigError::InvalidValue("GETNET_TIMEOUT_SECS", v.clone()))?,
            )),
        };

        if !sandbox && base_url.is_none() {
            tracing::warn!("GETNET_SANDBOX=false; requests will hit the production gateway");
        }

        Ok(Self {
            client_id,
            client_secret,
            seller_id,
            sandbox,
            base_url,
            timeout,
        })
    }

    pub fn credentials(&self) -> ClientCredentials {
        let credentials = ClientCredentials::new(&self.client_id, &self.client_secret)
            .with_seller(&self.seller_id)
            .sandbox(self.sandbox);
        match &self.base_url {
            Some(url) => credentials.with_base_url(url),
            None => credentials,
        }
    }

    pub fn rest_client(&self) -> RestClient {
        let client = RestClient::new();
        match self.timeout {
            Some(timeout) => client.with_timeout(timeout),
            None => client,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingRequired(&'static str),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
