/// Sandbox (homologation) origin.
pub const SANDBOX_URL: &str = "https://api-sandbox.getnet.com.br";

/// Production origin.
pub const PRODUCTION_URL: &str = "https://api.getnet.com.br";

/// Tokens are treated as expired this many seconds before the gateway says so.
pub const TOKEN_EXPIRY_MARGIN_SECS: i64 = 10;

/// Gateway limit for the statement soft descriptor.
pub const SOFT_DESCRIPTOR_MAX_LEN: usize = 22;

/// OAuth2 scope requested for client-credentials grants.
pub const OAUTH_SCOPE: &str = "oob";

/// OAuth2 grant type used for token acquisition.
pub const OAUTH_GRANT_TYPE: &str = "client_credentials";

pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";
pub const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

/// Header carrying the seller identifier on every call when configured.
pub const SELLER_ID_HEADER: &str = "seller_id";
