use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::constants::{CONTENT_TYPE_FORM, CONTENT_TYPE_JSON, SELLER_ID_HEADER};
use crate::credentials::ClientCredentials;
use crate::error::GetnetError;
use crate::error_schema::{self, Endpoint};

/// Which credential goes into the `Authorization` header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthScheme {
    Basic,
    #[default]
    Bearer,
}

/// Raw gateway answer: body bytes and HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub body: Vec<u8>,
    pub status: u16,
}

impl Response {
    /// Any status whose first digit is `2`.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Body as text, lossy. For diagnostics.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Authenticated request dispatcher for the gateway.
///
/// Wraps `reqwest::Client`. Every call composes `Content-Type`,
/// `Authorization` and, when configured, `seller_id`, then routes non-2xx
/// answers through the endpoint's error schema. Cloning shares the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    auth: AuthScheme,
    timeout: Option<Duration>,
}

impl Default for RestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RestClient {
    pub fn new() -> Self {
        Self::with_http_client(
            reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .expect("failed to build HTTP client"),
        )
    }

    /// Create a dispatcher over a custom reqwest::Client.
    pub fn with_http_client(http: reqwest::Client) -> Self {
        Self {
            http,
            auth: AuthScheme::default(),
            timeout: None,
        }
    }

    /// Deadline applied to each request, handed to reqwest as is.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// A copy of this client that authenticates JSON calls with Basic auth.
    pub fn auth_basic(&self) -> Self {
        Self {
            auth: AuthScheme::Basic,
            ..self.clone()
        }
    }

    pub fn auth_scheme(&self) -> AuthScheme {
        self.auth
    }

    /// Form-encoded POST. Always Basic-authenticated.
    pub async fn send_form(
        &self,
        credentials: &ClientCredentials,
        endpoint: &Endpoint,
        form: &[(&str, &str)],
    ) -> Result<Response, GetnetError> {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(form)
            .finish();
        self.send(
            credentials,
            Method::POST,
            endpoint,
            AuthScheme::Basic,
            CONTENT_TYPE_FORM,
            Some(body.into_bytes()),
        )
        .await
    }

    /// JSON POST.
    pub async fn send_json<T>(
        &self,
        credentials: &ClientCredentials,
        endpoint: &Endpoint,
        payload: &T,
    ) -> Result<Response, GetnetError>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(payload).map_err(GetnetError::Encode)?;
        self.send(
            credentials,
            Method::POST,
            endpoint,
            self.auth,
            CONTENT_TYPE_JSON,
            Some(body),
        )
        .await
    }

    /// Bodiless GET.
    pub async fn send_get(
        &self,
        credentials: &ClientCredentials,
        endpoint: &Endpoint,
    ) -> Result<Response, GetnetError> {
        self.send(
            credentials,
            Method::GET,
            endpoint,
            self.auth,
            CONTENT_TYPE_JSON,
            None,
        )
        .await
    }

    async fn send(
        &self,
        credentials: &ClientCredentials,
        method: Method,
        endpoint: &Endpoint,
        auth: AuthScheme,
        content_type: &'static str,
        body: Option<Vec<u8>>,
    ) -> Result<Response, GetnetError> {
        let url = format!("{}{}", credentials.base_url(), endpoint.path());
        let authorization = match auth {
            AuthScheme::Basic => credentials.basic_auth_header(),
            AuthScheme::Bearer => credentials.bearer_auth_header(),
        };

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, content_type)
            .header(AUTHORIZATION, authorization);
        if credentials.has_seller() {
            request = request.header(SELLER_ID_HEADER, credentials.seller_id.trim());
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        tracing::debug!(%method, %endpoint, ?auth, "sending gateway request");
        let resp = request.send().await?;
        let status = resp.status().as_u16();
        let response = Response {
            body: resp.bytes().await?.to_vec(),
            status,
        };

        if response.is_success() {
            tracing::debug!(%method, %endpoint, status, "gateway request succeeded");
            return Ok(response);
        }

        let message = match error_schema::normalize(status, &response.body, endpoint.schema()) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(
                    %endpoint,
                    status,
                    body = %response.text(),
                    "unreadable gateway error body"
                );
                return Err(GetnetError::Decode(e));
            }
        };
        tracing::warn!(%endpoint, status, %message, "gateway request failed");
        Err(GetnetError::Remote {
            status,
            message,
            response,
        })
    }
}
