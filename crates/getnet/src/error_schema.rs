//! Gateway error envelopes.
//!
//! The gateway speaks two error dialects. Versioned API routes (`/v1/...`)
//! answer with [`ErrorResponseV1`]; the OAuth token route answers with
//! [`ErrorResponseV2`]. Which one applies is a property of the endpoint,
//! fixed when the [`Endpoint`] is defined, never guessed from the body.

use serde::{Deserialize, Serialize};

use crate::nullable::null_as_default;

/// Error envelope version used by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSchema {
    V1,
    V2,
}

impl ErrorSchema {
    /// Versioned routes carry a `/v1/` path segment.
    pub fn for_path(path: &str) -> Self {
        if path.contains("/v1/") {
            ErrorSchema::V1
        } else {
            ErrorSchema::V2
        }
    }
}

/// A gateway route together with the error schema it answers with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    path: String,
    schema: ErrorSchema,
}

impl Endpoint {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let schema = ErrorSchema::for_path(&path);
        Self { path, schema }
    }

    pub fn with_schema(path: impl Into<String>, schema: ErrorSchema) -> Self {
        Self {
            path: path.into(),
            schema,
        }
    }

    pub fn oauth_token() -> Self {
        Self::with_schema("/auth/oauth/v2/token", ErrorSchema::V2)
    }

    pub fn card_token() -> Self {
        Self::with_schema("/v1/tokens/card", ErrorSchema::V1)
    }

    pub fn card_verification() -> Self {
        Self::with_schema("/v1/cards/verification", ErrorSchema::V1)
    }

    pub fn payment_credit() -> Self {
        Self::with_schema("/v1/payments/credit", ErrorSchema::V1)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn schema(&self) -> ErrorSchema {
        self.schema
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)
    }
}

/// Error body of versioned API routes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorResponseV1 {
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    /// Module or system where the error happened.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub details: Vec<ErrorDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorDetail {
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub error_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description_detail: String,
}

impl ErrorResponseV1 {
    /// Detail descriptions joined with `"; "`. Empty when there are no details.
    pub fn detail_message(&self) -> String {
        self.details
            .iter()
            .map(|d| d.description_detail.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Error body of the OAuth token route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorResponseV2 {
    #[serde(deserialize_with = "null_as_default")]
    pub error: String,
    #[serde(deserialize_with = "null_as_default")]
    pub error_description: String,
}

/// Reduce a non-2xx body to a single human-readable message.
///
/// A body that is not a valid envelope for `schema` is an error, not an
/// empty message. An empty message is still a failure for the caller.
pub fn normalize(status: u16, body: &[u8], schema: ErrorSchema) -> Result<String, serde_json::Error> {
    let message = match schema {
        ErrorSchema::V1 => serde_json::from_slice::<ErrorResponseV1>(body)?.detail_message(),
        ErrorSchema::V2 => serde_json::from_slice::<ErrorResponseV2>(body)?.error_description,
    };
    tracing::trace!(status, ?schema, %message, "normalized gateway error");
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_from_path() {
        assert_eq!(ErrorSchema::for_path("/v1/payments/credit"), ErrorSchema::V1);
        assert_eq!(ErrorSchema::for_path("/v1/tokens/card"), ErrorSchema::V1);
        assert_eq!(ErrorSchema::for_path("/auth/oauth/v2/token"), ErrorSchema::V2);
        assert_eq!(ErrorSchema::for_path("/v12/things"), ErrorSchema::V2);
    }

    #[test]
    fn test_builtin_endpoints_match_path_rule() {
        for endpoint in [
            Endpoint::oauth_token(),
            Endpoint::card_token(),
            Endpoint::card_verification(),
            Endpoint::payment_credit(),
        ] {
            assert_eq!(endpoint, Endpoint::new(endpoint.path()));
        }
    }

    #[test]
    fn test_v1_joins_detail_descriptions() {
        let body = serde_json::json!({
            "message": "Bad Request",
            "name": "ServerError",
            "details": [
                {"status": "DENIED", "error_code": "PAYMENTS-011", "description": "x", "description_detail": "Cartão inválido"},
                {"status": "DENIED", "error_code": "PAYMENTS-012", "description": "y", "description_detail": "Valor inválido"}
            ]
        });
        let body = serde_json::to_vec(&body).unwrap();
        let message = normalize(400, &body, ErrorSchema::V1).unwrap();
        assert_eq!(message, "Cartão inválido; Valor inválido");
    }

    #[test]
    fn test_v1_without_details_is_empty_message() {
        let body = br#"{"message": "Invalid Authorization", "name": "auth/bearer"}"#;
        assert_eq!(normalize(401, body, ErrorSchema::V1).unwrap(), "");
    }

    #[test]
    fn test_v2_uses_description_only() {
        let body = r#"{"error": "invalid_client", "error_description": "Não autorizado."}"#;
        assert_eq!(
            normalize(401, body.as_bytes(), ErrorSchema::V2).unwrap(),
            "Não autorizado."
        );
    }

    #[test]
    fn test_v1_null_fields_are_empty() {
        let body = br#"{"message": null, "name": null, "details": null}"#;
        assert_eq!(normalize(400, body, ErrorSchema::V1).unwrap(), "");

        let body = br#"{"details": [
            {"description_detail": "a", "error_code": null, "status": null, "description": null},
            {"description_detail": null}
        ]}"#;
        assert_eq!(normalize(400, body, ErrorSchema::V1).unwrap(), "a; ");
    }

    #[test]
    fn test_v2_null_description_is_empty() {
        let body = br#"{"error": "invalid_client", "error_description": null}"#;
        assert_eq!(normalize(401, body, ErrorSchema::V2).unwrap(), "");
    }

    #[test]
    fn test_malformed_body_is_an_error() {
        assert!(normalize(500, b"<html>oops</html>", ErrorSchema::V1).is_err());
        assert!(normalize(500, b"", ErrorSchema::V2).is_err());
    }
}
