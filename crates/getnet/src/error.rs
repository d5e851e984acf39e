use thiserror::Error;

use crate::rest::Response;

/// Errors returned by Getnet operations.
#[derive(Debug, Error)]
pub enum GetnetError {
    /// The request never produced an HTTP response (connect, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response body did not match the expected shape. Covers malformed
    /// success bodies, malformed error envelopes and unparsable timestamps.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A request payload could not be serialized; no request was sent.
    #[error("encode error: {0}")]
    Encode(serde_json::Error),

    /// The gateway answered with a non-2xx status. `message` is the
    /// normalized text from the error envelope and may be empty.
    #[error("gateway returned {status}: {message}")]
    Remote {
        status: u16,
        message: String,
        response: Response,
    },

    /// A local precondition failed; no request was sent.
    #[error("validation error: {0}")]
    Validation(String),
}

impl GetnetError {
    /// The raw gateway response behind a [`GetnetError::Remote`], if any.
    pub fn response(&self) -> Option<&Response> {
        match self {
            GetnetError::Remote { response, .. } => Some(response),
            _ => None,
        }
    }
}
