//! Card tokenization and verification.
//!
//! A raw card number only ever leaves the process through
//! [`Card::tokenize`]. Every other call serializes the card with its
//! number-token in place of the number.

use serde::{Deserialize, Serialize};

use crate::nullable::null_as_default;

use crate::credentials::ClientCredentials;
use crate::error::GetnetError;
use crate::error_schema::Endpoint;
use crate::rest::RestClient;

const NUMBER_TOKEN_REQUIRED: &str =
    "number token is required; tokenize the card through /v1/tokens/card first";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Brand {
    Mastercard,
    Visa,
    Amex,
    Elo,
    Hipercard,
}

impl Brand {
    /// Schemes the verification endpoint accepts.
    pub fn supports_verification(self) -> bool {
        matches!(self, Brand::Mastercard | Brand::Visa)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Card {
    #[serde(skip)]
    pub card_number: String,
    pub number_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<Brand>,
    #[serde(rename = "cardholder_name")]
    pub card_holder_name: String,
    pub expiration_month: String,
    pub expiration_year: String,
    pub security_code: String,
    #[serde(skip)]
    pub customer_id: String,
}

#[derive(Serialize)]
struct TokenizeRequest<'a> {
    card_number: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_id: Option<&'a str>,
}

/// Body of the card tokenization endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumberToken {
    pub number_token: String,
}

impl Card {
    /// Exchange the raw card number for a number-token.
    pub async fn tokenize(
        &self,
        rest: &RestClient,
        credentials: &ClientCredentials,
    ) -> Result<String, GetnetError> {
        let request = TokenizeRequest {
            card_number: &self.card_number,
            customer_id: Some(self.customer_id.as_str()).filter(|id| !id.trim().is_empty()),
        };
        let response = rest
            .send_json(credentials, &Endpoint::card_token(), &request)
            .await?;
        let token: NumberToken = response.json()?;
        Ok(token.number_token)
    }

    /// Ask the gateway whether the card can be charged.
    ///
    /// Fails locally without a number-token. Brands the endpoint does not
    /// handle are reported as not verified without a request.
    pub async fn verify(
        &self,
        rest: &RestClient,
        credentials: &ClientCredentials,
    ) -> Result<Verification, GetnetError> {
        if self.number_token.is_empty() {
            return Err(GetnetError::Validation(NUMBER_TOKEN_REQUIRED.to_string()));
        }

        if !self.brand.is_some_and(Brand::supports_verification) {
            tracing::debug!(brand = ?self.brand, "skipping verification for unsupported brand");
            return Ok(Verification::not_verified_locally());
        }

        let response = rest
            .send_json(credentials, &Endpoint::card_verification(), self)
            .await?;
        Ok(response.json()?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationStatus {
    #[serde(rename = "VERIFIED")]
    Verified,
    #[serde(rename = "NOT VERIFIED")]
    NotVerified,
    #[serde(rename = "DENIED")]
    Denied,
    #[serde(rename = "ERROR")]
    Error,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub status: VerificationStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub verification_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub authorization_code: String,
}

impl Verification {
    fn not_verified_locally() -> Self {
        Self {
            status: VerificationStatus::NotVerified,
            verification_id: String::new(),
            authorization_code: String::new(),
        }
    }

    pub fn verified(&self) -> bool {
        self.status == VerificationStatus::Verified
    }

    pub fn not_verified(&self) -> bool {
        self.status == VerificationStatus::NotVerified
    }

    pub fn denied(&self) -> bool {
        self.status == VerificationStatus::Denied
    }
}
