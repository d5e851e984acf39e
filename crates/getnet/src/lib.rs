//! Client for the Getnet payment gateway.
//!
//! Acquires OAuth2 client-credentials tokens, tokenizes and verifies cards,
//! and submits credit payments.
//!
//! # Layers
//!
//! - **Dispatcher** ([`RestClient`]): composes `Authorization`, `Content-Type`
//!   and `seller_id`, performs the call, normalizes gateway errors
//! - **Credentials** ([`ClientCredentials`], [`AccessToken`], [`TokenManager`]):
//!   Basic/Bearer headers, token expiry, single-flight refresh
//! - **Wire codecs** ([`money`], [`timestamp`], [`text`]): integer cents,
//!   gateway timestamp formats, soft-descriptor clamping
//! - **Operations** ([`Card::tokenize`], [`Card::verify`], [`Payment::pay`])
//!
//! # Quick example
//!
//! ```no_run
//! use getnet::{Card, ClientCredentials, RestClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), getnet::GetnetError> {
//! let rest = RestClient::new();
//! let mut credentials = ClientCredentials::new("client-id", "client-secret").sandbox(true);
//! credentials.access_token = Some(credentials.acquire_token(&rest).await?);
//!
//! let mut card = Card {
//!     card_number: "5155901222280001".into(),
//!     ..Default::default()
//! };
//! card.number_token = card.tokenize(&rest, &credentials).await?;
//! # Ok(())
//! # }
//! ```

pub mod constants;
pub mod error;
pub mod error_schema;
mod nullable;

// Wire codecs
pub mod money;
pub mod text;
pub mod timestamp;

// Credentials and dispatch
pub mod config;
pub mod credentials;
pub mod rest;
pub mod token_manager;

// Gateway operations
pub mod card;
pub mod payment;

pub use card::{Brand, Card, NumberToken, Verification, VerificationStatus};
pub use config::{ConfigError, GetnetConfig};
pub use credentials::{AccessToken, ClientCredentials};
pub use error::GetnetError;
pub use error_schema::{Endpoint, ErrorResponseV1, ErrorResponseV2, ErrorSchema};
pub use money::Amount;
pub use payment::*;
pub use rest::{AuthScheme, Response, RestClient};
pub use token_manager::TokenManager;
