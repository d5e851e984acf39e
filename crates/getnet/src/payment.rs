//! Credit payments.
//!
//! Amounts travel as integer cents (see [`crate::money`]), soft descriptors
//! are clamped to the gateway limit (see [`crate::text`]) and response
//! timestamps go through [`crate::timestamp`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::credentials::ClientCredentials;
use crate::error::GetnetError;
use crate::error_schema::Endpoint;
use crate::money::Amount;
use crate::nullable::null_as_default;
use crate::rest::RestClient;
use crate::text::serialize_soft_descriptor;
use crate::timestamp;

/// Kind of product sold (`product_type`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    CashCarry,
    DigitalContent,
    DigitalGoods,
    DigitalPhysical,
    GiftCard,
    #[default]
    PhysicalGoods,
    RenewSubs,
    Shareware,
    Service,
}

/// Full payment, installments without interest, installments with interest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    #[default]
    Full,
    InstallNoInterest,
    InstallWithInterest,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "BRL")]
    RealBrazilian,
    #[serde(rename = "USD")]
    DollarUs,
    /// Received currency outside the list above.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Canceled,
    Approved,
    Denied,
    Authorized,
    Confirmed,
    Pending,
    Error,
    /// Any status this client does not know about yet.
    #[serde(other)]
    Unknown,
}

/// Payment request for `/v1/payments/credit`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Payment {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub seller_id: String,
    pub amount: Amount,
    /// Defaults to BRL when not set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    pub order: Order,
    pub customer: Customer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<Device>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shippings: Vec<Shipping>,
    pub credit: Credit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debit: Option<Debit>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Credit {
    pub delayed: bool,
    pub authenticated: bool,
    pub pre_authorization: bool,
    pub save_card_data: bool,
    /// Defaults to [`TransactionType::Full`] when not set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    pub number_installments: u32,
    #[serde(
        serialize_with = "serialize_soft_descriptor",
        skip_serializing_if = "String::is_empty"
    )]
    pub soft_descriptor: String,
    pub dynamic_mcc: u32,
    pub card: Card,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Debit {
    #[serde(rename = "cardholder_mobile")]
    pub card_holder_mobile: String,
    #[serde(
        serialize_with = "serialize_soft_descriptor",
        skip_serializing_if = "String::is_empty"
    )]
    pub soft_descriptor: String,
    pub dynamic_mcc: u32,
    pub authenticated: bool,
    pub card: Card,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Order {
    pub order_id: String,
    pub sales_tax: i64,
    pub product_type: ProductType,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Customer {
    pub customer_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub document_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub document_number: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone_number: String,
    pub billing_address: Address,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Device {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub device_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ip_address: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Shipping {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone_number: String,
    pub shipping_amount: Amount,
    pub address: Address,
}

/// Postal address, used for both billing and shipping.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Address {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub street: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub number: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub complement: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub district: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub city: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub country: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub postal_code: String,
}

pub type BillingAddress = Address;

impl Payment {
    /// Fill in the gateway defaults: BRL, full payment, at least one installment.
    pub fn with_defaults(mut self) -> Self {
        self.currency = Some(self.currency.unwrap_or_default());
        self.credit.transaction_type = Some(self.credit.transaction_type.unwrap_or_default());
        if self.credit.number_installments < 1 {
            self.credit.number_installments = 1;
        }
        self
    }

    /// Submit a credit payment.
    pub async fn pay(
        &self,
        rest: &RestClient,
        credentials: &ClientCredentials,
    ) -> Result<PaymentResponse, GetnetError> {
        let payment = self.clone().with_defaults();
        tracing::debug!(
            order_id = %payment.order.order_id,
            amount = %payment.amount,
            installments = payment.credit.number_installments,
            "submitting credit payment"
        );
        let response = rest
            .send_json(credentials, &Endpoint::payment_credit(), &payment)
            .await?;
        let result: PaymentResponse = response.json()?;
        tracing::info!(
            payment_id = %result.payment_id,
            status = ?result.status,
            "credit payment processed"
        );
        Ok(result)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub payment_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub seller_id: String,
    pub amount: Amount,
    pub currency: Currency,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order_id: String,
    pub status: PaymentStatus,
    #[serde(default, with = "timestamp::received_at")]
    pub received_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub credit: Option<CreditResponse>,
}

impl PaymentResponse {
    pub fn canceled(&self) -> bool {
        self.status == PaymentStatus::Canceled
    }

    pub fn approved(&self) -> bool {
        self.status == PaymentStatus::Approved
    }

    pub fn denied(&self) -> bool {
        self.status == PaymentStatus::Denied
    }

    pub fn authorized(&self) -> bool {
        self.status == PaymentStatus::Authorized
    }

    pub fn confirmed(&self) -> bool {
        self.status == PaymentStatus::Confirmed
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CreditResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub delayed: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub authorization_code: String,
    #[serde(with = "timestamp::authorized_at")]
    pub authorized_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub reason_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reason_message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub acquirer: String,
    #[serde(deserialize_with = "null_as_default")]
    pub soft_descriptor: String,
    /// Card scheme name as reported by the acquirer.
    #[serde(deserialize_with = "null_as_default")]
    pub brand: String,
    #[serde(deserialize_with = "null_as_default")]
    pub terminal_nsu: String,
    #[serde(deserialize_with = "null_as_default")]
    pub acquirer_transaction_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub transaction_id: String,
}
