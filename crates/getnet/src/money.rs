//! Monetary amounts.
//!
//! The gateway carries every amount as an integer count of minor units
//! (cents). The domain model works in decimal major units. Encoding
//! truncates anything beyond two decimal places instead of rounding, which
//! is what the gateway integration has always sent.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// A decimal amount in major currency units (e.g. `12.34` BRL).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Build an amount from an integer count of minor units.
    pub fn from_minor_units(minor: i64) -> Self {
        Self(Decimal::new(minor, 2))
    }

    /// Minor units for the wire, truncating sub-cent digits.
    ///
    /// Saturates at the `i64` bounds for amounts that cannot be represented.
    pub fn to_minor_units(&self) -> i64 {
        let saturated = if self.0.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        };
        self.0
            .checked_mul(Decimal::from(MINOR_UNITS_PER_MAJOR))
            .and_then(|scaled| scaled.trunc().to_i64())
            .unwrap_or(saturated)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.to_minor_units())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let minor = i64::deserialize(deserializer)?;
        Ok(Self::from_minor_units(minor))
    }
}
