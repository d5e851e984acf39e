//! Gateway timestamp formats.
//!
//! Payment receipts carry milliseconds (`2017-03-19T16:30:30.764Z`),
//! authorizations do not (`2017-03-19T16:30:30Z`). Both are UTC.
//!
//! An absent, `null` or empty field decodes to `None`. Anything else that
//! does not parse is a decode error; a zero instant is never substituted.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Format of `received_at` on payment responses.
pub const RECEIVED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Format of `authorized_at` on credit responses.
pub const AUTHORIZED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parse a gateway timestamp with the given `chrono` format.
pub fn parse(value: &str, format: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, format).map(|naive| naive.and_utc())
}

fn deserialize_optional<'de, D>(
    deserializer: D,
    format: &'static str,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse(value, format).map(Some).map_err(|e| {
            serde::de::Error::custom(format!("invalid timestamp {value:?}: {e}"))
        }),
    }
}

fn serialize_optional<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(ts) => serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true)),
        None => serializer.serialize_none(),
    }
}

/// `serde(with)` adapter for millisecond timestamps.
pub mod received_at {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_optional(deserializer, RECEIVED_AT_FORMAT)
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_optional(value, serializer)
    }
}

/// `serde(with)` adapter for second-precision timestamps.
pub mod authorized_at {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_optional(deserializer, AUTHORIZED_AT_FORMAT)
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_optional(value, serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Receipt {
        #[serde(default, with = "received_at")]
        received_at: Option<DateTime<Utc>>,
        #[serde(default, with = "authorized_at")]
        authorized_at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_parse_with_milliseconds() {
        let ts = parse("2017-03-19T16:30:30.764Z", RECEIVED_AT_FORMAT).unwrap();
        assert_eq!(ts.timestamp(), 1_489_941_030);
        assert_eq!(ts.nanosecond(), 764_000_000);
    }

    #[test]
    fn test_parse_without_milliseconds() {
        let ts = parse("2017-03-19T16:30:30Z", AUTHORIZED_AT_FORMAT).unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2017, 3, 19, 16, 30, 30).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("yesterday", RECEIVED_AT_FORMAT).is_err());
        assert!(parse("2017-03-19", AUTHORIZED_AT_FORMAT).is_err());
    }

    #[test]
    fn test_missing_and_empty_fields_are_none() {
        let r: Receipt = serde_json::from_str("{}").unwrap();
        assert!(r.received_at.is_none());
        assert!(r.authorized_at.is_none());

        let r: Receipt =
            serde_json::from_str(r#"{"received_at": "", "authorized_at": null}"#).unwrap();
        assert!(r.received_at.is_none());
        assert!(r.authorized_at.is_none());
    }

    #[test]
    fn test_malformed_field_is_a_decode_error() {
        let err = serde_json::from_str::<Receipt>(r#"{"received_at": "19/03/2017"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid timestamp"));
    }
}
