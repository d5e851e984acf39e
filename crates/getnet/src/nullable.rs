//! Lenient decoding for gateway response fields.
//!
//! The gateway sends `null` for string, list and flag fields it has no value
//! for. Those decode to the field's default, same as a missing key.

use serde::{Deserialize, Deserializer};

/// Decode `null` as `T::default()`. Pair with `#[serde(default)]` so a
/// missing key behaves the same way.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Record {
        #[serde(deserialize_with = "null_as_default")]
        name: String,
        #[serde(deserialize_with = "null_as_default")]
        tags: Vec<String>,
        #[serde(deserialize_with = "null_as_default")]
        flag: bool,
    }

    #[test]
    fn test_null_missing_and_present() {
        let r: Record = serde_json::from_str(r#"{"name": null, "tags": null, "flag": null}"#).unwrap();
        assert_eq!(r.name, "");
        assert!(r.tags.is_empty());
        assert!(!r.flag);

        let r: Record = serde_json::from_str("{}").unwrap();
        assert_eq!(r.name, "");

        let r: Record =
            serde_json::from_str(r#"{"name": "a", "tags": ["x"], "flag": true}"#).unwrap();
        assert_eq!(r.name, "a");
        assert_eq!(r.tags, vec!["x".to_string()]);
        assert!(r.flag);
    }

    #[test]
    fn test_wrong_type_still_fails() {
        assert!(serde_json::from_str::<Record>(r#"{"name": 5}"#).is_err());
    }
}
