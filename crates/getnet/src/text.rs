use serde::Serializer;

use crate::constants::SOFT_DESCRIPTOR_MAX_LEN;

/// Truncate `value` to at most `max` characters. Never fails.
pub fn clamp(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((idx, _)) => value[..idx].to_string(),
        None => value.to_string(),
    }
}

/// Serializer for statement soft descriptors, clamped to the gateway limit.
pub fn serialize_soft_descriptor<S>(value: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&clamp(value, SOFT_DESCRIPTOR_MAX_LEN))
}
