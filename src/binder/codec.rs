//! Stored value encoding
//!
//! Values are stored as JSON text: the toggle as a JSON boolean, the hold
//! time as a JSON string holding its decimal form.

use serde::Deserialize;
use serde_json::Value;

/// Raw stored text, or `default` when the key is absent or empty
pub fn stored_or_default(stored: Option<String>, default: String) -> String {
    match stored {
        Some(text) if !text.is_empty() => text,
        _ => default,
    }
}

pub fn encode_toggle(enabled: bool) -> String {
    Value::Bool(enabled).to_string()
}

pub fn decode_toggle(text: &str) -> Result<bool, serde_json::Error> {
    serde_json::from_str(text)
}

pub fn encode_hold_time(value: &str) -> String {
    Value::String(value.to_string()).to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredHoldTime {
    Text(String),
    Number(i64),
}

/// Decode a stored hold time. Bare JSON integers are accepted as well.
pub fn decode_hold_time(text: &str) -> Result<String, serde_json::Error> {
    Ok(match serde_json::from_str(text)? {
        StoredHoldTime::Text(value) => value,
        StoredHoldTime::Number(n) => n.to_string(),
    })
}
