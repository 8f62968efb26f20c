//! Structured failure bodies returned by the attendance server.
//!
//! Raw bodies are never shown to the user: everything goes through
//! `display_message`, which only ever yields the `message` field or a fixed
//! fallback.

use serde_json::Value;

/// Discriminator sent with a check-out rejected by the early-checkout policy.
pub const EARLY_CHECKOUT_REQUIRED: &str = "EARLY_CHECKOUT_REQUIRED";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FailureBody {
    raw: Option<Value>,
}

impl FailureBody {
    /// Body that could not be parsed as JSON (or was empty).
    pub fn empty() -> Self {
        Self { raw: None }
    }

    pub fn from_value(value: Value) -> Self {
        Self { raw: Some(value) }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(v) => Self::from_value(v),
            Err(_) => Self::empty(),
        }
    }

    /// `code` field, when it is a string.
    pub fn code(&self) -> Option<&str> {
        self.raw.as_ref()?.get("code")?.as_str()
    }

    /// True when the server refused a check-out under the early-checkout policy.
    pub fn is_early_checkout(&self) -> bool {
        self.code() == Some(EARLY_CHECKOUT_REQUIRED)
    }

    /// `message` as a string, or a list of strings joined with ", ".
    /// Blank messages count as absent.
    pub fn message(&self) -> Option<String> {
        let msg = match self.raw.as_ref()?.get("message")? {
            Value::String(s) => s.clone(),
            Value::Array(items) => {
                let parts: Option<Vec<&str>> = items.iter().map(Value::as_str).collect();
                parts?.join(", ")
            }
            _ => return None,
        };

        if msg.trim().is_empty() { None } else { Some(msg) }
    }

    /// Message to display, or `fallback` when nothing usable is present.
    pub fn display_message(&self, fallback: &str) -> String {
        self.message().unwrap_or_else(|| fallback.to_string())
    }
}
