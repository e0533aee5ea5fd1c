//! Replies received from a Wiz bulb.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A decoded reply datagram.
///
/// The shape is not validated beyond being well-formed JSON. Bulbs answer
/// with `{"method": ..., "result": {...}}` on success and
/// `{"method": ..., "error": {...}}` when they reject a command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reply(Value);

impl Reply {
    pub(crate) fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes).map(Reply)
    }

    pub fn method(&self) -> Option<&str> {
        self.0.get("method").and_then(|m| m.as_str())
    }

    pub fn result(&self) -> Option<&Value> {
        self.0.get("result")
    }

    /// The error object the bulb sent back, if it rejected the command.
    pub fn device_error(&self) -> Option<&Value> {
        self.0.get("error")
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}
