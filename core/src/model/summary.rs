use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of the workspace listing.
///
/// Repository APIs answer with bare model names while other backends may
/// describe entries as objects, so the entry is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreatModelSummary(Value);

impl ThreatModelSummary {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self(Value::String(name.into()))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Display name: the string itself, `summary.title`, or `name`.
    pub fn name(&self) -> Option<&str> {
        match &self.0 {
            Value::String(s) => Some(s),
            other => other
                .get("summary")
                .and_then(|s| s.get("title"))
                .and_then(Value::as_str)
                .or_else(|| other.get("name").and_then(Value::as_str)),
        }
    }
}
