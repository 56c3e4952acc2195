use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Diagram identifier. Older documents number their diagrams, newer ones
/// use string ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiagramId {
    Number(i64),
    Text(String),
}

impl DiagramId {
    /// True if the raw `id` value of a stored diagram refers to this id.
    pub fn matches(&self, raw: &Value) -> bool {
        match (self, raw) {
            (DiagramId::Number(n), Value::Number(v)) => v.as_i64() == Some(*n),
            (DiagramId::Text(s), Value::String(v)) => s == v,
            _ => false,
        }
    }
}

impl fmt::Display for DiagramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagramId::Number(n) => write!(f, "{n}"),
            DiagramId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for DiagramId {
    fn from(value: i64) -> Self {
        DiagramId::Number(value)
    }
}

impl From<&str> for DiagramId {
    fn from(value: &str) -> Self {
        DiagramId::Text(value.to_string())
    }
}

/// A versioned sub-view inside `detail.diagrams`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    pub id: DiagramId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Cells, title, thumbnail and whatever else the editor stores.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Diagram {
    pub fn new(id: impl Into<DiagramId>) -> Self {
        Self {
            id: id.into(),
            version: None,
            extra: Map::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.extra.get("title").and_then(Value::as_str)
    }

    pub(crate) fn to_value(&self) -> Value {
        let mut map = self.extra.clone();
        let id = match &self.id {
            DiagramId::Number(n) => Value::from(*n),
            DiagramId::Text(s) => Value::from(s.as_str()),
        };
        map.insert("id".to_string(), id);
        if let Some(version) = &self.version {
            map.insert("version".to_string(), Value::from(version.as_str()));
        }
        Value::Object(map)
    }
}
