use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::diagram::{Diagram, DiagramId};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("threat model must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
    #[error("invalid threat model JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The active threat-model document.
///
/// An empty model (`{}`) is what the tracker holds when nothing is loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreatModel(Map<String, Value>);

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl ThreatModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts any JSON object; anything else is rejected.
    pub fn from_value(value: Value) -> Result<Self, ModelError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ModelError::NotAnObject {
                found: kind_of(&other),
            }),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compact JSON used as the stash representation.
    pub fn to_stash(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }

    /// `summary.title`
    pub fn title(&self) -> Option<&str> {
        self.0
            .get("summary")
            .and_then(|s| s.get("title"))
            .and_then(Value::as_str)
    }

    /// Sets `summary.title`, creating `summary` if needed.
    pub fn set_title(&mut self, title: impl Into<String>) {
        let summary = object_entry(&mut self.0, "summary");
        summary.insert("title".to_string(), Value::String(title.into()));
    }

    /// Top-level `version`; `null` reads as absent.
    pub fn version(&self) -> Option<&str> {
        self.0.get("version").and_then(Value::as_str)
    }

    /// `None` removes the field.
    pub fn set_version(&mut self, version: Option<&str>) {
        match version {
            Some(v) => {
                self.0
                    .insert("version".to_string(), Value::String(v.to_string()));
            }
            None => {
                self.0.remove("version");
            }
        }
    }

    pub fn detail(&self) -> Option<&Map<String, Value>> {
        self.0.get("detail").and_then(Value::as_object)
    }

    fn detail_mut(&mut self) -> &mut Map<String, Value> {
        object_entry(&mut self.0, "detail")
    }

    pub fn set_diagram_top(&mut self, value: Value) {
        self.detail_mut().insert("diagramTop".to_string(), value);
    }

    pub fn set_threat_top(&mut self, value: Value) {
        self.detail_mut().insert("threatTop".to_string(), value);
    }

    /// Contributor names in document order. Entries without a string `name`
    /// are skipped.
    pub fn contributors(&self) -> Vec<String> {
        self.detail()
            .and_then(|d| d.get("contributors"))
            .and_then(Value::as_array)
            .map(|list| {
                list.iter()
                    .filter_map(|c| c.get("name").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Replaces `detail.contributors` with `{"name": ..}` entries in the given order.
    pub fn set_contributors<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = names
            .into_iter()
            .map(|name| {
                let mut entry = Map::new();
                entry.insert("name".to_string(), Value::String(name.into()));
                Value::Object(entry)
            })
            .collect();
        self.detail_mut()
            .insert("contributors".to_string(), Value::Array(list));
    }

    fn diagram_values(&self) -> &[Value] {
        self.detail()
            .and_then(|d| d.get("diagrams"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Diagrams that parse; malformed entries are left out.
    pub fn diagrams(&self) -> Vec<Diagram> {
        self.diagram_values()
            .iter()
            .filter_map(|v| serde_json::from_value(v.clone()).ok())
            .collect()
    }

    /// Position of the diagram with `id` in `detail.diagrams`.
    pub fn diagram_index(&self, id: &DiagramId) -> Option<usize> {
        self.diagram_values()
            .iter()
            .position(|d| d.get("id").is_some_and(|raw| id.matches(raw)))
    }

    /// Overwrites the diagram at `idx`. Returns false when `idx` is out of
    /// range or the document has no diagram list.
    pub fn replace_diagram(&mut self, idx: usize, diagram: &Diagram) -> bool {
        let slot = self
            .0
            .get_mut("detail")
            .and_then(|d| d.get_mut("diagrams"))
            .and_then(Value::as_array_mut)
            .and_then(|list| list.get_mut(idx));
        match slot {
            Some(slot) => {
                *slot = diagram.to_value();
                true
            }
            None => false,
        }
    }
}

impl TryFrom<Value> for ThreatModel {
    type Error = ModelError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

/// Returns the object under `key`, replacing a missing or non-object value
/// with an empty object.
fn object_entry<'a>(map: &'a mut Map<String, Value>, key: &str) -> &'a mut Map<String, Value> {
    let slot = map
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(inner) => inner,
        _ => unreachable!("slot was just set to an object"),
    }
}
