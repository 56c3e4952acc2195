use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Partial update applied by `DocumentTracker::update`. Absent fields are
/// left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatModelUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagram_top: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threat_top: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl ThreatModelUpdate {
    pub fn is_empty(&self) -> bool {
        self.version.is_none()
            && self.diagram_top.is_none()
            && self.threat_top.is_none()
            && self.file_name.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_camel_case_fields() {
        let update: ThreatModelUpdate =
            serde_json::from_value(json!({"fileName": "a.json", "diagramTop": 3})).unwrap();
        assert_eq!(update.file_name.as_deref(), Some("a.json"));
        assert_eq!(update.diagram_top, Some(json!(3)));
        assert!(update.version.is_none());
        assert!(!update.is_empty());
        assert!(ThreatModelUpdate::default().is_empty());
    }
}
