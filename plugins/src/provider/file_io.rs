use std::path::Path;

use anyhow::Context;
use tmstore_core::api::{SaveFormat, ThreatModel};

pub async fn read_model(path: &Path) -> anyhow::Result<ThreatModel> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read threat model {}", path.display()))?;
    let model = ThreatModel::from_json(&raw)
        .with_context(|| format!("{} is not a threat model document", path.display()))?;
    Ok(model)
}

pub fn render(model: &ThreatModel, format: SaveFormat) -> anyhow::Result<String> {
    let text = match format {
        SaveFormat::Pretty => serde_json::to_string_pretty(model)?,
        SaveFormat::Compact => serde_json::to_string(model)?,
    };
    Ok(text)
}

/// Writes through a sibling temp file and a rename so a failed write never
/// truncates the previous copy.
pub async fn write_model(path: &Path, model: &ThreatModel, format: SaveFormat) -> anyhow::Result<()> {
    let text = render(model, format)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    tokio::fs::write(&tmp, text)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    tokio::fs::rename(&tmp, path)
        .await
        .with_context(|| format!("failed to replace {}", path.display()))?;
    tracing::debug!(
        target: "tmstore.files",
        stage = "files.write",
        path = %path.display(),
        format = ?format
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model() -> ThreatModel {
        ThreatModel::from_value(json!({"summary": {"title": "T"}, "detail": {"diagrams": []}}))
            .unwrap()
    }

    #[test]
    fn test_render_formats() {
        let pretty = render(&model(), SaveFormat::Pretty).unwrap();
        let compact = render(&model(), SaveFormat::Compact).unwrap();
        assert!(pretty.contains('\n'));
        assert!(!compact.contains('\n'));
        assert_eq!(ThreatModel::from_json(&pretty).unwrap(), model());
    }

    #[tokio::test]
    async fn test_write_then_read_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("T.json");

        write_model(&path, &model(), SaveFormat::Compact).await.unwrap();

        assert_eq!(read_model(&path).await.unwrap(), model());
        assert!(!dir.path().join("nested").join("T.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_read_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        let err = read_model(&path).await.unwrap_err();
        assert!(err.to_string().contains("is not a threat model document"));
    }
}
