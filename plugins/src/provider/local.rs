use std::path::PathBuf;

use async_trait::async_trait;
use tmstore_core::api::{
    ProviderKind, SaveFormat, StorageProvider, ThreatModel, ThreatModelSummary,
};

use super::file_io;
use crate::demo;

/// Browser-style local login: models live as `<title>.json` in one directory.
pub struct LocalFileProvider {
    directory: PathBuf,
    format: SaveFormat,
}

impl LocalFileProvider {
    pub fn new(directory: impl Into<PathBuf>, format: SaveFormat) -> Self {
        Self {
            directory: directory.into(),
            format,
        }
    }

    /// Path separators in the target are flattened so a title can never
    /// escape the directory.
    fn path_for(&self, target: &str) -> PathBuf {
        let file: String = target
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        if file.ends_with(".json") {
            self.directory.join(file)
        } else {
            self.directory.join(format!("{file}.json"))
        }
    }
}

#[async_trait]
impl StorageProvider for LocalFileProvider {
    fn name(&self) -> &str {
        "local"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Local
    }

    async fn fetch_all(&self) -> anyhow::Result<Vec<ThreatModelSummary>> {
        demo::summaries()
    }

    /// A saved file wins over the bundled demo of the same title, so edits
    /// to a demo survive a reload.
    async fn fetch(&self, name: &str) -> anyhow::Result<ThreatModel> {
        let path = self.path_for(name);
        if !tokio::fs::try_exists(&path).await? {
            if let Some(model) = demo::find(name)? {
                tracing::debug!(target: "tmstore.local", stage = "local.fetch.demo", name = %name);
                return Ok(model);
            }
        }
        file_io::read_model(&path).await
    }

    async fn create(&self, model: &ThreatModel, target: &str) -> anyhow::Result<()> {
        let path = self.path_for(target);
        if tokio::fs::try_exists(&path).await? {
            anyhow::bail!("{} already exists", path.display());
        }
        file_io::write_model(&path, model, self.format).await
    }

    async fn update(&self, model: &ThreatModel, target: &str) -> anyhow::Result<()> {
        file_io::write_model(&self.path_for(target), model, self.format).await
    }
}
