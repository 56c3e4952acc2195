use std::path::Path;

use async_trait::async_trait;
use tmstore_core::api::{
    ProviderKind, SaveFormat, StorageProvider, ThreatModel, ThreatModelSummary,
};

use super::file_io;
use crate::demo;

/// Desktop shell session. The shell hands over a file path when it opens a
/// model and every save goes back to that path.
pub struct DesktopShellProvider {
    format: SaveFormat,
}

impl DesktopShellProvider {
    pub fn new(format: SaveFormat) -> Self {
        Self { format }
    }

    async fn write(&self, model: &ThreatModel, target: &str) -> anyhow::Result<()> {
        if target.trim().is_empty() {
            anyhow::bail!("no file is open for this threat model");
        }
        file_io::write_model(Path::new(target), model, self.format).await
    }
}

/// An existing file at `path` wins over a demo titled `name`.
async fn load(path: &Path, name: &str) -> anyhow::Result<ThreatModel> {
    if !tokio::fs::try_exists(path).await? {
        if let Some(model) = demo::find(name)? {
            tracing::debug!(target: "tmstore.desktop", stage = "desktop.fetch.demo", name = %name);
            return Ok(model);
        }
    }
    file_io::read_model(path).await
}

#[async_trait]
impl StorageProvider for DesktopShellProvider {
    fn name(&self) -> &str {
        "desktop"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Desktop
    }

    async fn fetch_all(&self) -> anyhow::Result<Vec<ThreatModelSummary>> {
        demo::summaries()
    }

    /// `name` is a demo title or a path on disk.
    async fn fetch(&self, name: &str) -> anyhow::Result<ThreatModel> {
        load(Path::new(name), name).await
    }

    async fn create(&self, model: &ThreatModel, target: &str) -> anyhow::Result<()> {
        self.write(model, target).await
    }

    async fn update(&self, model: &ThreatModel, target: &str) -> anyhow::Result<()> {
        self.write(model, target).await
    }
}
