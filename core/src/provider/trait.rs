use async_trait::async_trait;

use super::kind::ProviderKind;
use crate::model::{ThreatModel, ThreatModelSummary};

#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;
    fn kind(&self) -> ProviderKind;
    /// Models visible in the current workspace, in backend order.
    async fn fetch_all(&self) -> anyhow::Result<Vec<ThreatModelSummary>>;
    /// Loads one model by name.
    async fn fetch(&self, name: &str) -> anyhow::Result<ThreatModel>;
    /// `target` is the file name for local/desktop providers and the model
    /// title for remote ones.
    async fn create(&self, model: &ThreatModel, target: &str) -> anyhow::Result<()>;
    /// Overwrites an existing model at `target`.
    async fn update(&self, model: &ThreatModel, target: &str) -> anyhow::Result<()>;
}
