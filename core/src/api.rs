//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `tmstore_core::api` instead of reaching into internal modules.

pub use crate::config::{
    load_default, AppConfig, DesktopProviderConfig, LocalProviderConfig, LoggingConfig,
    ProviderConfig, RemoteProviderConfig, SaveFormat, UiConfig,
};
pub use crate::error::{CliError, TrackerError};
pub use crate::host::HostBridge;
pub use crate::model::{
    Diagram, DiagramId, ModelError, ThreatModel, ThreatModelSummary, ThreatModelUpdate,
};
pub use crate::notify::{Messages, Notifier, MSG_OPEN_FAILED, MSG_SAVED, MSG_SAVE_FAILED};
pub use crate::provider::{ProviderKind, StorageProvider};
pub use crate::tracker::{Command, DocumentTracker, Outcome, TrackerEvent, TrackerServices};
