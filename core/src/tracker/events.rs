use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::DiagramId;
use crate::provider::ProviderKind;

/// Broadcast after each committed state change.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TrackerEvent {
    Cleared {
        file_name: String,
        timestamp: DateTime<Utc>,
    },
    WorkspaceListed {
        count: usize,
        timestamp: DateTime<Utc>,
    },
    Loaded {
        title: Option<String>,
        timestamp: DateTime<Utc>,
    },
    Selected {
        title: Option<String>,
        timestamp: DateTime<Utc>,
    },
    Saved {
        provider: ProviderKind,
        created: bool,
        timestamp: DateTime<Utc>,
    },
    SaveFailed {
        provider: ProviderKind,
        error: String,
        timestamp: DateTime<Utc>,
    },
    Restored {
        title: Option<String>,
        timestamp: DateTime<Utc>,
    },
    ModifiedChanged {
        modified: bool,
        timestamp: DateTime<Utc>,
    },
    DiagramSaved {
        id: DiagramId,
        index: usize,
        timestamp: DateTime<Utc>,
    },
    DiagramSelected {
        id: DiagramId,
        timestamp: DateTime<Utc>,
    },
    FieldsUpdated {
        timestamp: DateTime<Utc>,
    },
    ContributorsUpdated {
        count: usize,
        timestamp: DateTime<Utc>,
    },
}
