use thiserror::Error;

use crate::model::{DiagramId, ModelError};

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("provider error: {0}")]
    Provider(#[from] anyhow::Error),
    #[error("invalid document: {0}")]
    Model(#[from] ModelError),
    #[error("nothing stashed to restore")]
    NoStash,
    #[error("threat model has no summary.title")]
    MissingTitle,
    #[error("diagram {id} not found in threat model")]
    DiagramNotFound { id: DiagramId },
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("tracker failed: {0}")]
    Tracker(#[from] TrackerError),
    #[error("command failed: {0}")]
    Command(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}
