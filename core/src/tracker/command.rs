use serde::{Deserialize, Serialize};

use super::manager::DocumentTracker;
use crate::error::TrackerError;
use crate::model::{Diagram, ThreatModel, ThreatModelSummary, ThreatModelUpdate};

/// Every operation a caller can ask of the tracker.
///
/// Serialized as `{"op": "<name>", ...}` so hosts can drive a tracker over a
/// line-oriented channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Clear,
    FetchAll,
    Fetch { name: String },
    Create,
    Save,
    Restore,
    Stash,
    MarkModified,
    MarkNotModified,
    MarkDiagramModified { diagram: Diagram },
    SaveDiagram { diagram: Diagram },
    SelectDiagram { diagram: Diagram },
    Select { model: ThreatModel },
    Update { update: ThreatModelUpdate },
    SetContributors { names: Vec<String> },
    Contributors,
    IsDirty,
    IsLegacyVersion,
    Show,
}

impl Command {
    /// Commands that only read state.
    pub fn is_query(&self) -> bool {
        matches!(
            self,
            Command::Contributors | Command::IsDirty | Command::IsLegacyVersion | Command::Show
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum Outcome {
    Done,
    Listing(Vec<ThreatModelSummary>),
    DiagramIndex(Option<usize>),
    Contributors(Vec<String>),
    Dirty(bool),
    Legacy(bool),
    Document(ThreatModel),
}

impl DocumentTracker {
    pub async fn dispatch(&mut self, command: Command) -> Result<Outcome, TrackerError> {
        tracing::trace!(target: "tmstore.tracker", stage = "tracker.dispatch", command = ?command);
        let outcome = match command {
            Command::Clear => {
                self.clear();
                Outcome::Done
            }
            Command::FetchAll => Outcome::Listing(self.fetch_all().await?.to_vec()),
            Command::Fetch { name } => {
                self.fetch(&name).await?;
                Outcome::Done
            }
            Command::Create => {
                self.create_model().await;
                Outcome::Done
            }
            Command::Save => {
                self.save_model().await;
                Outcome::Done
            }
            Command::Restore => {
                self.restore().await?;
                Outcome::Done
            }
            Command::Stash => {
                self.stash_current();
                Outcome::Done
            }
            Command::MarkModified => {
                self.mark_modified();
                Outcome::Done
            }
            Command::MarkNotModified => {
                self.mark_not_modified();
                Outcome::Done
            }
            Command::MarkDiagramModified { diagram } => {
                Outcome::DiagramIndex(self.mark_diagram_modified(&diagram))
            }
            Command::SaveDiagram { diagram } => {
                Outcome::DiagramIndex(Some(self.save_diagram(diagram)?))
            }
            Command::SelectDiagram { diagram } => {
                self.select_diagram(diagram);
                Outcome::Done
            }
            Command::Select { model } => {
                self.select(model);
                Outcome::Done
            }
            Command::Update { update } => {
                self.update(update);
                Outcome::Done
            }
            Command::SetContributors { names } => {
                self.set_contributors(names);
                Outcome::Done
            }
            Command::Contributors => Outcome::Contributors(self.contributors()),
            Command::IsDirty => Outcome::Dirty(self.is_dirty()),
            Command::IsLegacyVersion => Outcome::Legacy(self.is_legacy_version()),
            Command::Show => Outcome::Document(self.document().clone()),
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_command_wire_shape() {
        let cmd: Command = serde_json::from_value(json!({"op": "fetch", "name": "Demo"})).unwrap();
        assert_eq!(
            cmd,
            Command::Fetch {
                name: "Demo".to_string()
            }
        );

        let cmd: Command = serde_json::from_value(json!({
            "op": "save_diagram",
            "diagram": {"id": 2, "version": "2.1.0", "cells": []}
        }))
        .unwrap();
        match cmd {
            Command::SaveDiagram { diagram } => {
                assert_eq!(diagram.id, 2.into());
                assert_eq!(diagram.version.as_deref(), Some("2.1.0"));
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let cmd: Command =
            serde_json::from_value(json!({"op": "update", "update": {"fileName": "x.json"}}))
                .unwrap();
        assert!(matches!(cmd, Command::Update { .. }));
    }

    #[test]
    fn test_unknown_op_rejected() {
        assert!(serde_json::from_value::<Command>(json!({"op": "explode"})).is_err());
    }

    #[test]
    fn test_outcome_wire_shape() {
        assert_eq!(
            serde_json::to_value(Outcome::Dirty(true)).unwrap(),
            json!({"outcome": "dirty", "value": true})
        );
        assert_eq!(
            serde_json::to_value(Outcome::Done).unwrap(),
            json!({"outcome": "done"})
        );
    }

    #[test]
    fn test_is_query() {
        assert!(Command::IsDirty.is_query());
        assert!(!Command::Save.is_query());
    }
}
