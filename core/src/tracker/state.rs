use crate::model::{Diagram, ModelError, ThreatModel, ThreatModelSummary};

/// Raw tracker fields. Mutated only through `DocumentTracker`.
#[derive(Debug, Clone, Default)]
pub struct TrackerState {
    /// Workspace listing from the last fetch-all.
    pub(crate) all: Vec<ThreatModelSummary>,
    pub(crate) data: ThreatModel,
    pub(crate) file_name: String,
    /// Compact JSON of `data` at the last synced point; empty when cleared.
    pub(crate) stash: String,
    pub(crate) modified: bool,
    pub(crate) selected_diagram: Option<Diagram>,
}

impl TrackerState {
    /// Resets every field and returns the file name that was active.
    pub(crate) fn clear(&mut self) -> String {
        let previous = std::mem::take(self);
        previous.file_name
    }

    /// Replaces the document and stashes it.
    pub(crate) fn stash_model(&mut self, model: ThreatModel) {
        self.stash = model.to_stash();
        self.data = model;
    }

    /// Re-stashes the live document.
    pub(crate) fn restash(&mut self) {
        self.stash = self.data.to_stash();
    }

    pub(crate) fn parsed_stash(&self) -> Result<Option<ThreatModel>, ModelError> {
        if self.stash.is_empty() {
            return Ok(None);
        }
        ThreatModel::from_json(&self.stash).map(Some)
    }

    pub fn workspace(&self) -> &[ThreatModelSummary] {
        &self.all
    }

    pub fn document(&self) -> &ThreatModel {
        &self.data
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn stash(&self) -> &str {
        &self.stash
    }

    pub fn selected_diagram(&self) -> Option<&Diagram> {
        self.selected_diagram.as_ref()
    }
}
