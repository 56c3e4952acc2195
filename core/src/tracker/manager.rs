use chrono::Utc;
use tokio::sync::broadcast;

use super::events::TrackerEvent;
use super::services::TrackerServices;
use super::state::TrackerState;
use crate::error::TrackerError;
use crate::model::{Diagram, ThreatModel, ThreatModelSummary, ThreatModelUpdate};
use crate::notify::{Messages, MSG_SAVED, MSG_SAVE_FAILED};
use crate::provider::ProviderKind;

const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PersistMode {
    Create,
    Update,
}

/// State container for the active threat model.
///
/// One tracker per open document. All operations take `&mut self`, so
/// persistence calls on one instance are strictly sequential.
pub struct DocumentTracker {
    id: String,
    state: TrackerState,
    services: TrackerServices,
    messages: Messages,
    event_tx: broadcast::Sender<TrackerEvent>,
}

impl DocumentTracker {
    /// Builds a tracker with an empty document around the injected services.
    pub fn create(services: TrackerServices, messages: Messages) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(
            target: "tmstore.tracker",
            stage = "tracker.create",
            tracker = %id,
            provider = %services.provider.name(),
            kind = %services.provider.kind(),
            host = services.host.is_some(),
            locale = %messages.locale()
        );
        Self {
            id,
            state: TrackerState::default(),
            services,
            messages,
            event_tx,
        }
    }

    /// Clears the document (telling the host it closed) and drops the tracker.
    pub fn teardown(mut self) {
        self.clear();
        tracing::debug!(target: "tmstore.tracker", stage = "tracker.teardown", tracker = %self.id);
    }

    /// Kind of the configured provider; decides save targets and restore.
    pub fn provider_kind(&self) -> ProviderKind {
        self.services.provider.kind()
    }

    /// Catalog used for notification text.
    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Subscribes to committed state changes.
    pub fn subscribe(&self) -> broadcast::Receiver<TrackerEvent> {
        self.event_tx.subscribe()
    }

    fn emit(&self, event: TrackerEvent) {
        let _ = self.event_tx.send(event);
    }

    /// The live document; empty when nothing is loaded.
    pub fn document(&self) -> &ThreatModel {
        self.state.document()
    }

    /// Direct edit access for the editor. Callers report the edit with
    /// `mark_modified`.
    pub fn document_mut(&mut self) -> &mut ThreatModel {
        &mut self.state.data
    }

    /// Compact JSON of the last synced document.
    pub fn stash(&self) -> &str {
        self.state.stash()
    }

    /// File name reported to the host and used by desktop saves.
    pub fn file_name(&self) -> &str {
        self.state.file_name()
    }

    pub fn selected_diagram(&self) -> Option<&Diagram> {
        self.state.selected_diagram()
    }

    /// Listing from the last `fetch_all`.
    pub fn workspace(&self) -> &[ThreatModelSummary] {
        self.state.workspace()
    }

    /// Contributor names in document order.
    pub fn contributors(&self) -> Vec<String> {
        self.state.data.contributors()
    }

    /// True while there are edits not yet saved.
    pub fn is_dirty(&self) -> bool {
        self.state.modified
    }

    /// True for a loaded document whose version is missing or `1.x`.
    pub fn is_legacy_version(&self) -> bool {
        let data = &self.state.data;
        !data.is_empty() && data.version().map_or(true, |v| v.starts_with("1."))
    }

    /// Compares the live document with the parsed stash.
    pub fn has_unsynced_changes(&self) -> bool {
        match self.state.parsed_stash() {
            Ok(Some(stashed)) => stashed != self.state.data,
            Ok(None) | Err(_) => !self.state.data.is_empty(),
        }
    }

    /// Wipes every field and tells the host the previous file closed.
    pub fn clear(&mut self) {
        let file_name = self.state.clear();
        tracing::debug!(
            target: "tmstore.tracker",
            stage = "tracker.clear",
            tracker = %self.id,
            file_name = %file_name
        );
        if let Some(host) = &self.services.host {
            host.model_closed(&file_name);
        }
        self.emit(TrackerEvent::Cleared {
            file_name,
            timestamp: Utc::now(),
        });
    }

    /// Replaces the workspace listing with the provider's, order preserved.
    pub async fn fetch_all(&mut self) -> Result<&[ThreatModelSummary], TrackerError> {
        tracing::debug!(
            target: "tmstore.tracker",
            stage = "tracker.fetch_all.in",
            kind = %self.provider_kind()
        );
        let models = self.services.provider.fetch_all().await?;
        tracing::debug!(
            target: "tmstore.tracker",
            stage = "tracker.fetch_all.out",
            count = models.len()
        );
        self.state.all = models;
        self.emit(TrackerEvent::WorkspaceListed {
            count: self.state.all.len(),
            timestamp: Utc::now(),
        });
        Ok(&self.state.all)
    }

    /// Clears, then loads `name` from the provider.
    pub async fn fetch(&mut self, name: &str) -> Result<(), TrackerError> {
        self.clear();
        tracing::debug!(
            target: "tmstore.tracker",
            stage = "tracker.fetch.in",
            name = %name,
            kind = %self.provider_kind()
        );
        let model = self.services.provider.fetch(name).await?;
        self.state.stash_model(model);
        let title = self.state.data.title().map(str::to_string);
        tracing::debug!(
            target: "tmstore.tracker",
            stage = "tracker.fetch.out",
            title = ?title
        );
        self.emit(TrackerEvent::Loaded {
            title,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Persists a new model. Failures are reported through the notifier and
    /// leave the tracker untouched.
    pub async fn create_model(&mut self) {
        self.persist(PersistMode::Create).await;
    }

    /// Persists the current model. Same failure contract as `create_model`.
    pub async fn save_model(&mut self) {
        self.persist(PersistMode::Update).await;
    }

    async fn persist(&mut self, mode: PersistMode) {
        let kind = self.provider_kind();
        tracing::debug!(
            target: "tmstore.tracker",
            stage = "tracker.persist.in",
            mode = ?mode,
            kind = %kind,
            file_name = %self.state.file_name
        );

        if let Err(err) = self.try_persist(kind, mode).await {
            tracing::error!(
                target: "tmstore.tracker",
                stage = "tracker.persist.failed",
                mode = ?mode,
                kind = %kind,
                error = %err,
                "failed to save threat model"
            );
            self.services
                .notifier
                .error(self.messages.get(MSG_SAVE_FAILED));
            self.emit(TrackerEvent::SaveFailed {
                provider: kind,
                error: err.to_string(),
                timestamp: Utc::now(),
            });
            return;
        }

        if kind == ProviderKind::Remote {
            let text = format!(
                "{} : {}",
                self.messages.get(MSG_SAVED),
                self.state.file_name
            );
            self.services.notifier.success(&text);
        }
        self.stash_current();
        self.set_modified(false);
        tracing::debug!(target: "tmstore.tracker", stage = "tracker.persist.out", kind = %kind);
        self.emit(TrackerEvent::Saved {
            provider: kind,
            created: mode == PersistMode::Create,
            timestamp: Utc::now(),
        });
    }

    async fn try_persist(&self, kind: ProviderKind, mode: PersistMode) -> Result<(), TrackerError> {
        let data = &self.state.data;
        let target = match kind {
            ProviderKind::Local => {
                format!("{}.json", data.title().ok_or(TrackerError::MissingTitle)?)
            }
            ProviderKind::Desktop => self.state.file_name.clone(),
            ProviderKind::Remote => data.title().ok_or(TrackerError::MissingTitle)?.to_string(),
        };
        let provider = &self.services.provider;
        match mode {
            PersistMode::Create => provider.create(data, &target).await?,
            PersistMode::Update => provider.update(data, &target).await?,
        }
        Ok(())
    }

    /// Rolls the document back to the stash. Remote sessions re-fetch by the
    /// stashed title so edits to the title itself are undone too.
    pub async fn restore(&mut self) -> Result<(), TrackerError> {
        let stashed = self.state.parsed_stash()?.ok_or(TrackerError::NoStash)?;
        let kind = self.provider_kind();

        let original = if kind.is_file_based() {
            stashed
        } else {
            let title = stashed.title().ok_or(TrackerError::MissingTitle)?;
            tracing::debug!(
                target: "tmstore.tracker",
                stage = "tracker.restore.fetch",
                title = %title
            );
            self.services.provider.fetch(title).await?
        };

        self.state.stash_model(original);
        self.set_modified(false);
        self.emit(TrackerEvent::Restored {
            title: self.state.data.title().map(str::to_string),
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Re-stashes the live document; the dirty flag is left alone.
    pub fn stash_current(&mut self) {
        self.state.restash();
    }

    /// Raises the dirty flag.
    pub fn mark_modified(&mut self) {
        self.set_modified(true);
    }

    /// Lowers the dirty flag.
    pub fn mark_not_modified(&mut self) {
        self.set_modified(false);
    }

    /// Host and subscribers only hear about actual transitions.
    fn set_modified(&mut self, modified: bool) {
        if self.state.modified == modified {
            return;
        }
        self.state.modified = modified;
        tracing::debug!(
            target: "tmstore.tracker",
            stage = "tracker.modified",
            modified = modified
        );
        if let Some(host) = &self.services.host {
            host.model_modified(modified);
        }
        self.emit(TrackerEvent::ModifiedChanged {
            modified,
            timestamp: Utc::now(),
        });
    }

    /// Marks the document dirty and returns the diagram's index, if present.
    pub fn mark_diagram_modified(&mut self, diagram: &Diagram) -> Option<usize> {
        self.set_modified(true);
        let idx = self.state.data.diagram_index(&diagram.id);
        match idx {
            Some(idx) => tracing::debug!(
                target: "tmstore.tracker",
                stage = "tracker.diagram.modified",
                id = %diagram.id,
                index = idx
            ),
            None => tracing::warn!(
                target: "tmstore.tracker",
                stage = "tracker.diagram.modified",
                id = %diagram.id,
                "modified diagram is not part of the threat model"
            ),
        }
        idx
    }

    /// Writes `diagram` back into the document by id, selects it and adopts its
    /// version. The document is re-stashed but still has to be saved to the
    /// provider, so the dirty flag is raised.
    pub fn save_diagram(&mut self, diagram: Diagram) -> Result<usize, TrackerError> {
        let idx = self
            .state
            .data
            .diagram_index(&diagram.id)
            .ok_or_else(|| TrackerError::DiagramNotFound {
                id: diagram.id.clone(),
            })?;

        self.state.data.replace_diagram(idx, &diagram);
        self.state.data.set_version(diagram.version.as_deref());
        tracing::debug!(
            target: "tmstore.tracker",
            stage = "tracker.diagram.saved",
            id = %diagram.id,
            title = ?diagram.title(),
            index = idx
        );
        let id = diagram.id.clone();
        self.state.selected_diagram = Some(diagram);
        self.state.restash();
        self.set_modified(true);
        self.emit(TrackerEvent::DiagramSaved {
            id,
            index: idx,
            timestamp: Utc::now(),
        });
        Ok(idx)
    }

    /// Makes `diagram` the selected one. The document is not touched.
    pub fn select_diagram(&mut self, diagram: Diagram) {
        tracing::debug!(
            target: "tmstore.tracker",
            stage = "tracker.diagram.selected",
            id = %diagram.id,
            title = ?diagram.title()
        );
        let id = diagram.id.clone();
        self.state.selected_diagram = Some(diagram);
        self.emit(TrackerEvent::DiagramSelected {
            id,
            timestamp: Utc::now(),
        });
    }

    /// Adopts `model` as if it had just been loaded.
    pub fn select(&mut self, model: ThreatModel) {
        self.state.stash_model(model);
        self.emit(TrackerEvent::Selected {
            title: self.state.data.title().map(str::to_string),
            timestamp: Utc::now(),
        });
    }

    /// Applies the fields present in `update`. An empty update is a no-op.
    pub fn update(&mut self, update: ThreatModelUpdate) {
        if update.is_empty() {
            return;
        }
        tracing::debug!(target: "tmstore.tracker", stage = "tracker.update", update = ?update);
        let ThreatModelUpdate {
            version,
            diagram_top,
            threat_top,
            file_name,
        } = update;
        if let Some(version) = version {
            self.state.data.set_version(Some(&version));
        }
        if let Some(top) = diagram_top {
            self.state.data.set_diagram_top(top);
        }
        if let Some(top) = threat_top {
            self.state.data.set_threat_top(top);
        }
        if let Some(file_name) = file_name {
            self.state.file_name = file_name;
        }
        self.emit(TrackerEvent::FieldsUpdated {
            timestamp: Utc::now(),
        });
    }

    /// Replaces the contributor list, keeping the given order.
    pub fn set_contributors(&mut self, names: Vec<String>) {
        let count = names.len();
        self.state.data.set_contributors(names);
        self.emit(TrackerEvent::ContributorsUpdated {
            count,
            timestamp: Utc::now(),
        });
    }
}

impl std::fmt::Debug for DocumentTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentTracker")
            .field("id", &self.id)
            .field("provider", &self.services.provider.name())
            .field("state", &self.state)
            .finish()
    }
}
