#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use tmstore_core::api::{
    DocumentTracker, HostBridge, Messages, Notifier, ProviderKind, StorageProvider, ThreatModel,
    ThreatModelSummary, TrackerServices,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    FetchAll,
    Fetch(String),
    Create(String),
    Update(String),
}

pub struct FakeProvider {
    kind: ProviderKind,
    models: Mutex<HashMap<String, ThreatModel>>,
    listing: Mutex<Vec<ThreatModelSummary>>,
    fail_saves: AtomicBool,
    fail_fetches: AtomicBool,
    calls: Mutex<Vec<Call>>,
    saved: Mutex<Vec<ThreatModel>>,
}

impl FakeProvider {
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            models: Mutex::new(HashMap::new()),
            listing: Mutex::new(Vec::new()),
            fail_saves: AtomicBool::new(false),
            fail_fetches: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
            saved: Mutex::new(Vec::new()),
        }
    }

    pub fn with_model(self, name: &str, model: ThreatModel) -> Self {
        self.models.lock().unwrap().insert(name.to_string(), model);
        self
    }

    pub fn with_listing(self, names: &[&str]) -> Self {
        *self.listing.lock().unwrap() = names
            .iter()
            .map(|n| ThreatModelSummary::named(*n))
            .collect();
        self
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn fail_fetches(&self, fail: bool) {
        self.fail_fetches.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn saved(&self) -> Vec<ThreatModel> {
        self.saved.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_reachable(&self) -> anyhow::Result<()> {
        if self.fail_fetches.load(Ordering::SeqCst) {
            anyhow::bail!("backend unavailable");
        }
        Ok(())
    }

    fn save(&self, model: &ThreatModel) -> anyhow::Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            anyhow::bail!("backend unavailable");
        }
        self.saved.lock().unwrap().push(model.clone());
        Ok(())
    }
}

#[async_trait]
impl StorageProvider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn fetch_all(&self) -> anyhow::Result<Vec<ThreatModelSummary>> {
        self.record(Call::FetchAll);
        self.check_reachable()?;
        Ok(self.listing.lock().unwrap().clone())
    }

    async fn fetch(&self, name: &str) -> anyhow::Result<ThreatModel> {
        self.record(Call::Fetch(name.to_string()));
        self.check_reachable()?;
        self.models
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("model {name} not found"))
    }

    async fn create(&self, model: &ThreatModel, target: &str) -> anyhow::Result<()> {
        self.record(Call::Create(target.to_string()));
        self.save(model)
    }

    async fn update(&self, model: &ThreatModel, target: &str) -> anyhow::Result<()> {
        self.record(Call::Update(target.to_string()));
        self.save(model)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Modified(bool),
    Closed(String),
}

#[derive(Default)]
pub struct RecordingHost {
    calls: Mutex<Vec<HostCall>>,
}

impl RecordingHost {
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn modified_calls(&self) -> Vec<bool> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                HostCall::Modified(m) => Some(m),
                HostCall::Closed(_) => None,
            })
            .collect()
    }
}

impl HostBridge for RecordingHost {
    fn model_modified(&self, modified: bool) {
        self.calls.lock().unwrap().push(HostCall::Modified(modified));
    }

    fn model_closed(&self, file_name: &str) {
        self.calls
            .lock()
            .unwrap()
            .push(HostCall::Closed(file_name.to_string()));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Toast {
    Success(String),
    Error(String),
}

#[derive(Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.toasts
            .lock()
            .unwrap()
            .push(Toast::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.toasts
            .lock()
            .unwrap()
            .push(Toast::Error(message.to_string()));
    }
}

pub struct Harness {
    pub tracker: DocumentTracker,
    pub provider: Arc<FakeProvider>,
    pub host: Arc<RecordingHost>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn harness(provider: FakeProvider) -> Harness {
    let provider = Arc::new(provider);
    let host = Arc::new(RecordingHost::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let services =
        TrackerServices::new(provider.clone(), notifier.clone()).with_host(host.clone());
    Harness {
        tracker: DocumentTracker::create(services, Messages::default()),
        provider,
        host,
        notifier,
    }
}

pub fn sample_model(title: &str, version: Option<&str>) -> ThreatModel {
    let mut value = json!({
        "summary": {"title": title, "owner": "appsec", "description": "demo"},
        "detail": {
            "contributors": [{"name": "A"}, {"name": "B"}],
            "diagrams": [
                {"id": 0, "version": "2.2.0", "title": "Context", "cells": []},
                {"id": 1, "version": "2.2.0", "title": "Data flow", "cells": [{"shape": "actor"}]},
                {"id": 2, "version": "2.2.0", "title": "Deployment", "cells": []}
            ],
            "diagramTop": 3,
            "threatTop": 12
        }
    });
    if let Some(v) = version {
        value["version"] = json!(v);
    }
    ThreatModel::from_value(value).unwrap()
}
