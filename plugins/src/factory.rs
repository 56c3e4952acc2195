use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use tmstore_core::api::{
    AppConfig, DocumentTracker, HostBridge, Messages, Notifier, ProviderConfig, StorageProvider,
    TrackerServices,
};

use crate::host::DesktopHostBridge;
use crate::provider::{DesktopShellProvider, LocalFileProvider, RemoteRepoProvider};

/// Provider for the configured `kind`. Fails for a remote table without a repo.
pub fn build_provider(cfg: &ProviderConfig) -> Result<Arc<dyn StorageProvider>> {
    match cfg {
        ProviderConfig::Local(local) => Ok(Arc::new(LocalFileProvider::new(
            local.directory.clone(),
            local.format,
        ))),
        ProviderConfig::Desktop(desktop) => Ok(Arc::new(DesktopShellProvider::new(desktop.format))),
        ProviderConfig::Remote(remote) => Ok(Arc::new(RemoteRepoProvider::new(remote)?)),
    }
}

/// Only a desktop session with the bridge enabled talks to a host shell.
pub fn build_host(cfg: &ProviderConfig) -> Result<Option<Arc<dyn HostBridge>>> {
    let ProviderConfig::Desktop(desktop) = cfg else {
        return Ok(None);
    };
    if !desktop.host_bridge {
        return Ok(None);
    }
    let host: Arc<dyn HostBridge> = match desktop.host_output.as_deref().map(str::trim) {
        Some(path) if !path.is_empty() => Arc::new(
            DesktopHostBridge::append_to(Path::new(path))
                .with_context(|| format!("open host output {path}"))?,
        ),
        _ => Arc::new(DesktopHostBridge::stderr()),
    };
    Ok(Some(host))
}

pub fn build_services(cfg: &AppConfig, notifier: Arc<dyn Notifier>) -> Result<TrackerServices> {
    let provider = build_provider(&cfg.provider)?;
    let mut services = TrackerServices::new(provider, notifier);
    if let Some(host) = build_host(&cfg.provider)? {
        services = services.with_host(host);
    }
    Ok(services)
}

/// Wires provider, host and `notifier` into a tracker speaking `cfg.ui.locale`.
pub fn build_tracker(cfg: &AppConfig, notifier: Arc<dyn Notifier>) -> Result<DocumentTracker> {
    let services = build_services(cfg, notifier)?;
    Ok(DocumentTracker::create(services, Messages::new(&cfg.ui.locale)))
}
