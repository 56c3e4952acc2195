use std::sync::Arc;

use crate::host::HostBridge;
use crate::notify::Notifier;
use crate::provider::StorageProvider;

/// Collaborators injected into a tracker at construction.
#[derive(Clone)]
pub struct TrackerServices {
    pub provider: Arc<dyn StorageProvider>,
    pub notifier: Arc<dyn Notifier>,
    /// Present only when running inside a host shell.
    pub host: Option<Arc<dyn HostBridge>>,
}

impl TrackerServices {
    pub fn new(provider: Arc<dyn StorageProvider>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            provider,
            notifier,
            host: None,
        }
    }

    /// Attaches a host shell; without one, host notifications are skipped.
    pub fn with_host(mut self, host: Arc<dyn HostBridge>) -> Self {
        self.host = Some(host);
        self
    }
}
