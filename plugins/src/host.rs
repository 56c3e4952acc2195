use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use serde::Serialize;
use tmstore_core::api::HostBridge;

/// One line per notification on the shell's channel.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum HostMessage<'a> {
    ModelModified {
        modified: bool,
    },
    ModelClosed {
        #[serde(rename = "fileName")]
        file_name: &'a str,
    },
}

/// Reports the dirty flag and closed documents to a desktop shell as JSON
/// lines.
pub struct DesktopHostBridge<W: Write + Send> {
    out: Mutex<W>,
}

impl DesktopHostBridge<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl DesktopHostBridge<File> {
    /// Appends to `path`, creating it if needed.
    pub fn append_to(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write + Send> DesktopHostBridge<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn send(&self, message: &HostMessage<'_>) {
        let line = match serde_json::to_string(message) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(target: "tmstore.host", error = %e, "failed to encode host message");
                return;
            }
        };
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(e) = writeln!(out, "{line}").and_then(|_| out.flush()) {
            tracing::warn!(target: "tmstore.host", error = %e, "failed to notify host");
        }
    }
}

impl<W: Write + Send> HostBridge for DesktopHostBridge<W> {
    fn model_modified(&self, modified: bool) {
        tracing::debug!(target: "tmstore.host", stage = "host.modified", modified = modified);
        self.send(&HostMessage::ModelModified { modified });
    }

    fn model_closed(&self, file_name: &str) {
        tracing::debug!(target: "tmstore.host", stage = "host.closed", file_name = %file_name);
        self.send(&HostMessage::ModelClosed { file_name });
    }
}
