use std::io::{self, Write};
use std::sync::Mutex;

use tmstore_core::api::Notifier;

/// Prints toasts to a terminal stream (stderr by default) and logs them.
pub struct ConsoleNotifier<W: Write + Send> {
    out: Mutex<W>,
}

impl ConsoleNotifier<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn print(&self, prefix: &str, message: &str) {
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        // A closed terminal is not worth failing a save over.
        let _ = writeln!(out, "{prefix}{message}");
    }
}

impl<W: Write + Send> Notifier for ConsoleNotifier<W> {
    fn success(&self, message: &str) {
        tracing::info!(target: "tmstore.notify", toast = "success", message = %message);
        self.print("", message);
    }

    fn error(&self, message: &str) {
        tracing::warn!(target: "tmstore.notify", toast = "error", message = %message);
        self.print("error: ", message);
    }
}

/// Notifier for headless sessions: toasts only reach the log.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(target: "tmstore.notify", toast = "success", message = %message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "tmstore.notify", toast = "error", message = %message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_prefixes_errors() {
        let n = ConsoleNotifier::new(Vec::new());
        n.success("Threat model successfully saved : a.json");
        n.error("Failed to update threat model");

        let out = String::from_utf8(n.into_inner()).unwrap();
        assert_eq!(
            out,
            "Threat model successfully saved : a.json\nerror: Failed to update threat model\n"
        );
    }
}
