//! User-visible notifications ("toasts").

pub mod messages;

pub use messages::{Messages, MSG_OPEN_FAILED, MSG_SAVED, MSG_SAVE_FAILED};

/// Receives already-localized notification text.
pub trait Notifier: Send + Sync {
    /// Shows a success toast.
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}
