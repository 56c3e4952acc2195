//! Side-channel to an embedding host shell.
//!
//! A desktop shell uses these calls to decide whether to prompt before
//! closing. The tracker only calls `model_modified` when the dirty flag
//! actually flips.

pub trait HostBridge: Send + Sync {
    /// Called on each change of the dirty flag.
    fn model_modified(&self, modified: bool);
    /// Called when the document for `file_name` is closed.
    fn model_closed(&self, file_name: &str);
}
