//! Client-side state container for threat-model documents.
//!
//! [`tracker::DocumentTracker`] owns the active document, its stash and the
//! dirty flag. Storage, host and notification collaborators are injected as
//! trait objects; implementations live in `tmstore-plugins`.

pub mod api;
pub mod config;
pub mod error;
pub mod host;
pub mod model;
pub mod notify;
pub mod provider;
pub mod tracker;
