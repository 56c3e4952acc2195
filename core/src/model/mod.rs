//! Threat-model document types.
//!
//! The document itself stays an open JSON object so unknown fields survive a
//! load/save round trip; only the handful of fields the tracker reasons about
//! get typed accessors.

pub mod diagram;
pub mod document;
pub mod summary;
pub mod update;

pub use diagram::{Diagram, DiagramId};
pub use document::{ModelError, ThreatModel};
pub use summary::ThreatModelSummary;
pub use update::ThreatModelUpdate;
