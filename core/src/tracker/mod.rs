//! Document state tracker.
//!
//! Holds the active threat model, its last-synced stash and the dirty flag,
//! and routes persistence through the configured storage provider.

pub mod command;
pub mod events;
pub mod manager;
pub mod services;
mod state;

pub use command::{Command, Outcome};
pub use events::TrackerEvent;
pub use manager::DocumentTracker;
pub use services::TrackerServices;
