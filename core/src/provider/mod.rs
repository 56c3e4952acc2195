//! Storage provider seam.
//!
//! The tracker talks to exactly one provider, chosen once at startup. Concrete
//! providers live in the plugins crate.

pub mod kind;
pub mod r#trait;

pub use kind::ProviderKind;
pub use r#trait::StorageProvider;
