pub mod demo;
pub mod factory;
pub mod host;
pub mod notify;
pub mod provider;
