pub mod cli;
pub mod document;
pub mod session;
