//! Command implementations for fwrelay-cli

pub mod chat;
pub mod query;

pub use chat::chat;
pub use query::query;
