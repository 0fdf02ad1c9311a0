//! rosterguard application crate: configuration, logging, CLI and the demo
//! server that puts the admission layer in front of toy handlers.

pub mod cli;
pub mod config;
pub mod policy;
pub mod server;

pub use config::{AppConfig, ConfigError};
