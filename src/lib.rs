pub mod app;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod model;
pub mod service;
pub mod test_utils;
pub mod tui;

pub use error::{Result, ScoutError};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
