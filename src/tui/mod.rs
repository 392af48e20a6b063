//! TUI components for skillscout.
//!
//! This module provides the interactive discovery screen using ratatui.

pub mod discover;

pub use discover::{DiscoverTui, run_discover_tui};
