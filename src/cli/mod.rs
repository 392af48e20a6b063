//! CLI module - command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod commands;

/// skillscout - browse and search the SkillSwap member directory
#[derive(Parser, Debug)]
#[command(name = "skillscout")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable machine-readable JSON output
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (default: ~/.config/skillscout/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory service base URL (overrides config)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactively browse and search members (TUI)
    Browse(commands::browse::BrowseArgs),

    /// One-shot free-text member search
    Search(commands::search::SearchArgs),

    /// Show popular and trending skills
    Skills(commands::skills::SkillsArgs),
}
