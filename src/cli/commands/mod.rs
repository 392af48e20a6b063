//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - `run()` function to execute the command

use crate::app::AppContext;
use crate::cli::Commands;
use crate::error::Result;

pub mod browse;
pub mod search;
pub mod skills;

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Browse(args) => browse::run(ctx, args),
        Commands::Search(args) => search::run(ctx, args),
        Commands::Skills(args) => skills::run(ctx, args),
    }
}
