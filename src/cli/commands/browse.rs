//! `skillscout browse` - interactive discovery TUI.

use clap::Args;

use crate::app::AppContext;
use crate::discovery::DiscoveryController;
use crate::error::Result;
use crate::tui::run_discover_tui;

#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Start with a skill filter applied
    #[arg(long)]
    pub skill: Option<String>,

    /// Start with a location filter applied
    #[arg(long)]
    pub location: Option<String>,

    /// Start at a specific browse page
    #[arg(long)]
    pub page: Option<u32>,
}

pub fn run(ctx: &AppContext, args: &BrowseArgs) -> Result<()> {
    let directory = ctx.directory()?;
    let runtime = tokio::runtime::Runtime::new()?;
    // Background fetches run on the runtime's workers while this thread
    // drives the terminal; the guard makes spawns from here land there.
    let _guard = runtime.enter();

    let controller = DiscoveryController::new(directory, ctx.config.discovery_settings());
    if args.skill.is_some() || args.location.is_some() {
        controller.submit_filters(args.skill.as_deref(), args.location.as_deref());
    } else {
        controller.refresh();
    }
    if let Some(page) = args.page {
        controller.submit_page(page);
    }
    controller.load_popular_skills();

    run_discover_tui(controller)
}
