//! `skillscout search` - one-shot free-text member search.

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::error::Result;
use crate::model::UserPreview;
use crate::service::MAX_SEARCH_LIMIT;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Free-text query (names, locations, and skills are matched server-side)
    pub query: String,

    /// Maximum number of results
    #[arg(long, short = 'n')]
    pub limit: Option<u32>,
}

pub fn run(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    let limit = args
        .limit
        .unwrap_or(ctx.config.discovery.search_limit)
        .clamp(1, MAX_SEARCH_LIMIT);

    let directory = ctx.directory()?;
    let runtime = tokio::runtime::Runtime::new()?;
    let results = runtime.block_on(directory.search_users(&args.query, limit))?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.users.is_empty() {
        println!("No members match '{}'", args.query);
        return Ok(());
    }

    println!(
        "{} member(s) matching '{}':\n",
        results.total_count.to_string().bold(),
        args.query.cyan()
    );
    for user in &results.users {
        print_user(user);
    }
    Ok(())
}

fn print_user(user: &UserPreview) {
    let location = user
        .location
        .as_deref()
        .map(|l| format!(" ({l})"))
        .unwrap_or_default();
    println!("  {}{}", user.name.bold(), location.dimmed());

    if !user.top_offered_skills.is_empty() {
        let offered: Vec<&str> = user
            .top_offered_skills
            .iter()
            .map(|s| s.skill_name.as_str())
            .collect();
        println!("    offers: {}", offered.join(", ").green());
    }
    if !user.top_wanted_skills.is_empty() {
        let wanted: Vec<&str> = user
            .top_wanted_skills
            .iter()
            .map(|s| s.skill_name.as_str())
            .collect();
        println!("    wants:  {}", wanted.join(", ").yellow());
    }
}
