//! `skillscout skills` - popular and trending skill statistics.

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::error::Result;
use crate::model::SkillStat;

#[derive(Args, Debug)]
pub struct SkillsArgs {
    /// Show only trending skills
    #[arg(long)]
    pub trending: bool,
}

pub fn run(ctx: &AppContext, args: &SkillsArgs) -> Result<()> {
    let directory = ctx.directory()?;
    let runtime = tokio::runtime::Runtime::new()?;
    let skills = runtime.block_on(directory.popular_skills())?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&skills)?);
        return Ok(());
    }

    if args.trending {
        println!("{}", "Trending skills".bold());
        print_stats(&skills.trending_skills);
    } else {
        println!(
            "{} ({} skills in the directory)",
            "Popular skills".bold(),
            skills.total_skills
        );
        print_stats(&skills.popular_skills);
    }
    Ok(())
}

fn print_stats(stats: &[SkillStat]) {
    if stats.is_empty() {
        println!("  (none)");
        return;
    }
    for stat in stats {
        let category = stat
            .category
            .as_deref()
            .map(|c| format!(" [{c}]"))
            .unwrap_or_default();
        println!(
            "  {:<24}{} {} offered / {} wanted",
            stat.skill_name.cyan(),
            category.dimmed(),
            stat.offered_count.to_string().green(),
            stat.wanted_count.to_string().yellow()
        );
    }
}
