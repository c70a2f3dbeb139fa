//! `diff` - compare two saved plan documents
//!
//! Secrets compare equal, so a plan that only regenerated its password
//! or name suffix reports the suffixed names and nothing else.

use crate::Context;
use crate::cli::DiffArgs;
use crate::plan::Plan;
use crate::ui;
use anyhow::Result;
use colored::Colorize;
use resgraph::diff_graphs;

pub fn run(ctx: &Context, args: &DiffArgs) -> Result<()> {
    let old = Plan::load(&args.old)?;
    let new = Plan::load(&args.new)?;

    let diff = diff_graphs(&old.resources, &new.resources);

    if diff.is_empty() {
        if !ctx.quiet {
            ui::success("Plans are structurally identical");
        }
        return Ok(());
    }

    ui::header("Plan diff");
    for name in &diff.added {
        println!("{} {}", "+".green().bold(), name);
    }
    for name in &diff.removed {
        println!("{} {}", "-".red().bold(), name);
    }
    for change in &diff.changed {
        println!(
            "{} {} ({})",
            "~".yellow().bold(),
            change.name,
            change.fields.join(", ")
        );
    }

    if !ctx.quiet {
        println!();
        ui::warn(&format!("{} declaration(s) differ", diff.total()));
    }

    Ok(())
}
