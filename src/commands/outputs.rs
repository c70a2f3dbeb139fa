//! `outputs` - print the stack's output bundle

use crate::Context;
use crate::cli::OutputsArgs;
use crate::ui;
use anyhow::Result;

pub fn run(ctx: &Context, args: &OutputsArgs) -> Result<()> {
    let (config, plan) = super::build_from_config(&args.config.config)?;

    ui::header(&format!("Outputs: {}", config.resource_name));
    for (name, value) in plan.outputs.entries() {
        ui::kv(name, &value.render(args.show_secrets));
    }

    if !args.show_secrets && !ctx.quiet {
        println!();
        ui::dim("sensitive values are masked, pass --show-secrets to reveal them");
    }

    Ok(())
}
