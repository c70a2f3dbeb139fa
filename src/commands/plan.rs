//! `plan` - build the resource graph and show it

use crate::Context;
use crate::cli::PlanArgs;
use crate::ui;
use anyhow::Result;

pub fn run(ctx: &Context, args: &PlanArgs) -> Result<()> {
    let (config, plan) = super::build_from_config(&args.config.config)?;

    if let Some(path) = &args.out {
        plan.save(path)?;
        if !ctx.quiet {
            ui::success(&format!("Plan written to {}", path.display()));
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    ui::header(&format!("Plan: {}", config.resource_name));

    if plan.resources.is_empty() {
        ui::dim("createRdsPostgres is off - no resources will be created");
    } else {
        for declaration in &plan.resources {
            ui::resource(&declaration.kind, &declaration.name);
            if ctx.verbose > 0 {
                for (key, value) in &declaration.properties {
                    ui::kv(key, &value.render(false));
                }
                if !declaration.depends_on.is_empty() {
                    ui::kv("dependsOn", &declaration.depends_on.join(", "));
                }
            }
        }
    }

    ui::section("Outputs");
    for (name, value) in plan.outputs.entries() {
        ui::kv(name, &value.render(false));
    }

    if !ctx.quiet {
        println!();
        ui::info(&format!(
            "{} resource(s) declared in {}",
            plan.resources.len(),
            plan.outputs.region
        ));
    }

    Ok(())
}
