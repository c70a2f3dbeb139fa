//! `validate` - check the configuration without building anything

use crate::Context;
use crate::cli::ConfigArgs;
use crate::config::StackConfig;
use crate::ui;
use anyhow::Result;

pub fn run(ctx: &Context, args: &ConfigArgs) -> Result<()> {
    let config = StackConfig::load(&args.config)?;
    config.validate()?;

    if !ctx.quiet {
        ui::success(&format!(
            "Configuration is valid (resourceName = '{}', createRdsPostgres = {})",
            config.resource_name, config.create_rds_postgres
        ));
    }
    Ok(())
}
