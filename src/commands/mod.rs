//! CLI command implementations

pub mod diff;
pub mod outputs;
pub mod plan;
pub mod validate;

use crate::config::StackConfig;
use crate::plan::Plan;
use crate::provider::StaticProvider;
use anyhow::Result;
use std::path::Path;

/// Load the configuration and build a fresh plan from it
///
/// Shared front half of `plan` and `outputs`: the provider lookups come
/// from the config's `[provider]` section, the randomness from the
/// thread RNG.
pub(crate) fn build_from_config(path: &Path) -> Result<(StackConfig, Plan)> {
    let config = StackConfig::load(path)?;
    let provider = StaticProvider::from(&config.provider);
    let mut rng = rand::rng();
    let plan = crate::stack::build(&config, &provider, &mut rng)?;
    Ok((config, plan))
}
