use crate::config::DEFAULT_CONFIG_FILE;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "auroractl")]
#[command(version)]
#[command(about = "Plan an Aurora PostgreSQL Serverless v2 stack", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the resource graph and show the resulting plan
    Plan(PlanArgs),

    /// Show the stack's output bundle
    Outputs(OutputsArgs),

    /// Check the configuration without building anything
    Validate(ConfigArgs),

    /// Compare two saved plan documents
    Diff(DiffArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args)]
pub struct ConfigArgs {
    /// Path to the stack configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

#[derive(clap::Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Write the plan document to this path
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Print the plan document as JSON instead of the summary
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args)]
pub struct OutputsArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Reveal sensitive output values
    #[arg(long)]
    pub show_secrets: bool,
}

#[derive(clap::Args)]
pub struct DiffArgs {
    /// Previously saved plan document
    pub old: PathBuf,

    /// Newly saved plan document
    pub new: PathBuf,
}
