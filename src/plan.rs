//! Plan document - what a planning run hands to the orchestration engine
//!
//! JSON on disk: metadata, the resource graph in declaration order, and
//! the output bundle. Secrets are redacted on serialization.

use crate::outputs::OutputBundle;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use resgraph::Graph;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Metadata attached to every plan document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanMetadata {
    /// Version of the tool that produced the plan
    pub tool_version: String,
    /// When the plan was produced
    pub generated_at: DateTime<Utc>,
}

/// A complete planning result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub metadata: PlanMetadata,
    pub resources: Graph,
    pub outputs: OutputBundle,
}

impl Plan {
    /// Wrap a graph and outputs with fresh metadata
    pub fn new(resources: Graph, outputs: OutputBundle) -> Self {
        Self {
            metadata: PlanMetadata {
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
                generated_at: Utc::now(),
            },
            resources,
            outputs,
        }
    }

    /// Load a plan document from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read plan file: {}", path.display()))?;
        serde_json::from_str(&content).context("Invalid plan document")
    }

    /// Write the plan document as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize plan")?;
        fs::write(path, content)
            .with_context(|| format!("Could not write plan file: {}", path.display()))?;
        Ok(())
    }
}
