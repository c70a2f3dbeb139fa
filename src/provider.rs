//! Ambient provider lookups
//!
//! The builder never talks to a cloud API. Everything it needs from the
//! environment (region, default VPC, availability zones) comes through
//! the [`Provider`] trait so the CLI can feed pre-resolved values from
//! the config file and tests can feed fixed fakes.

use crate::config::ProviderSettings;
use anyhow::Result;

/// Default VPC attributes consumed by the builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VpcInfo {
    pub id: String,
    pub cidr_block: String,
}

/// Read-only lookups against the ambient cloud environment
pub trait Provider {
    /// Region the stack is planned for
    fn region(&self) -> Result<String>;

    /// The account's default VPC
    fn default_vpc(&self) -> Result<VpcInfo>;

    /// Availability zones in "available" state, provider list order
    fn availability_zones(&self) -> Result<Vec<String>>;
}

/// Provider backed by pre-resolved values
#[derive(Debug, Clone)]
pub struct StaticProvider {
    region: String,
    vpc: VpcInfo,
    zones: Vec<String>,
}

impl StaticProvider {
    pub fn new(region: impl Into<String>, vpc: VpcInfo, zones: Vec<String>) -> Self {
        Self {
            region: region.into(),
            vpc,
            zones,
        }
    }
}

impl From<&ProviderSettings> for StaticProvider {
    fn from(settings: &ProviderSettings) -> Self {
        Self::new(
            settings.region.clone(),
            VpcInfo {
                id: settings.vpc_id.clone(),
                cidr_block: settings.vpc_cidr.clone(),
            },
            settings.availability_zones.clone(),
        )
    }
}

impl Provider for StaticProvider {
    fn region(&self) -> Result<String> {
        Ok(self.region.clone())
    }

    fn default_vpc(&self) -> Result<VpcInfo> {
        Ok(self.vpc.clone())
    }

    fn availability_zones(&self) -> Result<Vec<String>> {
        Ok(self.zones.clone())
    }
}
