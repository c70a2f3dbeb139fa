use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

/// Default configuration file name, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "aurora.toml";

// ============================================================================
// Stack Config
// ============================================================================

/// Stack configuration record
///
/// Keys are camelCase to match the external configuration surface
/// (`createRdsPostgres`, `resourceName`, ...). `resourceName` and
/// `dbName` are required; everything else has a default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackConfig {
    /// Whether to declare the RDS stack at all
    #[serde(default)]
    pub create_rds_postgres: bool,

    /// Base name for every declared resource
    pub resource_name: String,

    /// Initial database name on the cluster
    pub db_name: String,

    /// Aurora PostgreSQL engine version
    #[serde(default = "default_engine_version")]
    pub db_engine_version: String,

    /// Serverless v2 minimum capacity (ACUs)
    #[serde(default = "default_min_capacity")]
    pub min_capacity: f64,

    /// Serverless v2 maximum capacity (ACUs)
    #[serde(default = "default_max_capacity")]
    pub max_capacity: f64,

    /// CIDR block for the first private subnet
    #[serde(default = "default_subnet1_cidr")]
    pub private_subnet1_cidr: String,

    /// CIDR block for the second private subnet
    #[serde(default = "default_subnet2_cidr")]
    pub private_subnet2_cidr: String,

    /// Availability-zone override for the first subnet / primary instance
    #[serde(default)]
    pub availability_zone1: Option<String>,

    /// Availability-zone override for the second subnet / replica instance
    #[serde(default)]
    pub availability_zone2: Option<String>,

    /// Pre-resolved ambient provider lookups
    #[serde(default)]
    pub provider: ProviderSettings,
}

fn default_engine_version() -> String {
    "16.6".to_string()
}

const fn default_min_capacity() -> f64 {
    0.5
}

const fn default_max_capacity() -> f64 {
    4.0
}

fn default_subnet1_cidr() -> String {
    "172.31.100.0/24".to_string()
}

fn default_subnet2_cidr() -> String {
    "172.31.101.0/24".to_string()
}

/// Ambient lookups the orchestration engine would otherwise resolve live
///
/// These stand in for the read-only provider queries (region, default
/// VPC, availability zones) so plans can be produced offline and tests
/// can supply fixed values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSettings {
    /// Provider region name
    #[serde(default = "default_region")]
    pub region: String,

    /// Id of the account's default VPC
    #[serde(default = "default_vpc_id")]
    pub vpc_id: String,

    /// CIDR block of the default VPC
    #[serde(default = "default_vpc_cidr")]
    pub vpc_cidr: String,

    /// Availability zones in "available" state, provider list order
    #[serde(default = "default_zones")]
    pub availability_zones: Vec<String>,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_vpc_id() -> String {
    "vpc-default".to_string()
}

fn default_vpc_cidr() -> String {
    "172.31.0.0/16".to_string()
}

fn default_zones() -> Vec<String> {
    vec![
        "us-east-1a".to_string(),
        "us-east-1b".to_string(),
        "us-east-1c".to_string(),
    ]
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            region: default_region(),
            vpc_id: default_vpc_id(),
            vpc_cidr: default_vpc_cidr(),
            availability_zones: default_zones(),
        }
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Configuration errors raised before any resource is declared
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("resourceName must not be empty")]
    EmptyResourceName,

    #[error("dbName must not be empty")]
    EmptyDbName,

    #[error("minCapacity ({min}) must not exceed maxCapacity ({max})")]
    CapacityOrder { min: f64, max: f64 },

    #[error("invalid CIDR block for {field}: '{value}'")]
    InvalidCidr { field: &'static str, value: String },
}

static CIDR_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})/(\d{1,2})$")
        .expect("CIDR regex is valid")
});

/// Check a dotted-quad CIDR block for syntactic validity
fn valid_cidr(block: &str) -> bool {
    let Some(captures) = CIDR_RE.captures(block) else {
        return false;
    };
    for octet in 1..=4 {
        let Ok(value) = captures[octet].parse::<u16>() else {
            return false;
        };
        if value > 255 {
            return false;
        }
    }
    matches!(captures[5].parse::<u8>(), Ok(prefix) if prefix <= 32)
}

impl StackConfig {
    /// Load the configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file: {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).context("Invalid TOML format in stack config")?;
        Ok(config)
    }

    /// Validate invariants that defaults alone cannot guarantee
    ///
    /// Runs before any declaration so a bad record never produces a
    /// partial graph.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resource_name.trim().is_empty() {
            return Err(ConfigError::EmptyResourceName);
        }
        if self.db_name.trim().is_empty() {
            return Err(ConfigError::EmptyDbName);
        }
        if self.min_capacity > self.max_capacity {
            return Err(ConfigError::CapacityOrder {
                min: self.min_capacity,
                max: self.max_capacity,
            });
        }
        if !valid_cidr(&self.private_subnet1_cidr) {
            return Err(ConfigError::InvalidCidr {
                field: "privateSubnet1Cidr",
                value: self.private_subnet1_cidr.clone(),
            });
        }
        if !valid_cidr(&self.private_subnet2_cidr) {
            return Err(ConfigError::InvalidCidr {
                field: "privateSubnet2Cidr",
                value: self.private_subnet2_cidr.clone(),
            });
        }
        Ok(())
    }
}

/// Minimal valid config for builder tests
#[cfg(test)]
pub(crate) fn demo_config() -> StackConfig {
    StackConfig {
        create_rds_postgres: true,
        resource_name: "demo".to_string(),
        db_name: "app".to_string(),
        db_engine_version: default_engine_version(),
        min_capacity: default_min_capacity(),
        max_capacity: default_max_capacity(),
        private_subnet1_cidr: default_subnet1_cidr(),
        private_subnet2_cidr: default_subnet2_cidr(),
        availability_zone1: None,
        availability_zone2: None,
        provider: ProviderSettings::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_applied_on_minimal_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "resourceName = \"demo\"\ndbName = \"app\"").unwrap();

        let config = StackConfig::load(file.path()).unwrap();
        assert!(!config.create_rds_postgres);
        assert_eq!(config.db_engine_version, "16.6");
        assert_eq!(config.min_capacity, 0.5);
        assert_eq!(config.max_capacity, 4.0);
        assert_eq!(config.private_subnet1_cidr, "172.31.100.0/24");
        assert_eq!(config.private_subnet2_cidr, "172.31.101.0/24");
        assert!(config.availability_zone1.is_none());
        assert!(config.availability_zone2.is_none());
        assert_eq!(config.provider.region, "us-east-1");
    }

    #[test]
    fn missing_required_field_fails_to_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "resourceName = \"demo\"").unwrap();
        assert!(StackConfig::load(file.path()).is_err());
    }

    #[test]
    fn empty_names_are_rejected() {
        let mut config = demo_config();
        config.resource_name = "  ".to_string();
        assert_eq!(config.validate(), Err(ConfigError::EmptyResourceName));

        let mut config = demo_config();
        config.db_name = String::new();
        assert_eq!(config.validate(), Err(ConfigError::EmptyDbName));
    }

    #[test]
    fn min_capacity_must_not_exceed_max() {
        let mut config = demo_config();
        config.min_capacity = 8.0;
        config.max_capacity = 4.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::CapacityOrder { min: 8.0, max: 4.0 })
        );
    }

    #[test]
    fn equal_capacities_are_allowed() {
        let mut config = demo_config();
        config.min_capacity = 2.0;
        config.max_capacity = 2.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_cidrs_pass_validation() {
        assert!(demo_config().validate().is_ok());
    }

    #[test]
    fn malformed_cidrs_are_rejected() {
        for bad in ["172.31.100.0", "172.31.100.0/40", "300.0.0.0/24", "banana"] {
            let mut config = demo_config();
            config.private_subnet1_cidr = bad.to_string();
            assert!(
                matches!(
                    config.validate(),
                    Err(ConfigError::InvalidCidr { field: "privateSubnet1Cidr", .. })
                ),
                "expected '{bad}' to be rejected"
            );
        }
    }
}
