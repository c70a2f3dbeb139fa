//! Stack output bundle
//!
//! One value per exported name. When the stack is disabled every string
//! output carries the `not-created` sentinel; when enabled the database
//! outputs are references into the graph and the password is a secret.

use resgraph::Value;
use serde::{Deserialize, Serialize};

/// Sentinel value for outputs of a stack that was not provisioned
pub const NOT_CREATED: &str = "not-created";

/// Exported outputs of one planning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputBundle {
    pub cluster_endpoint: Value,
    pub cluster_reader_endpoint: Value,
    pub db_name_output: Value,
    pub db_username: Value,
    /// Always sensitive, sentinel included
    pub db_password_secret: Value,
    pub vpc_id: String,
    pub created: bool,
    pub region: String,
}

impl OutputBundle {
    /// Sentinel outputs for a disabled stack
    ///
    /// Region and VPC id are still live: they come from read-only
    /// lookups that happen regardless of the enable flag.
    pub fn sentinel(region: String, vpc_id: String) -> Self {
        Self {
            cluster_endpoint: Value::from(NOT_CREATED),
            cluster_reader_endpoint: Value::from(NOT_CREATED),
            db_name_output: Value::from(NOT_CREATED),
            db_username: Value::from(NOT_CREATED),
            db_password_secret: Value::secret(NOT_CREATED),
            vpc_id,
            created: false,
            region,
        }
    }

    /// Names and values in stable export order, for rendering
    pub fn entries(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("clusterEndpoint", self.cluster_endpoint.clone()),
            ("clusterReaderEndpoint", self.cluster_reader_endpoint.clone()),
            ("dbNameOutput", self.db_name_output.clone()),
            ("dbUsername", self.db_username.clone()),
            ("dbPasswordSecret", self.db_password_secret.clone()),
            ("vpcId", Value::from(self.vpc_id.clone())),
            ("created", Value::from(self.created)),
            ("region", Value::from(self.region.clone())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_bundle_keeps_live_lookups() {
        let outputs = OutputBundle::sentinel("us-east-1".into(), "vpc-123".into());
        assert!(!outputs.created);
        assert_eq!(outputs.region, "us-east-1");
        assert_eq!(outputs.vpc_id, "vpc-123");
        assert_eq!(outputs.cluster_endpoint.as_str(), Some(NOT_CREATED));
        assert_eq!(outputs.db_password_secret.as_secret(), Some(NOT_CREATED));
        assert!(outputs.db_password_secret.is_secret());
    }

    #[test]
    fn serialized_bundle_never_contains_the_secret() {
        let mut outputs = OutputBundle::sentinel("us-east-1".into(), "vpc-123".into());
        outputs.db_password_secret = Value::secret("super-secret-pw");
        let json = serde_json::to_string(&outputs).unwrap();
        assert!(!json.contains("super-secret-pw"));
    }
}
