//! Cluster instances (serverless primary and read replica)

use super::cluster::ENGINE;
use super::name_tags;
use resgraph::{Declaration, Value};

pub const KIND: &str = "aws:rds:ClusterInstance";

/// Promotion tier for the replica: high enough that failover never
/// prefers it over the primary
pub const REPLICA_PROMOTION_TIER: i64 = 15;

/// One serverless instance inside the cluster
#[derive(Debug, Clone)]
pub struct ClusterInstance {
    /// Logical name; also used as the instance identifier
    pub logical_name: String,
    /// Reference to the cluster's `id`
    pub cluster_id: Value,
    /// Reference to the cluster's `engineVersion`
    pub engine_version: Value,
    /// Reference to the instance parameter group's `name`
    pub db_parameter_group_name: Value,
    pub availability_zone: String,
    /// Set on the replica only
    pub promotion_tier: Option<i64>,
    pub tag_name: String,
}

impl ClusterInstance {
    pub fn declaration(self) -> Declaration {
        let mut declaration = Declaration::new(KIND, self.logical_name.clone())
            .prop("identifier", self.logical_name)
            .prop("clusterIdentifier", self.cluster_id)
            .prop("instanceClass", "db.serverless")
            .prop("engine", ENGINE)
            .prop("engineVersion", self.engine_version)
            .prop("publiclyAccessible", false)
            .prop("dbParameterGroupName", self.db_parameter_group_name)
            .prop("availabilityZone", self.availability_zone)
            .prop("tags", name_tags(&self.tag_name));
        if let Some(tier) = self.promotion_tier {
            declaration = declaration.prop("promotionTier", tier);
        }
        declaration
    }
}
