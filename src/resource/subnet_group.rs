//! DB subnet group spanning the two private subnets

use super::name_tags;
use resgraph::{Declaration, Value};

pub const KIND: &str = "aws:rds:SubnetGroup";

/// Subnet group the cluster's instances are placed into
#[derive(Debug, Clone)]
pub struct SubnetGroup {
    /// Logical name, e.g. `demo-db-subnet-group`
    pub logical_name: String,
    /// Physical name, suffixed to survive repeated deployments
    pub name: String,
    /// References to the declared subnets' ids
    pub subnet_ids: Vec<Value>,
    pub tag_name: String,
}

impl SubnetGroup {
    pub fn declaration(self) -> Declaration {
        Declaration::new(KIND, self.logical_name)
            .prop("name", self.name)
            .prop("subnetIds", Value::List(self.subnet_ids))
            .prop("description", "Subnet group for Serverless PostgreSQL")
            .prop("tags", name_tags(&self.tag_name))
    }
}
