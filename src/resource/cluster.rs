//! Aurora PostgreSQL Serverless v2 cluster

use super::name_tags;
use resgraph::{Declaration, Value};
use std::collections::BTreeMap;

pub const KIND: &str = "aws:rds:Cluster";

/// Engine identifier shared by the cluster and its instances
pub const ENGINE: &str = "aurora-postgresql";

/// Master username fixed by the original deployment
pub const MASTER_USERNAME: &str = "postgres";

/// The serverless cluster itself
#[derive(Debug, Clone)]
pub struct Cluster {
    /// Logical name; also used as the cluster identifier
    pub logical_name: String,
    pub engine_version: String,
    pub database_name: String,
    /// Reference to the generated password's `result`
    pub master_password: Value,
    pub min_capacity: f64,
    pub max_capacity: f64,
    /// Reference to the subnet group's `name`
    pub db_subnet_group_name: Value,
    /// Reference to the security group's `id`
    pub security_group_id: Value,
    /// Reference to the cluster parameter group's `name`
    pub cluster_parameter_group_name: Value,
    pub tag_name: String,
}

impl Cluster {
    pub fn declaration(self) -> Declaration {
        let mut scaling = BTreeMap::new();
        scaling.insert("minCapacity".to_string(), Value::from(self.min_capacity));
        scaling.insert("maxCapacity".to_string(), Value::from(self.max_capacity));

        Declaration::new(KIND, self.logical_name.clone())
            .prop("clusterIdentifier", self.logical_name)
            .prop("engine", ENGINE)
            .prop("engineMode", "provisioned")
            .prop("engineVersion", self.engine_version)
            .prop("databaseName", self.database_name)
            .prop("masterUsername", MASTER_USERNAME)
            .prop("masterPassword", self.master_password)
            .prop("serverlessv2ScalingConfiguration", Value::Map(scaling))
            .prop("storageType", "aurora-iopt1")
            .prop("dbSubnetGroupName", self.db_subnet_group_name)
            .prop(
                "vpcSecurityGroupIds",
                Value::List(vec![self.security_group_id]),
            )
            .prop("skipFinalSnapshot", true)
            .prop(
                "dbClusterParameterGroupName",
                self.cluster_parameter_group_name,
            )
            .prop("tags", name_tags(&self.tag_name))
    }
}
