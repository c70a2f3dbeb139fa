//! Cluster and instance parameter groups
//!
//! The parameter-group family is derived from the engine version
//! string: anything in the 16 line maps to `aurora-postgresql16`,
//! everything else falls back to `aurora-postgresql15`.

use resgraph::Declaration;

pub const CLUSTER_KIND: &str = "aws:rds:ClusterParameterGroup";
pub const INSTANCE_KIND: &str = "aws:rds:ParameterGroup";

/// Map an engine version string to its parameter-group family
pub fn family_for(engine_version: &str) -> &'static str {
    if engine_version.starts_with("16") {
        "aurora-postgresql16"
    } else {
        "aurora-postgresql15"
    }
}

/// Parameter group applied to the cluster
#[derive(Debug, Clone)]
pub struct ClusterParameterGroup {
    /// Logical name, e.g. `demo-cluster-param-group`
    pub logical_name: String,
    /// Physical name, suffixed to survive repeated deployments
    pub name: String,
    pub engine_version: String,
}

impl ClusterParameterGroup {
    pub fn declaration(self) -> Declaration {
        Declaration::new(CLUSTER_KIND, self.logical_name)
            .prop("family", family_for(&self.engine_version))
            .prop("description", "Cluster parameter group")
            .prop("name", self.name)
    }
}

/// Parameter group applied to each cluster instance
#[derive(Debug, Clone)]
pub struct InstanceParameterGroup {
    /// Logical name, e.g. `demo-instance-param-group`
    pub logical_name: String,
    /// Physical name, suffixed to survive repeated deployments
    pub name: String,
    pub engine_version: String,
}

impl InstanceParameterGroup {
    pub fn declaration(self) -> Declaration {
        Declaration::new(INSTANCE_KIND, self.logical_name)
            .prop("family", family_for(&self.engine_version))
            .prop("description", "Instance parameter group")
            .prop("name", self.name)
    }
}
