//! Security group restricting database access to the VPC

use super::name_tags;
use resgraph::{Declaration, Value};
use std::collections::BTreeMap;

pub const KIND: &str = "aws:ec2:SecurityGroup";

/// PostgreSQL wire protocol port
const POSTGRES_PORT: i64 = 5432;

/// Security group allowing PostgreSQL traffic from inside the VPC and
/// all egress
#[derive(Debug, Clone)]
pub struct SecurityGroup {
    /// Logical name, e.g. `demo-db-security-group`
    pub logical_name: String,
    pub vpc_id: String,
    /// CIDR block of the VPC, used as the ingress source
    pub vpc_cidr: String,
    pub tag_name: String,
}

impl SecurityGroup {
    pub fn declaration(self) -> Declaration {
        Declaration::new(KIND, self.logical_name)
            .prop("vpcId", self.vpc_id)
            .prop("description", "Security group for Serverless PostgreSQL")
            .prop(
                "ingress",
                Value::List(vec![rule(
                    "tcp",
                    POSTGRES_PORT,
                    POSTGRES_PORT,
                    &self.vpc_cidr,
                    Some("Allow PostgreSQL access from within the VPC"),
                )]),
            )
            .prop(
                "egress",
                Value::List(vec![rule("-1", 0, 0, "0.0.0.0/0", None)]),
            )
            .prop("tags", name_tags(&self.tag_name))
    }
}

fn rule(
    protocol: &str,
    from_port: i64,
    to_port: i64,
    cidr_block: &str,
    description: Option<&str>,
) -> Value {
    let mut entries = BTreeMap::new();
    entries.insert("protocol".to_string(), Value::from(protocol));
    entries.insert("fromPort".to_string(), Value::from(from_port));
    entries.insert("toPort".to_string(), Value::from(to_port));
    entries.insert(
        "cidrBlocks".to_string(),
        Value::List(vec![Value::from(cidr_block)]),
    );
    if let Some(description) = description {
        entries.insert("description".to_string(), Value::from(description));
    }
    Value::Map(entries)
}
