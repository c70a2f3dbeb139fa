//! Typed declaration builders for the stack's resource kinds
//!
//! Each module wraps one resource kind: it knows the kind token, the
//! property names the engine expects, and the fixed values the stack
//! always uses. The builder in `stack.rs` wires them together.

use resgraph::Value;
use std::collections::BTreeMap;

/// Standard `tags = { Name = ... }` block applied to taggable resources
pub(crate) fn name_tags(name: &str) -> Value {
    let mut tags = BTreeMap::new();
    tags.insert("Name".to_string(), Value::from(name));
    Value::Map(tags)
}

pub mod cluster;
pub mod instance;
pub mod parameter_group;
pub mod password;
pub mod security_group;
pub mod subnet;
pub mod subnet_group;

pub use cluster::Cluster;
pub use instance::ClusterInstance;
pub use parameter_group::{ClusterParameterGroup, InstanceParameterGroup};
pub use password::RandomPassword;
pub use security_group::SecurityGroup;
pub use subnet::Subnet;
pub use subnet_group::SubnetGroup;
