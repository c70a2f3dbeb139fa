//! Structural diff between two graphs
//!
//! Used to check plan idempotence and to compare saved plan documents.
//! Secret values compare equal to any other secret: a regenerated
//! password is not drift.

use crate::graph::{Declaration, Graph};
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// A declaration present in both graphs but with differing content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangedResource {
    /// Logical name of the declaration
    pub name: String,
    /// Which fields differ: `kind`, `dependsOn`, or property keys
    pub fields: Vec<String>,
}

/// Result of diffing two graphs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDiff {
    /// Logical names only present in the new graph
    pub added: Vec<String>,
    /// Logical names only present in the old graph
    pub removed: Vec<String>,
    /// Declarations present in both but differing
    pub changed: Vec<ChangedResource>,
}

impl GraphDiff {
    /// Check if the graphs are structurally identical
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    /// Total number of differing declarations
    pub fn total(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len()
    }
}

/// Compute the structural diff between two graphs
pub fn diff_graphs(old: &Graph, new: &Graph) -> GraphDiff {
    let mut diff = GraphDiff::default();

    for declaration in old {
        if !new.contains(&declaration.name) {
            diff.removed.push(declaration.name.clone());
        }
    }

    for declaration in new {
        match old.get(&declaration.name) {
            None => diff.added.push(declaration.name.clone()),
            Some(previous) => {
                let fields = changed_fields(previous, declaration);
                if !fields.is_empty() {
                    diff.changed.push(ChangedResource {
                        name: declaration.name.clone(),
                        fields,
                    });
                }
            }
        }
    }

    diff
}

fn changed_fields(old: &Declaration, new: &Declaration) -> Vec<String> {
    let mut fields = Vec::new();

    if old.kind != new.kind {
        fields.push("kind".to_string());
    }
    if old.depends_on != new.depends_on {
        fields.push("dependsOn".to_string());
    }

    let mut keys: Vec<&String> = old.properties.keys().collect();
    for key in new.properties.keys() {
        if !old.properties.contains_key(key) {
            keys.push(key);
        }
    }
    for key in keys {
        let equivalent = match (old.properties.get(key), new.properties.get(key)) {
            (Some(a), Some(b)) => values_equivalent(a, b),
            _ => false,
        };
        if !equivalent {
            fields.push(key.clone());
        }
    }

    fields
}

/// Value equality that treats any two secrets as interchangeable
fn values_equivalent(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Secret(_), Value::Secret(_)) => true,
        (Value::List(xs), Value::List(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equivalent(x, y))
        }
        (Value::Map(xs), Value::Map(ys)) => {
            xs.len() == ys.len()
                && xs.iter().zip(ys).all(|((xk, xv), (yk, yv))| {
                    xk == yk && values_equivalent(xv, yv)
                })
        }
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with(declarations: Vec<Declaration>) -> Graph {
        let mut graph = Graph::new();
        for declaration in declarations {
            graph.declare(declaration).unwrap();
        }
        graph
    }

    #[test]
    fn identical_graphs_have_empty_diff() {
        let make = || {
            graph_with(vec![
                Declaration::new("aws:ec2:Subnet", "net-1").prop("cidrBlock", "172.31.100.0/24"),
            ])
        };
        assert!(diff_graphs(&make(), &make()).is_empty());
    }

    #[test]
    fn added_and_removed_are_reported_by_name() {
        let old = graph_with(vec![Declaration::new("aws:ec2:Subnet", "net-1")]);
        let new = graph_with(vec![Declaration::new("aws:ec2:Subnet", "net-2")]);
        let diff = diff_graphs(&old, &new);
        assert_eq!(diff.removed, vec!["net-1"]);
        assert_eq!(diff.added, vec!["net-2"]);
    }

    #[test]
    fn changed_property_is_named() {
        let old = graph_with(vec![
            Declaration::new("aws:ec2:Subnet", "net-1").prop("cidrBlock", "172.31.100.0/24"),
        ]);
        let new = graph_with(vec![
            Declaration::new("aws:ec2:Subnet", "net-1").prop("cidrBlock", "172.31.101.0/24"),
        ]);
        let diff = diff_graphs(&old, &new);
        assert_eq!(diff.changed.len(), 1);
        assert_eq!(diff.changed[0].fields, vec!["cidrBlock"]);
    }

    #[test]
    fn regenerated_secrets_are_not_drift() {
        let old = graph_with(vec![
            Declaration::new("random:RandomPassword", "pw").prop("result", Value::secret("a")),
        ]);
        let new = graph_with(vec![
            Declaration::new("random:RandomPassword", "pw").prop("result", Value::secret("b")),
        ]);
        assert!(diff_graphs(&old, &new).is_empty());
    }

    #[test]
    fn secrets_nested_in_lists_are_equivalent() {
        let old = graph_with(vec![
            Declaration::new("aws:rds:Cluster", "db")
                .prop("creds", Value::List(vec![Value::secret("a")])),
        ]);
        let new = graph_with(vec![
            Declaration::new("aws:rds:Cluster", "db")
                .prop("creds", Value::List(vec![Value::secret("b")])),
        ]);
        assert!(diff_graphs(&old, &new).is_empty());
    }
}
