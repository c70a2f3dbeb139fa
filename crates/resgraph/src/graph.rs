//! Dependency-validated resource graph
//!
//! A [`Graph`] holds declarations in the order they were made. `declare`
//! rejects duplicate logical names and edges to resources that have not
//! been declared yet, so declaration order always encodes a valid
//! topological order for the external engine to apply.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised while building a graph
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("duplicate logical name '{0}'")]
    DuplicateName(String),

    #[error("declaration '{name}' depends on undeclared resource '{dependency}'")]
    UnknownDependency { name: String, dependency: String },

    #[error("declaration '{name}' references undeclared resource '{resource}'")]
    UnknownReference { name: String, resource: String },
}

/// A single resource declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    /// Logical name, unique within the graph
    pub name: String,
    /// Resource kind token, e.g. `aws:rds:Cluster`
    pub kind: String,
    /// Input properties
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
    /// Explicit ordering edges, in addition to property references
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
}

impl Declaration {
    /// Start a declaration of the given kind and logical name
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            properties: BTreeMap::new(),
            depends_on: Vec::new(),
        }
    }

    /// Set an input property
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Add an explicit ordering dependency on an already-declared resource
    pub fn depends_on(mut self, resource: &ResourceRef) -> Self {
        self.depends_on.push(resource.name().to_string());
        self
    }

    /// Names of all resources this declaration points at, explicit or
    /// via property references
    pub fn edges(&self) -> Vec<&str> {
        let mut edges: Vec<&str> = self.depends_on.iter().map(String::as_str).collect();
        for value in self.properties.values() {
            value.referenced_resources(&mut edges);
        }
        edges
    }
}

/// Handle to a declared resource, used to build references to its
/// computed attributes
#[derive(Debug, Clone)]
pub struct ResourceRef {
    name: String,
}

impl ResourceRef {
    /// Logical name of the declared resource
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reference a computed attribute of the declared resource
    pub fn attr(&self, attribute: &str) -> Value {
        Value::reference(self.name.clone(), attribute)
    }
}

/// An ordered, dependency-validated set of resource declarations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Graph {
    declarations: Vec<Declaration>,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration, validating name uniqueness and dependency edges
    ///
    /// Every `depends_on` entry and every property reference must point
    /// at a resource declared earlier.
    pub fn declare(&mut self, declaration: Declaration) -> Result<ResourceRef, GraphError> {
        if self.contains(&declaration.name) {
            return Err(GraphError::DuplicateName(declaration.name));
        }

        for dependency in &declaration.depends_on {
            if !self.contains(dependency) {
                return Err(GraphError::UnknownDependency {
                    name: declaration.name.clone(),
                    dependency: dependency.clone(),
                });
            }
        }

        let mut referenced = Vec::new();
        for value in declaration.properties.values() {
            value.referenced_resources(&mut referenced);
        }
        for resource in referenced {
            if !self.contains(resource) {
                return Err(GraphError::UnknownReference {
                    name: declaration.name.clone(),
                    resource: resource.to_string(),
                });
            }
        }

        let handle = ResourceRef {
            name: declaration.name.clone(),
        };
        self.declarations.push(declaration);
        Ok(handle)
    }

    /// Look up a declaration by logical name
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.name == name)
    }

    /// Check whether a logical name has been declared
    pub fn contains(&self, name: &str) -> bool {
        self.declarations.iter().any(|d| d.name == name)
    }

    /// Iterate declarations in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }

    /// Number of declarations of the given kind
    pub fn count_kind(&self, kind: &str) -> usize {
        self.declarations.iter().filter(|d| d.kind == kind).count()
    }

    /// Total number of declarations
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Check if the graph has no declarations
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Declaration;
    type IntoIter = std::slice::Iter<'a, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.declarations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subnet(name: &str) -> Declaration {
        Declaration::new("aws:ec2:Subnet", name).prop("cidrBlock", "172.31.100.0/24")
    }

    #[test]
    fn declare_returns_usable_handle() {
        let mut graph = Graph::new();
        let handle = graph.declare(subnet("net-1")).unwrap();
        assert_eq!(handle.name(), "net-1");
        assert_eq!(
            handle.attr("id"),
            Value::reference("net-1", "id")
        );
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut graph = Graph::new();
        graph.declare(subnet("net-1")).unwrap();
        let err = graph.declare(subnet("net-1")).unwrap_err();
        assert_eq!(err, GraphError::DuplicateName("net-1".to_string()));
    }

    #[test]
    fn depends_on_must_point_at_declared_resource() {
        let mut graph = Graph::new();
        let decl = Declaration {
            depends_on: vec!["missing".to_string()],
            ..subnet("net-1")
        };
        let err = graph.declare(decl).unwrap_err();
        assert_eq!(
            err,
            GraphError::UnknownDependency {
                name: "net-1".to_string(),
                dependency: "missing".to_string(),
            }
        );
        assert!(graph.is_empty());
    }

    #[test]
    fn property_references_must_point_at_declared_resource() {
        let mut graph = Graph::new();
        let decl = subnet("net-1").prop("vpcId", Value::reference("ghost", "id"));
        let err = graph.declare(decl).unwrap_err();
        assert_eq!(
            err,
            GraphError::UnknownReference {
                name: "net-1".to_string(),
                resource: "ghost".to_string(),
            }
        );
    }

    #[test]
    fn count_kind_filters_by_kind_token() {
        let mut graph = Graph::new();
        graph.declare(subnet("net-1")).unwrap();
        graph.declare(subnet("net-2")).unwrap();
        graph
            .declare(Declaration::new("aws:rds:Cluster", "db"))
            .unwrap();
        assert_eq!(graph.count_kind("aws:ec2:Subnet"), 2);
        assert_eq!(graph.count_kind("aws:rds:Cluster"), 1);
        assert_eq!(graph.count_kind("aws:rds:ClusterInstance"), 0);
    }

    #[test]
    fn edges_combine_explicit_and_reference_dependencies() {
        let mut graph = Graph::new();
        let primary = graph.declare(subnet("primary")).unwrap();
        let decl = Declaration::new("aws:ec2:Subnet", "replica")
            .prop("vpcId", primary.attr("vpcId"))
            .depends_on(&primary);
        let replica = decl.clone();
        graph.declare(decl).unwrap();
        let edges = replica.edges();
        assert_eq!(edges, vec!["primary", "primary"]);
    }
}
