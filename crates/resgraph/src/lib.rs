//! # Resgraph
//!
//! Core abstractions for declarative resource planning.
//!
//! This crate models a plan the way an infrastructure-orchestration
//! engine consumes it: an ordered set of resource declarations whose
//! property references and explicit `dependsOn` edges encode the apply
//! order. It performs no provider calls and no apply logic of its own.
//!
//! ## Core concepts
//!
//! - **Value**: a typed input property - literal, secret, or a reference
//!   to another declaration's computed attribute
//! - **Declaration**: a named resource of some kind with input properties
//! - **Graph**: declarations in topological declaration order, with
//!   duplicate-name and dangling-edge validation
//! - **diff_graphs**: structural comparison of two graphs, secrets
//!   compare equal so regenerated credentials are not drift
//!
//! ## Example
//!
//! ```
//! use resgraph::{Declaration, Graph, Value};
//!
//! let mut graph = Graph::new();
//! let subnet = graph
//!     .declare(Declaration::new("aws:ec2:Subnet", "db-subnet").prop("cidrBlock", "10.0.1.0/24"))
//!     .unwrap();
//! graph
//!     .declare(
//!         Declaration::new("aws:rds:SubnetGroup", "db-subnets")
//!             .prop("subnetIds", Value::List(vec![subnet.attr("id")])),
//!     )
//!     .unwrap();
//! assert_eq!(graph.len(), 2);
//! ```

pub mod diff;
pub mod graph;
pub mod value;

// Re-export main types at crate root
pub use diff::{ChangedResource, GraphDiff, diff_graphs};
pub use graph::{Declaration, Graph, GraphError, ResourceRef};
pub use value::{REDACTED, Value};
