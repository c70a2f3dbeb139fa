//! Property values for resource declarations
//!
//! A value is either a literal (string, int, number, bool, list, map),
//! a secret literal that never leaves the process unredacted, or a
//! reference to a computed attribute of another declaration. References
//! are the dependency edges the external orchestration engine uses to
//! sequence resource creation.

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Placeholder emitted wherever a secret value is serialized or rendered.
pub const REDACTED: &str = "(sensitive)";

/// A property value in a resource declaration
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    /// Plain string literal
    String(String),
    /// Integer literal (ports, tiers, lengths)
    Int(i64),
    /// Floating-point literal (scaling capacities)
    Number(f64),
    /// Boolean literal
    Bool(bool),
    /// Ordered list of values
    List(Vec<Value>),
    /// Nested key/value map (tags, scaling configuration)
    Map(BTreeMap<String, Value>),
    /// Sensitive string - redacted in Debug output and serialized plans
    Secret(
        #[serde(serialize_with = "serialize_redacted")]
        String,
    ),
    /// Computed attribute of another declaration, resolved by the engine
    Ref { resource: String, attribute: String },
}

fn serialize_redacted<S: Serializer>(_value: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(REDACTED)
}

impl Value {
    /// Wrap a sensitive string
    pub fn secret(value: impl Into<String>) -> Self {
        Self::Secret(value.into())
    }

    /// Reference a computed attribute of another declaration
    pub fn reference(resource: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::Ref {
            resource: resource.into(),
            attribute: attribute.into(),
        }
    }

    /// Get the string literal, if this is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the unredacted secret, if this is one
    pub fn as_secret(&self) -> Option<&str> {
        match self {
            Self::Secret(s) => Some(s),
            _ => None,
        }
    }

    /// Check if this value is sensitive
    pub fn is_secret(&self) -> bool {
        matches!(self, Self::Secret(_))
    }

    /// Collect the names of all declarations this value references
    pub fn referenced_resources<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Ref { resource, .. } => out.push(resource),
            Self::List(items) => {
                for item in items {
                    item.referenced_resources(out);
                }
            }
            Self::Map(entries) => {
                for value in entries.values() {
                    value.referenced_resources(out);
                }
            }
            _ => {}
        }
    }

    /// Render for terminal output
    ///
    /// Secrets are masked unless `reveal_secrets` is set.
    pub fn render(&self, reveal_secrets: bool) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Int(n) => n.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::List(items) => {
                let rendered: Vec<String> =
                    items.iter().map(|v| v.render(reveal_secrets)).collect();
                format!("[{}]", rendered.join(", "))
            }
            Self::Map(entries) => {
                let rendered: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| format!("{k}: {}", v.render(reveal_secrets)))
                    .collect();
                format!("{{{}}}", rendered.join(", "))
            }
            Self::Secret(s) => {
                if reveal_secrets {
                    s.clone()
                } else {
                    REDACTED.to_string()
                }
            }
            Self::Ref {
                resource,
                attribute,
            } => format!("${{{resource}.{attribute}}}"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "String({s:?})"),
            Self::Int(n) => write!(f, "Int({n})"),
            Self::Number(n) => write!(f, "Number({n})"),
            Self::Bool(b) => write!(f, "Bool({b})"),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
            Self::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            Self::Secret(_) => write!(f, "Secret({REDACTED})"),
            Self::Ref {
                resource,
                attribute,
            } => write!(f, "Ref({resource}.{attribute})"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self::Map(entries)
    }
}
