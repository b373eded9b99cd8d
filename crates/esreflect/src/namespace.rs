//! Ordered name-to-value bindings used to resolve identifiers and member chains

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{json_type_name, NamespaceError};
use crate::value::Value;

/// An ordered mapping from name to [`Value`].
///
/// Insertion order is preserved. A binding whose value is itself a
/// namespace acts as the container for the next link of a member chain.
///
/// # Example
///
/// ```
/// use esreflect::{Namespace, Value};
///
/// let mut point = Namespace::new();
/// point.define("x", 1);
/// point.define("y", 2);
///
/// let mut ns = Namespace::new();
/// ns.define("point", point);
///
/// let x = ns
///     .get("point")
///     .and_then(Value::as_namespace)
///     .and_then(|p| p.get("x"));
/// assert_eq!(x, Some(&Value::Number(1.0)));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Namespace {
    bindings: IndexMap<String, Value>,
}

impl Namespace {
    /// Create a new empty namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`.
    ///
    /// Rebinding an existing name replaces its value but keeps its original
    /// position.
    pub fn define(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.bindings.insert(name.into(), value.into());
    }

    /// Builder form of [`define`](Self::define).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.define(name, value);
        self
    }

    /// Look up a binding by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Check whether `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check whether there are no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterate bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build a namespace from a JSON object.
    ///
    /// Nested objects become nested namespaces. Arrays have no namespace
    /// representation and are rejected.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, NamespaceError> {
        match json {
            serde_json::Value::Object(map) => object_to_namespace(map, ""),
            other => Err(NamespaceError::NotAnObject {
                found: json_type_name(other),
            }),
        }
    }
}

fn object_to_namespace(
    map: &serde_json::Map<String, serde_json::Value>,
    prefix: &str,
) -> Result<Namespace, NamespaceError> {
    let mut ns = Namespace::new();
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        let value = match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Object(inner) => Value::Namespace(object_to_namespace(inner, &path)?),
            serde_json::Value::Array(_) => {
                return Err(NamespaceError::UnsupportedJsonValue {
                    name: path,
                    found: "array",
                })
            }
        };
        ns.bindings.insert(key.clone(), value);
    }
    Ok(ns)
}

impl TryFrom<serde_json::Value> for Namespace {
    type Error = NamespaceError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        Namespace::from_json(&json)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Namespace {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut ns = Namespace::new();
        for (name, value) in iter {
            ns.define(name, value);
        }
        ns
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Namespace {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.define(name, value);
        }
    }
}
