// Route document model, validated once when the response body is parsed

use crate::error::{Result, TopologyError};
use crate::hops::expand_unknown_hops;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// A hop on a route. Only the name matters; every other field the producer
/// sends is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "Name")]
    pub name: String,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    #[serde(rename = "Path", deserialize_with = "nullable_path")]
    pub path: Vec<Node>,
}

impl Route {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: names.into_iter().map(Node::new).collect(),
        }
    }

    /// Consecutive (source, target) name pairs along the path
    pub fn hops(&self) -> impl Iterator<Item = (&str, &str)> {
        self.path
            .windows(2)
            .map(|pair| (pair[0].name.as_str(), pair[1].name.as_str()))
    }
}

// Producers serialize an empty path as `null`
fn nullable_path<'de, D>(deserializer: D) -> std::result::Result<Vec<Node>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Node>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Every route in a fetched document, keyed by route key.
///
/// Keys are kept sorted so that iteration is stable between runs even though
/// the resulting graph does not depend on the order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteDocument {
    routes: BTreeMap<String, Route>,
}

impl RouteDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(body: &str) -> Result<Self> {
        Self::from_json_slice(body.as_bytes())
    }

    /// Parse a raw response body. Bytes that are not valid UTF-8 are a JSON
    /// error, never replaced.
    pub fn from_json_slice(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(value)
    }

    /// Validate and convert a parsed JSON value.
    ///
    /// Errors name the offending route key and, when possible, the position
    /// and field of the node that failed.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(entries) = value else {
            return Err(TopologyError::NotAnObject {
                found: json_kind(&value),
            });
        };

        let mut routes = BTreeMap::new();
        for (key, raw) in entries {
            let route = match Route::deserialize(&raw) {
                Ok(route) => route,
                Err(e) => {
                    return Err(TopologyError::SchemaError {
                        detail: describe_schema_error(&raw, &e),
                        route: key,
                    });
                }
            };
            debug!("Route '{}' has {} hops", key, route.path.len());
            routes.insert(key, route);
        }

        Ok(Self { routes })
    }

    pub fn get(&self, key: &str) -> Option<&Route> {
        self.routes.get(key)
    }

    pub fn routes(&self) -> impl Iterator<Item = (&str, &Route)> {
        self.routes.iter().map(|(key, route)| (key.as_str(), route))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Rename every `*` hop after its known neighbours so that unrelated
    /// unknown hops stop collapsing into a single vertex.
    pub fn with_expanded_unknown_hops(self) -> Self {
        let routes = self
            .routes
            .into_iter()
            .map(|(key, route)| {
                let names: Vec<String> = route.path.into_iter().map(|node| node.name).collect();
                (key, Route::new(expand_unknown_hops(&names)))
            })
            .collect();
        Self { routes }
    }
}

impl FromIterator<(String, Route)> for RouteDocument {
    fn from_iter<T: IntoIterator<Item = (String, Route)>>(iter: T) -> Self {
        Self {
            routes: iter.into_iter().collect(),
        }
    }
}

fn describe_schema_error(raw: &Value, err: &serde_json::Error) -> String {
    let Some(fields) = raw.as_object() else {
        return format!("expected an object, found {}", json_kind(raw));
    };

    match fields.get("Path") {
        None => "missing field `Path`".to_string(),
        Some(Value::Array(nodes)) => {
            for (position, node) in nodes.iter().enumerate() {
                let Some(node_fields) = node.as_object() else {
                    return format!(
                        "node #{} in `Path` must be an object, found {}",
                        position,
                        json_kind(node)
                    );
                };
                match node_fields.get("Name") {
                    None => return format!("node #{} in `Path` is missing field `Name`", position),
                    Some(Value::String(_)) => {}
                    Some(other) => {
                        return format!(
                            "node #{} in `Path` has a non-string `Name` ({})",
                            position,
                            json_kind(other)
                        );
                    }
                }
            }
            err.to_string()
        }
        Some(Value::Null) => err.to_string(),
        Some(other) => format!("field `Path` must be an array, found {}", json_kind(other)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
