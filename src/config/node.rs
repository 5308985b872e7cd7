//! Configuration trees.
//!
//! [`Node`] is the JSON-like tree every structured file is parsed into before
//! layers are merged. It differs from `serde_json::Value` in one respect:
//! an explicit `null` in a file becomes [`Node::NoOverride`], the marker that
//! tells the merger "keep whatever the parent layer says". Keeping it as its
//! own variant means an absent key and an explicit non-value never look alike.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A node in a configuration tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Node {
    /// Keyed children.
    Mapping(BTreeMap<String, Node>),
    /// Ordered children. Sequences are replaced, never merged.
    Sequence(Vec<Node>),
    /// A string, number or boolean.
    Scalar(Value),
    /// Explicitly undefined; yields to the value underneath when merged.
    NoOverride,
}

impl Node {
    /// An empty mapping.
    pub fn empty_mapping() -> Self {
        Node::Mapping(BTreeMap::new())
    }

    /// Look up a key if this node is a mapping.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Mapping(map) => map.get(key),
            _ => None,
        }
    }

    /// The mapping contents, if this node is a mapping.
    pub fn as_mapping(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Node::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// The string contents, if this node is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Node::Mapping(_))
    }

    pub fn is_no_override(&self) -> bool {
        matches!(self, Node::NoOverride)
    }

    /// Drop every `NoOverride` left as a mapping value.
    ///
    /// After merging, a `NoOverride` can only survive where no layer below
    /// supplied a value, so removing it leaves the key unset. Sequence items
    /// are kept as written and render as `null`.
    pub fn without_unset(&self) -> Node {
        match self {
            Node::Mapping(map) => Node::Mapping(
                map.iter()
                    .filter(|(_, v)| !v.is_no_override())
                    .map(|(k, v)| (k.clone(), v.without_unset()))
                    .collect(),
            ),
            Node::Sequence(items) => Node::Sequence(
                items.iter().map(Node::without_unset).collect(),
            ),
            other => other.clone(),
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::empty_mapping()
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::NoOverride,
            Value::Object(map) => {
                Node::Mapping(map.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
            }
            Value::Array(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            scalar => Node::Scalar(scalar),
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        match node {
            Node::NoOverride => Value::Null,
            Node::Mapping(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
            Node::Sequence(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Node::Scalar(scalar) => scalar,
        }
    }
}
