//! In-memory tree representation the transforms operate on.
//!
//! [`Node`] is deliberately independent of any wire format. Conversions to and
//! from [`serde_json::Value`] live at the bottom of this module.

use {
    indexmap::IndexMap,
    serde::{
        Serialize, Serializer,
        de::Unexpected,
        ser::{SerializeMap, SerializeSeq},
    },
    serde_json::{Number, Value},
    tap::Pipe,
};

/// Ordered mapping from name to [`Node`]. Equality ignores insertion order.
pub type Object = IndexMap<String, Node>;

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar(Scalar),
    Object(Object),
    /// Opaque to the transforms, elements are never inspected.
    Array(Vec<Node>),
}

impl Default for Node {
    fn default() -> Self {
        Self::NULL
    }
}

impl Node {
    pub const NULL: Node = Node::Scalar(Scalar::Null);

    pub fn object(entries: impl IntoIterator<Item = (String, Node)>) -> Self {
        entries.into_iter().collect::<Object>().pipe(Node::Object)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Scalar(Scalar::Null))
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Node::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Scalar(Scalar::Null) => "null",
            Node::Scalar(Scalar::Bool(_)) => "bool",
            Node::Scalar(Scalar::Number(_)) => "number",
            Node::Scalar(Scalar::String(_)) => "string",
            Node::Object(_) => "object",
            Node::Array(_) => "array",
        }
    }

    /// Describes this node for `serde::de::Error::invalid_type`.
    pub fn unexpected(&self) -> Unexpected<'_> {
        match self {
            Node::Scalar(Scalar::Null) => Unexpected::Unit,
            Node::Scalar(Scalar::Bool(b)) => Unexpected::Bool(*b),
            Node::Scalar(Scalar::Number(n)) => n
                .as_u64()
                .map(Unexpected::Unsigned)
                .or_else(|| n.as_i64().map(Unexpected::Signed))
                .or_else(|| n.as_f64().map(Unexpected::Float))
                .unwrap_or(Unexpected::Other("number")),
            Node::Scalar(Scalar::String(s)) => Unexpected::Str(s),
            Node::Object(_) => Unexpected::Map,
            Node::Array(_) => Unexpected::Seq,
        }
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Node::Scalar(Scalar::Null) => serializer.serialize_unit(),
            Node::Scalar(Scalar::Bool(b)) => serializer.serialize_bool(*b),
            Node::Scalar(Scalar::Number(n)) => n.serialize(serializer),
            Node::Scalar(Scalar::String(s)) => serializer.serialize_str(s),
            Node::Array(items) => serializer
                .serialize_seq(Some(items.len()))
                .and_then(|mut seq| {
                    items
                        .iter()
                        .try_for_each(|item| seq.serialize_element(item))
                        .and_then(|()| seq.end())
                }),
            Node::Object(map) => serializer
                .serialize_map(Some(map.len()))
                .and_then(|mut out| {
                    map.iter()
                        .try_for_each(|(k, v)| out.serialize_entry(k, v))
                        .and_then(|()| out.end())
                }),
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::NULL,
            Value::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Node::Scalar(Scalar::Number(n)),
            Value::String(s) => Node::Scalar(Scalar::String(s)),
            Value::Array(items) => items.into_iter().map(Node::from).collect::<Vec<_>>().pipe(Node::Array),
            Value::Object(map) => map.into_iter().map(|(k, v)| (k, Node::from(v))).pipe(Node::object),
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Scalar(Scalar::Null) => Value::Null,
            Node::Scalar(Scalar::Bool(b)) => Value::Bool(b),
            Node::Scalar(Scalar::Number(n)) => Value::Number(n),
            Node::Scalar(Scalar::String(s)) => Value::String(s),
            Node::Array(items) => items.into_iter().map(Value::from).collect::<Vec<_>>().pipe(Value::Array),
            Node::Object(map) => map
                .into_iter()
                .map(|(k, v)| (k, Value::from(v)))
                .collect::<serde_json::Map<_, _>>()
                .pipe(Value::Object),
        }
    }
}

impl From<Object> for Node {
    fn from(map: Object) -> Self {
        Node::Object(map)
    }
}
