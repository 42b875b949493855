use {
    crate::{
        dotted::{Conflict, Separator, expand::expanded, flatten::flattened},
        tree::Node,
    },
    serde_json::Value,
    tap::Pipe,
};

/// Dotted-key transforms directly on [`serde_json::Value`].
///
/// Values that are not objects are returned unchanged.
#[extension_traits::extension(pub trait ValueFlattenExt)]
impl Value {
    fn flattened_with(self, separator: Separator) -> Result<Value, Conflict> {
        match Node::from(self) {
            Node::Object(map) => flattened(map, separator)?.pipe(Node::Object),
            other => other,
        }
        .pipe(Value::from)
        .pipe(Ok)
    }

    fn expanded_with(self, separator: Separator) -> Result<Value, Conflict> {
        match Node::from(self) {
            Node::Object(map) => expanded(map, separator)?.pipe(Node::Object),
            other => other,
        }
        .pipe(Value::from)
        .pipe(Ok)
    }
}
