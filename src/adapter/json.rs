use {
    super::{DelegateCodec, TreeCodec},
    crate::{
        serde::shape::{Shape, shape_of},
        tree::Node,
    },
    serde::{Serialize, de::DeserializeOwned},
    serde_json::Value,
    std::io::{Read, Write},
};

/// `serde_json` as the wire codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    pub pretty: bool,
}

impl TreeCodec for JsonCodec {
    type Error = serde_json::Error;

    fn read_tree<R: Read>(&self, reader: R) -> Result<Node, Self::Error> {
        serde_json::from_reader::<_, Value>(reader).map(Node::from)
    }

    fn write_tree<W: Write>(&self, writer: W, tree: &Node) -> Result<(), Self::Error> {
        match self.pretty {
            true => serde_json::to_writer_pretty(writer, tree),
            false => serde_json::to_writer(writer, tree),
        }
    }

    fn not_an_object(&self, found: &Node) -> Self::Error {
        <serde_json::Error as serde::de::Error>::invalid_type(found.unexpected(), &"a JSON object")
    }
}

/// Field binding through the type's own `Serialize` / `Deserialize` impls.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeDelegate;

impl<T> DelegateCodec<T> for SerdeDelegate
where
    T: Serialize + DeserializeOwned,
{
    type Error = serde_json::Error;

    fn shape(&self) -> Shape {
        shape_of::<T>()
    }

    fn from_tree(&self, tree: Node) -> Result<T, Self::Error> {
        serde_json::from_value(Value::from(tree))
    }

    fn to_tree(&self, value: &T) -> Result<Node, Self::Error> {
        serde_json::to_value(value).map(Node::from)
    }
}
