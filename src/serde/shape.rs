//! Finds out what a type's tree looks like without having a value of it.
//!
//! [`ShapeProbe`] is a `Deserializer` that answers the very first
//! `deserialize_*` call with an error carrying the hint it was given. `Option`
//! and newtype wrappers are looked through.

use {
    serde::de::{self, DeserializeOwned, Deserializer, Visitor},
    std::fmt,
};

/// The tree representation a type asks for when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Booleans, numbers, strings, characters, unit.
    Scalar,
    Sequence,
    /// Structs and maps.
    Object,
    /// Externally tagged enums. Their variant names become object keys, so
    /// flattening `{"B": {"x": 1}}` into `{"B.x": 1}` would lose the variant.
    Enum,
    /// Self-describing types (`deserialize_any`), decided per value.
    Unknown,
}

impl Shape {
    /// Whether a flattening adapter applies to this shape.
    pub fn is_object_like(self) -> bool {
        matches!(self, Shape::Object | Shape::Unknown)
    }
}

#[derive(Debug)]
pub enum ProbeError {
    Found(Shape),
    Custom(String),
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Found(shape) => write!(f, "probed shape: {shape:?}"),
            Self::Custom(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ProbeError {}

impl de::Error for ProbeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self::Custom(msg.to_string())
    }
}

pub struct ShapeProbe;

macro_rules! probe {
    ($shape:expr => $($method:ident),* $(,)?) => {
        $(
            fn $method<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, Self::Error> {
                Err(ProbeError::Found($shape))
            }
        )*
    };
}

impl<'de> Deserializer<'de> for ShapeProbe {
    type Error = ProbeError;

    probe!(Shape::Scalar =>
        deserialize_bool,
        deserialize_i8,
        deserialize_i16,
        deserialize_i32,
        deserialize_i64,
        deserialize_i128,
        deserialize_u8,
        deserialize_u16,
        deserialize_u32,
        deserialize_u64,
        deserialize_u128,
        deserialize_f32,
        deserialize_f64,
        deserialize_char,
        deserialize_str,
        deserialize_string,
        deserialize_unit,
        deserialize_identifier,
    );
    probe!(Shape::Sequence => deserialize_seq, deserialize_bytes, deserialize_byte_buf);
    probe!(Shape::Object => deserialize_map);
    probe!(Shape::Unknown => deserialize_any, deserialize_ignored_any);

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        visitor.visit_some(self)
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_tuple<V: Visitor<'de>>(
        self,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, Self::Error> {
        Err(ProbeError::Found(Shape::Enum))
    }
}

/// The [`Shape`] `T` requests from its deserializer.
pub fn shape_of<T: DeserializeOwned>() -> Shape {
    match T::deserialize(ShapeProbe) {
        Err(ProbeError::Found(shape)) => shape,
        Err(ProbeError::Custom(msg)) => {
            tracing::debug!(target_type = std::any::type_name::<T>(), %msg, "shape probe failed");
            Shape::Unknown
        }
        Ok(_) => Shape::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use {super::*, serde::Deserialize, std::collections::BTreeMap};

    #[derive(Deserialize)]
    #[allow(dead_code)]
    struct Record {
        a: i32,
    }

    #[derive(Deserialize)]
    #[allow(dead_code)]
    struct Wrapper(Record);

    #[derive(Deserialize)]
    #[allow(dead_code)]
    struct Unit;

    #[derive(Deserialize)]
    #[allow(dead_code)]
    enum Choice {
        A,
        B { x: i32 },
    }

    #[test]
    fn test_scalars() {
        assert_eq!(shape_of::<bool>(), Shape::Scalar);
        assert_eq!(shape_of::<i64>(), Shape::Scalar);
        assert_eq!(shape_of::<u8>(), Shape::Scalar);
        assert_eq!(shape_of::<f32>(), Shape::Scalar);
        assert_eq!(shape_of::<char>(), Shape::Scalar);
        assert_eq!(shape_of::<String>(), Shape::Scalar);
        assert_eq!(shape_of::<()>(), Shape::Scalar);
        assert_eq!(shape_of::<Unit>(), Shape::Scalar);
    }

    #[test]
    fn test_objects() {
        assert_eq!(shape_of::<Record>(), Shape::Object);
        assert_eq!(shape_of::<BTreeMap<String, i32>>(), Shape::Object);
    }

    #[test]
    fn test_wrappers_are_looked_through() {
        assert_eq!(shape_of::<Option<Record>>(), Shape::Object);
        assert_eq!(shape_of::<Wrapper>(), Shape::Object);
        assert_eq!(shape_of::<Box<Record>>(), Shape::Object);
        assert_eq!(shape_of::<Option<String>>(), Shape::Scalar);
    }

    #[test]
    fn test_sequences_and_unknown() {
        assert_eq!(shape_of::<Vec<Record>>(), Shape::Sequence);
        assert_eq!(shape_of::<(i32, i32)>(), Shape::Sequence);
        assert_eq!(shape_of::<serde_json::Value>(), Shape::Unknown);
        assert_eq!(shape_of::<Choice>(), Shape::Enum);
        assert_eq!(shape_of::<Option<Choice>>(), Shape::Enum);
        assert!(Shape::Unknown.is_object_like());
        assert!(!Shape::Enum.is_object_like());
        assert!(!Shape::Sequence.is_object_like());
    }
}
