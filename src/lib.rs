//! Read nested JSON into models whose field names are dotted paths, and write
//! them back out nested.
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use serde_dotted::{FlatteningConfig, TypeCodec};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct FlatModel {
//!     #[serde(rename = "a.b")]
//!     a_b: i32,
//!     #[serde(rename = "a.c")]
//!     a_c: bool,
//! }
//!
//! let codec = FlatteningConfig::default().codec_for::<FlatModel>();
//! let model = codec.from_slice(br#"{"a": {"b": 1, "c": true}}"#).unwrap();
//! assert_eq!(model, Some(FlatModel { a_b: 1, a_c: true }));
//!
//! let written = codec.to_vec(model.as_ref()).unwrap();
//! assert_eq!(written, br#"{"a":{"b":1,"c":true}}"#);
//! ```

pub mod adapter;
pub mod config;
pub mod dotted;
pub mod tree;

pub use {
    adapter::{Codec, DelegateCodec, Error, FlatteningAdapter, PlainAdapter, TreeCodec, TypeCodec, json::{JsonCodec, SerdeDelegate}},
    config::FlatteningConfig,
    dotted::{Conflict, ConflictKind, DEFAULT_SEPARATOR, FieldPath, Separator, expand::expanded, flatten::flattened},
    self::serde::{
        shape::{Shape, shape_of},
        value_ext::ValueFlattenExt,
    },
    tree::{Node, Object, Scalar},
};

/// Flattens on deserialize and expands on serialize, in any serde format.
///
/// `SEP` is the path separator, `.` unless given.
#[derive(Debug, Clone, PartialEq)]
pub struct Flattened<T, const SEP: char = DEFAULT_SEPARATOR>(pub T);

#[derive(Debug)]
pub struct FlattenedRef<'a, T, const SEP: char = DEFAULT_SEPARATOR>(&'a T);

impl<T, const SEP: char> Flattened<T, SEP> {
    pub fn as_ref(&self) -> FlattenedRef<'_, T, SEP> {
        FlattenedRef(&self.0)
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<'a, T, const SEP: char> FlattenedRef<'a, T, SEP> {
    pub fn new(value: &'a T) -> Self {
        Self(value)
    }
}

mod serde;
