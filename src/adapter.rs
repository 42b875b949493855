//! Composition of the dotted transforms with a wire codec and a per-type codec.
//!
//! Read path: wire → [`TreeCodec`] → [`flattened`] → [`DelegateCodec`] → value.
//! Write path: value → [`DelegateCodec`] → [`expanded`] → [`TreeCodec`] → wire.

use {
    crate::{
        dotted::{
            Conflict, Separator,
            expand::expanded,
            flatten::{flattened, is_flat},
        },
        serde::shape::Shape,
        tree::Node,
    },
    std::{
        any::type_name,
        io::{Read, Write},
        marker::PhantomData,
    },
    tap::Pipe,
    tracing::instrument,
};

pub mod json;

#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
    #[error(transparent)]
    Conflict(#[from] Conflict),
    /// Raised by the tree codec or the delegate codec, passed through unchanged.
    #[error(transparent)]
    Delegate(E),
}

impl<E> Error<E> {
    pub fn as_conflict(&self) -> Option<&Conflict> {
        match self {
            Error::Conflict(conflict) => Some(conflict),
            Error::Delegate(_) => None,
        }
    }

    pub fn into_delegate(self) -> Option<E> {
        match self {
            Error::Delegate(e) => Some(e),
            Error::Conflict(_) => None,
        }
    }
}

/// Converts between wire bytes and [`Node`] trees.
pub trait TreeCodec {
    type Error;

    fn read_tree<R: Read>(&self, reader: R) -> Result<Node, Self::Error>;

    fn write_tree<W: Write>(&self, writer: W, tree: &Node) -> Result<(), Self::Error>;

    /// The codec's own type-mismatch error for a tree that should have been an object.
    fn not_an_object(&self, found: &Node) -> Self::Error;
}

/// Converts between [`Node`] trees and values of `T`, binding names to fields.
pub trait DelegateCodec<T> {
    type Error;

    /// What the tree of a `T` looks like.
    fn shape(&self) -> Shape;

    fn from_tree(&self, tree: Node) -> Result<T, Self::Error>;

    fn to_tree(&self, value: &T) -> Result<Node, Self::Error>;
}

/// Reads and writes optional values of `T`; `None` is the wire null.
pub trait TypeCodec<T> {
    type Error;

    fn read<R: Read>(&self, reader: R) -> Result<Option<T>, Self::Error>;

    fn write<W: Write>(&self, writer: W, value: Option<&T>) -> Result<(), Self::Error>;

    fn from_slice(&self, input: &[u8]) -> Result<Option<T>, Self::Error> {
        self.read(input)
    }

    fn to_vec(&self, value: Option<&T>) -> Result<Vec<u8>, Self::Error> {
        let mut out = Vec::new();
        self.write(&mut out, value).map(|()| out)
    }
}

/// Flattens nested objects before the delegate binds them, and expands the
/// delegate's output before writing.
#[derive(Debug, Clone)]
pub struct FlatteningAdapter<T, C, D> {
    codec: C,
    delegate: D,
    separator: Separator,
    shape: Shape,
    _marker: PhantomData<fn() -> T>,
}

impl<T, C, D> FlatteningAdapter<T, C, D>
where
    C: TreeCodec,
    D: DelegateCodec<T, Error = C::Error>,
{
    /// `None` when `T` is not object-shaped; use [`PlainAdapter`] for those.
    pub fn new(codec: C, delegate: D, separator: Separator) -> Option<Self> {
        match delegate.shape() {
            shape if shape.is_object_like() => Some(Self {
                codec,
                delegate,
                separator,
                shape,
                _marker: PhantomData,
            }),
            shape => {
                tracing::debug!(target_type = type_name::<T>(), ?shape, "not wrapping with flattening adapter");
                None
            }
        }
    }

    pub fn separator(&self) -> Separator {
        self.separator
    }

    fn flatten_tree(&self, tree: Node) -> Result<Node, Error<C::Error>> {
        match (tree, self.shape) {
            (Node::Object(map), _) if is_flat(&map) => Ok(Node::Object(map)),
            (Node::Object(map), _) => flattened(map, self.separator)?.pipe(Node::Object).pipe(Ok),
            (other, Shape::Object) => Err(Error::Delegate(self.codec.not_an_object(&other))),
            (other, _) => {
                tracing::trace!(kind = other.kind(), "tree is not an object, passing through");
                Ok(other)
            }
        }
    }

    fn expand_tree(&self, tree: Node) -> Result<Node, Error<C::Error>> {
        match tree {
            Node::Object(map) => expanded(map, self.separator)?.pipe(Node::Object).pipe(Ok),
            other => {
                tracing::trace!(kind = other.kind(), "delegate tree is not an object, passing through");
                Ok(other)
            }
        }
    }
}

impl<T, C, D> TypeCodec<T> for FlatteningAdapter<T, C, D>
where
    C: TreeCodec,
    D: DelegateCodec<T, Error = C::Error>,
{
    type Error = Error<C::Error>;

    #[instrument(level = "debug", skip_all, fields(target_type = type_name::<T>()))]
    fn read<R: Read>(&self, reader: R) -> Result<Option<T>, Self::Error> {
        let tree = self.codec.read_tree(reader).map_err(Error::Delegate)?;
        if tree.is_null() {
            tracing::debug!("null input");
            return Ok(None);
        }
        self.flatten_tree(tree)?
            .pipe(|flat| self.delegate.from_tree(flat))
            .map(Some)
            .map_err(Error::Delegate)
    }

    #[instrument(level = "debug", skip_all, fields(target_type = type_name::<T>()))]
    fn write<W: Write>(&self, writer: W, value: Option<&T>) -> Result<(), Self::Error> {
        let tree = match value {
            None => Node::NULL,
            Some(value) => self
                .delegate
                .to_tree(value)
                .map_err(Error::Delegate)
                .and_then(|tree| self.expand_tree(tree))?,
        };
        self.codec.write_tree(writer, &tree).map_err(Error::Delegate)
    }
}

/// Codec and delegate composed without any tree rewriting.
#[derive(Debug, Clone)]
pub struct PlainAdapter<T, C, D> {
    codec: C,
    delegate: D,
    _marker: PhantomData<fn() -> T>,
}

impl<T, C, D> PlainAdapter<T, C, D> {
    pub fn new(codec: C, delegate: D) -> Self {
        Self {
            codec,
            delegate,
            _marker: PhantomData,
        }
    }
}

impl<T, C, D> TypeCodec<T> for PlainAdapter<T, C, D>
where
    C: TreeCodec,
    D: DelegateCodec<T, Error = C::Error>,
{
    type Error = Error<C::Error>;

    fn read<R: Read>(&self, reader: R) -> Result<Option<T>, Self::Error> {
        match self.codec.read_tree(reader).map_err(Error::Delegate)? {
            tree if tree.is_null() => Ok(None),
            tree => self.delegate.from_tree(tree).map(Some).map_err(Error::Delegate),
        }
    }

    fn write<W: Write>(&self, writer: W, value: Option<&T>) -> Result<(), Self::Error> {
        value
            .map(|value| self.delegate.to_tree(value))
            .transpose()
            .map_err(Error::Delegate)?
            .unwrap_or(Node::NULL)
            .pipe(|tree| self.codec.write_tree(writer, &tree))
            .map_err(Error::Delegate)
    }
}

/// Picks the flattening adapter for object-shaped types and the plain one otherwise.
#[derive(Debug, Clone)]
pub enum Codec<T, C, D> {
    Flattening(FlatteningAdapter<T, C, D>),
    Plain(PlainAdapter<T, C, D>),
}

impl<T, C, D> Codec<T, C, D>
where
    C: TreeCodec,
    D: DelegateCodec<T, Error = C::Error>,
{
    pub fn new(codec: C, delegate: D, separator: Separator) -> Self {
        match delegate.shape() {
            shape if shape.is_object_like() => FlatteningAdapter {
                codec,
                delegate,
                separator,
                shape,
                _marker: PhantomData,
            }
            .pipe(Codec::Flattening),
            _ => PlainAdapter::new(codec, delegate).pipe(Codec::Plain),
        }
    }

    pub fn is_flattening(&self) -> bool {
        matches!(self, Codec::Flattening(_))
    }
}

impl<T, C, D> TypeCodec<T> for Codec<T, C, D>
where
    C: TreeCodec,
    D: DelegateCodec<T, Error = C::Error>,
{
    type Error = Error<C::Error>;

    fn read<R: Read>(&self, reader: R) -> Result<Option<T>, Self::Error> {
        match self {
            Codec::Flattening(adapter) => adapter.read(reader),
            Codec::Plain(adapter) => adapter.read(reader),
        }
    }

    fn write<W: Write>(&self, writer: W, value: Option<&T>) -> Result<(), Self::Error> {
        match self {
            Codec::Flattening(adapter) => adapter.write(writer, value),
            Codec::Plain(adapter) => adapter.write(writer, value),
        }
    }
}
