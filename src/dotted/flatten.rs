use {
    super::{Conflict, FieldPath, Separator},
    crate::tree::{Node, Object},
    indexmap::map::Entry,
    tracing::instrument,
};

fn flatten_into(destination: &mut Object, path: FieldPath<'_>, value: Node, separator: Separator) -> Result<(), Conflict> {
    match value {
        Node::Object(children) if !children.is_empty() => children
            .into_iter()
            .try_for_each(|(name, child)| flatten_into(destination, path.join(name), child, separator)),
        leaf => match destination.entry(path.joined(separator)) {
            Entry::Occupied(occupied) => {
                tracing::debug!(key = %occupied.key(), "flattened key already present");
                Err(Conflict::duplicate(occupied.key().as_str()))
            }
            Entry::Vacant(vacant) => {
                vacant.insert(leaf);
                Ok(())
            }
        },
    }
}

/// Collapses nested objects of `root` into a single level keyed by
/// separator-joined paths.
///
/// Scalars and arrays are leaves. An empty nested object is kept as a `{}`
/// leaf so it survives [`expanded`](super::expand::expanded). Fails if two
/// entries land on the same key, e.g. `{"a": {"b": 1}, "a.b": 2}`.
#[instrument(level = "trace", skip(root), fields(entries = root.len()))]
pub fn flattened(root: Object, separator: Separator) -> Result<Object, Conflict> {
    let mut destination = Object::with_capacity(root.len());
    root.into_iter()
        .try_for_each(|(name, value)| flatten_into(&mut destination, FieldPath::root(name), value, separator))
        .map(|()| destination)
}

/// Whether `root` contains no non-empty nested object, i.e. flattening it is a no-op.
pub fn is_flat(root: &Object) -> bool {
    root.values().all(|value| value.as_object().is_none_or(|map| map.is_empty()))
}
