use {
    super::{Conflict, ConflictKind, Separator},
    crate::tree::{Node, Object},
    indexmap::{IndexMap, map::Entry},
    tap::Pipe,
    tracing::instrument,
};

/// Destination entry during expansion. Only `Branch`es are created by the
/// expander; every source value is a `Leaf`, objects included.
enum Slot {
    Branch(IndexMap<String, Slot>),
    Leaf(Node),
}

impl Slot {
    fn into_node(self) -> Node {
        match self {
            Slot::Branch(children) => into_object(children).pipe(Node::Object),
            Slot::Leaf(node) => node,
        }
    }
}

fn into_object(slots: IndexMap<String, Slot>) -> Object {
    slots.into_iter().map(|(k, slot)| (k, slot.into_node())).collect()
}

struct BranchBuilder<'a>(&'a mut IndexMap<String, Slot>);

impl BranchBuilder<'_> {
    /// The branch stored under `name`, created on first use.
    fn nested(&mut self, name: &str) -> Result<BranchBuilder<'_>, ConflictKind> {
        match self
            .0
            .entry(name.to_owned())
            .or_insert_with(|| Slot::Branch(IndexMap::new()))
        {
            Slot::Branch(children) => Ok(BranchBuilder(children)),
            Slot::Leaf(_) => Err(ConflictKind::TerminalPrefix),
        }
    }

    fn apply(&mut self, key: &str, value: Node, separator: Separator) -> Result<(), ConflictKind> {
        match key.split_once(separator.as_char()) {
            Some((prefix, rest)) => self.nested(prefix)?.apply(rest, value, separator),
            None => match self.0.entry(key.to_owned()) {
                Entry::Occupied(_) => Err(ConflictKind::DuplicateKey),
                Entry::Vacant(vacant) => {
                    vacant.insert(Slot::Leaf(value));
                    Ok(())
                }
            },
        }
    }
}

/// Rebuilds nested objects from separator-joined keys, splitting on the
/// first separator and repeating on the remainder.
///
/// Keys sharing a prefix merge into the same nested object. Empty segments
/// are kept, so `".a"` expands to `{"": {"a": ..}}`. Source values are never
/// merged into, whatever their order: a prefix segment naming a source value
/// (even an object), or a final segment already taken, is a conflict
/// (e.g. `a.b` together with `a.b.c`, or `a` together with `a.b`).
#[instrument(level = "trace", skip(flat), fields(entries = flat.len()))]
pub fn expanded(flat: Object, separator: Separator) -> Result<Object, Conflict> {
    let mut destination = IndexMap::with_capacity(flat.len());
    flat.into_iter()
        .try_for_each(|(key, value)| {
            BranchBuilder(&mut destination)
                .apply(&key, value, separator)
                .map_err(|kind| {
                    tracing::debug!(%key, %kind, "cannot expand flattened key");
                    match kind {
                        ConflictKind::DuplicateKey => Conflict::duplicate(key),
                        ConflictKind::TerminalPrefix => Conflict::terminal_prefix(key),
                    }
                })
        })
        .map(|()| into_object(destination))
}
