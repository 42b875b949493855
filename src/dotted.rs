use {
    itertools::Itertools,
    serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _},
    std::{borrow::Cow, fmt},
    tap::Tap,
};

pub const DEFAULT_SEPARATOR: char = '.';

/// The character joining path segments into a single flat key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Separator(char);

impl Default for Separator {
    fn default() -> Self {
        Self(DEFAULT_SEPARATOR)
    }
}

impl Separator {
    pub const fn new(separator: char) -> Self {
        Self(separator)
    }

    pub const fn as_char(self) -> char {
        self.0
    }
}

impl From<char> for Separator {
    fn from(separator: char) -> Self {
        Self(separator)
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Separator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.0)
    }
}

impl<'de> Deserialize<'de> for Separator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(separator), None) => Ok(Self(separator)),
            _ => Err(D::Error::invalid_value(
                serde::de::Unexpected::Str(&raw),
                &"a single character",
            )),
        }
    }
}

/// Names from the root of a tree down to a single entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FieldPath<'a>(Vec<Cow<'a, str>>);

impl<'a> FieldPath<'a> {
    pub fn root(segment: impl Into<Cow<'a, str>>) -> Self {
        Self(vec![segment.into()])
    }

    pub fn join(&self, segment: impl Into<Cow<'a, str>>) -> Self {
        self.clone().tap_mut(|p| p.0.push(segment.into()))
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.as_ref())
    }

    pub fn joined(&self, separator: Separator) -> String {
        self.segments().join(&separator.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// Two source entries resolve to the same destination key.
    DuplicateKey,
    /// A segment that must become a nested object already holds a source value.
    TerminalPrefix,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictKind::DuplicateKey => write!(f, "duplicate name"),
            ConflictKind::TerminalPrefix => write!(f, "value used as a nesting prefix"),
        }
    }
}

/// Two entries of one flatten or expand pass collide.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("structural conflict ({kind}) at '{key}'")]
pub struct Conflict {
    pub kind: ConflictKind,
    /// The destination key (flatten) or the source key (expand) that collided.
    pub key: String,
}

impl Conflict {
    pub fn duplicate(key: impl Into<String>) -> Self {
        Self {
            kind: ConflictKind::DuplicateKey,
            key: key.into(),
        }
    }

    pub fn terminal_prefix(key: impl Into<String>) -> Self {
        Self {
            kind: ConflictKind::TerminalPrefix,
            key: key.into(),
        }
    }
}

pub mod expand;
pub mod flatten;
