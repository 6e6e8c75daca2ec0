//! Canonical map keys.
//!
//! A [`HashKey`] is the projection of a hashable value onto something with
//! structural equality. The variant is the type tag, so Integer `1`,
//! Character `'1'` and String `"1"` are three different keys, and a Float can
//! never become a key at all.

use std::fmt;

use crate::heap::Heap;
use crate::tag::TypeTag;

/// Key of a hash map entry.
///
/// Derived `Ord` gives hash maps a canonical iteration order for display:
/// integers, then booleans, then characters, then strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HashKey {
    Int(i64),
    Bool(bool),
    Char(char),
    Str(Heap<String>),
}

impl HashKey {
    /// Tag of the value this key was projected from.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            HashKey::Int(_) => TypeTag::Integer,
            HashKey::Bool(_) => TypeTag::Boolean,
            HashKey::Char(_) => TypeTag::Character,
            HashKey::Str(_) => TypeTag::String,
        }
    }
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashKey::Int(n) => write!(f, "{n}"),
            HashKey::Bool(b) => write!(f, "{b}"),
            HashKey::Char(c) => write!(f, "'{c}'"),
            HashKey::Str(s) => write!(f, "{:?}", s.as_str()),
        }
    }
}

#[cfg(test)]
mod tests;
