//! Type tags and capability flags.
//!
//! Every runtime value, and every control signal, reports exactly one
//! [`TypeTag`]. Capabilities are orthogonal to the tag: the evaluator probes
//! them to decide whether an operation applies (arithmetic, concatenation,
//! calls, map keys) and only matches on exact tags where it must.

use std::fmt;

use bitflags::bitflags;

/// Closed set of runtime kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeTag {
    Integer,
    Float,
    Boolean,
    String,
    Character,
    Void,
    Return,
    Out,
    Jump,
    Error,
    Function,
    UnderLine,
    Native,
    Array,
    Reference,
    Hash,
}

bitflags! {
    /// Dispatch capabilities a value may hold in addition to its tag.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct Capabilities: u8 {
        /// Supports arithmetic (Integer, Float).
        const NUMERIC = 1 << 0;
        /// Exposes a plain string view (String, Character).
        const LETTER = 1 << 1;
        /// Can be invoked (Function, UnderLine, Native).
        const CALLABLE = 1 << 2;
        /// Can produce a `HashKey`.
        const HASHABLE = 1 << 3;
    }
}

impl TypeTag {
    /// Upper-case tag name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TypeTag::Integer => "INTEGER",
            TypeTag::Float => "FLOAT",
            TypeTag::Boolean => "BOOLEAN",
            TypeTag::String => "STRING",
            TypeTag::Character => "CHARACTER",
            TypeTag::Void => "VOID",
            TypeTag::Return => "RET",
            TypeTag::Out => "OUT",
            TypeTag::Jump => "JUMP",
            TypeTag::Error => "ERR",
            TypeTag::Function => "FUNCTION",
            TypeTag::UnderLine => "UNDERLINE",
            TypeTag::Native => "NATIVE",
            TypeTag::Array => "ARRAY",
            TypeTag::Reference => "REFERENCE",
            TypeTag::Hash => "HASH",
        }
    }

    /// Whether this tag belongs to a control signal rather than data.
    #[inline]
    pub fn is_signal(self) -> bool {
        matches!(
            self,
            TypeTag::Return | TypeTag::Out | TypeTag::Jump | TypeTag::Error
        )
    }

    /// Capabilities carried by every value with this tag.
    pub fn capabilities(self) -> Capabilities {
        match self {
            TypeTag::Integer => Capabilities::NUMERIC | Capabilities::HASHABLE,
            TypeTag::Float => Capabilities::NUMERIC,
            TypeTag::Boolean => Capabilities::HASHABLE,
            TypeTag::String | TypeTag::Character => {
                Capabilities::LETTER | Capabilities::HASHABLE
            }
            TypeTag::Function | TypeTag::UnderLine | TypeTag::Native => Capabilities::CALLABLE,
            TypeTag::Void
            | TypeTag::Return
            | TypeTag::Out
            | TypeTag::Jump
            | TypeTag::Error
            | TypeTag::Array
            | TypeTag::Reference
            | TypeTag::Hash => Capabilities::empty(),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests;
