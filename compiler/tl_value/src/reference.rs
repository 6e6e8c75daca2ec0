//! Allocation capability and slot aliasing.
//!
//! A container that implements [`Allocate`] can hand out [`Slot`]s: handles
//! to one of its entries that do not take ownership of the entry. A
//! [`Reference`] is a slot plus the index used to obtain it and a const flag;
//! it is the only aliasing primitive in the value model.
//!
//! Slots are index-based, not pointers. Each use re-resolves the entry
//! through the container handle, the key, and the entry's generation, so a
//! slot whose entry was deallocated reports [`SlotError::Vacated`] instead of
//! reading a newer entry that reused the key.

use std::fmt;

use crate::hash_key::HashKey;
use crate::heap::{Heap, Shared};
use crate::tag::TypeTag;
use crate::value::{HashRef, HashValue, Value};

/// Why an allocation request did not create a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AllocError {
    /// An entry for this key already exists; it was left untouched.
    #[error("an entry for this index already exists")]
    AlreadyPresent,
    /// The index value has no `HashKey`.
    #[error("{0} cannot be used as an index")]
    Unhashable(TypeTag),
}

/// A slot whose entry has been removed from its container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    #[error("slot was deallocated")]
    Vacated,
    /// The value would contain the slot's own container.
    #[error("a container cannot be stored inside itself")]
    Cycle,
}

/// Why assignment through a reference failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    #[error("cannot assign through a const reference")]
    Constant,
    #[error(transparent)]
    Slot(#[from] SlotError),
}

/// Allocation capability of a container.
pub trait Allocate {
    /// Create an empty entry for `index` and return a handle to it.
    ///
    /// Never overwrites: an existing entry yields `AllocError::AlreadyPresent`.
    fn allocate(&self, index: &Value) -> Result<Slot, AllocError>;

    /// Remove the entry for `index`. Returns whether anything was removed.
    fn deallocate(&self, index: &Value) -> bool;

    /// Handle to the existing entry for `index`, if there is one.
    fn slot(&self, index: &Value) -> Option<Slot>;
}

impl Allocate for Shared<HashValue> {
    fn allocate(&self, index: &Value) -> Result<Slot, AllocError> {
        let key = index
            .hash_key()
            .ok_or_else(|| AllocError::Unhashable(index.type_tag()))?;
        let mut hash = self.borrow_mut();
        if hash.pair(&key).is_some() {
            tracing::debug!(%key, "allocation refused: entry exists");
            return Err(AllocError::AlreadyPresent);
        }
        let generation = hash.vacant_entry(key.clone(), index.clone(), None);
        tracing::trace!(%key, generation, "slot allocated");
        Ok(Slot {
            origin: self.clone(),
            key,
            generation,
        })
    }

    fn deallocate(&self, index: &Value) -> bool {
        let Some(key) = index.hash_key() else {
            return false;
        };
        let removed = self.borrow_mut().remove_key(&key);
        tracing::trace!(%key, removed, "slot deallocated");
        removed
    }

    fn slot(&self, index: &Value) -> Option<Slot> {
        let key = index.hash_key()?;
        let generation = self.borrow().pair(&key)?.generation();
        Some(Slot {
            origin: self.clone(),
            key,
            generation,
        })
    }
}

/// Handle to one entry of a hash.
///
/// Holds the container alive; never owns the entry.
#[derive(Clone)]
pub struct Slot {
    origin: HashRef,
    key: HashKey,
    generation: u64,
}

impl Slot {
    /// Current value of the entry; `None` if unset or vacated.
    pub fn get(&self) -> Option<Value> {
        let hash = self.origin.borrow();
        hash.pair(&self.key)
            .filter(|pair| pair.generation() == self.generation)
            .and_then(|pair| pair.value().cloned())
    }

    /// Overwrite the entry in place.
    ///
    /// Refuses a value from which the slot's container is reachable.
    pub fn set(&self, value: Value) -> Result<(), SlotError> {
        if value.reaches(&self.origin) {
            tracing::debug!(key = %self.key, "refused self-containing slot value");
            return Err(SlotError::Cycle);
        }
        let mut hash = self.origin.borrow_mut();
        match hash.pair_mut(&self.key) {
            Some(pair) if pair.generation() == self.generation => {
                pair.set_value(value);
                Ok(())
            }
            _ => Err(SlotError::Vacated),
        }
    }

    /// Whether the entry still exists.
    pub fn is_live(&self) -> bool {
        self.origin
            .borrow()
            .pair(&self.key)
            .is_some_and(|pair| pair.generation() == self.generation)
    }

    pub fn key(&self) -> &HashKey {
        &self.key
    }

    /// Container that owns the entry.
    pub fn origin(&self) -> &HashRef {
        &self.origin
    }

    /// Whether both handles resolve to the same entry.
    pub fn same_slot(&self, other: &Slot) -> bool {
        self.origin.ptr_eq(&other.origin)
            && self.key == other.key
            && self.generation == other.generation
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("key", &self.key)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

/// Alias to a container slot.
#[derive(Clone, Debug)]
pub struct Reference {
    slot: Slot,
    index: Heap<Value>,
    constant: bool,
}

impl Reference {
    pub fn new(slot: Slot, index: Value, constant: bool) -> Self {
        Reference {
            slot,
            index: Heap::new(index),
            constant,
        }
    }

    /// Allocate a fresh entry in `origin` and alias it.
    pub fn allocate<A: Allocate>(
        origin: &A,
        index: Value,
        constant: bool,
    ) -> Result<Self, AllocError> {
        let slot = origin.allocate(&index)?;
        Ok(Reference::new(slot, index, constant))
    }

    /// Aliased value; `None` while the slot is unset or after it was vacated.
    pub fn get(&self) -> Option<Value> {
        self.slot.get()
    }

    /// Write through the alias.
    pub fn assign(&self, value: Value) -> Result<(), ReferenceError> {
        if self.constant {
            return Err(ReferenceError::Constant);
        }
        self.slot.set(value)?;
        Ok(())
    }

    pub fn is_const(&self) -> bool {
        self.constant
    }

    /// Index the reference was created with.
    pub fn index(&self) -> &Value {
        &self.index
    }

    pub fn slot(&self) -> &Slot {
        &self.slot
    }

    /// Deep copy of the aliased value, never the alias itself.
    pub(crate) fn copy_target(&self) -> Value {
        self.get().map_or(Value::Void, |v| v.deep_copy())
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.constant {
            f.write_str("Const ")?;
        }
        match self.get() {
            Some(v) => write!(f, "Reference: {v}"),
            None => f.write_str("Reference: void"),
        }
    }
}
