//! Mutable containers: arrays and hashes.
//!
//! Both are held behind a `Shared` handle by `Value`. Their contents are
//! mutated in place; copies are explicit (`deep_copy`) and driven by
//! `Value::copy`.

use rustc_hash::FxHashMap;

use crate::errors::{index_out_of_bounds, EvalError};
use crate::hash_key::HashKey;
use crate::reference::AllocError;

use super::Value;

// ArrayValue

/// Ordered sequence of values.
#[derive(Debug, Default)]
pub struct ArrayValue {
    elements: Vec<Value>,
    /// One-shot: the next `Value::copy` shares this array instead of copying.
    share_next_copy: bool,
}

impl ArrayValue {
    pub fn new(elements: Vec<Value>) -> Self {
        ArrayValue {
            elements,
            share_next_copy: false,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[Value] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.elements.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.elements.get(index)
    }

    /// Replace the element at `index` in place, returning the old element.
    pub fn set(&mut self, index: usize, value: Value) -> Result<Value, EvalError> {
        let len = self.elements.len();
        match self.elements.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => Err(index_out_of_bounds(
                i64::try_from(index).unwrap_or(i64::MAX),
                len,
            )),
        }
    }

    pub fn push(&mut self, value: Value) {
        self.elements.push(value);
    }

    /// Let the next `copy` of this array reuse it instead of copying.
    ///
    /// The flag is consumed by that copy; later copies are deep again.
    pub fn mark_shareable(&mut self) {
        self.share_next_copy = true;
    }

    pub(crate) fn take_share_flag(&mut self) -> bool {
        std::mem::take(&mut self.share_next_copy)
    }

    /// Deep copy of every element. The result is never shareable.
    pub(crate) fn deep_copy(&self) -> ArrayValue {
        ArrayValue::new(self.elements.iter().map(Value::deep_copy).collect())
    }
}

// HashValue

/// One hash entry: the key as written and the owned slot.
#[derive(Debug)]
pub struct HashPair {
    key: Value,
    /// `None` while an allocated slot has not been assigned yet.
    value: Option<Value>,
    /// Distinguishes this entry from a later one created under the same key.
    generation: u64,
}

impl HashPair {
    pub fn key(&self) -> &Value {
        &self.key
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn set_value(&mut self, value: Value) {
        self.value = Some(value);
    }
}

/// Map from `HashKey` to slots.
#[derive(Debug, Default)]
pub struct HashValue {
    pairs: FxHashMap<HashKey, HashPair>,
    next_generation: u64,
    /// One-shot: the next `Value::copy` shares this hash instead of copying.
    share_next_copy: bool,
}

impl HashValue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Value stored under `key`; `None` if absent, unset, or `key` is unhashable.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        let key = key.hash_key()?;
        self.pairs.get(&key).and_then(HashPair::value)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        key.hash_key().is_some_and(|k| self.pairs.contains_key(&k))
    }

    /// Store `value` under `key`, returning the previous value if any.
    ///
    /// Overwriting keeps the existing slot, so references into it observe
    /// the new value.
    pub fn insert(&mut self, key: Value, value: Value) -> Result<Option<Value>, AllocError> {
        let hash_key = key
            .hash_key()
            .ok_or_else(|| AllocError::Unhashable(key.type_tag()))?;
        if let Some(pair) = self.pairs.get_mut(&hash_key) {
            return Ok(pair.value.replace(value));
        }
        self.vacant_entry(hash_key, key, Some(value));
        Ok(None)
    }

    /// Remove the entry for `key`, returning its pair.
    pub fn remove(&mut self, key: &Value) -> Option<HashPair> {
        let key = key.hash_key()?;
        self.pairs.remove(&key)
    }

    /// Entries in canonical key order.
    pub fn sorted_pairs(&self) -> Vec<(&HashKey, &HashPair)> {
        let mut pairs: Vec<_> = self.pairs.iter().collect();
        pairs.sort_unstable_by(|a, b| a.0.cmp(b.0));
        pairs
    }

    /// Let the next `copy` of this hash reuse it instead of copying.
    pub fn mark_shareable(&mut self) {
        self.share_next_copy = true;
    }

    pub(crate) fn take_share_flag(&mut self) -> bool {
        std::mem::take(&mut self.share_next_copy)
    }

    /// Assigned slot values, in no particular order.
    pub(crate) fn values(&self) -> impl Iterator<Item = &Value> {
        self.pairs.values().filter_map(HashPair::value)
    }

    pub(crate) fn pair(&self, key: &HashKey) -> Option<&HashPair> {
        self.pairs.get(key)
    }

    pub(crate) fn pair_mut(&mut self, key: &HashKey) -> Option<&mut HashPair> {
        self.pairs.get_mut(key)
    }

    pub(crate) fn remove_key(&mut self, key: &HashKey) -> bool {
        self.pairs.remove(key).is_some()
    }

    /// Create a fresh entry for a key known to be absent; returns its generation.
    pub(crate) fn vacant_entry(&mut self, hash_key: HashKey, key: Value, value: Option<Value>) -> u64 {
        let generation = self.next_generation;
        self.next_generation = self.next_generation.wrapping_add(1);
        self.pairs.insert(
            hash_key,
            HashPair {
                key,
                value,
                generation,
            },
        );
        generation
    }

    /// Deep copy of every slot value. Keys are scalars and are shared.
    pub(crate) fn deep_copy(&self) -> HashValue {
        let pairs = self
            .pairs
            .iter()
            .map(|(hash_key, pair)| {
                let copied = HashPair {
                    key: pair.key.clone(),
                    value: pair.value.as_ref().map(Value::deep_copy),
                    generation: pair.generation,
                };
                (hash_key.clone(), copied)
            })
            .collect();
        HashValue {
            pairs,
            next_generation: self.next_generation,
            share_next_copy: false,
        }
    }
}

impl PartialEq for HashValue {
    /// Same keys with equal slot contents; generations and flags are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.pairs.len() == other.pairs.len()
            && self.pairs.iter().all(|(k, pair)| {
                other
                    .pairs
                    .get(k)
                    .is_some_and(|theirs| pair.value == theirs.value)
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
