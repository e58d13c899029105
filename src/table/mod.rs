//! Open-addressing hash table backing JSON objects.
//!
//! Slots live in a single `Vec<Slot>`. Collisions are resolved by linear
//! probing from `hash(key) mod capacity`, wrapping around the end of the
//! slot vector. The table doubles before any insertion of a new key that
//! would bring occupancy to [`LOAD_FACTOR`], so a probe always reaches
//! either the key or an empty slot.

use std::fmt;
use std::iter::FusedIterator;
use std::mem;
use std::{slice, vec};

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use crate::constants::{DEFAULT_CAPACITY, LOAD_FACTOR};
use crate::text::string::slot_index;
use crate::Value;

/// A key/value cell stored in an occupied slot.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Entry {
    key: String,
    value: Value,
}

impl Entry {
    fn new(key: String, value: Value) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    /// Replace the value, returning the old one.
    pub fn set_value(&mut self, value: Value) -> Value {
        mem::replace(&mut self.value, value)
    }

    pub fn into_parts(self) -> (String, Value) {
        (self.key, self.value)
    }
}

#[derive(Debug, Clone, Default)]
enum Slot {
    #[default]
    Empty,
    Occupied(Entry),
}

impl Slot {
    fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied(_))
    }

    fn entry(&self) -> Option<&Entry> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            Slot::Empty => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    Found(usize),
    Vacant(usize),
}

#[derive(Clone)]
pub struct HashTable {
    slots: Vec<Slot>,
    size: usize,
}

impl HashTable {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a table with `capacity` slots (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: empty_slots(capacity.max(1)),
            size: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Home slot of `key` for the current capacity.
    pub fn hash(&self, key: &str) -> usize {
        slot_index(key, self.capacity())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        match self.probe(key)? {
            Probe::Found(index) => self.slots[index].entry().map(Entry::value),
            Probe::Vacant(_) => None,
        }
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        match self.probe(key)? {
            Probe::Found(index) => match &mut self.slots[index] {
                Slot::Occupied(entry) => Some(entry.value_mut()),
                Slot::Empty => None,
            },
            Probe::Vacant(_) => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        matches!(self.probe(key), Some(Probe::Found(_)))
    }

    /// Insert or overwrite `key`. Returns the previous value when the key was
    /// already present; the size only changes for new keys.
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        let mut probe = self.probe(&key);
        if !matches!(probe, Some(Probe::Found(_))) && self.needs_resize() {
            self.resize();
            probe = self.probe(&key);
        }

        loop {
            match probe {
                Some(Probe::Found(index)) => {
                    return match &mut self.slots[index] {
                        Slot::Occupied(entry) => Some(entry.set_value(value)),
                        Slot::Empty => None,
                    };
                }
                Some(Probe::Vacant(index)) => {
                    self.slots[index] = Slot::Occupied(Entry::new(key, value));
                    self.size += 1;
                    return None;
                }
                None => {
                    self.resize();
                    probe = self.probe(&key);
                }
            }
        }
    }

    /// Double the capacity and re-seat every entry. Exactly one doubling.
    pub fn resize(&mut self) {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity * 2;
        let old_slots = mem::replace(&mut self.slots, empty_slots(new_capacity));

        for slot in old_slots {
            if let Slot::Occupied(entry) = slot {
                let mut index = slot_index(&entry.key, new_capacity);
                while self.slots[index].is_occupied() {
                    index = (index + 1) % new_capacity;
                }
                self.slots[index] = Slot::Occupied(entry);
            }
        }

        debug!(
            old_capacity,
            new_capacity,
            entries = self.size,
            "hash table resized"
        );
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.size,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.iter().map(|(_, value)| value)
    }

    fn needs_resize(&self) -> bool {
        (self.size + 1) as f64 / self.capacity() as f64 >= LOAD_FACTOR
    }

    // Bounded to `capacity` steps; `None` only when every slot holds another key.
    fn probe(&self, key: &str) -> Option<Probe> {
        let capacity = self.capacity();
        let mut index = self.hash(key);
        for _ in 0..capacity {
            match &self.slots[index] {
                Slot::Empty => return Some(Probe::Vacant(index)),
                Slot::Occupied(entry) if entry.key == key => return Some(Probe::Found(index)),
                Slot::Occupied(_) => index = (index + 1) % capacity,
            }
        }
        None
    }
}

fn empty_slots(capacity: usize) -> Vec<Slot> {
    std::iter::repeat_with(|| Slot::Empty)
        .take(capacity)
        .collect()
}

impl Default for HashTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for HashTable {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl fmt::Debug for HashTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl Serialize for HashTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.size))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for HashTable {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut table = HashTable::new();
        table.extend(iter);
        table
    }
}

impl<K: Into<String>> Extend<(K, Value)> for HashTable {
    fn extend<I: IntoIterator<Item = (K, Value)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

/// Borrowing iterator over occupied slots, in slot order.
pub struct Iter<'a> {
    slots: slice::Iter<'a, Slot>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Slot::Occupied(entry) = slot {
                self.remaining -= 1;
                return Some((entry.key(), entry.value()));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

pub struct IntoIter {
    slots: vec::IntoIter<Slot>,
    remaining: usize,
}

impl Iterator for IntoIter {
    type Item = (String, Value);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Slot::Occupied(entry) = slot {
                self.remaining -= 1;
                return Some(entry.into_parts());
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for IntoIter {}

impl FusedIterator for IntoIter {}

impl<'a> IntoIterator for &'a HashTable {
    type Item = (&'a str, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for HashTable {
    type Item = (String, Value);
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            remaining: self.size,
            slots: self.slots.into_iter(),
        }
    }
}
