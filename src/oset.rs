//! `OrderedSet<K>`: spec §4.2's thin wrapper over [crate::cola::Cola],
//! specialised to `T = K`. Grounded on the teacher's `llrb::Index` surface
//! (`set`, `get`, `remove`, iteration by key order) but backed by the COLA
//! engine instead of a red-black tree.

use crate::cola::{Cola, Comparator, Found, Iter, NaturalOrd};
use crate::error::{Error, Result};

pub struct OrderedSet<K, C = NaturalOrd> {
    cola: Cola<K, C>,
}

impl<K: Clone + Ord> OrderedSet<K, NaturalOrd> {
    pub fn new() -> OrderedSet<K, NaturalOrd> {
        OrderedSet {
            cola: Cola::new(NaturalOrd),
        }
    }
}

impl<K: Clone + Ord> Default for OrderedSet<K, NaturalOrd> {
    fn default() -> Self {
        OrderedSet::new()
    }
}

impl<K: Clone, C: Comparator<K>> OrderedSet<K, C> {
    pub fn with_comparator(cmp: C) -> OrderedSet<K, C> {
        OrderedSet { cola: Cola::new(cmp) }
    }

    pub fn len(&self) -> u64 {
        self.cola.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cola.is_empty()
    }

    /// Insert `key`. Fails with [Error::DuplicateKey] if already present,
    /// matching spec §4.2's `insert(k)` contract.
    pub fn insert(&mut self, key: K) -> Result<()>
    where
        K: std::fmt::Debug,
    {
        if matches!(self.cola.find(&key), Found::Hit { .. }) {
            return Err(Error::DuplicateKey(format!("{:?}", key)));
        }
        self.cola.insert(key)
    }

    /// Insert-or-overwrite: absent keys are inserted, present keys are
    /// replaced in place via [Cola::set_at].
    pub fn set(&mut self, key: K) -> Result<()> {
        match self.cola.find(&key) {
            Found::Hit { level, offset } => self.cola.set_at(level, offset, key),
            Found::Miss => self.cola.insert(key),
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        matches!(self.cola.find(key), Found::Hit { .. })
    }

    pub fn get(&self, key: &K) -> Option<&K> {
        match self.cola.find(key) {
            Found::Hit { level, offset } => self.cola.get_at(level, offset),
            Found::Miss => None,
        }
    }

    pub fn remove(&mut self, key: &K) -> Result<bool> {
        self.cola.remove(key)
    }

    pub fn iter(&self) -> Iter<K, C> {
        self.cola.iter()
    }

    /// Smallest `2^L - 1 >= requested` (spec §4.2's observable capacity
    /// convention, `L = MAX_LEVELS`).
    pub fn capacity_for(requested: u64) -> u64 {
        let mut cap = 1u64;
        while cap - 1 < requested {
            cap <<= 1;
        }
        cap - 1
    }
}

#[cfg(test)]
#[path = "oset_test.rs"]
mod oset_test;
