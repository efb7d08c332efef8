//! `OrderedDict<K, V>`: spec §4.2/§3.4's ordered dictionary, specialising
//! [crate::cola::Cola] to `T = (K, V)` compared by `K` alone via
//! [crate::cola::ByFirst].

use crate::cola::{ByFirst, Cola, Found, Iter};
use crate::error::{Error, Result};

pub struct OrderedDict<K, V> {
    cola: Cola<(K, V), ByFirst>,
}

impl<K: Clone + Ord + std::fmt::Debug, V: Clone> OrderedDict<K, V> {
    pub fn new() -> OrderedDict<K, V> {
        OrderedDict {
            cola: Cola::new(ByFirst),
        }
    }

    pub fn len(&self) -> u64 {
        self.cola.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cola.is_empty()
    }

    fn find_key(&self, key: &K) -> Found {
        self.cola.find_with(|(k, _)| k.cmp(key))
    }

    /// `add(k, v)`: fails with [Error::DuplicateKey] if `k` is already
    /// present (spec §4.2).
    pub fn add(&mut self, key: K, value: V) -> Result<()> {
        if matches!(self.find_key(&key), Found::Hit { .. }) {
            return Err(Error::DuplicateKey(format!("{:?}", key)));
        }
        self.cola.insert((key, value))
    }

    /// `set(k, v)`: insert if absent, `set_at` in place if present.
    pub fn set(&mut self, key: K, value: V) -> Result<()> {
        match self.find_key(&key) {
            Found::Hit { level, offset } => self.cola.set_at(level, offset, (key, value)),
            Found::Miss => self.cola.insert((key, value)),
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        matches!(self.find_key(key), Found::Hit { .. })
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        match self.find_key(key) {
            Found::Hit { level, offset } => self.cola.get_at(level, offset).map(|(_, v)| v),
            Found::Miss => None,
        }
    }

    pub fn remove(&mut self, key: &K) -> Result<bool> {
        self.cola.remove_with(|(k, _)| k.cmp(key))
    }

    pub fn iter(&self) -> Iter<(K, V), ByFirst> {
        self.cola.iter()
    }

    /// Every full level's run, paired with its level index -- used by the
    /// snapshot codec (spec §4.7) to write runs out without re-sorting.
    pub(crate) fn full_runs(&self) -> Vec<(u32, &[(K, V)])> {
        self.cola.full_runs()
    }

    pub(crate) fn max_levels(&self) -> u32 {
        self.cola.max_levels()
    }

    pub fn stats(&self) -> crate::cola::Stats {
        self.cola.stats()
    }

    /// Wrap an already-built [Cola] as an [OrderedDict] -- used by the
    /// snapshot codec and bulk load, which place pre-sorted runs directly
    /// via [crate::cola::bulk] rather than through [Self::add].
    pub(crate) fn from_cola(cola: Cola<(K, V), ByFirst>) -> OrderedDict<K, V> {
        OrderedDict { cola }
    }

    /// Build a fresh dictionary from `items` in one pass (spec §4.1 "Bulk
    /// load"): if `ordered` is true the pairs are assumed already sorted
    /// by `K` and placed directly into the levels selected by their
    /// count's bits; otherwise they are sorted first.
    pub fn bulk_load(items: Vec<(K, V)>, ordered: bool) -> Result<OrderedDict<K, V>> {
        let cola = crate::cola::bulk::bulk_load(items, ordered, ByFirst)?;
        Ok(OrderedDict::from_cola(cola))
    }
}

impl<K: Clone + Ord + std::fmt::Debug, V: Clone> Default for OrderedDict<K, V> {
    fn default() -> Self {
        OrderedDict::new()
    }
}

#[cfg(test)]
#[path = "odict_test.rs"]
mod odict_test;
