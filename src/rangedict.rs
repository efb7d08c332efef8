//! `RangeDict<K, V>`: spec §4.4. A piecewise-constant map over a
//! totally-ordered key space, stored as disjoint `[begin, end) -> value`
//! intervals sorted by `begin`. `mark(b, e, v)` paints `[b, e)` with `v`,
//! splitting or dropping whatever it overlaps; `remove(b, e, shift,
//! combine)` additionally renumbers everything strictly right of `e`,
//! which is what lets this type double as an allocator bitmap (spec §4.4).

use crate::cola::{Cola, Comparator};
use crate::error::Result;
use crate::interval::Successor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalValue<K, V> {
    pub begin: K,
    pub end: K,
    pub value: V,
}

impl<K, V> IntervalValue<K, V> {
    pub fn new(begin: K, end: K, value: V) -> IntervalValue<K, V> {
        IntervalValue { begin, end, value }
    }
}

#[derive(Clone, Copy, Default)]
pub struct ByBeginV;

impl<K: Ord, V> Comparator<IntervalValue<K, V>> for ByBeginV {
    fn compare(&self, a: &IntervalValue<K, V>, b: &IntervalValue<K, V>) -> std::cmp::Ordering {
        a.begin.cmp(&b.begin)
    }
}

pub struct RangeDict<K, V> {
    cola: Cola<IntervalValue<K, V>, ByBeginV>,
    bounds: Option<(K, K)>,
}

impl<K: Clone + Ord, V: Clone + PartialEq> RangeDict<K, V> {
    pub fn new() -> RangeDict<K, V> {
        RangeDict {
            cola: Cola::new(ByBeginV),
            bounds: None,
        }
    }

    pub fn len(&self) -> u64 {
        self.cola.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cola.is_empty()
    }

    pub fn bounds(&self) -> Option<(K, K)> {
        self.bounds.clone()
    }

    pub fn intervals(&self) -> Vec<IntervalValue<K, V>> {
        self.cola.iter().collect()
    }

    /// Value covering `key`, if any.
    pub fn get(&self, key: &K) -> Option<V> {
        self.intervals()
            .into_iter()
            .find(|iv| iv.begin <= *key && *key < iv.end)
            .map(|iv| iv.value)
    }

    fn recompute_bounds(&mut self) {
        let mut min_begin: Option<K> = None;
        let mut max_end: Option<K> = None;
        for iv in self.cola.iter() {
            min_begin = Some(match min_begin {
                None => iv.begin.clone(),
                Some(m) if iv.begin < m => iv.begin.clone(),
                Some(m) => m,
            });
            max_end = Some(match max_end {
                None => iv.end.clone(),
                Some(m) if iv.end > m => iv.end.clone(),
                Some(m) => m,
            });
        }
        self.bounds = min_begin.zip(max_end);
    }

    fn remove_by_begin(&mut self, begin: &K) -> Result<bool> {
        self.cola.remove_with(|probe| probe.begin.cmp(begin))
    }

    /// Paint `[b, e)` with `v`: fully-covered intervals are dropped,
    /// partially-covered left/right neighbours are shortened (or absorbed
    /// if they already carry `v`), and the new interval is merged with any
    /// touching neighbour that also carries `v` (spec §4.4).
    pub fn mark(&mut self, b: K, e: K, v: V) -> Result<()> {
        let all: Vec<IntervalValue<K, V>> = self.cola.iter().collect();
        let mut new_begin = b.clone();
        let mut new_end = e.clone();

        for iv in &all {
            if iv.end <= b || iv.begin >= e {
                continue;
            }
            self.remove_by_begin(&iv.begin)?;

            if iv.begin < b {
                if iv.value == v {
                    if iv.begin < new_begin {
                        new_begin = iv.begin.clone();
                    }
                } else {
                    self.cola
                        .insert(IntervalValue::new(iv.begin.clone(), b.clone(), iv.value.clone()))?;
                }
            }
            if iv.end > e {
                if iv.value == v {
                    if iv.end > new_end {
                        new_end = iv.end.clone();
                    }
                } else {
                    self.cola
                        .insert(IntervalValue::new(e.clone(), iv.end.clone(), iv.value.clone()))?;
                }
            }
        }

        let remaining: Vec<IntervalValue<K, V>> = self.cola.iter().collect();
        if let Some(left) = remaining.iter().find(|iv| iv.end == new_begin && iv.value == v) {
            new_begin = left.begin.clone();
            self.remove_by_begin(&left.begin)?;
        }
        if let Some(right) = remaining.iter().find(|iv| iv.begin == new_end && iv.value == v) {
            new_end = right.end.clone();
            self.remove_by_begin(&right.begin)?;
        }

        self.cola.insert(IntervalValue::new(new_begin, new_end, v))?;
        self.recompute_bounds();
        Ok(())
    }

    /// Clear `[b, e)`'s contribution (splitting whatever it overlaps) and
    /// renumber every interval strictly right of `e`: its endpoints are
    /// mapped through `shift`, and its value is replaced by
    /// `combine(&old_value, &operand)`. This is the range-remove-with-shift
    /// operation spec §4.4/§9 describes as the basis for using a range
    /// dictionary as an allocator bitmap.
    pub fn remove<S, Cmb>(&mut self, b: K, e: K, shift: S, operand: V, combine: Cmb) -> Result<()>
    where
        S: Fn(&K) -> K,
        Cmb: Fn(&V, &V) -> V,
    {
        let all: Vec<IntervalValue<K, V>> = self.cola.iter().collect();
        for iv in &all {
            self.remove_by_begin(&iv.begin)?;
        }

        for iv in all {
            if iv.end <= b {
                self.cola.insert(iv)?;
            } else if iv.begin >= e {
                self.cola.insert(IntervalValue::new(
                    shift(&iv.begin),
                    shift(&iv.end),
                    combine(&iv.value, &operand),
                ))?;
            } else {
                if iv.begin < b {
                    self.cola
                        .insert(IntervalValue::new(iv.begin.clone(), b.clone(), iv.value.clone()))?;
                }
                if iv.end > e {
                    self.cola.insert(IntervalValue::new(
                        shift(&e),
                        shift(&iv.end),
                        combine(&iv.value, &operand),
                    ))?;
                }
            }
        }

        // The shift can land a renumbered interval's begin exactly on a
        // surviving interval's end with an equal value -- re-run the same
        // touching-and-equal-value merge `mark()` performs (spec §4.4's
        // adjacency-merge invariant applies after every public operation,
        // not just `mark`).
        let rebuilt: Vec<IntervalValue<K, V>> = self.cola.iter().collect();
        let mut merged: Vec<IntervalValue<K, V>> = Vec::with_capacity(rebuilt.len());
        for iv in rebuilt {
            match merged.last_mut() {
                Some(last) if last.end == iv.begin && last.value == iv.value => {
                    last.end = iv.end;
                }
                _ => merged.push(iv),
            }
        }
        for iv in self.cola.iter().collect::<Vec<_>>() {
            self.remove_by_begin(&iv.begin)?;
        }
        for iv in merged {
            self.cola.insert(iv)?;
        }

        self.recompute_bounds();
        Ok(())
    }
}

impl<K: Clone + Ord + Successor, V: Clone + PartialEq> RangeDict<K, V> {
    pub fn mark_point(&mut self, x: K, v: V) -> Result<()> {
        let next = x.successor();
        self.mark(x, next, v)
    }
}

impl<K: Clone + Ord, V: Clone + PartialEq> Default for RangeDict<K, V> {
    fn default() -> Self {
        RangeDict::new()
    }
}

#[cfg(test)]
#[path = "rangedict_test.rs"]
mod rangedict_test;
