//! `RangeSet<K>`: spec §4.3 / §3.5. Stores a COLA of disjoint half-open
//! intervals `[begin, end)` ordered by `begin`, with merge-on-insert
//! semantics: two intervals that become adjacent (`end == begin` of the
//! next) are fused into one.

use crate::cola::{Cola, Comparator};
use crate::error::Result;
use crate::interval::Successor;

/// A half-open interval `[begin, end)`. `end > begin` is an invariant
/// maintained by [RangeSet]/[crate::rangedict::RangeDict]; it is not
/// enforced by this type alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval<K> {
    pub begin: K,
    pub end: K,
}

impl<K> Interval<K> {
    pub fn new(begin: K, end: K) -> Interval<K> {
        Interval { begin, end }
    }
}

/// Orders [Interval]s by `begin` alone -- intervals are disjoint by
/// construction, so `begin` alone is already a total order across them.
#[derive(Clone, Copy, Default)]
pub struct ByBegin;

impl<K: Ord> Comparator<Interval<K>> for ByBegin {
    fn compare(&self, a: &Interval<K>, b: &Interval<K>) -> std::cmp::Ordering {
        a.begin.cmp(&b.begin)
    }
}

pub struct RangeSet<K> {
    cola: Cola<Interval<K>, ByBegin>,
    bounds: Option<(K, K)>,
}

impl<K: Clone + Ord> RangeSet<K> {
    pub fn new() -> RangeSet<K> {
        RangeSet {
            cola: Cola::new(ByBegin),
            bounds: None,
        }
    }

    pub fn len(&self) -> u64 {
        self.cola.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cola.is_empty()
    }

    /// `(min begin, max end)` over all stored intervals, or `None` when
    /// empty (spec §3.5/§8 invariant 4; a generic `K` has no natural
    /// `(0, 0)`, so emptiness is represented as `None` rather than a
    /// fabricated zero value).
    pub fn bounds(&self) -> Option<(K, K)> {
        self.bounds.clone()
    }

    pub fn intervals(&self) -> Vec<Interval<K>> {
        self.cola.iter().collect()
    }

    fn recompute_bounds(&mut self) {
        let all = self.cola.iter();
        let mut min_begin: Option<K> = None;
        let mut max_end: Option<K> = None;
        for iv in all {
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

    /// Mark `[b, e)` as covered: remove every stored interval intersecting
    /// `[b, e)`, insert their union with `[b, e)`, then merge with an
    /// exactly-touching left or right neighbour (spec §4.3).
    pub fn mark(&mut self, b: K, e: K) -> Result<()> {
        let all = self.cola.iter();
        let mut new_begin = b.clone();
        let mut new_end = e.clone();
        let mut overlapping = Vec::new();
        for iv in all {
            if iv.begin < e && iv.end > b {
                if iv.begin < new_begin {
                    new_begin = iv.begin.clone();
                }
                if iv.end > new_end {
                    new_end = iv.end.clone();
                }
                overlapping.push(iv);
            }
        }
        for iv in &overlapping {
            self.cola.remove_with(|probe| probe.begin.cmp(&iv.begin))?;
        }

        let remaining: Vec<Interval<K>> = self.cola.iter().collect();
        if let Some(left) = remaining.iter().find(|iv| iv.end == new_begin) {
            new_begin = left.begin.clone();
            self.cola.remove_with(|probe| probe.begin.cmp(&left.begin))?;
        }
        if let Some(right) = remaining.iter().find(|iv| iv.begin == new_end) {
            new_end = right.end.clone();
            self.cola.remove_with(|probe| probe.begin.cmp(&right.begin))?;
        }

        self.cola.insert(Interval::new(new_begin, new_end))?;
        self.recompute_bounds();
        Ok(())
    }
}

impl<K: Clone + Ord + Successor> RangeSet<K> {
    /// `mark(x)` == `mark(x, x.successor())` (spec §4.3).
    pub fn mark_point(&mut self, x: K) -> Result<()> {
        let next = x.successor();
        self.mark(x, next)
    }
}

impl<K: Clone + Ord> Default for RangeSet<K> {
    fn default() -> Self {
        RangeSet::new()
    }
}

#[cfg(test)]
#[path = "rangeset_test.rs"]
mod rangeset_test;
