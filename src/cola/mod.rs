//! Module `cola` implements the Cache-Oblivious Lookahead Array that backs
//! every ordered container in this crate: [ordered set][crate::oset],
//! [ordered dictionary][crate::odict], [range set][crate::rangeset] and
//! [range dictionary][crate::rangedict] are thin specialisations of
//! [Cola] over different element types `T` and comparators.
//!
//! A COLA of size `N` is an array of levels `L[0..MAX_LEVELS)`, level `i`
//! holding `2^i` slots; level `i` is either empty or full and sorted. The
//! set of full levels is exactly the set bits of `N` -- that correspondence
//! is the central invariant this module maintains across every public
//! operation (checked in debug builds by [Cola::debug_check_invariants]).
//!
//! The source this crate is ported from passes a type-erased comparator
//! object at runtime; here the comparator is a generic type parameter
//! implementing [Comparator], so the compiler monomorphises the comparison
//! on the hot path instead of going through a vtable.

pub mod bits;
pub mod bulk;
pub mod iter;

use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};

pub use bits::map_offset_to_index;
pub use iter::{Bound, Iter};

/// Default cap on the number of levels a [Cola] may grow to, overridable
/// via [Cola::with_max_levels] or the `ENGINE_MAX_LEVELS` environment
/// variable (see [crate::config]). `2^24` elements is far beyond what an
/// in-process store is expected to hold; the cap exists only to bound the
/// `levels` vector's preallocation.
pub const DEFAULT_MAX_LEVELS: u32 = 24;

/// A comparator over `T`, supplied as a generic type parameter so
/// comparisons monomorphise rather than going through a trait object on
/// every merge step. Implementors must be a total order consistent across
/// calls -- the same requirement the source's runtime comparator object
/// carried, just checked by the type system instead of by convention.
pub trait Comparator<T>: Clone {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Natural-order comparator for any `T: Ord`. Used by [crate::oset] and by
/// [crate::rangeset]/[crate::rangedict], which compare whole structured
/// values (or tuples already ordered by their leading field).
#[derive(Clone, Copy, Default)]
pub struct NaturalOrd;

impl<T: Ord> Comparator<T> for NaturalOrd {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Compares `(K, V)` pairs by `K` alone, ignoring `V` -- the ordered
/// dictionary's comparator (spec §3.4: "the dictionary stores `(K,V)`
/// comparing by `K` only").
#[derive(Clone, Copy, Default)]
pub struct ByFirst;

impl<K: Ord, V> Comparator<(K, V)> for ByFirst {
    fn compare(&self, a: &(K, V), b: &(K, V)) -> Ordering {
        a.0.cmp(&b.0)
    }
}

/// Level occupancy snapshot returned by [Cola::stats].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub n: u64,
    pub max_levels: u32,
    pub full_levels: Vec<Option<usize>>,
}

/// The result of [Cola::find]: a hit carries the physical address so a
/// caller can follow up with [Cola::set_at], a miss carries nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Found {
    Hit { level: u32, offset: u64 },
    Miss,
}

/// An array of sorted runs over `T`, ordered by comparator `C`.
#[derive(Clone)]
pub struct Cola<T, C> {
    cmp: C,
    levels: Vec<Option<Vec<T>>>,
    n: u64,
    max_levels: u32,
}

impl<T: fmt::Debug, C> fmt::Debug for Cola<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Cola")
            .field("n", &self.n)
            .field("max_levels", &self.max_levels)
            .field(
                "full_levels",
                &self
                    .levels
                    .iter()
                    .enumerate()
                    .filter_map(|(i, l)| l.as_ref().map(|_| i))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<T: Clone, C: Comparator<T>> Cola<T, C> {
    pub fn new(cmp: C) -> Cola<T, C> {
        Cola::with_max_levels(cmp, DEFAULT_MAX_LEVELS)
    }

    pub fn with_max_levels(cmp: C, max_levels: u32) -> Cola<T, C> {
        let mut levels = Vec::with_capacity(max_levels as usize);
        levels.resize_with(max_levels as usize, || None);
        Cola {
            cmp,
            levels,
            n: 0,
            max_levels,
        }
    }

    pub fn len(&self) -> u64 {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn max_levels(&self) -> u32 {
        self.max_levels
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    fn grow_levels(&mut self, upto: u32) -> Result<()> {
        if upto >= self.max_levels {
            return Err(Error::Fatal(format!(
                "cola exceeded max_levels={}",
                self.max_levels
            )));
        }
        Ok(())
    }

    /// Insert `item`, cascading merges upward through every already-full
    /// level starting at level 0, exactly as described in spec §4.1. The
    /// caller is responsible for key-uniqueness policy (see
    /// [crate::oset]/[crate::odict]): `Cola` itself merges whatever it is
    /// given, and on equal keys the freshly inserted buffer sorts first.
    pub fn insert(&mut self, item: T) -> Result<()> {
        let mut buf = vec![item];
        let mut level = 0u32;
        while (self.n >> level) & 1 == 1 {
            self.grow_levels(level)?;
            let existing = self.levels[level as usize]
                .take()
                .expect("bit set implies level populated");
            buf = merge_newer_wins(buf, existing, &self.cmp);
            level += 1;
        }
        self.grow_levels(level)?;
        self.levels[level as usize] = Some(buf);
        self.n += 1;
        Ok(())
    }

    /// Binary search every full level, scanning from the highest populated
    /// level down to level 0 ("search top-to-bottom levels; higher-level
    /// hits are newer", spec §4.1) and returning the first hit found.
    pub fn find(&self, key: &T) -> Found {
        self.find_with(|probe| self.cmp.compare(probe, key))
    }

    /// Binary search driven by an arbitrary probe function rather than a
    /// concrete `T` to compare against -- lets [crate::odict] search by key
    /// alone without having to manufacture a placeholder value half.
    pub fn find_with<F>(&self, probe_cmp: F) -> Found
    where
        F: Fn(&T) -> Ordering,
    {
        for level in (0..self.max_levels).rev() {
            if let Some(run) = &self.levels[level as usize] {
                if let Ok(offset) = run.binary_search_by(|probe| probe_cmp(probe)) {
                    return Found::Hit {
                        level,
                        offset: offset as u64,
                    };
                }
            }
        }
        Found::Miss
    }

    pub fn get_at(&self, level: u32, offset: u64) -> Option<&T> {
        self.levels
            .get(level as usize)
            .and_then(|slot| slot.as_ref())
            .and_then(|run| run.get(offset as usize))
    }

    /// Replace the element at `(level, offset)` in place. Only legal when
    /// `new_value` compares equal (under `C`) to the element it replaces --
    /// otherwise the level's sort order would break (spec §4.1).
    pub fn set_at(&mut self, level: u32, offset: u64, new_value: T) -> Result<()> {
        let run = self.levels[level as usize]
            .as_mut()
            .ok_or_else(|| Error::Fatal(format!("level {} is not populated", level)))?;
        let slot = run
            .get_mut(offset as usize)
            .ok_or_else(|| Error::Fatal(format!("offset {} out of range at level {}", offset, level)))?;
        if self.cmp.compare(slot, &new_value) != Ordering::Equal {
            return Err(Error::Fatal(
                "set_at: new_value does not compare equal to the slot it replaces".to_string(),
            ));
        }
        *slot = new_value;
        Ok(())
    }

    /// Remove the first element matching `key`. Returns `true` if a match
    /// was found and removed. Implemented as "splice-and-rebuild" (spec
    /// §4.1): every full level is drained into one globally sorted run
    /// (minus the removed element) and redistributed across the levels
    /// selected by `N-1`'s bits, so level occupancy keeps tracking the new
    /// count exactly.
    pub fn remove(&mut self, key: &T) -> Result<bool> {
        self.remove_with(|probe| self.cmp.compare(probe, key))
    }

    /// As [Cola::remove], but locating the element via a probe function
    /// rather than a concrete `T` (see [Cola::find_with]).
    pub fn remove_with<F>(&mut self, probe_cmp: F) -> Result<bool>
    where
        F: Fn(&T) -> Ordering,
    {
        let found = self.find_with(&probe_cmp);
        let (hit_level, hit_offset) = match found {
            Found::Miss => return Ok(false),
            Found::Hit { level, offset } => (level, offset),
        };

        let mut all: Vec<T> = Vec::with_capacity(self.n as usize - 1);
        for (level, run) in self.levels.iter_mut().enumerate() {
            if let Some(run) = run.take() {
                for (offset, item) in run.into_iter().enumerate() {
                    if level as u32 == hit_level && offset as u64 == hit_offset {
                        continue;
                    }
                    all.push(item);
                }
            }
        }
        all.sort_by(|a, b| self.cmp.compare(a, b));

        let new_n = self.n - 1;
        let mut pos = 0usize;
        for level in 0..self.max_levels {
            if (new_n >> level) & 1 == 1 {
                let capacity = 1usize << level;
                let run: Vec<T> = all[pos..pos + capacity].to_vec();
                self.levels[level as usize] = Some(run);
                pos += capacity;
            }
        }
        self.n = new_n;
        Ok(true)
    }

    /// Reset this COLA to hold exactly `data`, placing pre-sorted runs
    /// directly into the levels selected by `data.len()`'s bits (spec
    /// §4.1 "Bulk load"). See [bulk] for the sort-then-place variant.
    pub fn load_sorted(&mut self, data: Vec<T>) -> Result<()> {
        let n = data.len() as u64;
        if n > 0 && crate::util::highest_bit(n) >= self.max_levels {
            return Err(Error::Fatal(format!(
                "bulk load of {} elements exceeds max_levels={}",
                n, self.max_levels
            )));
        }
        for slot in self.levels.iter_mut() {
            *slot = None;
        }
        let mut pos = 0usize;
        for level in 0..self.max_levels {
            if (n >> level) & 1 == 1 {
                let capacity = 1usize << level;
                self.levels[level as usize] = Some(data[pos..pos + capacity].to_vec());
                pos += capacity;
            }
        }
        self.n = n;
        Ok(())
    }

    /// Install `run` as level `level`'s full contents and mark it full,
    /// without touching any other level or `N`. Used by the snapshot
    /// codec (spec §4.7) to place each level's run back exactly as
    /// written, one at a time, rather than via [Cola::load_sorted]'s
    /// single contiguous buffer. Callers must follow up with
    /// [Cola::set_len] once every level has been installed.
    pub(crate) fn install_full_level(&mut self, level: u32, run: Vec<T>) -> Result<()> {
        if level >= self.max_levels {
            return Err(Error::Fatal(format!(
                "level {} exceeds max_levels={}",
                level, self.max_levels
            )));
        }
        self.levels[level as usize] = Some(run);
        Ok(())
    }

    /// Overwrite `N` directly. Paired with [Cola::install_full_level] for
    /// snapshot reload, where the full-level bit pattern is read from the
    /// file header rather than derived from a sequence of inserts.
    pub(crate) fn set_len(&mut self, n: u64) {
        self.n = n;
    }

    /// Every full level's contents, paired with its level index, in no
    /// particular cross-level order. Used by the iterator's snapshot
    /// materialisation and by the snapshot codec.
    pub fn full_runs(&self) -> Vec<(u32, &[T])> {
        self.levels
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|run| (i as u32, run.as_slice())))
            .collect()
    }

    pub fn iter(&self) -> Iter<T, C> {
        Iter::new(self)
    }

    /// Level occupancy snapshot for introspection (spec §11: grounded on
    /// the teacher's `llrb_depth.rs` `Stats` shape). `full_levels[i]` is
    /// `Some(run_len)` when level `i` is full, `None` when empty; `run_len`
    /// always equals `2^i`, it is carried explicitly so a caller does not
    /// have to recompute it.
    pub fn stats(&self) -> Stats {
        Stats {
            n: self.n,
            max_levels: self.max_levels,
            full_levels: self
                .levels
                .iter()
                .map(|slot| slot.as_ref().map(|run| run.len()))
                .collect(),
        }
    }

    /// Debug-only consistency check: every full level is sorted ascending
    /// under `C`, and the set of full levels equals `N`'s set bits. Compiles
    /// away in release builds (spec §9: "Conditional assertion attributes
    /// ... compile-time-gated invariant checks that compile away in release
    /// builds").
    #[cfg(any(test, debug_assertions))]
    pub fn debug_check_invariants(&self) {
        let mut total = 0u64;
        for (i, slot) in self.levels.iter().enumerate() {
            match slot {
                Some(run) => {
                    assert_eq!(run.len(), 1usize << i, "level {} has wrong length", i);
                    assert!(
                        run.windows(2).all(|w| self.cmp.compare(&w[0], &w[1]) != Ordering::Greater),
                        "level {} is not sorted",
                        i
                    );
                    assert_eq!((self.n >> i) & 1, 1, "level {} full but bit clear", i);
                    total += run.len() as u64;
                }
                None => {
                    assert_eq!((self.n >> i) & 1, 0, "level {} empty but bit set", i);
                }
            }
        }
        assert_eq!(total, self.n, "sum of full levels disagrees with n");
    }
}

/// Stable two-way merge of `buf` (the newly inserted element(s)) and
/// `level` (an existing full level's run), both already sorted under
/// `cmp`. On ties `buf`'s element sorts first -- the "buffer wins" rule
/// (spec §4.1): the freshly inserted data is newer.
fn merge_newer_wins<T: Clone, C: Comparator<T>>(buf: Vec<T>, level: Vec<T>, cmp: &C) -> Vec<T> {
    let mut out = Vec::with_capacity(buf.len() + level.len());
    let mut i = 0usize;
    let mut j = 0usize;
    while i < buf.len() && j < level.len() {
        if cmp.compare(&buf[i], &level[j]) == Ordering::Greater {
            out.push(level[j].clone());
            j += 1;
        } else {
            out.push(buf[i].clone());
            i += 1;
        }
    }
    out.extend_from_slice(&buf[i..]);
    out.extend_from_slice(&level[j..]);
    out
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
