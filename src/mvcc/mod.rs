//! Module `mvcc` layers versioned keyspace views atop [crate::odict]'s
//! ordered dictionary (spec §3.6, §4.6, §5): every logical write becomes a
//! `(user_key, version) -> Op` entry, a read at `read_version` folds every
//! entry with `version <= read_version` in version order, and a
//! read-write transaction's commit fails with [Error::Conflict] if another
//! transaction committed an overlapping write after this transaction's
//! read version.
//!
//! Because committed entries are never mutated or removed -- only new,
//! higher-versioned entries are appended -- a reader that captured
//! `read_version` at `begin_read` sees a consistent snapshot simply by
//! ignoring entries with a higher version, without needing to pin or clone
//! any buffers the way [crate::cola::iter] does for a single COLA. The
//! shared state itself is protected by a plain [std::sync::RwLock] rather
//! than the teacher's `RWSpinlock` + raw `AtomicPtr` snapshot-swap
//! (`mvcc.rs`'s `Snapshot::shift_snapshot`): the reasoning is identical
//! (many readers, one writer, reads never block on old snapshots) but a
//! safe lock replaces the source's unsafe pointer choreography.

pub mod ops;
pub mod selector;

use std::collections::HashSet;
use std::sync::RwLock;

use crate::error::{Error, Result};
use crate::odict::OrderedDict;
use ops::{AtomicKind, Op};
use selector::KeySelector;

#[derive(Debug, Clone)]
struct RangeClear {
    version: u64,
    begin: Vec<u8>,
    end: Vec<u8>,
}

struct Inner {
    entries: OrderedDict<(Vec<u8>, u64), Op>,
    range_clears: Vec<RangeClear>,
    committed: u64,
}

/// A versioned keyspace. `Database` (see [crate::database]) owns one of
/// these and hands out [ReadTxn]/[WriteTxn] against it.
pub struct VersionedStore {
    inner: RwLock<Inner>,
}

/// Options for [ReadTxn::get_range] (spec §4.6).
#[derive(Debug, Clone, Default)]
pub struct RangeOptions {
    pub limit: Option<usize>,
    pub reverse: bool,
    pub system_access: bool,
}

impl VersionedStore {
    pub fn new() -> VersionedStore {
        VersionedStore {
            inner: RwLock::new(Inner {
                entries: OrderedDict::new(),
                range_clears: Vec::new(),
                committed: 0,
            }),
        }
    }

    pub fn committed_version(&self) -> u64 {
        self.inner.read().unwrap().committed
    }

    pub fn begin_read(&self, read_version: Option<u64>) -> ReadTxn<'_> {
        let rv = read_version.unwrap_or_else(|| self.committed_version());
        ReadTxn {
            store: self,
            read_version: rv,
        }
    }

    pub fn begin_write(&self) -> WriteTxn<'_> {
        let rv = self.committed_version();
        WriteTxn {
            store: self,
            read_version: rv,
            writes: Vec::new(),
            range_clears: Vec::new(),
            reads: HashSet::new(),
            read_ranges: Vec::new(),
            discarded: false,
        }
    }

    fn resolve_at(inner: &Inner, key: &[u8], version: u64) -> Result<Option<Vec<u8>>> {
        let mut events: Vec<(u64, Option<Op>)> = Vec::new();
        for ((k, v), op) in inner.entries.iter() {
            if k.as_slice() == key && v <= version {
                events.push((v, Some(op)));
            }
        }
        for rc in &inner.range_clears {
            if rc.version <= version && rc.begin.as_slice() <= key && key < rc.end.as_slice() {
                events.push((rc.version, None));
            }
        }
        events.sort_by_key(|(v, _)| *v);

        let mut current: Option<Vec<u8>> = None;
        for (_, event) in events {
            current = match event {
                Some(op) => ops::apply(current, &op)?,
                None => None,
            };
        }
        Ok(current)
    }

    fn live_keys_at(inner: &Inner, version: u64) -> Result<Vec<Vec<u8>>> {
        let mut keys: Vec<Vec<u8>> = inner.entries.iter().map(|((k, _), _)| k).collect();
        keys.sort();
        keys.dedup();
        let mut live = Vec::with_capacity(keys.len());
        for k in keys {
            if Self::resolve_at(inner, &k, version)?.is_some() {
                live.push(k);
            }
        }
        Ok(live)
    }

    /// Has any committed transaction written `key` at a version strictly
    /// after `read_version`? Used by [WriteTxn::commit]'s conflict check
    /// (spec §4.6/§8 invariant 6).
    fn key_mutated_after(inner: &Inner, key: &[u8], read_version: u64) -> bool {
        inner
            .entries
            .iter()
            .any(|((k, v), _)| k.as_slice() == key && v > read_version)
            || inner
                .range_clears
                .iter()
                .any(|rc| rc.version > read_version && rc.begin.as_slice() <= key && key < rc.end.as_slice())
    }

    fn range_mutated_after(inner: &Inner, begin: &[u8], end: &[u8], read_version: u64) -> bool {
        inner.entries.iter().any(|((k, v), _)| {
            v > read_version && k.as_slice() >= begin && k.as_slice() < end
        }) || inner.range_clears.iter().any(|rc| {
            rc.version > read_version && rc.begin.as_slice() < end && rc.end.as_slice() > begin
        })
    }
}

impl Default for VersionedStore {
    fn default() -> Self {
        VersionedStore::new()
    }
}

/// A read-only snapshot view at a fixed `read_version` (spec §4.6
/// `ReadTxn`).
pub struct ReadTxn<'s> {
    store: &'s VersionedStore,
    read_version: u64,
}

impl<'s> ReadTxn<'s> {
    pub fn read_version(&self) -> u64 {
        self.read_version
    }

    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let inner = self.store.inner.read().unwrap();
        VersionedStore::resolve_at(&inner, key, self.read_version)
    }

    pub fn get_key(&self, selector: &KeySelector, system_access: bool) -> Result<Vec<u8>> {
        let inner = self.store.inner.read().unwrap();
        let keys = VersionedStore::live_keys_at(&inner, self.read_version)?;
        selector::resolve(selector, &keys, system_access)
    }

    pub fn get_range(
        &self,
        begin_sel: &KeySelector,
        end_sel: &KeySelector,
        opts: &RangeOptions,
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let inner = self.store.inner.read().unwrap();
        let keys = VersionedStore::live_keys_at(&inner, self.read_version)?;
        let begin = selector::resolve(begin_sel, &keys, opts.system_access)?;
        let end = selector::resolve(end_sel, &keys, opts.system_access)?;

        let mut out = Vec::new();
        for k in &keys {
            if k.as_slice() >= begin.as_slice() && k.as_slice() < end.as_slice() {
                if let Some(v) = VersionedStore::resolve_at(&inner, k, self.read_version)? {
                    out.push((k.clone(), v));
                }
            }
        }
        if opts.reverse {
            out.reverse();
        }
        if let Some(limit) = opts.limit {
            out.truncate(limit);
        }
        Ok(out)
    }
}

/// A read-write transaction (spec §4.6 `WriteTxn`). Buffers writes
/// locally; nothing is visible to other transactions until [Self::commit]
/// succeeds.
pub struct WriteTxn<'s> {
    store: &'s VersionedStore,
    read_version: u64,
    writes: Vec<(Vec<u8>, Op)>,
    range_clears: Vec<(Vec<u8>, Vec<u8>)>,
    reads: HashSet<Vec<u8>>,
    read_ranges: Vec<(Vec<u8>, Vec<u8>)>,
    discarded: bool,
}

impl<'s> WriteTxn<'s> {
    pub fn read_version(&self) -> u64 {
        self.read_version
    }

    /// Read-your-own-writes: check the local write buffer first, falling
    /// back to the store's view at this transaction's read version.
    pub fn get(&mut self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let local: Vec<&Op> = self
            .writes
            .iter()
            .filter(|(k, _)| k.as_slice() == key)
            .map(|(_, op)| op)
            .collect();
        if local.is_empty() {
            self.reads.insert(key.to_vec());
        }
        let inner = self.store.inner.read().unwrap();
        let mut current = VersionedStore::resolve_at(&inner, key, self.read_version)?;
        for op in local {
            current = ops::apply(current, op)?;
        }
        Ok(current)
    }

    pub fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.writes.push((key, Op::Set(value)));
    }

    pub fn clear(&mut self, key: Vec<u8>) {
        self.writes.push((key, Op::Clear));
    }

    pub fn clear_range(&mut self, begin: Vec<u8>, end: Vec<u8>) {
        self.range_clears.push((begin, end));
    }

    pub fn atomic(&mut self, key: Vec<u8>, kind: AtomicKind, operand: Vec<u8>) {
        self.writes.push((key, Op::Atomic(kind, operand)));
    }

    /// Record that this transaction's result depended on the range
    /// `[begin, end)`, so a later overlapping write by another transaction
    /// conflicts this one at commit time.
    pub fn add_read_range(&mut self, begin: Vec<u8>, end: Vec<u8>) {
        self.read_ranges.push((begin, end));
    }

    /// Discard every buffered write without committing (spec §7: a write
    /// transaction that hits a structural error must discard its builder
    /// rather than attempt to commit).
    pub fn discard(&mut self) {
        self.discarded = true;
        self.writes.clear();
        self.range_clears.clear();
    }

    /// Attempt to commit. Fails with [Error::Conflict] if any key or range
    /// this transaction read was mutated by another transaction that
    /// committed after this transaction's read version (spec §3.6, §4.6,
    /// §8 invariant 6).
    pub fn commit(self) -> Result<u64> {
        if self.discarded {
            return Err(Error::Cancelled);
        }
        let mut inner = self.store.inner.write().unwrap();

        for key in &self.reads {
            if VersionedStore::key_mutated_after(&inner, key, self.read_version) {
                return Err(Error::Conflict(String::from_utf8_lossy(key).into_owned()));
            }
        }
        for (begin, end) in &self.read_ranges {
            if VersionedStore::range_mutated_after(&inner, begin, end, self.read_version) {
                return Err(Error::Conflict(format!(
                    "range [{:?}, {:?})",
                    begin, end
                )));
            }
        }

        let cv = inner.committed + 1;
        // last write wins when a transaction touches the same key twice;
        // `add` would otherwise reject the second (key, cv) pair as a
        // duplicate.
        let mut last_write_wins: Vec<(Vec<u8>, Op)> = Vec::with_capacity(self.writes.len());
        for (key, op) in self.writes {
            if let Some(slot) = last_write_wins.iter_mut().find(|(k, _)| *k == key) {
                slot.1 = op;
            } else {
                last_write_wins.push((key, op));
            }
        }
        for (key, op) in last_write_wins {
            inner.entries.add((key, cv), op)?;
        }
        for (begin, end) in self.range_clears {
            inner.range_clears.push(RangeClear {
                version: cv,
                begin,
                end,
            });
        }
        inner.committed = cv;
        Ok(cv)
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
