//! `Database` is the engine facade spec §6 names: it wires the [Config],
//! the byte [arena][crate::arena] and [builder pool][crate::arena::pool],
//! the [MVCC][crate::mvcc] overlay, and the [snapshot][crate::snapshot]
//! codec into the single entry point a consumer (the FoundationDB-style
//! transaction façade, or the CLI) opens against.
//!
//! Bulk load and snapshot persistence (spec §4.7, §1 point 4) operate on a
//! separate flattened [OrderedDict] of `(Vec<u8>, Vec<u8>)` pairs rather
//! than on the versioned keyspace directly -- the snapshot file format is a
//! direct, per-level dump of a COLA's runs (spec §6), and a versioned
//! keyspace's `(user_key, version)` composite keys are not what a bulk
//! load caller hands in or expects back out.

use crate::arena::pool::BuilderPool;
use crate::arena::Heap;
use crate::config::Config;
use crate::error::Result;
use crate::mvcc::{ReadTxn, VersionedStore, WriteTxn};
use crate::odict::OrderedDict;
use crate::snapshot;

/// Combined introspection snapshot surfaced by [Database::stats] (spec
/// §11 "Stats/introspection").
#[derive(Debug, Clone)]
pub struct Stats {
    pub table: crate::cola::Stats,
    pub heap: crate::arena::HeapStats,
    pub pool: crate::arena::pool::PoolStats,
    pub committed_version: u64,
}

/// The engine facade (spec §6): `begin_read`/`begin_write`/`commit` for
/// transactional access to the versioned keyspace, plus `bulk_load` and
/// `save_snapshot`/`load_snapshot` for the flattened table.
pub struct Database {
    config: Config,
    table: OrderedDict<Vec<u8>, Vec<u8>>,
    versions: VersionedStore,
    heap: Heap,
    pool: BuilderPool,
}

impl Database {
    pub fn new(config: Config) -> Database {
        let heap = Heap::with_page_size(config.page_size);
        let pool = BuilderPool::new(config.builder_pool_size);
        Database {
            config,
            table: OrderedDict::new(),
            versions: VersionedStore::new(),
            heap,
            pool,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn pool(&self) -> &BuilderPool {
        &self.pool
    }

    /// Start a read snapshot at `read_version` (or the latest committed
    /// version when `None`), spec §6 `begin_read`.
    pub fn begin_read(&self, read_version: Option<u64>) -> ReadTxn<'_> {
        self.versions.begin_read(read_version)
    }

    /// Start a read-write transaction, spec §6 `begin_write`.
    pub fn begin_write(&self) -> WriteTxn<'_> {
        self.versions.begin_write()
    }

    pub fn committed_version(&self) -> u64 {
        self.versions.committed_version()
    }

    /// Replace the flattened table with `items` in one pass (spec §6
    /// `Database.bulk_load`): place pre-sorted runs directly when
    /// `ordered` is true, sort first otherwise. This does not touch the
    /// versioned keyspace -- a bulk-loaded table starts life unversioned,
    /// as the seed for subsequent transactions.
    pub fn bulk_load(&mut self, items: Vec<(Vec<u8>, Vec<u8>)>, ordered: bool) -> Result<()> {
        log::info!("bulk loading {} entries (ordered={})", items.len(), ordered);
        self.table = OrderedDict::bulk_load(items, ordered)?;
        Ok(())
    }

    /// Look up `key` in the flattened table (not the versioned keyspace --
    /// see [Self::begin_read] for that).
    pub fn get(&self, key: &[u8]) -> Option<&Vec<u8>> {
        self.table.get(&key.to_vec())
    }

    pub fn table_len(&self) -> u64 {
        self.table.len()
    }

    /// Every `(key, value)` pair in the flattened table, in key order.
    pub fn table_iter(&self) -> impl Iterator<Item = (Vec<u8>, Vec<u8>)> + '_ {
        self.table.iter()
    }

    /// Persist the flattened table to `path` (spec §6 `Database.save_snapshot`).
    pub fn save_snapshot(&self, path: &str, varint: bool, reuse: bool) -> Result<()> {
        snapshot::save_snapshot(path, &self.table, varint, reuse)
    }

    /// Replace the flattened table with the contents of `path` (spec §6
    /// `Database.load_snapshot`).
    pub fn load_snapshot(&mut self, path: &str) -> Result<()> {
        self.table = snapshot::load_snapshot(path)?;
        Ok(())
    }

    pub fn stats(&self) -> Stats {
        Stats {
            table: self.table.stats(),
            heap: self.heap.stats(),
            pool: self.pool.stats(),
            committed_version: self.committed_version(),
        }
    }
}

impl Default for Database {
    fn default() -> Database {
        Database::new(Config::default())
    }
}

#[cfg(test)]
mod database_test {
    use super::*;

    #[test]
    fn test_bulk_load_then_get() {
        let mut db = Database::default();
        let items = vec![
            (b"a".to_vec(), b"1".to_vec()),
            (b"b".to_vec(), b"2".to_vec()),
            (b"c".to_vec(), b"3".to_vec()),
        ];
        db.bulk_load(items, false).unwrap();
        assert_eq!(db.get(b"b"), Some(&b"2".to_vec()));
        assert_eq!(db.get(b"z"), None);
        assert_eq!(db.table_len(), 3);
    }

    #[test]
    fn test_transactions_independent_of_bulk_table() {
        let db = Database::default();
        let mut wtx = db.begin_write();
        wtx.set(b"k".to_vec(), b"v".to_vec());
        let cv = wtx.commit().unwrap();
        assert_eq!(cv, 1);

        let rtx = db.begin_read(None);
        assert_eq!(rtx.get(b"k").unwrap(), Some(b"v".to_vec()));
        assert_eq!(db.get(b"k"), None);
    }

    #[test]
    fn test_save_and_load_snapshot_roundtrip() {
        let dir = std::env::temp_dir().join(format!("pndb-database-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("snap.pndb");
        let path = path.to_str().unwrap();

        let mut db = Database::default();
        db.bulk_load(
            vec![(b"x".to_vec(), b"1".to_vec()), (b"y".to_vec(), b"2".to_vec())],
            false,
        )
        .unwrap();
        db.save_snapshot(path, false, false).unwrap();

        let mut db2 = Database::default();
        db2.load_snapshot(path).unwrap();
        assert_eq!(db2.get(b"x"), Some(&b"1".to_vec()));
        assert_eq!(db2.get(b"y"), Some(&b"2".to_vec()));
        std::fs::remove_dir_all(&dir).ok();
    }
}
