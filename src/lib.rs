//! `pndb` is a cache-oblivious lookahead array (COLA) storage core: an
//! ordered, MVCC key-value engine meant to sit underneath a
//! FoundationDB-style client as its local storage substrate.
//!
//! The engine itself is organised bottom-up:
//!
//! - [arena] -- the unmanaged byte substrate: a page-based bump heap
//!   handing out [arena::USlice] views, plus a growable slice
//!   [builder][arena::builder] and a recycling [pool][arena::pool].
//! - [cola] -- the array-of-sorted-runs engine every ordered container in
//!   this crate is built on: [cola::Cola] holds an element sequence across
//!   power-of-two-sized levels, each either empty or fully sorted.
//! - [oset] / [odict] -- ordered set and ordered dictionary, thin
//!   specialisations of [cola::Cola].
//! - [rangeset] / [rangedict] -- a COLA of disjoint `[begin, end)`
//!   intervals, with (for the dictionary) a piecewise-constant value and
//!   merge-on-insert semantics.
//! - [mvcc] -- a versioned keyspace layered atop [odict::OrderedDict]:
//!   snapshot reads, optimistic-conflict commits, key-selector resolution.
//! - [snapshot] -- the `.pndb` file codec: save/load a flattened table
//!   without a re-sort.
//! - [database] -- the facade wiring all of the above together, and the
//!   surface the `pndb` CLI binary drives.

pub mod arena;
pub mod cola;
pub mod config;
pub mod database;
pub mod error;
pub mod interval;
pub mod mvcc;
pub mod odict;
pub mod oset;
pub mod rangedict;
pub mod rangeset;
pub mod snapshot;
pub(crate) mod util;

pub use crate::database::Database;
pub use crate::error::{Error, Result};
