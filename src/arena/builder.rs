//! `Builder` is a single growable byte buffer used to compose keys and
//! values before they are published into a [super::Heap]. Its capacity
//! follows a next-power-of-two doubling policy rather than the allocator's
//! default growth factor, so callers that query [Builder::capacity] see a
//! predictable, reproducible number across runs (useful for the pool's
//! loaned/parked byte accounting in `pool.rs`).
//!
//! The source hands out a raw pointer into the builder's buffer that stays
//! valid "until the next growth"; here [Builder::allocate] instead returns
//! a [super::USlice] borrowed from `&mut self`, which is a strictly
//! *stronger* guarantee -- the borrow checker refuses any further mutation
//! of the builder (not just a growing one) while that view is alive.

use crate::arena::USlice;
use crate::util::next_power_of_two;

/// Default initial capacity: 1 KiB.
pub const DEFAULT_INITIAL_CAPACITY: usize = 1024;

#[derive(Default)]
pub struct Builder {
    buf: Vec<u8>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::with_capacity(DEFAULT_INITIAL_CAPACITY)
    }

    pub fn with_capacity(cap: usize) -> Builder {
        let cap = next_power_of_two(cap as u64) as usize;
        Builder {
            buf: Vec::with_capacity(cap),
        }
    }

    fn grow_to(&mut self, required: usize) {
        if required > self.buf.capacity() {
            let new_cap = next_power_of_two(required as u64) as usize;
            let extra = new_cap - self.buf.len();
            self.buf.reserve_exact(extra);
        }
    }

    /// Append `bytes` to the end of the buffer, growing if needed.
    pub fn append(&mut self, bytes: &[u8]) {
        self.grow_to(self.buf.len() + bytes.len());
        self.buf.extend_from_slice(bytes);
    }

    /// Replace the buffer's contents with `bytes`.
    pub fn set(&mut self, bytes: &[u8]) {
        self.buf.clear();
        self.append(bytes);
    }

    /// Grow or shrink the logical length to `n`, filling any newly exposed
    /// bytes with `fill`.
    pub fn resize(&mut self, n: usize, fill: u8) {
        self.grow_to(n);
        self.buf.resize(n, fill);
    }

    /// Reserve `n` bytes at the end of the buffer and return a view into
    /// them. `zeroed` requests the reservation be zero-filled; since a
    /// safe `Vec<u8>` cannot expose uninitialized memory, both branches
    /// zero-fill today, but the parameter is kept so a future caller can
    /// distinguish "I will overwrite every byte" call sites from
    /// "I need zeros" call sites without changing the signature.
    pub fn allocate(&mut self, n: usize, zeroed: bool) -> USlice<'_> {
        let _ = zeroed;
        let start = self.buf.len();
        self.grow_to(start + n);
        self.buf.resize(start + n, 0);
        USlice::from_slice(&self.buf[start..start + n])
    }

    pub fn to_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn to_uslice(&self) -> USlice<'_> {
        USlice::from_slice(&self.buf)
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Exchange two builders' buffers in O(1).
    pub fn swap(&mut self, other: &mut Builder) {
        std::mem::swap(&mut self.buf, &mut other.buf);
    }
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod builder_test;
