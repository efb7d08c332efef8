//! `BuilderPool` recycles [Builder] instances across call sites that
//! repeatedly compose and discard keys/values (e.g. one per COLA search or
//! merge step), avoiding a fresh allocation on every call. Bounded like the
//! teacher's other shared resources (compare `spinlock::RWSpinlock`'s
//! fixed atomic counters): a pool has a fixed capacity of parked builders
//! and tracks bytes loaned vs. parked for introspection.

use std::ops::{Deref, DerefMut};
use std::sync::Mutex;

use crate::arena::builder::Builder;

struct Inner {
    free: Vec<Builder>,
    bytes_parked: usize,
    bytes_loaned: usize,
}

/// Byte accounting snapshot for a [BuilderPool].
#[derive(Debug, Clone, Copy, Default)]
pub struct PoolStats {
    pub bytes_loaned: usize,
    pub bytes_parked: usize,
    pub parked_count: usize,
}

pub struct BuilderPool {
    capacity: usize,
    inner: Mutex<Inner>,
}

impl BuilderPool {
    pub fn new(capacity: usize) -> BuilderPool {
        BuilderPool {
            capacity,
            inner: Mutex::new(Inner {
                free: Vec::with_capacity(capacity),
                bytes_parked: 0,
                bytes_loaned: 0,
            }),
        }
    }

    /// Check out a builder, recycling a parked one if available.
    pub fn checkout(&self) -> PooledBuilder<'_> {
        let mut inner = self.inner.lock().unwrap();
        let builder = match inner.free.pop() {
            Some(b) => {
                inner.bytes_parked = inner.bytes_parked.saturating_sub(b.capacity());
                b
            }
            None => Builder::new(),
        };
        inner.bytes_loaned += builder.capacity();
        PooledBuilder {
            pool: self,
            builder: Some(builder),
        }
    }

    pub fn stats(&self) -> PoolStats {
        let inner = self.inner.lock().unwrap();
        PoolStats {
            bytes_loaned: inner.bytes_loaned,
            bytes_parked: inner.bytes_parked,
            parked_count: inner.free.len(),
        }
    }

    fn release(&self, mut builder: Builder) {
        let mut inner = self.inner.lock().unwrap();
        inner.bytes_loaned = inner.bytes_loaned.saturating_sub(builder.capacity());
        if inner.free.len() < self.capacity {
            builder.clear();
            inner.bytes_parked += builder.capacity();
            inner.free.push(builder);
        }
        // else: pool is full, builder is dropped here (disposed).
    }
}

/// Scoped handle returned by [BuilderPool::checkout]. Dropping it returns
/// the builder to the pool, or disposes of it if the pool is already full.
pub struct PooledBuilder<'p> {
    pool: &'p BuilderPool,
    builder: Option<Builder>,
}

impl<'p> Deref for PooledBuilder<'p> {
    type Target = Builder;
    fn deref(&self) -> &Builder {
        self.builder.as_ref().expect("builder taken before drop")
    }
}

impl<'p> DerefMut for PooledBuilder<'p> {
    fn deref_mut(&mut self) -> &mut Builder {
        self.builder.as_mut().expect("builder taken before drop")
    }
}

impl<'p> Drop for PooledBuilder<'p> {
    fn drop(&mut self) {
        if let Some(builder) = self.builder.take() {
            self.pool.release(builder);
        }
    }
}

#[cfg(test)]
#[path = "pool_test.rs"]
mod pool_test;
