//! Byte-level comparison and hash primitives shared by every container
//! built on the COLA engine when its key or value representation is raw
//! bytes (as opposed to a native scalar).

use std::cmp::Ordering;

pub use crate::util::next_power_of_two;

/// Unsigned lexicographic comparison with "shorter is less" for a shared
/// prefix -- the same total order `<[u8]>::cmp` already implements; kept as
/// a free function so callers that hold raw `&[u8]` (not wrapped in
/// [super::USlice]) can use it directly, e.g. during snapshot decode before
/// a `USlice` exists.
pub fn cmp(a: &[u8], b: &[u8]) -> Ordering {
    a.cmp(b)
}

/// 32-bit FNV-1a hash. Stable across process runs and platforms (no seed,
/// no randomization) so external indexes built against it keep working
/// across restarts -- the spec requires a stable hash here, which rules out
/// `std::collections::hash_map::RandomState`.
pub fn fnv1a(bytes: &[u8]) -> u32 {
    const OFFSET_BASIS: u32 = 0x811c_9dc5;
    const PRIME: u32 = 0x0100_0193;

    let mut hash = OFFSET_BASIS;
    for &b in bytes {
        hash ^= b as u32;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

#[cfg(test)]
#[path = "bytes_test.rs"]
mod bytes_test;
