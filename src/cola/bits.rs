//! Level-address arithmetic for [super::Cola]. A COLA of size `n` packs its
//! elements into the levels selected by `n`'s set bits (level `i` holds
//! `2^i` slots); [map_offset_to_index] is the address translation between
//! an in-order offset `[0, n)` and the physical `(level, offset)` pair that
//! backs it.

use crate::error::{Error, Result};

/// Given an in-order offset `off` into a COLA holding `n` elements, return
/// the physical `(level, offset_within_level)` address. Levels are walked
/// from the highest set bit down to the lowest (spec §4.1 "Bit utilities":
/// "walk set bits high→low") -- the highest full level (if any) claims the
/// first `2^i` slots of the address space, the next full level below it
/// claims the following slots, and so on down to level 0.
pub fn map_offset_to_index(n: u64, off: u64) -> Result<(u32, u64)> {
    if off >= n {
        return Err(Error::Fatal(format!(
            "offset {} out of range for cola of size {}",
            off, n
        )));
    }
    let mut remaining = off;
    for level in (0..64u32).rev() {
        if (n >> level) & 1 == 1 {
            let capacity = 1u64 << level;
            if remaining < capacity {
                return Ok((level, remaining));
            }
            remaining -= capacity;
        }
    }
    Err(Error::Fatal(format!(
        "offset {} not covered by any level of cola of size {}",
        off, n
    )))
}

#[cfg(test)]
mod bits_test {
    use super::*;

    #[test]
    fn test_map_offset_basic() {
        // n = 0b101 -> level 2 (4 slots) first, then level 0 (1 slot)
        let n = 0b101;
        assert_eq!(map_offset_to_index(n, 0).unwrap(), (2, 0));
        assert_eq!(map_offset_to_index(n, 3).unwrap(), (2, 3));
        assert_eq!(map_offset_to_index(n, 4).unwrap(), (0, 0));
        assert!(map_offset_to_index(n, 5).is_err());
    }

    #[test]
    fn test_map_offset_empty() {
        assert!(map_offset_to_index(0, 0).is_err());
    }
}
