//! Key-selector resolution (spec §4.6): `first_greater_or_equal`,
//! `first_greater_than`, `last_less_than`, `last_less_or_equal`, each with
//! an integer offset applied after the initial seek. Resolution walks a
//! sorted key sequence rather than the engine directly so it can be reused
//! against either the live keyspace or a materialised range-scan result.

use crate::error::{Error, Result};

/// High clamp applied to an out-of-range selector (spec §4.6). Extended to
/// `0xFF 0xFF` when the caller has system-key access.
pub const HIGH_CLAMP: &[u8] = &[0xFF];
pub const HIGH_CLAMP_SYSTEM: &[u8] = &[0xFF, 0xFF];

#[derive(Debug, Clone)]
pub struct KeySelector {
    pub key: Vec<u8>,
    pub or_equal: bool,
    pub offset: i64,
}

impl KeySelector {
    pub fn first_greater_or_equal(key: Vec<u8>) -> KeySelector {
        KeySelector {
            key,
            or_equal: true,
            offset: 0,
        }
    }

    pub fn first_greater_than(key: Vec<u8>) -> KeySelector {
        KeySelector {
            key,
            or_equal: false,
            offset: 0,
        }
    }

    pub fn last_less_than(key: Vec<u8>) -> KeySelector {
        KeySelector {
            key,
            or_equal: false,
            offset: -1,
        }
    }

    pub fn last_less_or_equal(key: Vec<u8>) -> KeySelector {
        KeySelector {
            key,
            or_equal: true,
            offset: -1,
        }
    }

    pub fn with_offset(mut self, offset: i64) -> KeySelector {
        self.offset += offset;
        self
    }
}

/// Resolve `selector` against `keys` (sorted ascending, deduplicated).
/// Returns the resolved key, clamped to `""` on the low side or to
/// [HIGH_CLAMP]/[HIGH_CLAMP_SYSTEM] on the high side when the offset walks
/// past either end (spec §4.6).
pub fn resolve(selector: &KeySelector, keys: &[Vec<u8>], system_access: bool) -> Result<Vec<u8>> {
    // anchor: first index i such that keys[i] is "at or past" selector.key
    // under or_equal.
    let anchor = if selector.or_equal {
        keys.partition_point(|k| k.as_slice() < selector.key.as_slice())
    } else {
        keys.partition_point(|k| k.as_slice() <= selector.key.as_slice())
    };

    let target = anchor as i64 + selector.offset;
    if target < 0 {
        return Ok(Vec::new());
    }
    if target as usize >= keys.len() {
        return Ok(if system_access {
            HIGH_CLAMP_SYSTEM.to_vec()
        } else {
            HIGH_CLAMP.to_vec()
        });
    }
    Ok(keys[target as usize].clone())
}

/// As [resolve], but returns [Error::KeyOutsideLegalRange] instead of
/// clamping when the resolved key would land past the non-system high
/// clamp -- used by call sites that must reject rather than silently clamp
/// (spec §7 `KeyOutsideLegalRange`).
pub fn resolve_strict(selector: &KeySelector, keys: &[Vec<u8>], system_access: bool) -> Result<Vec<u8>> {
    let resolved = resolve(selector, keys, system_access)?;
    let limit: &[u8] = if system_access { HIGH_CLAMP_SYSTEM } else { HIGH_CLAMP };
    if resolved == limit && !system_access {
        return Err(Error::KeyOutsideLegalRange(format!("{:?}", selector)));
    }
    Ok(resolved)
}

#[cfg(test)]
mod selector_test {
    use super::*;

    fn keys() -> Vec<Vec<u8>> {
        vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]
    }

    #[test]
    fn test_first_greater_or_equal() {
        let ks = keys();
        let sel = KeySelector::first_greater_or_equal(b"b".to_vec());
        assert_eq!(resolve(&sel, &ks, false).unwrap(), b"b".to_vec());
    }

    #[test]
    fn test_first_greater_than() {
        let ks = keys();
        let sel = KeySelector::first_greater_than(b"b".to_vec());
        assert_eq!(resolve(&sel, &ks, false).unwrap(), b"c".to_vec());
    }

    #[test]
    fn test_last_less_than_clamps_low() {
        let ks = keys();
        let sel = KeySelector::last_less_than(b"a".to_vec());
        assert_eq!(resolve(&sel, &ks, false).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_offset_past_high_clamps() {
        let ks = keys();
        let sel = KeySelector::first_greater_or_equal(b"c".to_vec()).with_offset(5);
        assert_eq!(resolve(&sel, &ks, false).unwrap(), HIGH_CLAMP.to_vec());
        assert_eq!(resolve(&sel, &ks, true).unwrap(), HIGH_CLAMP_SYSTEM.to_vec());
    }
}
