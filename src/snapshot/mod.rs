//! Snapshot persistence (spec §4.7, §6): serialise a stable, bulk-loaded
//! [crate::odict::OrderedDict] of `(Vec<u8>, Vec<u8>)` pairs to a single
//! `.pndb` file and reconstruct it without a re-sort, since each full
//! level is written out -- and read back -- as one pre-sorted run (spec
//! §4.1 "Bulk load": "If `ordered = true`, place runs directly").

pub mod format;

use sha2::{Digest, Sha256};

use crate::cola::ByFirst;
use crate::cola::Cola;
use crate::error::{Error, Result};
use crate::odict::OrderedDict;
use crate::util;
use format::{decode_entry, encode_entry, Header, FLAG_VARINT, FOOTER_LEN};

/// Serialise `table` to `path`, creating (or truncating, if `reuse`) the
/// file. Entry lengths are written as varints when `varint` is true.
pub fn save_snapshot(path: &str, table: &OrderedDict<Vec<u8>, Vec<u8>>, varint: bool, reuse: bool) -> Result<()> {
    use std::io::Write;

    let max_levels = table.max_levels();
    let mut runs = table.full_runs();
    runs.sort_by_key(|(level, _)| *level);

    let mut level_run_sizes = vec![0u64; max_levels as usize];
    for (level, run) in &runs {
        level_run_sizes[*level as usize] = run.len() as u64;
    }

    let mut body = Vec::new();
    for (_, run) in &runs {
        for (key, value) in run.iter() {
            encode_entry(&mut body, key, value, varint);
        }
    }

    let header = Header {
        version: format::FORMAT_VERSION,
        flags: if varint { FLAG_VARINT } else { 0 },
        level_run_sizes,
        total_bytes: body.len() as u64,
    };

    let mut out = Vec::new();
    header.encode(&mut out);
    out.extend_from_slice(&body);

    let mut hasher = Sha256::new();
    hasher.update(&out);
    let digest = hasher.finalize();
    out.extend_from_slice(&digest);
    debug_assert_eq!(digest.len(), FOOTER_LEN);

    let mut fd = util::open_file_w(path, reuse)?;
    fd.write_all(&out)?;
    fd.sync_all()?;
    log::info!("saved snapshot to {} ({} bytes, {} entries)", path, out.len(), runs.iter().map(|(_, r)| r.len()).sum::<usize>());
    Ok(())
}

/// Load a `.pndb` file written by [save_snapshot], reconstructing each
/// full level as the run it was written as -- no re-sort.
pub fn load_snapshot(path: &str) -> Result<OrderedDict<Vec<u8>, Vec<u8>>> {
    use std::io::Read;

    let mut fd = util::open_file_r(path)?;
    let mut buf = Vec::new();
    fd.read_to_end(&mut buf)?;

    if buf.len() < FOOTER_LEN {
        return Err(Error::InvalidFormat("snapshot file too small".to_string()));
    }
    let (payload, footer) = buf.split_at(buf.len() - FOOTER_LEN);
    let mut hasher = Sha256::new();
    hasher.update(payload);
    let digest = hasher.finalize();
    if digest.as_slice() != footer {
        return Err(Error::InvalidFormat("checksum mismatch".to_string()));
    }

    let (header, mut pos) = Header::decode(payload)?;
    if header.version != format::FORMAT_VERSION {
        return Err(Error::InvalidFormat(format!(
            "unsupported snapshot version {}",
            header.version
        )));
    }
    let varint = header.uses_varint();
    let max_levels = header.level_run_sizes.len() as u32;

    let mut cola: Cola<(Vec<u8>, Vec<u8>), ByFirst> = Cola::with_max_levels(ByFirst, max_levels.max(1));
    let mut n = 0u64;
    for (level, run_size) in header.level_run_sizes.iter().enumerate() {
        if *run_size == 0 {
            continue;
        }
        let mut run = Vec::with_capacity(*run_size as usize);
        for _ in 0..*run_size {
            let (entry, next) = decode_entry(payload, pos, varint)?;
            run.push(entry);
            pos = next;
        }
        if run.len() != 1usize << level {
            return Err(Error::InvalidFormat(format!(
                "level {} run size {} does not match 2^{}",
                level,
                run.len(),
                level
            )));
        }
        n |= 1u64 << level;
        cola.install_full_level(level as u32, run)?;
    }
    cola.set_len(n);
    log::info!("loaded snapshot from {} ({} entries)", path, n);

    Ok(OrderedDict::from_cola(cola))
}

#[cfg(test)]
mod snapshot_test {
    use super::*;

    fn sample() -> OrderedDict<Vec<u8>, Vec<u8>> {
        let items: Vec<(Vec<u8>, Vec<u8>)> = (0..10)
            .map(|i: i32| (format!("k{:02}", i).into_bytes(), format!("v{}", i).into_bytes()))
            .collect();
        OrderedDict::bulk_load(items, true).unwrap()
    }

    #[test]
    fn test_save_then_load_roundtrips() {
        let dir = std::env::temp_dir().join(format!("pndb-snapshot-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("snap.pndb");
        let path = path.to_str().unwrap();

        let table = sample();
        save_snapshot(path, &table, false, false).unwrap();
        let loaded = load_snapshot(path).unwrap();

        let expect: Vec<(Vec<u8>, Vec<u8>)> = table.iter().collect();
        let got: Vec<(Vec<u8>, Vec<u8>)> = loaded.iter().collect();
        assert_eq!(got, expect);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_then_load_roundtrips_with_varint() {
        let dir = std::env::temp_dir().join(format!("pndb-snapshot-test-varint-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("snap.pndb");
        let path = path.to_str().unwrap();

        let table = sample();
        save_snapshot(path, &table, true, false).unwrap();
        let loaded = load_snapshot(path).unwrap();

        let expect: Vec<(Vec<u8>, Vec<u8>)> = table.iter().collect();
        let got: Vec<(Vec<u8>, Vec<u8>)> = loaded.iter().collect();
        assert_eq!(got, expect);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_rejects_corrupted_checksum() {
        let dir = std::env::temp_dir().join(format!("pndb-snapshot-test-corrupt-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("snap.pndb");
        let path = path.to_str().unwrap();

        save_snapshot(path, &sample(), false, false).unwrap();
        let mut bytes = std::fs::read(path).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        std::fs::write(path, &bytes).unwrap();

        assert!(load_snapshot(path).is_err());
        std::fs::remove_dir_all(&dir).ok();
    }
}
