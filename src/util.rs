//! Module `util` collects small stand-alone helpers used across the crate:
//! file-open wrappers for the snapshot codec, narrowing-conversion helpers,
//! and the bit arithmetic that both the COLA engine (level occupancy) and
//! the arena (builder growth policy) depend on.

use std::convert::TryInto;
use std::fmt::Display;
use std::{
    fs,
    io::{self, Read, Seek},
    path,
};

use crate::error::Error;

// open file for writing, if reuse is false, create file.
pub(crate) fn open_file_w(file: &str, reuse: bool) -> Result<fs::File, Error> {
    let p = path::Path::new(file);

    let mut opts = fs::OpenOptions::new();
    Ok(match reuse {
        false => {
            let err = Error::InvalidFile(file.to_string());
            let parent = p.parent().ok_or(err)?;
            fs::create_dir_all(parent)?;
            fs::remove_file(p).ok();
            opts.write(true).create_new(true).open(p)?
        }
        true => opts.write(true).open(p)?,
    })
}

// open file for reading.
pub(crate) fn open_file_r(file: &str) -> Result<fs::File, Error> {
    let p = path::Path::new(file);
    let mut opts = fs::OpenOptions::new();
    Ok(opts.read(true).open(p)?)
}

pub(crate) fn try_convert_int<T, U>(from: T, msg: &str) -> Result<U, Error>
where
    T: Copy + Display + TryInto<U>,
{
    match from.try_into() {
        Ok(to) => Ok(to),
        Err(_) => Err(Error::FailConversion(format!("{} for {}", msg, from))),
    }
}

pub(crate) fn read_buffer(fd: &mut fs::File, fpos: u64, n: u64, msg: &str) -> Result<Vec<u8>, Error> {
    fd.seek(io::SeekFrom::Start(fpos))?;
    let mut buf = vec![0_u8; try_convert_int(n, msg)?];
    let got = fd.read(&mut buf)?;
    if buf.len() == got {
        Ok(buf)
    } else {
        Err(Error::BufferTooSmall(buf.len(), got))
    }
}

/// Index, from the least-significant end, of the lowest set bit of `n`.
/// Returns `0` for `n == 0` (there is no level 0 bit to report, and the
/// COLA engine never calls this with `n == 0` for anything but a no-op).
#[inline]
pub fn lowest_bit(n: u64) -> u32 {
    if n == 0 {
        0
    } else {
        n.trailing_zeros()
    }
}

/// Index of the highest set bit of `n`, i.e. `floor(log2(n))`. Returns `0`
/// for `n == 0`.
#[inline]
pub fn highest_bit(n: u64) -> u32 {
    if n == 0 {
        0
    } else {
        63 - n.leading_zeros()
    }
}

/// Smallest power of two `>= x`. `next_power_of_two(0) == 1`, matching the
/// convention that an empty builder still reserves one slot's worth of
/// capacity on first growth.
#[inline]
pub fn next_power_of_two(x: u64) -> u64 {
    if x == 0 {
        1
    } else {
        x.next_power_of_two()
    }
}

#[cfg(test)]
#[path = "util_test.rs"]
mod util_test;
