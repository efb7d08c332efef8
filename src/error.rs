//! Module `error` defines the single error type returned by every public
//! operation on the COLA engine, its containers, the MVCC overlay and the
//! snapshot codec.
//!
//! Locally recoverable errors ([Error::DuplicateKey], [Error::KeyNotFound],
//! [Error::Conflict], [Error::Cancelled], [Error::BufferTooSmall]) are meant
//! to surface to the immediate caller. Structural errors
//! ([Error::InvalidFormat], [Error::AlreadyDisposed], [Error::Fatal]) abort
//! the containing operation; callers holding a write transaction must
//! discard its builder rather than attempt to commit.

use std::{fmt, io, num::TryFromIntError};

/// Classified error returned by `pndb` operations.
#[derive(Debug)]
pub enum Error {
    /// Insert of a key that is already present.
    DuplicateKey(String),
    /// Get of a key that is not present, via an accessor that is
    /// contractually obliged to find one.
    KeyNotFound(String),
    /// A key-selector resolved past `0xFF 0xFF` without system-key access.
    KeyOutsideLegalRange(String),
    /// Snapshot file header or footer failed to validate.
    InvalidFormat(String),
    /// Fixed-width read/write against a slice with insufficient length.
    /// Carries `(needed, available)`.
    BufferTooSmall(usize, usize),
    /// Use of an arena-backed resource after its arena was dropped.
    AlreadyDisposed(String),
    /// Commit raced another writer's overlapping read set.
    Conflict(String),
    /// Caller requested cancellation of a blocking operation.
    Cancelled,
    /// Arena page (or builder buffer) growth failed.
    OutOfMemory(String),
    /// COLA bit-pattern / level-occupancy invariant violated. Non-recoverable.
    Fatal(String),
    /// Wrapped `std::io::Error`, from snapshot or bulk-load file I/O.
    IoError(io::Error),
    /// Path could not be interpreted as a valid snapshot/bulk-load file.
    InvalidFile(String),
    /// A numeric narrowing conversion failed (e.g. `u64` offset into `usize`).
    FailConversion(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::DuplicateKey(key) => write!(f, "duplicate key: {}", key),
            Error::KeyNotFound(key) => write!(f, "key not found: {}", key),
            Error::KeyOutsideLegalRange(key) => {
                write!(f, "key outside legal range: {}", key)
            }
            Error::InvalidFormat(msg) => write!(f, "invalid format: {}", msg),
            Error::BufferTooSmall(need, have) => {
                write!(f, "buffer too small: need {} have {}", need, have)
            }
            Error::AlreadyDisposed(what) => write!(f, "already disposed: {}", what),
            Error::Conflict(key) => write!(f, "conflict on key: {}", key),
            Error::Cancelled => write!(f, "cancelled"),
            Error::OutOfMemory(msg) => write!(f, "out of memory: {}", msg),
            Error::Fatal(msg) => write!(f, "fatal: {}", msg),
            Error::IoError(err) => write!(f, "io-error: {}", err),
            Error::InvalidFile(file) => write!(f, "invalid file: {}", file),
            Error::FailConversion(msg) => write!(f, "conversion failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::IoError(err)
    }
}

impl From<TryFromIntError> for Error {
    fn from(err: TryFromIntError) -> Error {
        Error::FailConversion(err.to_string())
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        // Only the discriminant and, where meaningful, the message are
        // compared; `io::Error` does not implement `PartialEq` so two
        // `IoError` variants compare equal iff their `Display` matches.
        format!("{}", self) == format!("{}", other)
    }
}

/// Result alias used throughout the crate, matching the teacher's
/// `core::Result` convention.
pub type Result<T> = std::result::Result<T, Error>;
