use std::io;

use crate::code::{MAX_SERIAL_REFERENCE, SERIAL_DIGITS};

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `sscc` can emit.
///
/// Counter errors (`CounterMissing`, `CorruptCounter`, `Storage`) come from a
/// [`CounterStore`] and should be treated as configuration problems: retrying
/// will not help until the store is fixed. Decoding errors come from
/// [`Sscc::parse`] and the layout constructors.
///
/// [`CounterStore`]: crate::store::CounterStore
/// [`Sscc::parse`]: crate::Sscc::parse
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The counter has never been initialized in the backing store.
    #[error("counter is not initialized")]
    CounterMissing,

    /// The backing store holds something that is not a counter value.
    #[error("counter store holds a corrupt value: {value:?}")]
    CorruptCounter {
        /// The raw stored contents.
        value: String,
    },

    /// The backing store failed to read or write.
    #[error("counter storage failed ({kind:?}): {message}")]
    Storage {
        /// The underlying I/O error kind.
        kind: io::ErrorKind,
        /// The underlying error message.
        message: String,
    },

    /// The counter no longer fits in the serial reference field.
    #[error(
        "counter {counter} does not fit in a {}-digit serial reference (max {})",
        SERIAL_DIGITS,
        MAX_SERIAL_REFERENCE
    )]
    SerialOverflow {
        /// The counter value that was rejected.
        counter: u64,
    },

    /// The input has the wrong number of characters.
    #[error("invalid length: expected {expected}, got {len}")]
    InvalidLength {
        /// The expected length.
        expected: usize,
        /// The actual length.
        len: usize,
    },

    /// The input contains a byte that is not an ASCII digit.
    #[error("invalid digit {byte:#04x} at index {index}")]
    InvalidDigit {
        /// The offending byte.
        byte: u8,
        /// Its position in the input.
        index: usize,
    },

    /// The code does not start with the SSCC application identifier `00`.
    #[error("unexpected application identifier {found:?}")]
    InvalidApplicationIdentifier {
        /// The two leading characters that were found.
        found: String,
    },

    /// Extension digits are a single decimal digit.
    #[error("extension digit {digit} is out of range 0..=9")]
    InvalidExtensionDigit {
        /// The rejected value.
        digit: u8,
    },

    /// The company prefix must be exactly five ASCII digits.
    #[error("invalid company prefix {prefix:?}")]
    InvalidCompanyPrefix {
        /// The rejected prefix.
        prefix: String,
    },

    /// The trailing check digit does not match the data digits.
    #[error("check digit mismatch: expected {expected}, found {found}")]
    CheckDigitMismatch {
        /// The check digit computed from the data digits.
        expected: u8,
        /// The check digit carried by the input.
        found: u8,
    },

    /// The operation failed because a lock was **poisoned**.
    ///
    /// This occurs when a thread panics while holding the lock. When the
    /// `parking-lot` feature is enabled, mutexes do **not** poison and this
    /// variant is never produced.
    #[error("lock poisoned")]
    LockPoisoned,
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Storage {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[cfg(not(feature = "parking-lot"))]
use crate::mutex::{MutexGuard, PoisonError};
#[cfg(not(feature = "parking-lot"))]
// Convert all poisoned lock errors to a simplified `LockPoisoned`
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
