use crate::{
    code::MAX_SERIAL_REFERENCE,
    error::{Error, Result},
};

/// The value an atomic increment should store after handing out `current`.
///
/// Counters stop one past the last serial reference: once `current` no
/// longer fits, the increment is refused and the store is left as is.
pub(crate) fn next_counter(current: u64) -> Result<u64> {
    if current > MAX_SERIAL_REFERENCE {
        return Err(Error::SerialOverflow { counter: current });
    }
    Ok(current + 1)
}

/// A persisted counter that supplies serial references.
///
/// This is the minimal contract a record store has to meet: read the current
/// value and write a new one. The two calls are independent, so a caller that
/// does `get_counter` then `set_counter` has a read-modify-write race unless it
/// serializes access itself (see [`LockSsccGenerator`]).
///
/// [`LockSsccGenerator`]: crate::generator::LockSsccGenerator
pub trait CounterStore {
    /// Returns the current counter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CounterMissing`] if the counter was never
    /// initialized, or a storage error if the backend fails.
    ///
    /// [`Error::CounterMissing`]: crate::Error::CounterMissing
    fn get_counter(&self) -> Result<u64>;

    /// Persists `value` as the new counter.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend fails.
    fn set_counter(&self, value: u64) -> Result<()>;
}

/// A [`CounterStore`] that can advance the counter in one indivisible step.
///
/// Think `UPDATE ... SET counter = counter + 1 RETURNING counter - 1`. Two
/// concurrent callers never observe the same value.
pub trait AtomicCounterStore: CounterStore {
    /// Advances the counter by one and returns the value it held before.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CounterMissing`] if the counter was never
    /// initialized, [`Error::SerialOverflow`] without advancing if the
    /// counter is already past the last serial reference, or a storage error
    /// if the backend fails.
    fn fetch_increment(&self) -> Result<u64>;
}

impl<S: CounterStore + ?Sized> CounterStore for &S {
    fn get_counter(&self) -> Result<u64> {
        (**self).get_counter()
    }

    fn set_counter(&self, value: u64) -> Result<()> {
        (**self).set_counter(value)
    }
}

impl<S: AtomicCounterStore + ?Sized> AtomicCounterStore for &S {
    fn fetch_increment(&self) -> Result<u64> {
        (**self).fetch_increment()
    }
}
