use std::sync::Arc;

use crate::{
    error::{Error, Result},
    mutex::{Mutex, lock},
    store::{AtomicCounterStore, CounterStore, next_counter},
};

/// A thread-safe, in-memory counter shared by cloning.
///
/// Every clone points at the same value. `get_counter` and `set_counter`
/// each take the lock once, so a caller doing both still races with other
/// callers; [`AtomicCounterStore::fetch_increment`] holds the lock across the
/// read and the write.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Can start uninitialized to model a missing counter record
///
/// ## See Also
/// - [`MemoryCounter`]
/// - [`AtomicCounter`]
///
/// [`MemoryCounter`]: crate::store::MemoryCounter
/// [`AtomicCounter`]: crate::store::AtomicCounter
#[derive(Clone, Debug, Default)]
pub struct SharedCounter {
    value: Arc<Mutex<Option<u64>>>,
}

impl SharedCounter {
    /// Creates a counter initialized to `start`.
    pub fn new(start: u64) -> Self {
        Self {
            value: Arc::new(Mutex::new(Some(start))),
        }
    }

    /// Creates a counter with no value.
    pub fn uninitialized() -> Self {
        Self::default()
    }
}

impl CounterStore for SharedCounter {
    fn get_counter(&self) -> Result<u64> {
        lock(&self.value)?.ok_or(Error::CounterMissing)
    }

    fn set_counter(&self, value: u64) -> Result<()> {
        *lock(&self.value)? = Some(value);
        Ok(())
    }
}

impl AtomicCounterStore for SharedCounter {
    fn fetch_increment(&self) -> Result<u64> {
        let mut guard = lock(&self.value)?;
        let current = guard.ok_or(Error::CounterMissing)?;
        *guard = Some(next_counter(current)?);
        Ok(current)
    }
}
