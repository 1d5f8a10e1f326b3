use core::cell::Cell;

use crate::{
    error::{Error, Result},
    store::{AtomicCounterStore, CounterStore, next_counter},
};

/// A non-concurrent, in-memory counter.
///
/// ## Features
/// - ❌ Not thread-safe
/// - ✅ Can start uninitialized to model a missing counter record
///
/// ## Recommended When
/// - Tests and single-threaded tools
///
/// ## See Also
/// - [`SharedCounter`]
/// - [`AtomicCounter`]
///
/// [`SharedCounter`]: crate::store::SharedCounter
/// [`AtomicCounter`]: crate::store::AtomicCounter
#[derive(Debug, Default)]
pub struct MemoryCounter {
    value: Cell<Option<u64>>,
}

impl MemoryCounter {
    /// Creates a counter initialized to `start`.
    pub const fn new(start: u64) -> Self {
        Self {
            value: Cell::new(Some(start)),
        }
    }

    /// Creates a counter with no value; reads fail with
    /// [`Error::CounterMissing`] until it is set.
    pub const fn uninitialized() -> Self {
        Self {
            value: Cell::new(None),
        }
    }
}

impl CounterStore for MemoryCounter {
    fn get_counter(&self) -> Result<u64> {
        self.value.get().ok_or(Error::CounterMissing)
    }

    fn set_counter(&self, value: u64) -> Result<()> {
        self.value.set(Some(value));
        Ok(())
    }
}

impl AtomicCounterStore for MemoryCounter {
    fn fetch_increment(&self) -> Result<u64> {
        let current = self.get_counter()?;
        self.value.set(Some(next_counter(current)?));
        Ok(current)
    }
}
