use portable_atomic::{AtomicU64, Ordering};

use crate::{
    error::{Error, Result},
    store::{AtomicCounterStore, CounterStore, next_counter},
};

/// A lock-free counter backed by a single [`AtomicU64`].
///
/// Increments use a compare-and-swap loop, so they never take a lock.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Lock-free increments
/// - ❌ Always initialized
///
/// ## See Also
/// - [`MemoryCounter`]
/// - [`SharedCounter`]
///
/// [`MemoryCounter`]: crate::store::MemoryCounter
/// [`SharedCounter`]: crate::store::SharedCounter
#[derive(Debug, Default)]
pub struct AtomicCounter {
    value: AtomicU64,
}

impl AtomicCounter {
    /// Creates a counter initialized to `start`.
    pub const fn new(start: u64) -> Self {
        Self {
            value: AtomicU64::new(start),
        }
    }
}

impl CounterStore for AtomicCounter {
    fn get_counter(&self) -> Result<u64> {
        Ok(self.value.load(Ordering::Acquire))
    }

    fn set_counter(&self, value: u64) -> Result<()> {
        self.value.store(value, Ordering::Release);
        Ok(())
    }
}

impl AtomicCounterStore for AtomicCounter {
    fn fetch_increment(&self) -> Result<u64> {
        self.value
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                next_counter(current).ok()
            })
            .map_err(|counter| Error::SerialOverflow { counter })
    }
}
