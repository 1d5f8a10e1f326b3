use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Sscc, SsccLayout,
    error::Result,
    generator::SsccGenerator,
    mutex::{Mutex, lock},
    store::CounterStore,
};

/// A lock-based SSCC generator suitable for multi-threaded environments.
///
/// The store lives behind an [`Arc<Mutex<_>>`] and the whole
/// read-build-write sequence runs under the lock. Clones share the lock, so
/// any number of threads can generate from one store without duplicates.
/// Only callers going through this generator are serialized; anyone writing
/// to the underlying record by other means is not.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Works with any [`CounterStore`], even non-atomic ones
///
/// ## Recommended When
/// - The counter store has no atomic increment of its own
///
/// ## See Also
/// - [`BasicSsccGenerator`]
/// - [`AtomicSsccGenerator`]
///
/// [`BasicSsccGenerator`]: crate::generator::BasicSsccGenerator
/// [`AtomicSsccGenerator`]: crate::generator::AtomicSsccGenerator
#[derive(Debug)]
pub struct LockSsccGenerator<S>
where
    S: CounterStore,
{
    store: Arc<Mutex<S>>,
    layout: SsccLayout,
}

impl<S> Clone for LockSsccGenerator<S>
where
    S: CounterStore,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            layout: self.layout,
        }
    }
}

impl<S> LockSsccGenerator<S>
where
    S: CounterStore,
{
    /// Creates a generator with the default layout.
    ///
    /// # Example
    /// ```
    /// use sscc::{LockSsccGenerator, SharedCounter, SsccGenerator};
    ///
    /// let generator = LockSsccGenerator::new(SharedCounter::new(41));
    /// let worker = generator.clone();
    ///
    /// let handle = std::thread::spawn(move || worker.try_next_code().unwrap());
    /// let here = generator.try_next_code().unwrap();
    /// let there = handle.join().unwrap();
    /// assert_ne!(here, there);
    /// ```
    pub fn new(store: S) -> Self {
        Self::with_layout(store, SsccLayout::default())
    }

    /// Creates a generator that builds codes with `layout`.
    pub fn with_layout(store: S, layout: SsccLayout) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            layout,
        }
    }

    /// Generates the next code while holding the lock.
    ///
    /// # Errors
    ///
    /// - [`Error::CounterMissing`] if the store has no counter
    /// - [`Error::SerialOverflow`] if the counter exceeds nine digits
    /// - [`Error::LockPoisoned`] if another thread panicked mid-generation
    /// - any storage error from the store
    ///
    /// [`Error::CounterMissing`]: crate::Error::CounterMissing
    /// [`Error::SerialOverflow`]: crate::Error::SerialOverflow
    /// [`Error::LockPoisoned`]: crate::Error::LockPoisoned
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_next_code(&self) -> Result<Sscc> {
        let store = lock(&self.store)?;
        let counter = store.get_counter()?;
        let code = self.layout.build(counter)?;
        store.set_counter(counter + 1)?;
        Ok(code)
    }
}

impl<S> SsccGenerator for LockSsccGenerator<S>
where
    S: CounterStore,
{
    fn layout(&self) -> &SsccLayout {
        &self.layout
    }

    fn try_next_code(&self) -> Result<Sscc> {
        self.try_next_code()
    }
}
