#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Sscc, SsccLayout, error::Result, generator::SsccGenerator, store::AtomicCounterStore,
};

/// An SSCC generator that consumes counter values with a single atomic
/// increment.
///
/// The counter is advanced **before** the code is built. If the value turns
/// out to be past the last serial the call fails with
/// [`Error::SerialOverflow`], and the counter stays exhausted.
///
/// ## Features
/// - ✅ Thread-safe, and process-safe when the store's increment is
/// - ✅ No generator-side locking
///
/// ## Recommended When
/// - The counter store supports an atomic increment (a database sequence,
///   `UPDATE ... RETURNING`, an atomic integer)
///
/// ## See Also
/// - [`BasicSsccGenerator`]
/// - [`LockSsccGenerator`]
///
/// [`Error::SerialOverflow`]: crate::Error::SerialOverflow
/// [`BasicSsccGenerator`]: crate::generator::BasicSsccGenerator
/// [`LockSsccGenerator`]: crate::generator::LockSsccGenerator
#[derive(Debug)]
pub struct AtomicSsccGenerator<S>
where
    S: AtomicCounterStore,
{
    store: S,
    layout: SsccLayout,
}

impl<S> AtomicSsccGenerator<S>
where
    S: AtomicCounterStore,
{
    /// Creates a generator with the default layout.
    ///
    /// # Example
    /// ```
    /// use sscc::{AtomicCounter, AtomicSsccGenerator, SsccGenerator};
    ///
    /// let generator = AtomicSsccGenerator::new(AtomicCounter::new(1));
    /// assert_eq!(generator.try_next_code().unwrap().serial_reference(), 1);
    /// assert_eq!(generator.try_next_code().unwrap().serial_reference(), 2);
    /// ```
    pub fn new(store: S) -> Self {
        Self::with_layout(store, SsccLayout::default())
    }

    /// Creates a generator that builds codes with `layout`.
    pub fn with_layout(store: S, layout: SsccLayout) -> Self {
        Self { store, layout }
    }

    /// Returns a reference to the counter store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Generates the next code.
    ///
    /// # Errors
    ///
    /// - [`Error::CounterMissing`] if the store has no counter
    /// - [`Error::SerialOverflow`] if the consumed value exceeds nine digits
    /// - any storage error from the store
    ///
    /// [`Error::CounterMissing`]: crate::Error::CounterMissing
    /// [`Error::SerialOverflow`]: crate::Error::SerialOverflow
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_next_code(&self) -> Result<Sscc> {
        let counter = self.store.fetch_increment()?;
        self.layout.build(counter)
    }
}

impl<S> SsccGenerator for AtomicSsccGenerator<S>
where
    S: AtomicCounterStore,
{
    fn layout(&self) -> &SsccLayout {
        &self.layout
    }

    fn try_next_code(&self) -> Result<Sscc> {
        self.try_next_code()
    }
}
