#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Sscc, SsccLayout, error::Result, generator::SsccGenerator, store::CounterStore};

/// An SSCC generator that reads, builds and writes back with no locking.
///
/// Each call does three separate steps: `get_counter`, build the code from
/// that value, then `set_counter(value + 1)`. Two callers sharing a store
/// can both read the same value before either writes, and will then emit the
/// same code.
///
/// ## Features
/// - ❌ Not safe for concurrent callers sharing a store
/// - ✅ Works with any [`CounterStore`]
///
/// ## Recommended When
/// - Calls are already serialized by the caller (one process, one thread)
///
/// ## See Also
/// - [`LockSsccGenerator`]
/// - [`AtomicSsccGenerator`]
///
/// [`LockSsccGenerator`]: crate::generator::LockSsccGenerator
/// [`AtomicSsccGenerator`]: crate::generator::AtomicSsccGenerator
#[derive(Debug)]
pub struct BasicSsccGenerator<S>
where
    S: CounterStore,
{
    store: S,
    layout: SsccLayout,
}

impl<S> BasicSsccGenerator<S>
where
    S: CounterStore,
{
    /// Creates a generator with the default layout.
    ///
    /// # Example
    /// ```
    /// use sscc::{BasicSsccGenerator, MemoryCounter, SsccGenerator};
    ///
    /// let generator = BasicSsccGenerator::new(MemoryCounter::new(0));
    /// let code = generator.try_next_code().unwrap();
    /// assert_eq!(code.as_str(), "008596570000000006");
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

    /// Consumes the generator, returning the counter store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Generates the next code.
    ///
    /// The store is only written once the code has been built, so an
    /// overflowing counter leaves the store untouched.
    ///
    /// # Errors
    ///
    /// - [`Error::CounterMissing`] if the store has no counter
    /// - [`Error::SerialOverflow`] if the counter exceeds nine digits
    /// - any storage error from the store
    ///
    /// [`Error::CounterMissing`]: crate::Error::CounterMissing
    /// [`Error::SerialOverflow`]: crate::Error::SerialOverflow
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_next_code(&self) -> Result<Sscc> {
        let counter = self.store.get_counter()?;
        let code = self.layout.build(counter)?;
        self.store.set_counter(counter + 1)?;
        Ok(code)
    }
}

impl<S> SsccGenerator for BasicSsccGenerator<S>
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
