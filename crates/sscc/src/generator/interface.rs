use crate::{Sscc, SsccLayout, error::Result, generator::Batch};

/// A minimal interface for generating SSCC codes.
pub trait SsccGenerator {
    /// The layout every generated code is built with.
    fn layout(&self) -> &SsccLayout;

    /// Consumes one counter value and returns the code built from it.
    ///
    /// # Errors
    ///
    /// Returns an error if the counter is missing, cannot be read or written,
    /// or no longer fits in the serial reference.
    fn try_next_code(&self) -> Result<Sscc>;

    /// Generates up to `count` codes, stopping at the first failure.
    ///
    /// See [`Batch`] for how partial results are reported.
    fn generate_batch(&self, count: usize) -> Batch {
        Batch::collect(count, || self.try_next_code())
    }
}
