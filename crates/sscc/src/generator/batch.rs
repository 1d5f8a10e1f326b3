use crate::{Sscc, error::Error, error::Result};

// Cap on the initial reservation; codes beyond it are pushed as they arrive.
const MAX_RESERVED: usize = 1024;

/// The outcome of generating several codes for one shipment.
///
/// Generation stops at the first failure. Codes produced before it are kept,
/// and the counter advances they caused are **not** rolled back: a short
/// batch means those serials are spent. Callers should check
/// [`Batch::is_complete`] and treat a short result as a partial failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Batch {
    codes: Vec<Sscc>,
    requested: usize,
    error: Option<Error>,
}

impl Batch {
    pub(crate) fn collect(requested: usize, mut next: impl FnMut() -> Result<Sscc>) -> Self {
        let mut codes = Vec::with_capacity(requested.min(MAX_RESERVED));
        let mut error = None;
        for _ in 0..requested {
            match next() {
                Ok(code) => codes.push(code),
                Err(e) => {
                    error = Some(e);
                    break;
                }
            }
        }

        #[cfg(feature = "tracing")]
        match &error {
            Some(Error::CounterMissing) => tracing::error!(
                requested,
                generated = codes.len(),
                "SSCC counter is not initialized; check the counter store configuration"
            ),
            Some(e) => tracing::warn!(
                requested,
                generated = codes.len(),
                error = %e,
                "SSCC batch generation stopped early"
            ),
            None => tracing::debug!(requested, "SSCC batch generated"),
        }

        Self {
            codes,
            requested,
            error,
        }
    }

    /// Returns `true` if every requested code was generated.
    pub fn is_complete(&self) -> bool {
        self.error.is_none() && self.codes.len() == self.requested
    }

    /// The number of codes the caller asked for.
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// The codes generated before any failure, in counter order.
    pub fn codes(&self) -> &[Sscc] {
        &self.codes
    }

    /// The failure that ended the batch early, if any.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Splits the batch into the generated codes and the failure, if any.
    pub fn into_parts(self) -> (Vec<Sscc>, Option<Error>) {
        (self.codes, self.error)
    }

    /// Converts the batch into a [`Result`], discarding the partial codes on
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns the error that ended the batch early.
    pub fn into_result(self) -> Result<Vec<Sscc>> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.codes),
        }
    }
}
