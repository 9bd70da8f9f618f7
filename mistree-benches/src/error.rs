//! Benchmark setup error type.
//!
//! Lets setup functions propagate failures with `?` instead of using
//! `.expect()`.

use mistree_core::MistreeError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Building or analysing a synthetic tree failed.
    #[error("tree operation failed: {0}")]
    Mistree(#[from] MistreeError),
    /// A zero value was passed where a non-zero integer was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// A description of the parameter that was unexpectedly zero.
        context: &'static str,
    },
}
