//! Errors for the inference backend (option validation and engine failures).
//!
//! [`BackendError`] normalizes everything the engine boundary can produce:
//! invalid strategy options rejected before any engine call, optimizer
//! non-convergence, and engine-reported failures carried as a
//! human-readable status. In a range search these are recorded per
//! candidate; for a single request they propagate directly, since there is
//! no fallback candidate to fall back to.

/// Result alias for backend-adapter operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Failures at the inference-engine boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    // ---- Strategy option validation ----
    /// Iteration count must be at least 1.
    InvalidIterations { iterations: usize },

    /// Warmup must be strictly smaller than the iteration count.
    InvalidWarmup { warmup: usize, iterations: usize },

    /// Chain count must be at least 1.
    InvalidChains { chains: usize },

    /// Variational output-sample count must be at least 1.
    InvalidOutputSamples { output_samples: usize },

    // ---- Engine outcomes ----
    /// The optimizing strategy terminated without converging.
    NotConverged { iterations: usize },

    /// The engine reported a failure; carries its status verbatim.
    Engine { status: String },
}

impl std::error::Error for BackendError {}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Strategy option validation ----
            BackendError::InvalidIterations { iterations } => {
                write!(f, "Iteration count must be at least 1; got {iterations}.")
            }
            BackendError::InvalidWarmup { warmup, iterations } => {
                write!(
                    f,
                    "Warmup ({warmup}) must be strictly smaller than the iteration \
                     count ({iterations})."
                )
            }
            BackendError::InvalidChains { chains } => {
                write!(f, "Chain count must be at least 1; got {chains}.")
            }
            BackendError::InvalidOutputSamples { output_samples } => {
                write!(f, "Output-sample count must be at least 1; got {output_samples}.")
            }

            // ---- Engine outcomes ----
            BackendError::NotConverged { iterations } => {
                write!(f, "Optimization did not converge within {iterations} iterations.")
            }
            BackendError::Engine { status } => {
                write!(f, "Inference engine failure: {status}")
            }
        }
    }
}
