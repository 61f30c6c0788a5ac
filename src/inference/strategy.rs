//! Inference strategies and their validated option structures.
//!
//! Purpose
//! -------
//! Enumerate the three estimation strategies the engine supports and give
//! each an explicit configuration structure with validated constructors and
//! documented defaults, replacing any variadic passthrough of backend
//! knobs. The supported knobs are exactly: iteration count, warmup count,
//! chain count, output-sample count, and seed; each strategy carries only
//! the knobs it understands.
//!
//! Invariants & assumptions
//! ------------------------
//! - Iteration and chain counts are at least 1; warmup is strictly smaller
//!   than the iteration count.
//! - The seed is passed through to the engine untouched; reproducibility
//!   under a fixed seed is the engine's contract.
//! - The backend adapter may pin the sampling chain count to 1 for
//!   extraction-type problems; [`SamplingOptions::with_chains`] exists for
//!   that rewrite and preserves every other knob.

use crate::inference::errors::{BackendError, BackendResult};

/// The three estimation strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Full posterior sampling across one or more chains.
    Sampling,
    /// Maximum-a-posteriori point optimization.
    Optimizing,
    /// Variational approximation of the posterior (cheaper, biased
    /// relative to full sampling).
    Variational,
}

/// Options for the sampling strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingOptions {
    chains: usize,
    iterations: usize,
    warmup: usize,
    seed: Option<u64>,
}

impl SamplingOptions {
    /// Construct validated sampling options.
    ///
    /// Errors
    /// ------
    /// - `BackendError::InvalidChains` if `chains == 0`.
    /// - `BackendError::InvalidIterations` if `iterations == 0`.
    /// - `BackendError::InvalidWarmup` if `warmup >= iterations`.
    pub fn new(
        chains: usize, iterations: usize, warmup: usize, seed: Option<u64>,
    ) -> BackendResult<SamplingOptions> {
        if chains == 0 {
            return Err(BackendError::InvalidChains { chains });
        }
        if iterations == 0 {
            return Err(BackendError::InvalidIterations { iterations });
        }
        if warmup >= iterations {
            return Err(BackendError::InvalidWarmup { warmup, iterations });
        }
        Ok(SamplingOptions { chains, iterations, warmup, seed })
    }

    /// Number of independent chains.
    pub fn chains(&self) -> usize {
        self.chains
    }

    /// Total iterations per chain, warmup included.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Warmup iterations discarded from the posterior.
    pub fn warmup(&self) -> usize {
        self.warmup
    }

    /// Seed passed through to the engine.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Copy of these options with the chain count replaced.
    pub fn with_chains(&self, chains: usize) -> SamplingOptions {
        SamplingOptions { chains, ..*self }
    }
}

impl Default for SamplingOptions {
    /// One chain, 2000 iterations with 1000 warmup, no seed.
    fn default() -> SamplingOptions {
        SamplingOptions { chains: 1, iterations: 2000, warmup: 1000, seed: None }
    }
}

/// Options for the optimizing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimizingOptions {
    iterations: usize,
    seed: Option<u64>,
}

impl OptimizingOptions {
    /// Construct validated optimizing options.
    ///
    /// Errors
    /// ------
    /// - `BackendError::InvalidIterations` if `iterations == 0`.
    pub fn new(iterations: usize, seed: Option<u64>) -> BackendResult<OptimizingOptions> {
        if iterations == 0 {
            return Err(BackendError::InvalidIterations { iterations });
        }
        Ok(OptimizingOptions { iterations, seed })
    }

    /// Maximum optimizer iterations.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Seed passed through to the engine.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Default for OptimizingOptions {
    /// 2000 iterations, no seed.
    fn default() -> OptimizingOptions {
        OptimizingOptions { iterations: 2000, seed: None }
    }
}

/// Options for the variational strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariationalOptions {
    iterations: usize,
    output_samples: usize,
    seed: Option<u64>,
}

impl VariationalOptions {
    /// Construct validated variational options.
    ///
    /// Errors
    /// ------
    /// - `BackendError::InvalidIterations` if `iterations == 0`.
    /// - `BackendError::InvalidOutputSamples` if `output_samples == 0`.
    pub fn new(
        iterations: usize, output_samples: usize, seed: Option<u64>,
    ) -> BackendResult<VariationalOptions> {
        if iterations == 0 {
            return Err(BackendError::InvalidIterations { iterations });
        }
        if output_samples == 0 {
            return Err(BackendError::InvalidOutputSamples { output_samples });
        }
        Ok(VariationalOptions { iterations, output_samples, seed })
    }

    /// Maximum stochastic-gradient iterations.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Number of approximate-posterior draws to report.
    pub fn output_samples(&self) -> usize {
        self.output_samples
    }

    /// Seed passed through to the engine.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Default for VariationalOptions {
    /// 10000 iterations, 1000 output samples, no seed.
    fn default() -> VariationalOptions {
        VariationalOptions { iterations: 10000, output_samples: 1000, seed: None }
    }
}

/// Strategy selection plus its options, as one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyOptions {
    /// Full posterior sampling.
    Sampling(SamplingOptions),
    /// Point optimization.
    Optimizing(OptimizingOptions),
    /// Variational approximation.
    Variational(VariationalOptions),
}

impl StrategyOptions {
    /// The strategy these options configure.
    pub fn strategy(&self) -> Strategy {
        match self {
            StrategyOptions::Sampling(_) => Strategy::Sampling,
            StrategyOptions::Optimizing(_) => Strategy::Optimizing,
            StrategyOptions::Variational(_) => Strategy::Variational,
        }
    }

    /// The seed passed through to the engine, regardless of strategy.
    pub fn seed(&self) -> Option<u64> {
        match self {
            StrategyOptions::Sampling(options) => options.seed(),
            StrategyOptions::Optimizing(options) => options.seed(),
            StrategyOptions::Variational(options) => options.seed(),
        }
    }
}

impl Default for StrategyOptions {
    /// Sampling with [`SamplingOptions::default`].
    fn default() -> StrategyOptions {
        StrategyOptions::Sampling(SamplingOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover option-structure defaults and constructor-time
    // validation. Chain pinning for extraction problems is the adapter's
    // behavior and is tested there.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Defaults encode the documented values: sampling 1/2000/1000,
    // optimizing 2000, variational 10000/1000, all unseeded.
    fn defaults_encode_documented_values() {
        // Act
        let sampling = SamplingOptions::default();
        let optimizing = OptimizingOptions::default();
        let variational = VariationalOptions::default();

        // Assert
        assert_eq!(
            (sampling.chains(), sampling.iterations(), sampling.warmup(), sampling.seed()),
            (1, 2000, 1000, None)
        );
        assert_eq!((optimizing.iterations(), optimizing.seed()), (2000, None));
        assert_eq!(
            (variational.iterations(), variational.output_samples(), variational.seed()),
            (10000, 1000, None)
        );
    }

    #[test]
    // Purpose
    // -------
    // Constructors reject zero chains/iterations and warmup >= iterations.
    fn constructors_reject_invalid_knobs() {
        // Act & Assert
        assert!(matches!(
            SamplingOptions::new(0, 2000, 1000, None),
            Err(BackendError::InvalidChains { chains: 0 })
        ));
        assert!(matches!(
            SamplingOptions::new(1, 0, 0, None),
            Err(BackendError::InvalidIterations { iterations: 0 })
        ));
        assert!(matches!(
            SamplingOptions::new(1, 100, 100, None),
            Err(BackendError::InvalidWarmup { warmup: 100, iterations: 100 })
        ));
        assert!(matches!(
            OptimizingOptions::new(0, None),
            Err(BackendError::InvalidIterations { iterations: 0 })
        ));
        assert!(matches!(
            VariationalOptions::new(1000, 0, None),
            Err(BackendError::InvalidOutputSamples { output_samples: 0 })
        ));
    }

    #[test]
    // Purpose
    // -------
    // `with_chains` replaces the chain count and preserves every other knob.
    fn with_chains_preserves_other_knobs() {
        // Arrange
        let options = SamplingOptions::new(4, 500, 250, Some(7)).unwrap();

        // Act
        let pinned = options.with_chains(1);

        // Assert
        assert_eq!(pinned.chains(), 1);
        assert_eq!(pinned.iterations(), 500);
        assert_eq!(pinned.warmup(), 250);
        assert_eq!(pinned.seed(), Some(7));
    }

    #[test]
    // Purpose
    // -------
    // `StrategyOptions` reports the strategy tag and the seed uniformly.
    fn strategy_options_report_tag_and_seed() {
        // Arrange
        let sampling = StrategyOptions::Sampling(SamplingOptions::new(2, 100, 50, Some(3)).unwrap());
        let optimizing = StrategyOptions::Optimizing(OptimizingOptions::default());

        // Act & Assert
        assert_eq!(sampling.strategy(), Strategy::Sampling);
        assert_eq!(sampling.seed(), Some(3));
        assert_eq!(optimizing.strategy(), Strategy::Optimizing);
        assert_eq!(optimizing.seed(), None);
    }
}
