//! The inference-engine contract and the reported result handle.
//!
//! Purpose
//! -------
//! Define the narrow boundary between this orchestration layer and the
//! external engine that owns all sampling/optimization numerics. The
//! engine receives one assembled [`ModelRequest`] plus strategy options and
//! returns named parameter arrays; this layer never inspects how they were
//! produced.
//!
//! Conventions
//! -----------
//! - Every reported parameter carries a **leading draw axis**: posterior
//!   draws for sampling, approximate-posterior draws for variational, and
//!   a length-one axis for point estimates.
//! - Canonical parameter names: `"exposures"` (draws × samples ×
//!   signatures) and, when signatures are inferred, `"signatures"`
//!   (draws × signatures × categories). Engines may report additional
//!   parameters; the adapter removes the specification's nuisance entries.
//! - Engines are `Sync`: the model-order search evaluates independent
//!   candidates concurrently against one shared engine reference.

use crate::{
    inference::{
        errors::BackendResult,
        strategy::{Strategy, StrategyOptions},
    },
    model::payload::ModelRequest,
};
use ndarray::{ArrayD, Axis};
use std::collections::BTreeMap;

/// Raw engine output: named parameter arrays plus an optional log-posterior.
///
/// This is the engine-facing carrier; nuisance parameters are still present
/// and no strategy tag is attached yet. The backend adapter turns it into
/// an [`InferenceResult`].
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOutput {
    /// Named parameters, each with a leading draw axis.
    pub parameters: BTreeMap<String, ArrayD<f64>>,
    /// Log-posterior (or evidence bound) at the reported estimate, when the
    /// strategy produces one.
    pub log_posterior: Option<f64>,
}

/// The opaque external inference capability.
///
/// Implementations own every numerical detail of the three strategies. A
/// failure is reported through the error channel rather than as a
/// degenerate result; the optimizing strategy in particular reports
/// non-convergence instead of returning an unconverged point.
pub trait InferenceEngine: Sync {
    /// Evaluate one model request under the given strategy options.
    fn run(
        &self, request: &ModelRequest<'_>, options: &StrategyOptions,
    ) -> BackendResult<EngineOutput>;
}

/// One inference invocation's reported result.
///
/// Tagged with the strategy that produced it; parameters are already
/// nuisance-filtered. Opaque to the orchestration layer beyond the
/// accessors below.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceResult {
    strategy: Strategy,
    parameters: BTreeMap<String, ArrayD<f64>>,
    log_posterior: Option<f64>,
}

impl InferenceResult {
    pub(crate) fn new(
        strategy: Strategy, parameters: BTreeMap<String, ArrayD<f64>>,
        log_posterior: Option<f64>,
    ) -> InferenceResult {
        InferenceResult { strategy, parameters, log_posterior }
    }

    /// The strategy that produced this result.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// A reported parameter's draws, when present.
    pub fn parameter(&self, name: &str) -> Option<&ArrayD<f64>> {
        self.parameters.get(name)
    }

    /// Names of all reported parameters, in lexicographic order.
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters.keys().map(String::as_str)
    }

    /// Mean of a parameter over its leading draw axis.
    ///
    /// For point estimates (length-one draw axis) this is the estimate
    /// itself. Returns `None` for unknown names or empty draw axes.
    pub fn parameter_mean(&self, name: &str) -> Option<ArrayD<f64>> {
        self.parameters.get(name).and_then(|draws| draws.mean_axis(Axis(0)))
    }

    /// Log-posterior at the reported estimate, when the strategy produces
    /// one.
    pub fn log_posterior(&self) -> Option<f64> {
        self.log_posterior
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::ArrayD;

    #[test]
    // Purpose
    // -------
    // `parameter_mean` averages over the leading draw axis and preserves
    // the remaining shape.
    //
    // Given
    // -----
    // - Two draws of a 1 x 2 exposures matrix: [[1, 3]] and [[3, 5]].
    //
    // Expect
    // ------
    // - Mean shape (1, 2) with values [[2, 4]].
    fn parameter_mean_averages_over_leading_axis() {
        // Arrange
        let draws = ArrayD::from_shape_vec(vec![2, 1, 2], vec![1.0, 3.0, 3.0, 5.0]).unwrap();
        let mut parameters = BTreeMap::new();
        parameters.insert("exposures".to_string(), draws);
        let result = InferenceResult::new(Strategy::Sampling, parameters, None);

        // Act
        let mean = result.parameter_mean("exposures").unwrap();

        // Assert
        assert_eq!(mean.shape(), &[1, 2]);
        assert_abs_diff_eq!(mean[[0, 0]], 2.0);
        assert_abs_diff_eq!(mean[[0, 1]], 4.0);
    }

    #[test]
    // Purpose
    // -------
    // Unknown parameter names yield `None` from both accessors.
    fn unknown_parameter_names_return_none() {
        // Arrange
        let result = InferenceResult::new(Strategy::Optimizing, BTreeMap::new(), Some(-12.5));

        // Act & Assert
        assert!(result.parameter("signatures").is_none());
        assert!(result.parameter_mean("signatures").is_none());
        assert_eq!(result.log_posterior(), Some(-12.5));
    }
}
