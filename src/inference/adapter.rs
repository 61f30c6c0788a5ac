//! Backend adapter — uniform invocation of the engine for all strategies.
//!
//! Purpose
//! -------
//! Give the orchestration layer one call path for the three strategies:
//! marshal the request and options, enforce the extraction chain rule,
//! filter the specification's nuisance parameters out of the raw output,
//! and tag the result with the strategy that produced it. Failures pass
//! through unchanged as [`BackendError`](crate::inference::errors::BackendError).
//!
//! Invariants & assumptions
//! ------------------------
//! - Extraction-type problems run with **exactly one** sampling chain, no
//!   matter what the caller requested: independent chains converge to
//!   permuted signature/exposure labelings that cannot be averaged (label
//!   switching). Pure fitting honors the caller's chain count unchanged.
//! - The optimizing and variational strategies carry no chain knob, so the
//!   rule only rewrites sampling options.

use crate::{
    inference::{
        engine::{EngineOutput, InferenceEngine, InferenceResult},
        errors::BackendResult,
        strategy::StrategyOptions,
    },
    model::payload::ModelRequest,
};
use tracing::debug;

/// Thin adapter over a borrowed engine.
#[derive(Debug, Clone, Copy)]
pub struct BackendAdapter<'e, E: InferenceEngine + ?Sized> {
    engine: &'e E,
}

impl<'e, E: InferenceEngine + ?Sized> BackendAdapter<'e, E> {
    /// Wrap a borrowed engine.
    pub fn new(engine: &'e E) -> BackendAdapter<'e, E> {
        BackendAdapter { engine }
    }

    /// Run one request and return the filtered, strategy-tagged result.
    ///
    /// Behavior
    /// --------
    /// 1. Rewrite the sampling chain count to 1 when the request's problem
    ///    infers signatures.
    /// 2. Invoke the engine.
    /// 3. Remove the specification's nuisance parameters from the output.
    /// 4. Tag the result with the effective strategy.
    ///
    /// Errors
    /// ------
    /// - Propagates the engine's failure untouched; a single (non-range)
    ///   request has no fallback candidate, so the caller sees the failure
    ///   directly.
    pub fn invoke(
        &self, request: &ModelRequest<'_>, options: &StrategyOptions,
    ) -> BackendResult<InferenceResult> {
        let effective = effective_options(request, *options);
        let EngineOutput { mut parameters, log_posterior } =
            self.engine.run(request, &effective)?;
        for name in request.spec().nuisance {
            parameters.remove(*name);
        }
        Ok(InferenceResult::new(effective.strategy(), parameters, log_posterior))
    }
}

/// Apply the extraction chain rule to the caller's options.
fn effective_options(request: &ModelRequest<'_>, options: StrategyOptions) -> StrategyOptions {
    match options {
        StrategyOptions::Sampling(sampling)
            if request.spec().problem.extracts_signatures() && sampling.chains() > 1 =>
        {
            debug!(
                target: "rust_signatures::inference",
                requested = sampling.chains(),
                model = request.spec().name,
                "pinning sampling to one chain for an extraction-type problem"
            );
            StrategyOptions::Sampling(sampling.with_chains(1))
        }
        other => other,
    }
}
