//! Goodness-of-fit collaborators for the model-order search.
//!
//! Purpose
//! -------
//! Define the scoring contract the order search uses to rank candidate
//! signature counts, ship the default reconstruction-cosine scorer, and
//! provide the human-facing summary hook. Scoring decides the `best`
//! selection; the reporter never does.
//!
//! Conventions
//! -----------
//! - Scores are "higher is better" on [0, 1] for the default scorer. No
//!   statistical penalty for model complexity is applied anywhere: this is
//!   a reconstruction-accuracy selection rule, and callers are expected to
//!   combine it with their own judgment of the score-vs-order curve.

use crate::{
    inference::engine::InferenceResult,
    search::order::{CandidateOutcome, OrderSearchResult},
    signature::core::catalogue::CountMatrix,
};
use ndarray::{ArrayView1, Ix2};
use tracing::info;

/// Reconstruction goodness-of-fit between a result and the observed
/// catalogues.
///
/// `Sync` so a range search can score candidates from worker threads.
pub trait FitScorer: Sync {
    /// Score one successful result against the observed counts; higher is
    /// better. `None` when the result does not expose the parameters the
    /// scorer needs.
    fn score(&self, result: &InferenceResult, observed: &CountMatrix) -> Option<f64>;
}

/// Default scorer: cosine similarity between model-implied and observed
/// catalogues.
///
/// Reconstructs each catalogue as (posterior-mean exposures) ×
/// (posterior-mean signatures) and averages the per-sample cosine
/// similarity against the observed rows. Cosine is scale-invariant per
/// row, so proportion-valued exposures reconstruct as well as count-scaled
/// ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct CosineReconstruction;

impl FitScorer for CosineReconstruction {
    fn score(&self, result: &InferenceResult, observed: &CountMatrix) -> Option<f64> {
        let exposures =
            result.parameter_mean("exposures")?.into_dimensionality::<Ix2>().ok()?;
        let signatures =
            result.parameter_mean("signatures")?.into_dimensionality::<Ix2>().ok()?;
        if exposures.nrows() != observed.samples()
            || exposures.ncols() != signatures.nrows()
            || signatures.ncols() != observed.layout().categories()
        {
            return None;
        }
        let reconstruction = exposures.dot(&signatures);
        let observed = observed.values();
        let mut total = 0.0;
        for sample in 0..observed.nrows() {
            total += cosine(reconstruction.row(sample), observed.row(sample));
        }
        Some(total / observed.nrows() as f64)
    }
}

/// Cosine similarity of two non-negative vectors; 0 when either is all
/// zeros.
fn cosine(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    let dot = a.dot(&b);
    let norms = a.dot(&a).sqrt() * b.dot(&b).sqrt();
    if norms == 0.0 { 0.0 } else { dot / norms }
}

/// Human-facing summary hook invoked once per finished search.
///
/// Implementations render; they never influence which candidate is
/// selected.
pub trait SearchReporter {
    /// Render a summary of the finished search.
    fn report(&self, search: &OrderSearchResult);
}

/// Default reporter: one `tracing::info!` line per candidate plus the
/// selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl SearchReporter for LogReporter {
    fn report(&self, search: &OrderSearchResult) {
        for (order, outcome) in search.outcomes() {
            match outcome {
                CandidateOutcome::Completed { score: Some(score), .. } => {
                    info!(
                        target: "rust_signatures::search",
                        order, score, "candidate completed"
                    );
                }
                CandidateOutcome::Completed { score: None, .. } => {
                    info!(
                        target: "rust_signatures::search",
                        order, "candidate completed (unscored)"
                    );
                }
                CandidateOutcome::Failed(error) => {
                    info!(
                        target: "rust_signatures::search",
                        order, %error, "candidate failed"
                    );
                }
            }
        }
        match search.best() {
            Some(best) => info!(
                target: "rust_signatures::search",
                order = best.order,
                score = best.score,
                "selected best order by reconstruction similarity"
            ),
            None => info!(
                target: "rust_signatures::search",
                "no candidate succeeded; nothing selected"
            ),
        }
    }
}
