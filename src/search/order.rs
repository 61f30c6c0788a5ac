//! Model-order search — extraction over a range of candidate counts.
//!
//! Purpose
//! -------
//! Drive one extraction per candidate signature count in ascending order,
//! tolerate per-candidate backend failures, score every successful result
//! with the goodness-of-fit collaborator, and select the best-scoring order.
//! Candidates are independent — each gets its own immutable model request —
//! so evaluation is embarrassingly parallel; a caller-configurable worker
//! limit bounds the concurrency, and aggregation is keyed by candidate
//! count so the outcome is deterministic regardless of completion order.
//!
//! Key behaviors
//! -------------
//! - Rebuild the uniform signature prior (n × categories) and the
//!   constant exposure prior (length n) for every candidate `n`; custom
//!   signature priors are rejected for ranges upstream, so no override
//!   reaches this layer.
//! - Record a failed candidate as [`CandidateOutcome::Failed`] and keep
//!   going; the remaining candidates are unaffected.
//! - Select `best` among succeeding, scorable candidates only, by highest
//!   score; ties resolve to the smallest order. No complexity penalty is
//!   applied.
//! - An all-failed (or unscorable) search is a valid result with
//!   `best == None`, not an error.
//! - Invoke the [`SearchReporter`] hook once at the end, after selection.

use crate::{
    inference::{
        adapter::BackendAdapter,
        engine::{InferenceEngine, InferenceResult},
        errors::BackendError,
        strategy::StrategyOptions,
    },
    model::{
        family::{ModelFamily, ProblemKind},
        payload::{ModelInputs, ModelRequest},
        registry::ModelRegistry,
    },
    search::gof::{FitScorer, SearchReporter},
    signature::{
        core::{
            catalogue::CountMatrix,
            opportunity::OpportunityMatrix,
            priors::{ExposurePrior, SignaturePrior},
        },
        errors::{UsageError, UsageResult},
    },
};
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Inclusive range of candidate signature counts, evaluated ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderRange {
    start: usize,
    end: usize,
}

impl OrderRange {
    /// Construct a validated inclusive range.
    ///
    /// Errors
    /// ------
    /// - `UsageError::ZeroSignatures` if `start == 0`.
    /// - `UsageError::EmptyOrderRange` if `end < start`.
    pub fn new(start: usize, end: usize) -> UsageResult<OrderRange> {
        if start == 0 {
            return Err(UsageError::ZeroSignatures);
        }
        if end < start {
            return Err(UsageError::EmptyOrderRange { start, end });
        }
        Ok(OrderRange { start, end })
    }

    /// Smallest candidate count.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Largest candidate count.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Candidate counts in ascending order.
    pub fn candidates(&self) -> impl Iterator<Item = usize> {
        self.start..=self.end
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Whether the range holds a single candidate.
    pub fn is_singleton(&self) -> bool {
        self.start == self.end
    }
}

/// Outcome of one candidate evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateOutcome {
    /// The backend completed; `score` is filled by the scoring pass and is
    /// `None` when the scorer could not use the result.
    Completed { result: InferenceResult, score: Option<f64> },
    /// The backend failed for this candidate; the others proceed.
    Failed(BackendError),
}

/// The selected order and its goodness-of-fit score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestOrder {
    /// Candidate signature count with the highest score.
    pub order: usize,
    /// Its reconstruction goodness-of-fit.
    pub score: f64,
}

/// Aggregated result of a range extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSearchResult {
    outcomes: BTreeMap<usize, CandidateOutcome>,
    best: Option<BestOrder>,
}

impl OrderSearchResult {
    /// All outcomes, keyed ascending by candidate count.
    pub fn outcomes(&self) -> &BTreeMap<usize, CandidateOutcome> {
        &self.outcomes
    }

    /// One candidate's outcome.
    pub fn outcome(&self, order: usize) -> Option<&CandidateOutcome> {
        self.outcomes.get(&order)
    }

    /// One candidate's inference result, when it completed.
    pub fn result(&self, order: usize) -> Option<&InferenceResult> {
        match self.outcomes.get(&order) {
            Some(CandidateOutcome::Completed { result, .. }) => Some(result),
            _ => None,
        }
    }

    /// The selected best order, when any candidate succeeded and scored.
    pub fn best(&self) -> Option<&BestOrder> {
        self.best.as_ref()
    }

    /// The best order's inference result.
    pub fn best_result(&self) -> Option<&InferenceResult> {
        self.best.as_ref().and_then(|best| self.result(best.order))
    }
}

/// Everything one range extraction needs, borrowed from the orchestrator.
///
/// Each candidate derives its own immutable [`ModelRequest`] from these
/// shared, read-only inputs; no mutable state crosses candidates.
#[derive(Debug, Clone, Copy)]
pub struct SearchContext<'a> {
    /// The explicit model registry.
    pub registry: &'a ModelRegistry,
    /// Statistical family of the extraction.
    pub family: ModelFamily,
    /// Validated catalogues.
    pub counts: &'a CountMatrix,
    /// Resolved opportunities (EMu family only).
    pub opportunities: Option<&'a OpportunityMatrix>,
    /// Pre-validated exposure concentration replicated per signature.
    pub exposure_concentration: f64,
    /// Candidate counts to evaluate.
    pub range: OrderRange,
    /// Strategy options shared by every candidate (the adapter pins the
    /// chain count per the extraction rule).
    pub options: StrategyOptions,
    /// Upper bound on concurrent candidate evaluations; 0 and 1 both mean
    /// sequential.
    pub workers: usize,
}

/// Evaluate every candidate, score the successes, select the best order,
/// and report.
pub fn run_order_search<E, S>(
    context: SearchContext<'_>, engine: &E, scorer: &S, reporter: &dyn SearchReporter,
) -> OrderSearchResult
where
    E: InferenceEngine + ?Sized,
    S: FitScorer + ?Sized,
{
    let candidates: Vec<usize> = context.range.candidates().collect();
    let workers = context.workers.clamp(1, candidates.len());

    let evaluated: Vec<(usize, CandidateOutcome)> = if workers <= 1 {
        candidates.iter().map(|&order| (order, evaluate_candidate(&context, engine, order))).collect()
    } else {
        match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
            Ok(pool) => pool.install(|| {
                candidates
                    .par_iter()
                    .map(|&order| (order, evaluate_candidate(&context, engine, order)))
                    .collect()
            }),
            Err(error) => {
                warn!(
                    target: "rust_signatures::search",
                    %error,
                    "could not build the candidate worker pool; evaluating sequentially"
                );
                candidates
                    .iter()
                    .map(|&order| (order, evaluate_candidate(&context, engine, order)))
                    .collect()
            }
        }
    };

    let mut outcomes: BTreeMap<usize, CandidateOutcome> = evaluated.into_iter().collect();

    // Scoring pass over the successful candidates, ascending.
    let mut best: Option<BestOrder> = None;
    for (&order, outcome) in outcomes.iter_mut() {
        if let CandidateOutcome::Completed { result, score } = outcome {
            *score = scorer.score(result, context.counts);
            if let Some(candidate_score) = *score {
                let improves = best.map_or(true, |current| candidate_score > current.score);
                if improves {
                    best = Some(BestOrder { order, score: candidate_score });
                }
            }
        }
    }

    let search = OrderSearchResult { outcomes, best };
    reporter.report(&search);
    search
}

/// Build one candidate's immutable request and run it through the adapter.
fn evaluate_candidate<E>(
    context: &SearchContext<'_>, engine: &E, order: usize,
) -> CandidateOutcome
where
    E: InferenceEngine + ?Sized,
{
    let exposure_prior = ExposurePrior::constant(order, context.exposure_concentration);
    let signature_prior =
        SignaturePrior::uniform(order, context.counts.layout().categories());
    let request = ModelRequest::assemble(
        context.registry,
        context.family,
        ProblemKind::Extract,
        ModelInputs {
            counts: context.counts,
            signatures: None,
            extra_signatures: order,
            exposure_prior: &exposure_prior,
            signature_prior: Some(&signature_prior),
            opportunities: context.opportunities,
        },
    );
    debug!(target: "rust_signatures::search", order, "evaluating candidate");
    match BackendAdapter::new(engine).invoke(&request, &context.options) {
        Ok(result) => CandidateOutcome::Completed { result, score: None },
        Err(error) => {
            warn!(target: "rust_signatures::search", order, %error, "candidate failed");
            CandidateOutcome::Failed(error)
        }
    }
}
