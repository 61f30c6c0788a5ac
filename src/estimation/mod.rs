//! estimation — the public fit / extract / fit-extract entry points.
//!
//! Purpose
//! -------
//! Compose the layers below in the documented order: matrix validation,
//! prior construction, opportunity resolution, model-variant selection,
//! and the backend adapter — iterated by the model-order search when a
//! range of candidate signature counts is requested. All cross-cutting
//! rules are enforced here: fail-fast usage checks before any engine call,
//! warning accumulation into the outcome bundles, and the split between
//! single-request failure propagation and per-candidate degradation.
//!
//! Key behaviors
//! -------------
//! - [`Estimator`] borrows the explicit [`ModelRegistry`] value and the
//!   engine; collaborators (scorer, reporter) default to
//!   [`CosineReconstruction`] and [`LogReporter`] and can be swapped.
//! - `fit` needs known signatures and returns one result; `extract` takes
//!   a scalar count or a range ([`SignatureCounts`]); `fit_extract` fixes
//!   some signatures and infers a scalar number of additional ones.
//! - Every entity is created fresh per call, fully validated before any
//!   inference invocation, and discarded after the outcome is returned;
//!   nothing is cached across calls.
//!
//! Invariants & assumptions
//! ------------------------
//! - A custom signature prior is only legal for scalar extraction counts;
//!   ranges rebuild the uniform prior per candidate.
//! - Extraction-type requests reach the engine with exactly one sampling
//!   chain (enforced by the adapter); fitting honors the caller's count.
//! - Reproducibility under a fixed seed is the engine's contract; this
//!   layer passes the seed through untouched and holds no mutable state.

pub mod errors;

use crate::{
    inference::{
        adapter::BackendAdapter,
        engine::{InferenceEngine, InferenceResult},
        strategy::StrategyOptions,
    },
    model::{
        family::{ModelFamily, ProblemKind},
        payload::{ModelInputs, ModelRequest, reconcile_opportunities},
        registry::ModelRegistry,
    },
    search::{
        gof::{CosineReconstruction, FitScorer, LogReporter, SearchReporter},
        order::{OrderRange, OrderSearchResult, SearchContext, run_order_search},
    },
    signature::{
        core::{
            catalogue::CountMatrix,
            opportunity::OpportunitySpec,
            priors::{ExposurePrior, SignaturePrior},
            spectra::SignatureMatrix,
        },
        errors::{ConfigWarning, ShapeError, UsageError},
    },
};
use ndarray::{Array1, Array2};

pub use self::errors::{EstimateError, EstimateResult};

static DEFAULT_SCORER: CosineReconstruction = CosineReconstruction;
static DEFAULT_REPORTER: LogReporter = LogReporter;

/// Requested number of signatures to extract: one count, or an inclusive
/// range searched for the best-fitting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureCounts {
    /// Extract exactly this many signatures.
    Scalar(usize),
    /// Search the inclusive range of candidate counts.
    Range {
        /// Smallest candidate count.
        start: usize,
        /// Largest candidate count.
        end: usize,
    },
}

/// Configuration for [`Estimator::fit`].
#[derive(Debug, Clone, PartialEq)]
pub struct FitConfig {
    /// Statistical family.
    pub family: ModelFamily,
    /// Optional opportunity request (EMu family).
    pub opportunities: Option<OpportunitySpec>,
    /// Exposure prior; `None` means uniform over the fixed signatures.
    pub exposure_prior: Option<Array1<f64>>,
    /// Caller-declared vocabulary size for non-standard category sets.
    pub vocabulary: Option<usize>,
    /// Strategy and its options.
    pub options: StrategyOptions,
}

impl Default for FitConfig {
    fn default() -> FitConfig {
        FitConfig {
            family: ModelFamily::Nmf,
            opportunities: None,
            exposure_prior: None,
            vocabulary: None,
            options: StrategyOptions::default(),
        }
    }
}

/// Configuration for [`Estimator::extract`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractConfig {
    /// Statistical family.
    pub family: ModelFamily,
    /// Optional opportunity request (EMu family).
    pub opportunities: Option<OpportunitySpec>,
    /// Signature prior; only legal for scalar counts. `None` means uniform.
    pub signature_prior: Option<Array2<f64>>,
    /// Exposure concentration replicated per extracted signature.
    pub exposure_concentration: f64,
    /// Caller-declared vocabulary size for non-standard category sets.
    pub vocabulary: Option<usize>,
    /// Strategy and its options.
    pub options: StrategyOptions,
    /// Worker limit for range searches; 0 and 1 both mean sequential.
    pub workers: usize,
}

impl Default for ExtractConfig {
    fn default() -> ExtractConfig {
        ExtractConfig {
            family: ModelFamily::Nmf,
            opportunities: None,
            signature_prior: None,
            exposure_concentration: 1.0,
            vocabulary: None,
            options: StrategyOptions::default(),
            workers: 1,
        }
    }
}

/// Configuration for [`Estimator::fit_extract`].
#[derive(Debug, Clone, PartialEq)]
pub struct FitExtractConfig {
    /// Statistical family.
    pub family: ModelFamily,
    /// Optional opportunity request (EMu family).
    pub opportunities: Option<OpportunitySpec>,
    /// Prior over the additional signatures; `None` means uniform.
    pub signature_prior: Option<Array2<f64>>,
    /// Exposure prior over fixed + additional signatures; `None` means
    /// uniform.
    pub exposure_prior: Option<Array1<f64>>,
    /// Caller-declared vocabulary size for non-standard category sets.
    pub vocabulary: Option<usize>,
    /// Strategy and its options.
    pub options: StrategyOptions,
}

impl Default for FitExtractConfig {
    fn default() -> FitExtractConfig {
        FitExtractConfig {
            family: ModelFamily::Nmf,
            opportunities: None,
            signature_prior: None,
            exposure_prior: None,
            vocabulary: None,
            options: StrategyOptions::default(),
        }
    }
}

/// Outcome of a single-result request (`fit` and `fit_extract`).
#[derive(Debug, Clone, PartialEq)]
pub struct FitOutcome {
    /// The engine's reported result.
    pub result: InferenceResult,
    /// Configuration fallbacks applied along the way.
    pub warnings: Vec<ConfigWarning>,
}

/// The extraction result: one result for a scalar count, a keyed search
/// for a range.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractResult {
    /// Scalar count: exactly one result.
    Single(InferenceResult),
    /// Range: one outcome per candidate plus the selection.
    Search(OrderSearchResult),
}

/// Outcome of an extraction request.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOutcome {
    /// Single result or keyed search, per the requested counts.
    pub result: ExtractResult,
    /// Configuration fallbacks applied along the way.
    pub warnings: Vec<ConfigWarning>,
}

/// The orchestrator: borrows the registry, the engine, and the search
/// collaborators, and exposes the three entry points.
pub struct Estimator<'a, E: InferenceEngine + ?Sized> {
    registry: &'a ModelRegistry,
    engine: &'a E,
    scorer: &'a dyn FitScorer,
    reporter: &'a dyn SearchReporter,
}

impl<'a, E: InferenceEngine + ?Sized> Estimator<'a, E> {
    /// Estimator with the default collaborators: cosine reconstruction
    /// scoring and the logging reporter.
    pub fn new(registry: &'a ModelRegistry, engine: &'a E) -> Estimator<'a, E> {
        Estimator { registry, engine, scorer: &DEFAULT_SCORER, reporter: &DEFAULT_REPORTER }
    }

    /// Estimator with caller-supplied search collaborators.
    pub fn with_collaborators(
        registry: &'a ModelRegistry, engine: &'a E, scorer: &'a dyn FitScorer,
        reporter: &'a dyn SearchReporter,
    ) -> Estimator<'a, E> {
        Estimator { registry, engine, scorer, reporter }
    }

    /// Fit known signatures to catalogues: exposures inferred, signatures
    /// fixed.
    ///
    /// Behavior
    /// --------
    /// 1. Validate the counts (layout detection) and the signatures
    ///    (category agreement, pseudocount floor).
    /// 2. Build or validate the exposure prior over the fixed signatures.
    /// 3. Reconcile opportunities with the family (resolve under EMu,
    ///    ignore-with-warning under NMF).
    /// 4. Assemble the fit payload and invoke the engine once.
    ///
    /// Errors
    /// ------
    /// - `EstimateError::Shape` for any validation failure, before the
    ///   engine is called.
    /// - `EstimateError::Backend` for an engine failure, propagated
    ///   directly.
    pub fn fit(
        &self, counts: Array2<f64>, signatures: Array2<f64>, config: &FitConfig,
    ) -> EstimateResult<FitOutcome> {
        let counts = validate_counts(counts, config.vocabulary)?;
        let signatures = SignatureMatrix::new(signatures, &counts)?;
        let exposure_prior = match &config.exposure_prior {
            Some(weights) => ExposurePrior::new(weights.clone(), signatures.count())?,
            None => ExposurePrior::uniform(signatures.count()),
        };
        let (opportunities, warnings) =
            reconcile_opportunities(config.family, config.opportunities.as_ref(), &counts)?;
        let request = ModelRequest::assemble(
            self.registry,
            config.family,
            ProblemKind::Fit,
            ModelInputs {
                counts: &counts,
                signatures: Some(&signatures),
                extra_signatures: 0,
                exposure_prior: &exposure_prior,
                signature_prior: None,
                opportunities: opportunities.as_ref(),
            },
        );
        let result = BackendAdapter::new(self.engine).invoke(&request, &config.options)?;
        Ok(FitOutcome { result, warnings })
    }

    /// Extract signatures and exposures jointly, for one count or a range.
    ///
    /// Behavior
    /// --------
    /// - Scalar count: validate, assemble one extraction payload, invoke
    ///   the engine once; a backend failure propagates directly.
    /// - Range: reject custom signature priors (per-count shape is
    ///   ambiguous), then run the model-order search — one result per
    ///   candidate, per-candidate failures recorded, best order selected
    ///   by the goodness-of-fit collaborator.
    ///
    /// Errors
    /// ------
    /// - `EstimateError::Usage` for a zero count, an empty range, or a
    ///   custom signature prior under a range.
    /// - `EstimateError::Shape` for validation failures.
    /// - `EstimateError::Backend` only for a scalar request's engine
    ///   failure; range candidates degrade per candidate instead.
    pub fn extract(
        &self, counts: Array2<f64>, signature_counts: SignatureCounts, config: &ExtractConfig,
    ) -> EstimateResult<ExtractOutcome> {
        let counts = validate_counts(counts, config.vocabulary)?;
        validate_concentration(config.exposure_concentration)?;
        match signature_counts {
            SignatureCounts::Scalar(extracted) => {
                if extracted == 0 {
                    return Err(UsageError::ZeroSignatures.into());
                }
                let categories = counts.layout().categories();
                let signature_prior = match &config.signature_prior {
                    Some(weights) => {
                        SignaturePrior::new(weights.clone(), extracted, categories)?
                    }
                    None => SignaturePrior::uniform(extracted, categories),
                };
                let exposure_prior =
                    ExposurePrior::constant(extracted, config.exposure_concentration);
                let (opportunities, warnings) = reconcile_opportunities(
                    config.family,
                    config.opportunities.as_ref(),
                    &counts,
                )?;
                let request = ModelRequest::assemble(
                    self.registry,
                    config.family,
                    ProblemKind::Extract,
                    ModelInputs {
                        counts: &counts,
                        signatures: None,
                        extra_signatures: extracted,
                        exposure_prior: &exposure_prior,
                        signature_prior: Some(&signature_prior),
                        opportunities: opportunities.as_ref(),
                    },
                );
                let result =
                    BackendAdapter::new(self.engine).invoke(&request, &config.options)?;
                Ok(ExtractOutcome { result: ExtractResult::Single(result), warnings })
            }
            SignatureCounts::Range { start, end } => {
                if config.signature_prior.is_some() {
                    return Err(UsageError::SignaturePriorWithRange { start, end }.into());
                }
                let range = OrderRange::new(start, end)?;
                let (opportunities, warnings) = reconcile_opportunities(
                    config.family,
                    config.opportunities.as_ref(),
                    &counts,
                )?;
                let search = run_order_search(
                    SearchContext {
                        registry: self.registry,
                        family: config.family,
                        counts: &counts,
                        opportunities: opportunities.as_ref(),
                        exposure_concentration: config.exposure_concentration,
                        range,
                        options: config.options,
                        workers: config.workers,
                    },
                    self.engine,
                    self.scorer,
                    self.reporter,
                );
                Ok(ExtractOutcome { result: ExtractResult::Search(search), warnings })
            }
        }
    }

    /// Fit fixed signatures and extract a scalar number of additional ones
    /// alongside.
    ///
    /// Errors
    /// ------
    /// - `EstimateError::Usage` when `extra_signatures == 0`.
    /// - `EstimateError::Shape` for validation failures (the exposure prior
    ///   covers fixed + additional signatures; the signature prior covers
    ///   the additional ones only).
    /// - `EstimateError::Backend` for an engine failure, propagated
    ///   directly.
    pub fn fit_extract(
        &self, counts: Array2<f64>, fixed_signatures: Array2<f64>, extra_signatures: usize,
        config: &FitExtractConfig,
    ) -> EstimateResult<FitOutcome> {
        if extra_signatures == 0 {
            return Err(UsageError::NoExtraSignatures.into());
        }
        let counts = validate_counts(counts, config.vocabulary)?;
        let fixed = SignatureMatrix::new(fixed_signatures, &counts)?;
        let total = fixed.count() + extra_signatures;
        let categories = counts.layout().categories();
        let exposure_prior = match &config.exposure_prior {
            Some(weights) => ExposurePrior::new(weights.clone(), total)?,
            None => ExposurePrior::uniform(total),
        };
        let signature_prior = match &config.signature_prior {
            Some(weights) => SignaturePrior::new(weights.clone(), extra_signatures, categories)?,
            None => SignaturePrior::uniform(extra_signatures, categories),
        };
        let (opportunities, warnings) =
            reconcile_opportunities(config.family, config.opportunities.as_ref(), &counts)?;
        let request = ModelRequest::assemble(
            self.registry,
            config.family,
            ProblemKind::FitExtract,
            ModelInputs {
                counts: &counts,
                signatures: Some(&fixed),
                extra_signatures,
                exposure_prior: &exposure_prior,
                signature_prior: Some(&signature_prior),
                opportunities: opportunities.as_ref(),
            },
        );
        let result = BackendAdapter::new(self.engine).invoke(&request, &config.options)?;
        Ok(FitOutcome { result, warnings })
    }
}

fn validate_counts(counts: Array2<f64>, vocabulary: Option<usize>) -> EstimateResult<CountMatrix> {
    let validated = match vocabulary {
        Some(declared) => CountMatrix::with_vocabulary(counts, declared)?,
        None => CountMatrix::new(counts)?,
    };
    Ok(validated)
}

fn validate_concentration(concentration: f64) -> EstimateResult<()> {
    if !concentration.is_finite() || concentration <= 0.0 {
        return Err(
            ShapeError::NonPositiveExposurePrior { index: 0, value: concentration }.into()
        );
    }
    Ok(())
}
