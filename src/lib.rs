//! rust_signatures — mutational signature fitting and extraction on top of
//! pluggable Bayesian inference backends.
//!
//! Purpose
//! -------
//! Estimate the latent mixture structure underlying catalogues of
//! categorical counts: a small set of signature spectra and, per catalogue,
//! the non-negative exposures mixing them. Three problems are supported —
//! fitting known signatures, extracting signatures and exposures jointly
//! (for one count or a searched range of candidate counts), and fitting
//! fixed signatures while extracting additional ones alongside.
//!
//! Key behaviors
//! -------------
//! - Validate and coerce raw count/signature matrices into canonical form,
//!   detecting the strand-aware 192-category layout ([`signature`]).
//! - Build default Dirichlet-style priors and resolve the per-sample
//!   opportunity weighting the Poisson-family model needs, with documented
//!   warned fallbacks.
//! - Select one of six precompiled model specifications (family × problem)
//!   from an explicit registry and assemble exactly the payload it
//!   requires ([`model`]).
//! - Invoke the external inference engine uniformly across the sampling,
//!   optimizing, and variational strategies, pinning extraction-type
//!   problems to a single chain and filtering nuisance parameters
//!   ([`inference`]).
//! - Search a range of candidate signature counts, tolerate per-candidate
//!   failures, and select the best order by reconstruction goodness-of-fit
//!   ([`search`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - The inference engine is an opaque external capability behind the
//!   [`InferenceEngine`] trait; this crate owns no sampler/optimizer
//!   numerics, no plotting, and no persistence.
//! - Every entity is created fresh per call, validated before any engine
//!   invocation, and discarded with the returned outcome; there is no
//!   cross-call state.
//!
//! Downstream usage
//! ----------------
//! - Construct a [`ModelRegistry`] once, implement [`InferenceEngine`] (or
//!   wrap an existing backend), and call the entry points on
//!   [`Estimator`]:
//!
//! ```no_run
//! use rust_signatures::{Estimator, FitConfig, ModelRegistry};
//! # use rust_signatures::{EngineOutput, InferenceEngine, StrategyOptions};
//! # use rust_signatures::model::ModelRequest;
//! # use rust_signatures::inference::BackendResult;
//! # struct MyEngine;
//! # impl InferenceEngine for MyEngine {
//! #     fn run(&self, _: &ModelRequest<'_>, _: &StrategyOptions) -> BackendResult<EngineOutput> {
//! #         unimplemented!()
//! #     }
//! # }
//! # fn load_counts() -> ndarray::Array2<f64> { unimplemented!() }
//! # fn load_signatures() -> ndarray::Array2<f64> { unimplemented!() }
//!
//! let registry = ModelRegistry::new();
//! let engine = MyEngine;
//! let estimator = Estimator::new(&registry, &engine);
//! let outcome = estimator.fit(load_counts(), load_signatures(), &FitConfig::default())?;
//! println!("exposures: {:?}", outcome.result.parameter_mean("exposures"));
//! # Ok::<(), rust_signatures::EstimateError>(())
//! ```

pub mod estimation;
pub mod inference;
pub mod model;
pub mod search;
pub mod signature;

// ---- Re-exports (primary public surface) ----------------------------------

pub use crate::estimation::{
    EstimateError, EstimateResult, Estimator, ExtractConfig, ExtractOutcome, ExtractResult,
    FitConfig, FitExtractConfig, FitOutcome, SignatureCounts,
};
pub use crate::inference::{
    EngineOutput, InferenceEngine, InferenceResult, OptimizingOptions, SamplingOptions, Strategy,
    StrategyOptions, VariationalOptions,
};
pub use crate::model::{ModelFamily, ModelRegistry, ProblemKind};
pub use crate::search::{CosineReconstruction, FitScorer, OrderSearchResult, SearchReporter};
pub use crate::signature::{
    ConfigWarning, CountMatrix, OpportunityReference, OpportunitySpec, ShapeError, SignatureMatrix,
    UsageError,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_signatures::prelude::*;
//
// to import the main estimation surface in a single line.

pub mod prelude {
    pub use crate::estimation::{
        EstimateError, EstimateResult, Estimator, ExtractConfig, ExtractOutcome, ExtractResult,
        FitConfig, FitExtractConfig, FitOutcome, SignatureCounts,
    };
    pub use crate::inference::{
        EngineOutput, InferenceEngine, InferenceResult, SamplingOptions, Strategy,
        StrategyOptions,
    };
    pub use crate::model::{ModelFamily, ModelRegistry, ProblemKind};
    pub use crate::search::{CosineReconstruction, FitScorer, OrderSearchResult};
    pub use crate::signature::{ConfigWarning, OpportunityReference, OpportunitySpec};
}
