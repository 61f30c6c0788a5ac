//! signature — the domain data layer for catalogues, spectra, and priors.
//!
//! Everything raw user input must pass through before a model request can
//! be assembled lives here: shape/domain validation ([`core`]) and the
//! structured errors and warnings that validation produces ([`errors`]).

pub mod core;
pub mod errors;

pub use self::core::{
    BASE_CATEGORIES, CategoryLayout, CountMatrix, ExposurePrior, OpportunityMatrix,
    OpportunityReference, OpportunitySpec, PROBABILITY_FLOOR, STRANDED_CATEGORIES,
    SignatureMatrix, SignaturePrior,
};
pub use self::errors::{ConfigWarning, ShapeError, ShapeResult, UsageError, UsageResult};
