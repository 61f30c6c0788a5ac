//! core — validated catalogue, spectra, prior, and opportunity containers.
//!
//! Purpose
//! -------
//! Collect the data-layer building blocks shared by every estimation entry
//! point: category layout detection, count-catalogue and signature-spectra
//! ingestion, Dirichlet-style prior defaults and validation, and
//! opportunity-matrix resolution. Higher layers (model payload assembly,
//! the backend adapter, the order search) consume these types and can
//! assume well-formed inputs.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every matrix validated against the same [`CategoryLayout`] shares its
//!   category count; `strand` is true iff that count is 192.
//! - Counts are finite and non-negative; spectra carry no exact zeros after
//!   the pseudocount floor; priors and opportunities are finite and
//!   strictly positive.
//! - Validation happens exactly once, at construction; downstream code
//!   never re-checks and never mutates these containers.
//!
//! Downstream usage
//! ----------------
//! - The estimation layer ingests raw user input through [`CountMatrix`] /
//!   [`SignatureMatrix`], sizes priors via [`ExposurePrior`] /
//!   [`SignaturePrior`], and resolves opportunities with
//!   [`OpportunityMatrix::resolve`] before any model request is assembled.

pub mod catalogue;
pub mod layout;
pub mod opportunity;
pub mod priors;
pub mod spectra;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::catalogue::CountMatrix;
pub use self::layout::{BASE_CATEGORIES, CategoryLayout, STRANDED_CATEGORIES};
pub use self::opportunity::{OpportunityMatrix, OpportunityReference, OpportunitySpec};
pub use self::priors::{ExposurePrior, SignaturePrior};
pub use self::spectra::{PROBABILITY_FLOOR, SignatureMatrix};
