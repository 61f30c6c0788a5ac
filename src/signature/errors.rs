//! Errors for catalogue/signature validation (shape checks, argument-combination
//! checks) and non-fatal configuration warnings.
//!
//! This module defines the fail-fast validation taxonomy used across the
//! estimation entry points: [`ShapeError`] for dimension and domain
//! violations detected while ingesting matrices and priors, and
//! [`UsageError`] for invalid combinations of otherwise well-formed
//! arguments. Both fail before any inference call is made.
//!
//! [`ConfigWarning`] is deliberately *not* an error: it records fallbacks
//! that change model behavior (e.g. substituting a uniform opportunity
//! matrix) but let the request proceed. Warnings are logged via `tracing`
//! at the point of origin and returned as values in the outcome bundles so
//! callers can inspect them without installing a subscriber.
//!
//! ## Conventions
//! - **Indices are 0-based** and reported as `(sample, category)` or
//!   `(signature, category)` pairs matching `ndarray` row/column order.
//! - Counts must be **finite and non-negative**; priors and opportunities
//!   must be **finite and strictly positive**.
//! - The first violation encountered is the one reported.

/// Result alias for shape/domain validation paths.
pub type ShapeResult<T> = Result<T, ShapeError>;

/// Result alias for argument-combination checks.
pub type UsageResult<T> = Result<T, UsageError>;

/// Dimension and domain violations among counts, signatures, priors, and
/// opportunities.
///
/// Every variant carries the offending location and value (or the expected
/// vs actual dimensions) so messages are actionable without re-running the
/// validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeError {
    // ---- Matrix ingestion ----
    /// A matrix has zero rows or zero columns.
    EmptyMatrix { rows: usize, columns: usize },

    /// Row-vector ingestion found a row whose length disagrees with the first.
    RaggedRows { row: usize, expected: usize, actual: usize },

    /// Category count is neither 96 nor 192 and no vocabulary was declared.
    UnsupportedCategoryCount { categories: usize },

    /// Category count disagrees with the caller-declared vocabulary size.
    VocabularyMismatch { declared: usize, actual: usize },

    // ---- Counts ----
    /// A count entry is NaN/±inf.
    NonFiniteCount { sample: usize, category: usize, value: f64 },

    /// A count entry is negative.
    NegativeCount { sample: usize, category: usize, value: f64 },

    // ---- Signatures ----
    /// Signature categories differ from the count matrix's categories.
    SignatureCategoryMismatch { expected: usize, actual: usize },

    /// A signature entry is NaN/±inf.
    NonFiniteSignature { signature: usize, category: usize, value: f64 },

    /// A signature entry is negative.
    NegativeSignature { signature: usize, category: usize, value: f64 },

    // ---- Priors ----
    /// Exposure prior length differs from the signature count.
    ExposurePriorLengthMismatch { expected: usize, actual: usize },

    /// An exposure prior weight is not finite and strictly positive.
    NonPositiveExposurePrior { index: usize, value: f64 },

    /// Signature prior dimensions differ from (signatures-to-extract, categories).
    SignaturePriorShapeMismatch { expected: (usize, usize), actual: (usize, usize) },

    /// A signature prior weight is not finite and strictly positive.
    NonPositiveSignaturePrior { row: usize, column: usize, value: f64 },

    // ---- Opportunities ----
    /// A supplied opportunity matrix's dimensions disagree with the counts.
    OpportunityShapeMismatch { expected: (usize, usize), actual: (usize, usize) },

    /// An opportunity entry is not finite and strictly positive.
    NonPositiveOpportunity { sample: usize, category: usize, value: f64 },
}

impl std::error::Error for ShapeError {}

impl std::fmt::Display for ShapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Matrix ingestion ----
            ShapeError::EmptyMatrix { rows, columns } => {
                write!(f, "Matrix must be non-empty; got {rows} x {columns}.")
            }
            ShapeError::RaggedRows { row, expected, actual } => {
                write!(
                    f,
                    "Row {row} has {actual} entries but the first row has {expected}; \
                     input must be rectangular."
                )
            }
            ShapeError::UnsupportedCategoryCount { categories } => {
                write!(
                    f,
                    "Category count must be 96 (base layout) or 192 (strand-aware layout); \
                     got {categories}. Declare a custom vocabulary to use another size."
                )
            }
            ShapeError::VocabularyMismatch { declared, actual } => {
                write!(
                    f,
                    "Declared vocabulary has {declared} categories but the matrix has {actual}."
                )
            }

            // ---- Counts ----
            ShapeError::NonFiniteCount { sample, category, value } => {
                write!(f, "Count at (sample {sample}, category {category}) is non-finite: {value}")
            }
            ShapeError::NegativeCount { sample, category, value } => {
                write!(f, "Count at (sample {sample}, category {category}) is negative: {value}")
            }

            // ---- Signatures ----
            ShapeError::SignatureCategoryMismatch { expected, actual } => {
                write!(
                    f,
                    "Signatures have {actual} categories but the catalogues have {expected}."
                )
            }
            ShapeError::NonFiniteSignature { signature, category, value } => {
                write!(
                    f,
                    "Signature entry at (signature {signature}, category {category}) is \
                     non-finite: {value}"
                )
            }
            ShapeError::NegativeSignature { signature, category, value } => {
                write!(
                    f,
                    "Signature entry at (signature {signature}, category {category}) is \
                     negative: {value}"
                )
            }

            // ---- Priors ----
            ShapeError::ExposurePriorLengthMismatch { expected, actual } => {
                write!(
                    f,
                    "Exposure prior has {actual} weights but the model has {expected} signatures."
                )
            }
            ShapeError::NonPositiveExposurePrior { index, value } => {
                write!(
                    f,
                    "Exposure prior weight at index {index} must be finite and > 0; got {value}"
                )
            }
            ShapeError::SignaturePriorShapeMismatch { expected, actual } => {
                write!(
                    f,
                    "Signature prior must be {} x {}; got {} x {}.",
                    expected.0, expected.1, actual.0, actual.1
                )
            }
            ShapeError::NonPositiveSignaturePrior { row, column, value } => {
                write!(
                    f,
                    "Signature prior weight at ({row}, {column}) must be finite and > 0; \
                     got {value}"
                )
            }

            // ---- Opportunities ----
            ShapeError::OpportunityShapeMismatch { expected, actual } => {
                write!(
                    f,
                    "Opportunity matrix must be {} x {} (or {} x 96 under the strand layout); \
                     got {} x {}.",
                    expected.0, expected.1, expected.0, actual.0, actual.1
                )
            }
            ShapeError::NonPositiveOpportunity { sample, category, value } => {
                write!(
                    f,
                    "Opportunity at (sample {sample}, category {category}) must be finite \
                     and > 0; got {value}"
                )
            }
        }
    }
}

/// Invalid combinations of otherwise well-formed arguments.
///
/// These are caller mistakes that no amount of validation downstream could
/// repair, so the entry points reject them before assembling a model request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// A custom signature prior was supplied together with a range of
    /// extraction counts; the prior's row count is ambiguous under a range.
    SignaturePriorWithRange { start: usize, end: usize },

    /// The candidate range is empty or inverted.
    EmptyOrderRange { start: usize, end: usize },

    /// Extraction was requested for zero signatures.
    ZeroSignatures,

    /// Fit-extract was requested with zero additional signatures; use `fit`
    /// when every signature is fixed.
    NoExtraSignatures,
}

impl std::error::Error for UsageError {}

impl std::fmt::Display for UsageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UsageError::SignaturePriorWithRange { start, end } => {
                write!(
                    f,
                    "A custom signature prior requires a scalar extraction count; \
                     got the range {start}..={end}."
                )
            }
            UsageError::EmptyOrderRange { start, end } => {
                write!(f, "Candidate range {start}..={end} is empty.")
            }
            UsageError::ZeroSignatures => {
                write!(f, "At least one signature must be extracted.")
            }
            UsageError::NoExtraSignatures => {
                write!(
                    f,
                    "Fit-extract requires at least one additional signature; \
                     use fit when all signatures are fixed."
                )
            }
        }
    }
}

/// Non-fatal configuration fallbacks.
///
/// A warning records that the request proceeded with a documented default
/// that materially changes model behavior. Emitted via `tracing::warn!` at
/// the point of origin and accumulated into the outcome bundles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The Poisson-family (EMu) model was requested without opportunities;
    /// a uniform opportunity matrix was substituted.
    MissingOpportunities,

    /// Opportunities were supplied for the multinomial family (NMF), which
    /// does not use them; they were ignored.
    UnusedOpportunities,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::MissingOpportunities => {
                write!(
                    f,
                    "No opportunity matrix supplied for the EMu model; falling back to a \
                     uniform opportunity matrix. This is not a neutral default: supply a \
                     matrix or a named reference to model unequal category opportunity."
                )
            }
            ConfigWarning::UnusedOpportunities => {
                write!(
                    f,
                    "An opportunity matrix was supplied but the NMF model does not use \
                     opportunities; it will be ignored."
                )
            }
        }
    }
}
