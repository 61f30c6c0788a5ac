//! Opportunity matrices — per-category, per-sample weighting for the EMu model.
//!
//! Purpose
//! -------
//! Resolve the opportunity matrix the Poisson-family (EMu) model requires,
//! in the documented order: a caller-supplied matrix (shape-checked, and
//! lifted from the base to the strand layout when needed), a named built-in
//! reference table (per-category weights repeated across samples), or a
//! uniform fallback accompanied by a warning, since uniform opportunity is
//! not a neutral default and materially changes what the model infers.
//!
//! Key behaviors
//! -------------
//! - Validate supplied matrices against the catalogue dimensions; a
//!   96-column matrix under the strand layout is halved and tiled into the
//!   two strand blocks.
//! - Synthesize reference-based matrices from the built-in genome/exome
//!   trinucleotide abundances, expanded to 96 categories (each context
//!   serves three alternate alleles) and to 192 under the strand layout.
//! - Guarantee the resolved matrix is strictly positive and exactly the
//!   catalogue shape, so the model payload never carries an unset or
//!   partially-shaped opportunity.
//!
//! Conventions
//! -----------
//! - Categories follow the conventional substitution-block order: six
//!   blocks (C>A, C>G, C>T, T>A, T>C, T>G) of 16 flanking-base contexts
//!   each, contexts ordered A/C/G/T by 5' then 3' base.
//! - Under the strand layout each 96-category block receives half of the
//!   base weight, so the two strands sum to the unstranded opportunity.

use crate::signature::{
    core::{
        catalogue::CountMatrix,
        layout::{BASE_CATEGORIES, CategoryLayout},
        validation::first_non_positive_cell,
    },
    errors::{ConfigWarning, ShapeError, ShapeResult},
};
use ndarray::{Array1, Array2, ArrayView2, s};
use tracing::warn;

/// Relative abundance of the 32 pyrimidine-centered trinucleotide contexts
/// in the human reference genome: 16 NCN contexts then 16 NTN contexts,
/// each group ordered A/C/G/T by 5' base, then A/C/G/T by 3' base.
const GENOME_TRINUCLEOTIDES: [f64; 32] = [
    // ACA    ACC     ACG     ACT     CCA     CCC     CCG     CCT
    0.0406, 0.0224, 0.0050, 0.0306, 0.0294, 0.0198, 0.0044, 0.0286,
    // GCA    GCC     GCG     GCT     TCA     TCC     TCG     TCT
    0.0258, 0.0218, 0.0042, 0.0264, 0.0342, 0.0272, 0.0040, 0.0372,
    // ATA    ATC     ATG     ATT     CTA     CTC     CTG     CTT
    0.0352, 0.0222, 0.0288, 0.0410, 0.0178, 0.0272, 0.0346, 0.0352,
    // GTA    GTC     GTG     GTT     TTA     TTC     TTG     TTT
    0.0164, 0.0176, 0.0262, 0.0260, 0.0318, 0.0320, 0.0284, 0.0548,
];

/// Relative abundance of the same 32 contexts restricted to exonic
/// sequence; CpG contexts are less depleted and GC content is higher.
const EXOME_TRINUCLEOTIDES: [f64; 32] = [
    // ACA    ACC     ACG     ACT     CCA     CCC     CCG     CCT
    0.0334, 0.0260, 0.0078, 0.0276, 0.0302, 0.0258, 0.0094, 0.0312,
    // GCA    GCC     GCG     GCT     TCA     TCC     TCG     TCT
    0.0288, 0.0280, 0.0090, 0.0302, 0.0300, 0.0302, 0.0072, 0.0322,
    // ATA    ATC     ATG     ATT     CTA     CTC     CTG     CTT
    0.0234, 0.0222, 0.0296, 0.0286, 0.0166, 0.0300, 0.0414, 0.0308,
    // GTA    GTC     GTG     GTT     TTA     TTC     TTG     TTT
    0.0148, 0.0192, 0.0288, 0.0216, 0.0198, 0.0282, 0.0248, 0.0330,
];

/// Built-in reference tables for opportunity synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpportunityReference {
    /// Whole-genome trinucleotide abundances.
    HumanGenome,
    /// Exome-restricted trinucleotide abundances.
    HumanExome,
}

impl OpportunityReference {
    /// Per-category weights over the base 96-category vocabulary.
    ///
    /// Each trinucleotide context's abundance is repeated for the three
    /// substitution blocks sharing its central base.
    pub fn category_weights(&self) -> Array1<f64> {
        let contexts = match self {
            OpportunityReference::HumanGenome => &GENOME_TRINUCLEOTIDES,
            OpportunityReference::HumanExome => &EXOME_TRINUCLEOTIDES,
        };
        let mut weights = Array1::zeros(BASE_CATEGORIES);
        for block in 0..6 {
            let offset = if block < 3 { 0 } else { 16 };
            for context in 0..16 {
                weights[block * 16 + context] = contexts[offset + context];
            }
        }
        weights
    }
}

/// Caller-facing opportunity request, resolved against the catalogues by
/// [`OpportunityMatrix::resolve`]. Absence is expressed as `None` at the
/// call site.
#[derive(Debug, Clone, PartialEq)]
pub enum OpportunitySpec {
    /// An explicit per-sample, per-category matrix.
    Matrix(Array2<f64>),
    /// One of the built-in reference tables.
    Reference(OpportunityReference),
}

/// Fully-resolved opportunity matrix: the catalogue shape, strictly positive.
#[derive(Debug, Clone, PartialEq)]
pub struct OpportunityMatrix {
    data: Array2<f64>,
}

impl OpportunityMatrix {
    /// Resolve an optional opportunity request against validated catalogues.
    ///
    /// Resolution order
    /// ----------------
    /// 1. `Some(Matrix)` — shape-checked against the catalogues; a
    ///    96-column matrix under the strand layout is halved and tiled into
    ///    both strand blocks. Any other disagreement is a shape error.
    /// 2. `Some(Reference)` — the reference's per-category weights repeated
    ///    across all samples, expanded to the strand layout when active.
    /// 3. `None` — emits [`ConfigWarning::MissingOpportunities`] (also via
    ///    `tracing::warn!`) and synthesizes the uniform table through the
    ///    same expansion path, so the model never runs with an unset
    ///    opportunity.
    ///
    /// Returns
    /// -------
    /// `ShapeResult<(OpportunityMatrix, Option<ConfigWarning>)>`
    ///   The resolved matrix plus the fallback warning when one applies.
    ///
    /// Errors
    /// ------
    /// - `ShapeError::OpportunityShapeMismatch` when a supplied matrix's
    ///   dimensions disagree with the catalogues (and cannot be lifted from
    ///   the base layout).
    /// - `ShapeError::NonPositiveOpportunity` for the first supplied entry
    ///   that is NaN, ±inf, or ≤ 0.
    pub fn resolve(
        spec: Option<&OpportunitySpec>, counts: &CountMatrix,
    ) -> ShapeResult<(OpportunityMatrix, Option<ConfigWarning>)> {
        let layout = counts.layout();
        let samples = counts.samples();
        match spec {
            Some(OpportunitySpec::Matrix(matrix)) => {
                let resolved = OpportunityMatrix::from_supplied(matrix, samples, layout)?;
                Ok((resolved, None))
            }
            Some(OpportunitySpec::Reference(reference)) => {
                let weights = reference.category_weights();
                Ok((OpportunityMatrix::from_weights(&weights, samples, layout), None))
            }
            None => {
                let warning = ConfigWarning::MissingOpportunities;
                warn!(target: "rust_signatures::opportunity", "{warning}");
                let weights = Array1::ones(BASE_CATEGORIES);
                Ok((OpportunityMatrix::from_weights(&weights, samples, layout), Some(warning)))
            }
        }
    }

    /// Number of samples (rows).
    pub fn samples(&self) -> usize {
        self.data.nrows()
    }

    /// Number of categories (columns), matching the catalogue layout.
    pub fn categories(&self) -> usize {
        self.data.ncols()
    }

    /// Borrowed view of the resolved weights.
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// Consume the resolved matrix, yielding the owned weights.
    pub fn into_values(self) -> Array2<f64> {
        self.data
    }

    fn from_supplied(
        matrix: &Array2<f64>, samples: usize, layout: CategoryLayout,
    ) -> ShapeResult<OpportunityMatrix> {
        let expected = (samples, layout.categories());
        let actual = matrix.dim();
        let lift_from_base = layout.strand() && actual == (samples, BASE_CATEGORIES);
        if actual != expected && !lift_from_base {
            return Err(ShapeError::OpportunityShapeMismatch { expected, actual });
        }
        if let Some(((sample, category), value)) = first_non_positive_cell(matrix.view()) {
            return Err(ShapeError::NonPositiveOpportunity { sample, category, value });
        }
        let data = if lift_from_base {
            let mut lifted = Array2::zeros((samples, layout.categories()));
            let halved = matrix.mapv(|v| v / 2.0);
            lifted.slice_mut(s![.., ..BASE_CATEGORIES]).assign(&halved);
            lifted.slice_mut(s![.., BASE_CATEGORIES..]).assign(&halved);
            lifted
        } else {
            matrix.clone()
        };
        Ok(OpportunityMatrix { data })
    }

    /// Repeat base-layout per-category weights across samples, halving into
    /// the two strand blocks when the strand layout is active.
    fn from_weights(
        weights: &Array1<f64>, samples: usize, layout: CategoryLayout,
    ) -> OpportunityMatrix {
        let categories = layout.categories();
        let mut row = Array1::zeros(categories);
        if layout.strand() {
            let halved = weights.mapv(|v| v / 2.0);
            row.slice_mut(s![..BASE_CATEGORIES]).assign(&halved);
            row.slice_mut(s![BASE_CATEGORIES..]).assign(&halved);
        } else {
            row.assign(weights);
        }
        let mut data = Array2::zeros((samples, categories));
        for mut sample in data.rows_mut() {
            sample.assign(&row);
        }
        OpportunityMatrix { data }
    }
}
