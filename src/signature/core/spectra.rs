//! Signature spectra — validated signatures × categories matrices.
//!
//! Purpose
//! -------
//! Ingest fixed signature spectra for the fit and fit-extract problems:
//! enforce category agreement with the catalogues and replace exact zeros
//! with a small pseudocount floor, since a category with probability exactly
//! zero makes any catalogue observing that category impossible under the
//! downstream likelihoods.
//!
//! Conventions
//! -----------
//! - Rows are signatures, columns are categories in the catalogue order.
//! - Rows are treated as unnormalized spectra; the inference engine owns any
//!   normalization, so flooring does not renormalize the row.

use crate::signature::{
    core::{catalogue::CountMatrix, layout::CategoryLayout},
    errors::{ShapeError, ShapeResult},
};
use ndarray::{Array2, ArrayView2};

/// Pseudocount floor applied to exact-zero signature entries on ingestion.
pub const PROBABILITY_FLOOR: f64 = 1e-9;

/// Validated signatures × categories spectra with no exact zeros.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureMatrix {
    data: Array2<f64>,
    layout: CategoryLayout,
}

impl SignatureMatrix {
    /// Validate signature spectra against the catalogues' layout.
    ///
    /// Parameters
    /// ----------
    /// - `data`: `Array2<f64>`
    ///   Signatures × categories spectra. Must be non-empty, finite, and
    ///   non-negative; exact zeros are raised to [`PROBABILITY_FLOOR`].
    /// - `counts`: `&CountMatrix`
    ///   The validated catalogues whose category count the spectra must
    ///   match.
    ///
    /// Returns
    /// -------
    /// `ShapeResult<SignatureMatrix>`
    ///   - `Ok(signatures)` with the floor applied.
    ///   - `Err(ShapeError)` naming the first violation.
    ///
    /// Errors
    /// ------
    /// - `ShapeError::EmptyMatrix` if either dimension is zero.
    /// - `ShapeError::SignatureCategoryMismatch` when the column count
    ///   differs from the catalogues'.
    /// - `ShapeError::NonFiniteSignature` / `ShapeError::NegativeSignature`
    ///   for the first offending entry.
    pub fn new(data: Array2<f64>, counts: &CountMatrix) -> ShapeResult<SignatureMatrix> {
        let (signatures, categories) = data.dim();
        if signatures == 0 || categories == 0 {
            return Err(ShapeError::EmptyMatrix { rows: signatures, columns: categories });
        }
        let layout = counts.layout();
        if categories != layout.categories() {
            return Err(ShapeError::SignatureCategoryMismatch {
                expected: layout.categories(),
                actual: categories,
            });
        }
        let mut data = data;
        for ((signature, category), value) in data.indexed_iter_mut() {
            if !value.is_finite() {
                return Err(ShapeError::NonFiniteSignature {
                    signature,
                    category,
                    value: *value,
                });
            }
            if *value < 0.0 {
                return Err(ShapeError::NegativeSignature { signature, category, value: *value });
            }
            if *value == 0.0 {
                *value = PROBABILITY_FLOOR;
            }
        }
        Ok(SignatureMatrix { data, layout })
    }

    /// Coerce a vector of row vectors into validated spectra.
    ///
    /// Ragged input is rejected with `ShapeError::RaggedRows`; everything
    /// else matches [`SignatureMatrix::new`].
    pub fn from_rows(rows: Vec<Vec<f64>>, counts: &CountMatrix) -> ShapeResult<SignatureMatrix> {
        let signatures = rows.len();
        let categories = rows.first().map(Vec::len).unwrap_or(0);
        if signatures == 0 || categories == 0 {
            return Err(ShapeError::EmptyMatrix { rows: signatures, columns: categories });
        }
        let mut flat = Vec::with_capacity(signatures * categories);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != categories {
                return Err(ShapeError::RaggedRows {
                    row,
                    expected: categories,
                    actual: values.len(),
                });
            }
            flat.extend_from_slice(values);
        }
        let data = Array2::from_shape_vec((signatures, categories), flat)
            .expect("row-major buffer length matches signatures * categories");
        SignatureMatrix::new(data, counts)
    }

    /// Number of signatures (rows).
    pub fn count(&self) -> usize {
        self.data.nrows()
    }

    /// Category layout inherited from the catalogues.
    pub fn layout(&self) -> CategoryLayout {
        self.layout
    }

    /// Borrowed view of the floored spectra.
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover spectra ingestion: category agreement with the
    // catalogues, the pseudocount floor, and entry-domain violations.
    // -------------------------------------------------------------------------

    fn counts_96() -> CountMatrix {
        CountMatrix::new(Array2::from_elem((3, 96), 2.0)).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Spectra matching the catalogue categories are accepted and exact zeros
    // are raised to the pseudocount floor.
    //
    // Given
    // -----
    // - A 2 x 96 spectra matrix with a zero at (0, 10).
    //
    // Expect
    // ------
    // - `Ok`; the entry at (0, 10) equals `PROBABILITY_FLOOR`; a non-zero
    //   entry is untouched.
    fn new_with_exact_zero_applies_pseudocount_floor() {
        // Arrange
        let counts = counts_96();
        let mut raw = Array2::from_elem((2, 96), 0.01);
        raw[(0, 10)] = 0.0;

        // Act
        let signatures = SignatureMatrix::new(raw, &counts).unwrap();

        // Assert
        assert_eq!(signatures.count(), 2);
        assert_eq!(signatures.values()[(0, 10)], PROBABILITY_FLOOR);
        assert_eq!(signatures.values()[(0, 11)], 0.01);
    }

    #[test]
    // Purpose
    // -------
    // Spectra whose category count differs from the catalogues' are rejected.
    //
    // Given
    // -----
    // - 96-category catalogues, 192-category spectra.
    //
    // Expect
    // ------
    // - `Err(ShapeError::SignatureCategoryMismatch { expected: 96, actual: 192 })`.
    fn new_with_mismatched_categories_returns_signature_category_mismatch() {
        // Arrange
        let counts = counts_96();
        let raw = Array2::from_elem((2, 192), 0.01);

        // Act
        let result = SignatureMatrix::new(raw, &counts);

        // Assert
        assert!(matches!(
            result,
            Err(ShapeError::SignatureCategoryMismatch { expected: 96, actual: 192 })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Non-finite and negative entries are rejected with their location.
    //
    // Expect
    // ------
    // - `NonFiniteSignature` and `NegativeSignature` respectively, before
    //   any flooring is applied.
    fn new_with_invalid_entries_reports_first_offender() {
        // Arrange
        let counts = counts_96();
        let mut with_inf = Array2::from_elem((1, 96), 0.01);
        with_inf[(0, 7)] = f64::INFINITY;
        let mut with_negative = Array2::from_elem((1, 96), 0.01);
        with_negative[(0, 2)] = -0.5;

        // Act & Assert
        assert!(matches!(
            SignatureMatrix::new(with_inf, &counts),
            Err(ShapeError::NonFiniteSignature { signature: 0, category: 7, .. })
        ));
        assert!(matches!(
            SignatureMatrix::new(with_negative, &counts),
            Err(ShapeError::NegativeSignature { signature: 0, category: 2, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Row-vector ingestion rejects ragged spectra.
    //
    // Expect
    // ------
    // - `Err(ShapeError::RaggedRows { row: 1, .. })`.
    fn from_rows_with_ragged_input_returns_ragged_rows() {
        // Arrange
        let counts = counts_96();
        let rows = vec![vec![0.01; 96], vec![0.01; 90]];

        // Act
        let result = SignatureMatrix::from_rows(rows, &counts);

        // Assert
        assert!(matches!(result, Err(ShapeError::RaggedRows { row: 1, .. })));
    }
}
