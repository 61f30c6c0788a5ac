//! Count catalogues — validated samples × categories count matrices.
//!
//! Purpose
//! -------
//! Coerce raw user-supplied count data into the canonical rectangular form
//! the model payloads require, and fail fast on anything downstream code
//! would otherwise have to defend against: empty input, ragged rows,
//! non-finite or negative entries, and inadmissible category counts.
//!
//! Key behaviors
//! -------------
//! - Ingest an owned `ndarray::Array2<f64>` ([`CountMatrix::new`]) or a
//!   vector of row vectors ([`CountMatrix::from_rows`], which rejects ragged
//!   input with a structured error rather than panicking).
//! - Detect the [`CategoryLayout`] from the column count, honoring an
//!   optional caller-declared vocabulary size.
//! - Report the first offending entry as a `(sample, category, value)`
//!   triple.
//!
//! Conventions
//! -----------
//! - Rows are independent observation units (catalogues); columns follow a
//!   fixed, ordered category vocabulary.
//! - Counts are carried as `f64`. Integrality is not enforced: downstream
//!   models treat the values as observed event masses, and fractional input
//!   (e.g. pre-normalized catalogues) is accepted as-is.

use crate::signature::{
    core::layout::CategoryLayout,
    errors::{ShapeError, ShapeResult},
};
use ndarray::{Array2, ArrayView2};

/// Validated samples × categories count matrix.
///
/// Construction performs all domain checks; once built, every entry is
/// finite and non-negative and the layout is admissible. The matrix is
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CountMatrix {
    data: Array2<f64>,
    layout: CategoryLayout,
}

impl CountMatrix {
    /// Validate an owned matrix against the standard vocabularies (96/192).
    ///
    /// Parameters
    /// ----------
    /// - `data`: `Array2<f64>`
    ///   Samples × categories counts. Must be non-empty, finite, and
    ///   non-negative.
    ///
    /// Returns
    /// -------
    /// `ShapeResult<CountMatrix>`
    ///   - `Ok(matrix)` carrying the detected [`CategoryLayout`].
    ///   - `Err(ShapeError)` naming the first violation.
    ///
    /// Errors
    /// ------
    /// - `ShapeError::EmptyMatrix` if either dimension is zero.
    /// - `ShapeError::UnsupportedCategoryCount` if the column count is
    ///   neither 96 nor 192.
    /// - `ShapeError::NonFiniteCount` / `ShapeError::NegativeCount` for the
    ///   first offending entry.
    pub fn new(data: Array2<f64>) -> ShapeResult<CountMatrix> {
        CountMatrix::with_layout(data, None)
    }

    /// Validate an owned matrix against a caller-declared vocabulary size.
    ///
    /// Identical to [`CountMatrix::new`] except that the column count must
    /// equal `vocabulary` exactly, which admits non-standard category sets.
    pub fn with_vocabulary(data: Array2<f64>, vocabulary: usize) -> ShapeResult<CountMatrix> {
        CountMatrix::with_layout(data, Some(vocabulary))
    }

    /// Coerce a vector of row vectors into a validated matrix.
    ///
    /// Parameters
    /// ----------
    /// - `rows`: `Vec<Vec<f64>>`
    ///   One inner vector per catalogue. All rows must share the first
    ///   row's length.
    /// - `vocabulary`: `Option<usize>`
    ///   Optional caller-declared vocabulary size, as in
    ///   [`CountMatrix::with_vocabulary`].
    ///
    /// Errors
    /// ------
    /// - `ShapeError::EmptyMatrix` if there are no rows or the first row is
    ///   empty.
    /// - `ShapeError::RaggedRows` naming the first row whose length differs
    ///   from the first row's.
    /// - Everything [`CountMatrix::new`] reports.
    pub fn from_rows(rows: Vec<Vec<f64>>, vocabulary: Option<usize>) -> ShapeResult<CountMatrix> {
        let data = rows_to_matrix(rows)?;
        CountMatrix::with_layout(data, vocabulary)
    }

    fn with_layout(data: Array2<f64>, vocabulary: Option<usize>) -> ShapeResult<CountMatrix> {
        let (samples, categories) = data.dim();
        if samples == 0 || categories == 0 {
            return Err(ShapeError::EmptyMatrix { rows: samples, columns: categories });
        }
        let layout = CategoryLayout::detect(categories, vocabulary)?;
        for ((sample, category), &value) in data.indexed_iter() {
            if !value.is_finite() {
                return Err(ShapeError::NonFiniteCount { sample, category, value });
            }
            if value < 0.0 {
                return Err(ShapeError::NegativeCount { sample, category, value });
            }
        }
        Ok(CountMatrix { data, layout })
    }

    /// Number of catalogues (rows).
    pub fn samples(&self) -> usize {
        self.data.nrows()
    }

    /// Category layout shared by every matrix in the same call.
    pub fn layout(&self) -> CategoryLayout {
        self.layout
    }

    /// Borrowed view of the validated counts.
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }
}

/// Stack row vectors into an `Array2`, rejecting ragged input.
fn rows_to_matrix(rows: Vec<Vec<f64>>) -> ShapeResult<Array2<f64>> {
    let samples = rows.len();
    let categories = rows.first().map(Vec::len).unwrap_or(0);
    if samples == 0 || categories == 0 {
        return Err(ShapeError::EmptyMatrix { rows: samples, columns: categories });
    }
    let mut flat = Vec::with_capacity(samples * categories);
    for (row, values) in rows.iter().enumerate() {
        if values.len() != categories {
            return Err(ShapeError::RaggedRows { row, expected: categories, actual: values.len() });
        }
        flat.extend_from_slice(values);
    }
    // Shape is consistent by construction above.
    Ok(Array2::from_shape_vec((samples, categories), flat)
        .expect("row-major buffer length matches samples * categories"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover count-matrix ingestion: layout detection via the
    // column count, domain checks on entries, ragged-row coercion failures,
    // and the declared-vocabulary path. Layout detection internals are
    // covered by the layout module's own tests.
    // -------------------------------------------------------------------------

    fn uniform_counts(samples: usize, categories: usize) -> Array2<f64> {
        Array2::from_elem((samples, categories), 3.0)
    }

    #[test]
    // Purpose
    // -------
    // A well-formed 96-category matrix is accepted and detects the base
    // layout.
    //
    // Expect
    // ------
    // - `Ok`, `samples() == 4`, `layout().strand() == false`.
    fn new_with_96_categories_returns_base_layout_matrix() {
        // Act
        let counts = CountMatrix::new(uniform_counts(4, 96)).unwrap();

        // Assert
        assert_eq!(counts.samples(), 4);
        assert_eq!(counts.layout().categories(), 96);
        assert!(!counts.layout().strand());
    }

    #[test]
    // Purpose
    // -------
    // A 192-category matrix detects the strand-aware layout.
    //
    // Expect
    // ------
    // - `layout().strand() == true`.
    fn new_with_192_categories_returns_strand_layout_matrix() {
        // Act
        let counts = CountMatrix::new(uniform_counts(2, 192)).unwrap();

        // Assert
        assert!(counts.layout().strand());
    }

    #[test]
    // Purpose
    // -------
    // A column count outside {96, 192} without a declared vocabulary is a
    // shape error.
    //
    // Expect
    // ------
    // - `Err(ShapeError::UnsupportedCategoryCount { categories: 100 })`.
    fn new_with_nonstandard_categories_returns_unsupported_category_count() {
        // Act
        let result = CountMatrix::new(uniform_counts(2, 100));

        // Assert
        assert!(matches!(
            result,
            Err(ShapeError::UnsupportedCategoryCount { categories: 100 })
        ));
    }

    #[test]
    // Purpose
    // -------
    // A declared vocabulary admits a non-standard column count.
    //
    // Expect
    // ------
    // - `Ok` with `layout().categories() == 100`.
    fn with_vocabulary_admits_nonstandard_category_counts() {
        // Act
        let counts = CountMatrix::with_vocabulary(uniform_counts(2, 100), 100).unwrap();

        // Assert
        assert_eq!(counts.layout().categories(), 100);
    }

    #[test]
    // Purpose
    // -------
    // The first non-finite or negative entry is reported with its location.
    //
    // Given
    // -----
    // - A NaN at (1, 5) in one matrix and -2.0 at (0, 3) in another.
    //
    // Expect
    // ------
    // - `NonFiniteCount { sample: 1, category: 5, .. }` and
    //   `NegativeCount { sample: 0, category: 3, .. }` respectively.
    fn new_with_invalid_entries_reports_first_offender() {
        // Arrange
        let mut with_nan = uniform_counts(2, 96);
        with_nan[(1, 5)] = f64::NAN;
        let mut with_negative = uniform_counts(2, 96);
        with_negative[(0, 3)] = -2.0;

        // Act & Assert
        match CountMatrix::new(with_nan) {
            Err(ShapeError::NonFiniteCount { sample, category, value }) => {
                assert_eq!((sample, category), (1, 5));
                assert!(value.is_nan());
            }
            other => panic!("expected NonFiniteCount, got {other:?}"),
        }
        match CountMatrix::new(with_negative) {
            Err(ShapeError::NegativeCount { sample, category, value }) => {
                assert_eq!((sample, category), (0, 3));
                assert_eq!(value, -2.0);
            }
            other => panic!("expected NegativeCount, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Row-vector ingestion rejects ragged input with the offending row.
    //
    // Given
    // -----
    // - Row 0 with 96 entries, row 1 with 95.
    //
    // Expect
    // ------
    // - `Err(ShapeError::RaggedRows { row: 1, expected: 96, actual: 95 })`.
    fn from_rows_with_ragged_input_returns_ragged_rows() {
        // Arrange
        let rows = vec![vec![1.0; 96], vec![1.0; 95]];

        // Act
        let result = CountMatrix::from_rows(rows, None);

        // Assert
        assert!(matches!(
            result,
            Err(ShapeError::RaggedRows { row: 1, expected: 96, actual: 95 })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Empty input (no rows, or zero-width rows) is rejected up front.
    //
    // Expect
    // ------
    // - `Err(ShapeError::EmptyMatrix { .. })` in both cases.
    fn from_rows_with_empty_input_returns_empty_matrix() {
        // Act & Assert
        assert!(matches!(
            CountMatrix::from_rows(Vec::new(), None),
            Err(ShapeError::EmptyMatrix { rows: 0, .. })
        ));
        assert!(matches!(
            CountMatrix::from_rows(vec![Vec::new()], None),
            Err(ShapeError::EmptyMatrix { rows: 1, columns: 0 })
        ));
    }
}
