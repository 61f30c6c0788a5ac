//! Dirichlet-style priors for exposures and signatures.
//!
//! Purpose
//! -------
//! Produce the default uniform (all-ones, uninformative) priors when the
//! caller supplies none, and validate caller-supplied priors against the
//! shapes the selected problem implies: one positive weight per signature
//! for exposures (shared across samples), and one row per signature to be
//! extracted for signature priors.
//!
//! Key behaviors
//! -------------
//! - [`ExposurePrior::uniform`] / [`SignaturePrior::uniform`] build the
//!   defaults sized from the problem (known signature count for fit, the
//!   requested extraction count for extract, fixed + extra for fit-extract).
//! - `new` constructors enforce length/shape agreement and strict
//!   positivity, reporting the first violation.
//! - The model-order search rebuilds the uniform signature prior per
//!   candidate count; a caller-supplied signature prior is only legal for a
//!   scalar count, which the estimation layer enforces as a usage error.

use crate::signature::{
    core::validation::{first_non_positive_cell, first_non_positive_weight},
    errors::{ShapeError, ShapeResult},
};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// One positive Dirichlet weight per signature, shared across samples.
#[derive(Debug, Clone, PartialEq)]
pub struct ExposurePrior {
    weights: Array1<f64>,
}

impl ExposurePrior {
    /// Uniform (all-ones) prior for `signatures` signatures.
    pub fn uniform(signatures: usize) -> ExposurePrior {
        ExposurePrior { weights: Array1::ones(signatures) }
    }

    /// Prior repeating one pre-validated concentration per signature.
    ///
    /// `weight` must be finite and strictly positive; the estimation layer
    /// validates it before the order search rebuilds priors per candidate.
    pub(crate) fn constant(signatures: usize, weight: f64) -> ExposurePrior {
        ExposurePrior { weights: Array1::from_elem(signatures, weight) }
    }

    /// Validate a caller-supplied exposure prior.
    ///
    /// Parameters
    /// ----------
    /// - `weights`: `Array1<f64>`
    ///   One weight per signature. Every entry must be finite and > 0.
    /// - `signatures`: `usize`
    ///   Total signature count of the model (fixed plus extracted).
    ///
    /// Errors
    /// ------
    /// - `ShapeError::ExposurePriorLengthMismatch` when the length differs
    ///   from `signatures`.
    /// - `ShapeError::NonPositiveExposurePrior` for the first entry that is
    ///   NaN, ±inf, or ≤ 0.
    pub fn new(weights: Array1<f64>, signatures: usize) -> ShapeResult<ExposurePrior> {
        if weights.len() != signatures {
            return Err(ShapeError::ExposurePriorLengthMismatch {
                expected: signatures,
                actual: weights.len(),
            });
        }
        if let Some((index, value)) = first_non_positive_weight(weights.view()) {
            return Err(ShapeError::NonPositiveExposurePrior { index, value });
        }
        Ok(ExposurePrior { weights })
    }

    /// Number of signatures this prior covers.
    pub fn signatures(&self) -> usize {
        self.weights.len()
    }

    /// Borrowed view of the weights.
    pub fn weights(&self) -> ArrayView1<'_, f64> {
        self.weights.view()
    }
}

/// One positive Dirichlet weight per (signature-to-extract, category) cell.
#[derive(Debug, Clone, PartialEq)]
pub struct SignaturePrior {
    weights: Array2<f64>,
}

impl SignaturePrior {
    /// Uniform (all-ones) prior for `signatures` spectra over `categories`
    /// categories.
    pub fn uniform(signatures: usize, categories: usize) -> SignaturePrior {
        SignaturePrior { weights: Array2::ones((signatures, categories)) }
    }

    /// Validate a caller-supplied signature prior.
    ///
    /// Parameters
    /// ----------
    /// - `weights`: `Array2<f64>`
    ///   Signatures-to-extract × categories weights, finite and > 0.
    /// - `signatures`: `usize`
    ///   Number of signatures the extraction will infer.
    /// - `categories`: `usize`
    ///   Category count of the catalogues' layout.
    ///
    /// Errors
    /// ------
    /// - `ShapeError::SignaturePriorShapeMismatch` when the dimensions differ
    ///   from `(signatures, categories)`.
    /// - `ShapeError::NonPositiveSignaturePrior` for the first entry that is
    ///   NaN, ±inf, or ≤ 0.
    pub fn new(
        weights: Array2<f64>, signatures: usize, categories: usize,
    ) -> ShapeResult<SignaturePrior> {
        if weights.dim() != (signatures, categories) {
            return Err(ShapeError::SignaturePriorShapeMismatch {
                expected: (signatures, categories),
                actual: weights.dim(),
            });
        }
        if let Some(((row, column), value)) = first_non_positive_cell(weights.view()) {
            return Err(ShapeError::NonPositiveSignaturePrior { row, column, value });
        }
        Ok(SignaturePrior { weights })
    }

    /// Number of signatures this prior covers.
    pub fn signatures(&self) -> usize {
        self.weights.nrows()
    }

    /// Borrowed view of the weights.
    pub fn weights(&self) -> ArrayView2<'_, f64> {
        self.weights.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover prior defaults (all-ones, correctly sized) and the
    // validation of caller-supplied priors (length/shape, positivity).
    // The usage rule forbidding signature priors under a count range lives
    // in the estimation layer and is tested there.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // The default exposure prior is a vector of ones of length equal to the
    // signature count.
    //
    // Expect
    // ------
    // - Length 5, every weight exactly 1.0.
    fn uniform_exposure_prior_is_all_ones_of_signature_count() {
        // Act
        let prior = ExposurePrior::uniform(5);

        // Assert
        assert_eq!(prior.signatures(), 5);
        assert!(prior.weights().iter().all(|&w| w == 1.0));
    }

    #[test]
    // Purpose
    // -------
    // The default signature prior is an all-ones matrix of shape
    // (extract-count, categories).
    //
    // Expect
    // ------
    // - Shape (3, 96), every weight exactly 1.0.
    fn uniform_signature_prior_is_all_ones_of_extraction_shape() {
        // Act
        let prior = SignaturePrior::uniform(3, 96);

        // Assert
        assert_eq!(prior.weights().dim(), (3, 96));
        assert!(prior.weights().iter().all(|&w| w == 1.0));
    }

    #[test]
    // Purpose
    // -------
    // A supplied exposure prior must match the signature count.
    //
    // Given
    // -----
    // - Three weights against a four-signature model.
    //
    // Expect
    // ------
    // - `Err(ShapeError::ExposurePriorLengthMismatch { expected: 4, actual: 3 })`.
    fn exposure_prior_with_length_mismatch_returns_length_mismatch() {
        // Act
        let result = ExposurePrior::new(array![1.0, 2.0, 0.5], 4);

        // Assert
        assert!(matches!(
            result,
            Err(ShapeError::ExposurePriorLengthMismatch { expected: 4, actual: 3 })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Exposure prior weights must be finite and strictly positive.
    //
    // Given
    // -----
    // - A zero weight at index 1.
    //
    // Expect
    // ------
    // - `Err(ShapeError::NonPositiveExposurePrior { index: 1, value: 0.0 })`.
    fn exposure_prior_with_non_positive_weight_returns_non_positive() {
        // Act
        let result = ExposurePrior::new(array![1.0, 0.0, 0.5], 3);

        // Assert
        assert!(matches!(
            result,
            Err(ShapeError::NonPositiveExposurePrior { index: 1, value }) if value == 0.0
        ));
    }

    #[test]
    // Purpose
    // -------
    // A supplied signature prior must match (extract-count, categories)
    // exactly.
    //
    // Given
    // -----
    // - A (2, 96) prior against an extraction of 3 signatures.
    //
    // Expect
    // ------
    // - `Err(ShapeError::SignaturePriorShapeMismatch { .. })` reporting both
    //   shapes.
    fn signature_prior_with_shape_mismatch_returns_shape_mismatch() {
        // Arrange
        let weights = Array2::ones((2, 96));

        // Act
        let result = SignaturePrior::new(weights, 3, 96);

        // Assert
        assert!(matches!(
            result,
            Err(ShapeError::SignaturePriorShapeMismatch {
                expected: (3, 96),
                actual: (2, 96)
            })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Signature prior weights must be finite and strictly positive.
    //
    // Given
    // -----
    // - A NaN at (1, 4).
    //
    // Expect
    // ------
    // - `Err(ShapeError::NonPositiveSignaturePrior { row: 1, column: 4, .. })`.
    fn signature_prior_with_non_finite_weight_returns_non_positive() {
        // Arrange
        let mut weights = Array2::ones((2, 96));
        weights[(1, 4)] = f64::NAN;

        // Act
        let result = SignaturePrior::new(weights, 2, 96);

        // Assert
        assert!(matches!(
            result,
            Err(ShapeError::NonPositiveSignaturePrior { row: 1, column: 4, .. })
        ));
    }
}
