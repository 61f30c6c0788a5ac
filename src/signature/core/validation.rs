//! Shared validation helpers — first-violation scans over weight containers.
//!
//! Purpose
//! -------
//! Centralize the small scans used across the data layer to locate the
//! first entry violating the "finite and strictly positive" domain that
//! priors and opportunities share. Constructors call these helpers and wrap
//! the reported location in their own structured error variant, so higher
//! layers can fail fast with actionable messages.
//!
//! Conventions
//! -----------
//! - Indices are 0-based and follow `ndarray` row/column order.
//! - The helpers only inspect values; they never mutate or normalize.

use ndarray::{ArrayView1, ArrayView2};

/// Locate the first weight that is NaN, ±inf, or ≤ 0 in a vector.
///
/// Returns
/// -------
/// `Option<(usize, f64)>`
///   The offending index and value, or `None` when every entry is finite
///   and strictly positive.
pub(crate) fn first_non_positive_weight(weights: ArrayView1<'_, f64>) -> Option<(usize, f64)> {
    weights
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite() || **v <= 0.0)
        .map(|(index, &value)| (index, value))
}

/// Locate the first cell that is NaN, ±inf, or ≤ 0 in a matrix.
///
/// Returns
/// -------
/// `Option<((usize, usize), f64)>`
///   The offending `(row, column)` pair and value, or `None` when every
///   entry is finite and strictly positive.
pub(crate) fn first_non_positive_cell(
    weights: ArrayView2<'_, f64>,
) -> Option<((usize, usize), f64)> {
    weights
        .indexed_iter()
        .find(|(_, v)| !v.is_finite() || **v <= 0.0)
        .map(|(position, &value)| (position, value))
}
