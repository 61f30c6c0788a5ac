//! Category layout — admissible vocabularies and strand-awareness.
//!
//! Purpose
//! -------
//! Represent the category dimensionality shared by every matrix in a single
//! estimation call: the number of mutation categories and whether the
//! strand-aware layout is active. The strand-aware layout doubles the base
//! 96-category vocabulary into two 96-category blocks, one per
//! transcriptional strand.
//!
//! Key behaviors
//! -------------
//! - Detect the layout from a matrix's column count: 96 (base) and 192
//!   (strand-aware) are admissible without further declaration.
//! - Honor a caller-declared custom vocabulary size verbatim, rejecting any
//!   matrix whose column count disagrees with it.
//! - Derive `strand == true` iff the category count is 192, in every mode.
//!
//! Invariants & assumptions
//! ------------------------
//! - A layout's category count is strictly positive.
//! - All matrices validated against the same layout share the same category
//!   count; cross-matrix agreement is enforced by the matrix constructors,
//!   not here.
//!
//! Conventions
//! -----------
//! - Categories are columns, 0-based, in a fixed caller-defined order. Under
//!   the strand layout, columns `0..96` are one strand and `96..192` the
//!   other, each block repeating the base vocabulary order.

use crate::signature::errors::{ShapeError, ShapeResult};

/// Number of categories in the base (strand-agnostic) vocabulary.
pub const BASE_CATEGORIES: usize = 96;

/// Number of categories in the strand-aware vocabulary (two base blocks).
pub const STRANDED_CATEGORIES: usize = 2 * BASE_CATEGORIES;

/// Category dimensionality shared by all matrices in one estimation call.
///
/// Constructed by [`CategoryLayout::detect`] from a matrix's column count,
/// optionally against a caller-declared vocabulary size. Copyable so it can
/// be carried by every validated matrix without borrowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryLayout {
    categories: usize,
    strand: bool,
}

impl CategoryLayout {
    /// Detect the layout for a matrix with `categories` columns.
    ///
    /// Parameters
    /// ----------
    /// - `categories`: `usize`
    ///   Column count of the matrix being ingested.
    /// - `vocabulary`: `Option<usize>`
    ///   Caller-declared vocabulary size. When present, `categories` must
    ///   equal it exactly; when absent, only 96 and 192 are admissible.
    ///
    /// Returns
    /// -------
    /// `ShapeResult<CategoryLayout>`
    ///   - `Ok(layout)` with `strand == (categories == 192)`.
    ///   - `Err(ShapeError::UnsupportedCategoryCount)` when no vocabulary is
    ///     declared and `categories` is neither 96 nor 192.
    ///   - `Err(ShapeError::VocabularyMismatch)` when a declared vocabulary
    ///     disagrees with `categories`.
    ///
    /// Notes
    /// -----
    /// - `strand` is derived from the category count alone, so a declared
    ///   192-category vocabulary is treated as strand-aware.
    pub fn detect(categories: usize, vocabulary: Option<usize>) -> ShapeResult<CategoryLayout> {
        match vocabulary {
            Some(declared) if declared != categories => {
                return Err(ShapeError::VocabularyMismatch { declared, actual: categories });
            }
            Some(_) => {}
            None => {
                if categories != BASE_CATEGORIES && categories != STRANDED_CATEGORIES {
                    return Err(ShapeError::UnsupportedCategoryCount { categories });
                }
            }
        }
        Ok(CategoryLayout { categories, strand: categories == STRANDED_CATEGORIES })
    }

    /// Number of categories in this layout.
    pub fn categories(&self) -> usize {
        self.categories
    }

    /// Whether the strand-aware (192-category) layout is active.
    pub fn strand(&self) -> bool {
        self.strand
    }
}
