//! Model payload assembly — the immutable request handed to the engine.
//!
//! Purpose
//! -------
//! Turn validated inputs into exactly the data payload the selected model
//! specification requires: dimensions, counts, fixed signatures when the
//! problem has them, opportunities when the family uses them, and the
//! priors. The payload is owned and immutable once built, so concurrent
//! order-search candidates can each hold their own request without shared
//! mutable state.
//!
//! Key behaviors
//! -------------
//! - [`reconcile_opportunities`] applies the family rules: the EMu family
//!   resolves an opportunity matrix (warning on the uniform fallback), the
//!   NMF family ignores a supplied one with a warning.
//! - [`ModelRequest::assemble`] selects the specification from the registry
//!   and copies the payload fields out of the validated containers.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs arrive pre-validated: prior sizes match the signature counts,
//!   opportunities (when present) match the catalogue shape. The estimation
//!   layer enforces this before assembly; no re-validation happens here.

use crate::{
    model::{
        family::{ModelFamily, ProblemKind},
        registry::{ModelRegistry, ModelSpec},
    },
    signature::{
        core::{
            catalogue::CountMatrix,
            opportunity::{OpportunityMatrix, OpportunitySpec},
            priors::{ExposurePrior, SignaturePrior},
            spectra::SignatureMatrix,
        },
        errors::{ConfigWarning, ShapeResult},
    },
};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use tracing::warn;

/// Borrowed, validated inputs for payload assembly.
#[derive(Debug, Clone, Copy)]
pub struct ModelInputs<'a> {
    /// Validated catalogues.
    pub counts: &'a CountMatrix,
    /// Fixed signatures (fit and fit-extract problems).
    pub signatures: Option<&'a SignatureMatrix>,
    /// Number of signatures to infer (0 for pure fitting).
    pub extra_signatures: usize,
    /// Exposure prior sized to fixed + extra signatures.
    pub exposure_prior: &'a ExposurePrior,
    /// Signature prior sized to the inferred signatures, when any.
    pub signature_prior: Option<&'a SignaturePrior>,
    /// Resolved opportunities (EMu family only).
    pub opportunities: Option<&'a OpportunityMatrix>,
}

/// Owned, immutable data payload for one inference invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelData {
    categories: usize,
    samples: usize,
    fixed_signatures: usize,
    extra_signatures: usize,
    counts: Array2<f64>,
    signatures: Option<Array2<f64>>,
    opportunities: Option<Array2<f64>>,
    exposure_prior: Array1<f64>,
    signature_prior: Option<Array2<f64>>,
}

impl ModelData {
    /// Category count shared by every matrix in the payload.
    pub fn categories(&self) -> usize {
        self.categories
    }

    /// Number of catalogues.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Number of fixed signatures (0 for extraction).
    pub fn fixed_signatures(&self) -> usize {
        self.fixed_signatures
    }

    /// Number of signatures to infer (0 for pure fitting).
    pub fn extra_signatures(&self) -> usize {
        self.extra_signatures
    }

    /// Total signature count of the model.
    pub fn total_signatures(&self) -> usize {
        self.fixed_signatures + self.extra_signatures
    }

    /// Observed counts.
    pub fn counts(&self) -> ArrayView2<'_, f64> {
        self.counts.view()
    }

    /// Fixed signature spectra, when the problem has them.
    pub fn signatures(&self) -> Option<ArrayView2<'_, f64>> {
        self.signatures.as_ref().map(Array2::view)
    }

    /// Resolved opportunities, when the family uses them.
    pub fn opportunities(&self) -> Option<ArrayView2<'_, f64>> {
        self.opportunities.as_ref().map(Array2::view)
    }

    /// Exposure prior weights.
    pub fn exposure_prior(&self) -> ArrayView1<'_, f64> {
        self.exposure_prior.view()
    }

    /// Signature prior weights, when signatures are inferred.
    pub fn signature_prior(&self) -> Option<ArrayView2<'_, f64>> {
        self.signature_prior.as_ref().map(Array2::view)
    }
}

/// One fully-assembled inference request: a registry specification plus its
/// immutable data payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest<'r> {
    spec: &'r ModelSpec,
    data: ModelData,
}

impl<'r> ModelRequest<'r> {
    /// Select a specification and assemble its payload.
    ///
    /// Parameters
    /// ----------
    /// - `registry`: `&ModelRegistry`
    ///   The explicit registry value; the request borrows its spec from it.
    /// - `family`, `problem`
    ///   The two dispatch axes selecting one of the six specifications.
    /// - `inputs`: [`ModelInputs`]
    ///   Pre-validated inputs; fields not used by the chosen specification
    ///   (e.g. opportunities under NMF) are simply absent from the payload.
    pub fn assemble(
        registry: &'r ModelRegistry, family: ModelFamily, problem: ProblemKind,
        inputs: ModelInputs<'_>,
    ) -> ModelRequest<'r> {
        let spec = registry.lookup(family, problem);
        let layout = inputs.counts.layout();
        let data = ModelData {
            categories: layout.categories(),
            samples: inputs.counts.samples(),
            fixed_signatures: inputs.signatures.map_or(0, SignatureMatrix::count),
            extra_signatures: inputs.extra_signatures,
            counts: inputs.counts.values().to_owned(),
            signatures: inputs.signatures.map(|s| s.values().to_owned()),
            opportunities: inputs.opportunities.map(|o| o.values().to_owned()),
            exposure_prior: inputs.exposure_prior.weights().to_owned(),
            signature_prior: inputs.signature_prior.map(|p| p.weights().to_owned()),
        };
        ModelRequest { spec, data }
    }

    /// The selected specification.
    pub fn spec(&self) -> &'r ModelSpec {
        self.spec
    }

    /// The immutable data payload.
    pub fn data(&self) -> &ModelData {
        &self.data
    }
}

/// Apply the family rules to an optional opportunity request.
///
/// Behavior
/// --------
/// - `Emu`: resolve the request against the catalogues (supplied matrix,
///   named reference, or warned uniform fallback) and return the matrix.
/// - `Nmf`: return no matrix; a supplied request is ignored with
///   [`ConfigWarning::UnusedOpportunities`] (also via `tracing::warn!`).
///
/// Errors
/// ------
/// - Propagates shape errors from supplied-matrix resolution under EMu.
pub fn reconcile_opportunities(
    family: ModelFamily, spec: Option<&OpportunitySpec>, counts: &CountMatrix,
) -> ShapeResult<(Option<OpportunityMatrix>, Vec<ConfigWarning>)> {
    let mut warnings = Vec::new();
    if family.uses_opportunities() {
        let (resolved, warning) = OpportunityMatrix::resolve(spec, counts)?;
        warnings.extend(warning);
        Ok((Some(resolved), warnings))
    } else {
        if spec.is_some() {
            let warning = ConfigWarning::UnusedOpportunities;
            warn!(target: "rust_signatures::model", "{warning}");
            warnings.push(warning);
        }
        Ok((None, warnings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::core::opportunity::OpportunityReference;
    use ndarray::Array2;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover payload assembly per problem type (which fields are
    // present) and the family/opportunity reconciliation rules. Resolution
    // internals (tiling, reference tables) are covered by the opportunity
    // module's own tests.
    // -------------------------------------------------------------------------

    fn counts() -> CountMatrix {
        CountMatrix::new(Array2::from_elem((3, 96), 4.0)).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // A fit payload carries the fixed signatures and no signature prior;
    // the signature counts split as (fixed, 0).
    fn assemble_for_fit_carries_fixed_signatures_only() {
        // Arrange
        let registry = ModelRegistry::new();
        let counts = counts();
        let signatures =
            SignatureMatrix::new(Array2::from_elem((2, 96), 0.01), &counts).unwrap();
        let prior = ExposurePrior::uniform(2);
        let inputs = ModelInputs {
            counts: &counts,
            signatures: Some(&signatures),
            extra_signatures: 0,
            exposure_prior: &prior,
            signature_prior: None,
            opportunities: None,
        };

        // Act
        let request =
            ModelRequest::assemble(&registry, ModelFamily::Nmf, ProblemKind::Fit, inputs);

        // Assert
        assert_eq!(request.spec().name, "nmf_fit");
        assert_eq!(request.data().fixed_signatures(), 2);
        assert_eq!(request.data().extra_signatures(), 0);
        assert_eq!(request.data().total_signatures(), 2);
        assert!(request.data().signatures().is_some());
        assert!(request.data().signature_prior().is_none());
        assert!(request.data().opportunities().is_none());
    }

    #[test]
    // Purpose
    // -------
    // An extract payload carries no fixed signatures; the signature prior
    // and the extraction count are present.
    fn assemble_for_extract_carries_signature_prior() {
        // Arrange
        let registry = ModelRegistry::new();
        let counts = counts();
        let exposure_prior = ExposurePrior::uniform(3);
        let signature_prior = SignaturePrior::uniform(3, 96);
        let inputs = ModelInputs {
            counts: &counts,
            signatures: None,
            extra_signatures: 3,
            exposure_prior: &exposure_prior,
            signature_prior: Some(&signature_prior),
            opportunities: None,
        };

        // Act
        let request =
            ModelRequest::assemble(&registry, ModelFamily::Nmf, ProblemKind::Extract, inputs);

        // Assert
        assert_eq!(request.spec().name, "nmf_extract");
        assert_eq!(request.data().fixed_signatures(), 0);
        assert_eq!(request.data().extra_signatures(), 3);
        assert!(request.data().signatures().is_none());
        assert_eq!(request.data().signature_prior().unwrap().dim(), (3, 96));
    }

    #[test]
    // Purpose
    // -------
    // An EMu payload carries the resolved opportunities.
    fn assemble_for_emu_carries_opportunities() {
        // Arrange
        let registry = ModelRegistry::new();
        let counts = counts();
        let signatures =
            SignatureMatrix::new(Array2::from_elem((2, 96), 0.01), &counts).unwrap();
        let prior = ExposurePrior::uniform(2);
        let spec = OpportunitySpec::Reference(OpportunityReference::HumanGenome);
        let (opportunities, warnings) =
            reconcile_opportunities(ModelFamily::Emu, Some(&spec), &counts).unwrap();
        let inputs = ModelInputs {
            counts: &counts,
            signatures: Some(&signatures),
            extra_signatures: 0,
            exposure_prior: &prior,
            signature_prior: None,
            opportunities: opportunities.as_ref(),
        };

        // Act
        let request =
            ModelRequest::assemble(&registry, ModelFamily::Emu, ProblemKind::Fit, inputs);

        // Assert
        assert!(warnings.is_empty());
        assert_eq!(request.spec().name, "emu_fit");
        assert_eq!(request.data().opportunities().unwrap().dim(), (3, 96));
    }

    #[test]
    // Purpose
    // -------
    // The NMF family ignores a supplied opportunity request with a warning.
    fn reconcile_with_nmf_and_supplied_opportunities_warns_and_ignores() {
        // Arrange
        let counts = counts();
        let spec = OpportunitySpec::Reference(OpportunityReference::HumanExome);

        // Act
        let (opportunities, warnings) =
            reconcile_opportunities(ModelFamily::Nmf, Some(&spec), &counts).unwrap();

        // Assert
        assert!(opportunities.is_none());
        assert_eq!(warnings, vec![ConfigWarning::UnusedOpportunities]);
    }

    #[test]
    // Purpose
    // -------
    // The EMu family without a request falls back to uniform opportunities
    // and reports the fallback.
    fn reconcile_with_emu_and_absent_opportunities_warns_and_substitutes() {
        // Arrange
        let counts = counts();

        // Act
        let (opportunities, warnings) =
            reconcile_opportunities(ModelFamily::Emu, None, &counts).unwrap();

        // Assert
        let resolved = opportunities.expect("EMu must never run with unset opportunities");
        assert_eq!(resolved.values().dim(), (3, 96));
        assert!(resolved.values().iter().all(|&v| v > 0.0));
        assert_eq!(warnings, vec![ConfigWarning::MissingOpportunities]);
    }

    #[test]
    // Purpose
    // -------
    // The NMF family without a request produces neither a matrix nor a
    // warning.
    fn reconcile_with_nmf_and_absent_opportunities_is_silent() {
        // Act
        let (opportunities, warnings) =
            reconcile_opportunities(ModelFamily::Nmf, None, &counts()).unwrap();

        // Assert
        assert!(opportunities.is_none());
        assert!(warnings.is_empty());
    }
}
