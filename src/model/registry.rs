//! Precompiled model specifications and their registry.
//!
//! Purpose
//! -------
//! Hold the six pre-built model specifications (family × problem type) that
//! the inference engine understands, each tagged with the internal nuisance
//! parameters the backend adapter removes from reported results. The
//! registry is an explicit value constructed once at startup and passed by
//! reference into the estimation layer; there is no process-wide lookup and
//! no hidden mutable state.
//!
//! Conventions
//! -----------
//! - Specification names are stable identifiers the engine dispatches on;
//!   they name the family and problem, nothing else.
//! - Nuisance parameters are the engine's internal reparameterizations
//!   (raw simplex coordinates, activity scales); the canonical reported
//!   parameters are `"exposures"` and, when inferred, `"signatures"`.

use crate::model::family::{ModelFamily, ProblemKind};

/// One precompiled model specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSpec {
    /// Stable identifier the engine dispatches on.
    pub name: &'static str,
    /// Statistical family of the specification.
    pub family: ModelFamily,
    /// Problem type the specification solves.
    pub problem: ProblemKind,
    /// Internal parameters suppressed from reported results.
    pub nuisance: &'static [&'static str],
}

/// The six precompiled specifications, one per (family, problem) pair.
///
/// Construct once with [`ModelRegistry::new`] and pass by reference; lookup
/// is an exhaustive match over both axes and cannot miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRegistry {
    specs: [ModelSpec; 6],
}

impl ModelRegistry {
    /// Build the registry of all six specifications.
    pub fn new() -> ModelRegistry {
        ModelRegistry {
            specs: [
                ModelSpec {
                    name: "nmf_fit",
                    family: ModelFamily::Nmf,
                    problem: ProblemKind::Fit,
                    nuisance: &["exposures_raw"],
                },
                ModelSpec {
                    name: "nmf_extract",
                    family: ModelFamily::Nmf,
                    problem: ProblemKind::Extract,
                    nuisance: &["exposures_raw", "signatures_raw"],
                },
                ModelSpec {
                    name: "nmf_fit_extract",
                    family: ModelFamily::Nmf,
                    problem: ProblemKind::FitExtract,
                    nuisance: &["exposures_raw", "extra_signatures_raw"],
                },
                ModelSpec {
                    name: "emu_fit",
                    family: ModelFamily::Emu,
                    problem: ProblemKind::Fit,
                    nuisance: &["exposures_raw", "activity_scale"],
                },
                ModelSpec {
                    name: "emu_extract",
                    family: ModelFamily::Emu,
                    problem: ProblemKind::Extract,
                    nuisance: &["exposures_raw", "signatures_raw", "activity_scale"],
                },
                ModelSpec {
                    name: "emu_fit_extract",
                    family: ModelFamily::Emu,
                    problem: ProblemKind::FitExtract,
                    nuisance: &["exposures_raw", "extra_signatures_raw", "activity_scale"],
                },
            ],
        }
    }

    /// Select the specification for a (family, problem) pair.
    pub fn lookup(&self, family: ModelFamily, problem: ProblemKind) -> &ModelSpec {
        let index = match (family, problem) {
            (ModelFamily::Nmf, ProblemKind::Fit) => 0,
            (ModelFamily::Nmf, ProblemKind::Extract) => 1,
            (ModelFamily::Nmf, ProblemKind::FitExtract) => 2,
            (ModelFamily::Emu, ProblemKind::Fit) => 3,
            (ModelFamily::Emu, ProblemKind::Extract) => 4,
            (ModelFamily::Emu, ProblemKind::FitExtract) => 5,
        };
        &self.specs[index]
    }

    /// All specifications, in registry order.
    pub fn specs(&self) -> &[ModelSpec] {
        &self.specs
    }
}

impl Default for ModelRegistry {
    fn default() -> ModelRegistry {
        ModelRegistry::new()
    }
}
