//! model — variant selection and payload assembly.
//!
//! Given the requested statistical family and problem type, this layer
//! selects exactly one of the six precompiled model specifications from an
//! explicit [`ModelRegistry`] value and assembles the immutable data
//! payload that specification requires. Family-dependent handling of the
//! opportunity matrix (resolve under EMu, ignore-with-warning under NMF)
//! also lives here.

pub mod family;
pub mod payload;
pub mod registry;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::family::{ModelFamily, ProblemKind};
pub use self::payload::{ModelData, ModelInputs, ModelRequest, reconcile_opportunities};
pub use self::registry::{ModelRegistry, ModelSpec};
