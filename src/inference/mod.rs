//! inference — the uniform boundary to the external estimation engine.
//!
//! The engine owns every numerical detail of sampling, optimization, and
//! variational approximation; this module owns the contract ([`engine`]),
//! the validated strategy configuration ([`strategy`]), the uniform
//! invocation path with its extraction chain rule and nuisance filtering
//! ([`adapter`]), and failure normalization ([`errors`]).

pub mod adapter;
pub mod engine;
pub mod errors;
pub mod strategy;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::adapter::BackendAdapter;
pub use self::engine::{EngineOutput, InferenceEngine, InferenceResult};
pub use self::errors::{BackendError, BackendResult};
pub use self::strategy::{
    OptimizingOptions, SamplingOptions, Strategy, StrategyOptions, VariationalOptions,
};
