use thiserror::Error;

use crate::run::RunId;
use crate::variable::VariableId;

/// Main error type for the OptiLab system
#[derive(Error, Debug)]
pub enum OlError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Objective error: {0}")]
    Objective(#[from] ObjectiveError),

    #[error("Sampler error: {0}")]
    Sampler(#[from] SamplerError),

    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn fmt_ids(ids: &[VariableId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Domain-validation failures. All are caller-input errors detected before
/// any sampling work begins.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("duplicate variable ids in request: {}", fmt_ids(.ids))]
    DuplicateIds { ids: Vec<VariableId> },

    #[error("unknown or inactive variable ids: {}", fmt_ids(.missing))]
    UnknownIds { missing: Vec<VariableId> },

    #[error("variables without a finite lower and upper bound: {}", fmt_ids(.ids))]
    UnboundedDomain { ids: Vec<VariableId> },

    #[error("variables with lower bound above upper bound: {}", fmt_ids(.ids))]
    InvertedDomain { ids: Vec<VariableId> },
}

/// Objective construction and scoring failures.
#[derive(Error, Debug)]
pub enum ObjectiveError {
    #[error("point has no value for variable {variable_id}")]
    MissingKey { variable_id: VariableId },

    #[error("invalid objective spec: {reason}")]
    InvalidSpec { reason: String },

    #[error("objective references variable {variable_id} outside the active variable set")]
    VariableNotInSet { variable_id: VariableId },
}

/// Sampler capacity limits. These guard the quasi-random backend, which
/// supports a bounded design size.
#[derive(Error, Debug)]
pub enum SamplerError {
    #[error("sobol sampler supports at most {max} dimensions, got {got}")]
    TooManyDimensions { got: usize, max: usize },

    #[error("sobol sampler supports at most {max} points, got {got}")]
    TooManyPoints { got: usize, max: usize },
}

/// Search-driver failures. A failed run returns no partial history.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("seed point {index} has no value for variable {variable_id}")]
    SeedPointMissingKey { index: usize, variable_id: VariableId },

    #[error(
        "seed point {index} value {value} for variable {variable_id} is outside [{lower}, {upper}]"
    )]
    OutOfDomainSeedPoint {
        index: usize,
        variable_id: VariableId,
        value: f64,
        lower: f64,
        upper: f64,
    },

    #[error(transparent)]
    Objective(#[from] ObjectiveError),

    #[error(transparent)]
    Sampler(#[from] SamplerError),
}

/// Store-side failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("run not found: {id}")]
    RunNotFound { id: RunId },
}

/// Result type alias for OptiLab operations
pub type OlResult<T> = Result<T, OlError>;

/// Macro for creating validation errors
#[macro_export]
macro_rules! validation_error {
    ($($arg:tt)*) => {
        $crate::OlError::Validation(format!($($arg)*))
    };
}

/// Macro for creating internal errors
#[macro_export]
macro_rules! internal_error {
    ($($arg:tt)*) => {
        $crate::OlError::Internal(format!($($arg)*))
    };
}
