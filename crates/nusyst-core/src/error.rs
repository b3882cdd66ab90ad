//! Error types for nusyst

use thiserror::Error;

/// nusyst error type
///
/// Every configuration-phase error is fatal for the affected provider and
/// propagates to the outermost caller; no partial configuration is served.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed tweak-definition string
    #[error("invalid tweak definition: {0}")]
    InvalidTweakDefinition(String),

    /// Mutually exclusive dial families requested together
    #[error("incompatible dial modes: {0}")]
    IncompatibleMode(String),

    /// Jointly-coupled dependents with mismatched variation-list lengths
    #[error("inconsistent variation count: {0}")]
    InconsistentVariationCount(String),

    /// `tool_type` name not present in the provider registry
    #[error("unknown provider type: {0}")]
    UnknownProviderType(String),

    /// Parameter-id or response-parameter collision after merge
    #[error("duplicate parameter: {0}")]
    DuplicateParameter(String),

    /// A responseless dependent was marked spline-able
    #[error("splines are undefined on multi-parameter responses: {0}")]
    SplineOnMultiParamResponse(String),

    /// Reduced-mode dispatch after an ad hoc weight query perturbed the engine
    #[error("stale weight-engine state: {0}")]
    StaleEngineState(String),

    /// Configuration yields zero providers or zero parameter headers
    #[error("empty configuration: {0}")]
    EmptyConfiguration(String),

    /// Validation error
    #[error("validation error: {0}")]
    Validation(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
