//! Error types for the Sculpt core library.

/// Why a [`Change`](crate::models::Change) could not be produced or is not
/// safe to commit. Carried inside invalid changes, so it must stay `Clone`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ChangeFailure {
    #[error("Parse failure: {0}")]
    ParseFailure(String),

    #[error("Unresolved target: {0}")]
    UnresolvedTarget(String),

    #[error("Ambiguous target: {what} matches {count} declarations")]
    AmbiguousTarget { what: String, count: usize },

    #[error("Stale location: selection targets {source_name}@{selected} but context is at {current}")]
    StaleLocation {
        source_name: String,
        selected: u32,
        current: u32,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid change: {0}")]
    InvalidChange(String),
}

/// Top-level error enum for the Sculpt core library.
#[derive(Debug, thiserror::Error)]
pub enum SculptError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unresolved target: {0}")]
    UnresolvedTarget(String),

    #[error("Ambiguous target: {what} matches {count} declarations")]
    AmbiguousTarget { what: String, count: usize },

    #[error("Invalid change: {0}")]
    InvalidChange(String),

    #[error("Stale change: built against {source_name}@{base}, current version is {current}")]
    StaleChange {
        source_name: String,
        base: u32,
        current: u32,
    },

    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    #[error("Unknown version {version} for {source_name}")]
    UnknownVersion { source_name: String, version: u32 },

    #[error("No tracked source named {0}")]
    NoTrackedSource(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ChangeFailure> for SculptError {
    fn from(failure: ChangeFailure) -> SculptError {
        match failure {
            ChangeFailure::ParseFailure(msg) => SculptError::Parse(msg),
            ChangeFailure::UnresolvedTarget(msg) => SculptError::UnresolvedTarget(msg),
            ChangeFailure::AmbiguousTarget { what, count } => {
                SculptError::AmbiguousTarget { what, count }
            }
            ChangeFailure::StaleLocation {
                source_name,
                selected,
                current,
            } => SculptError::InvalidLocation(format!(
                "{source_name}@{selected} does not match current version {current}"
            )),
            ChangeFailure::InvalidParameter(msg) => SculptError::InvalidChange(msg),
            ChangeFailure::InvalidChange(msg) => SculptError::InvalidChange(msg),
        }
    }
}

#[cfg(feature = "python")]
impl From<SculptError> for pyo3::PyErr {
    fn from(err: SculptError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
        match &err {
            SculptError::Io(_) => PyIOError::new_err(err.to_string()),
            SculptError::StaleChange { .. } | SculptError::Config(_) => {
                PyRuntimeError::new_err(err.to_string())
            }
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

pub type SculptResult<T> = Result<T, SculptError>;
