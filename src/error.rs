//! Error types for entity-search.
//!
//! The ranking engine itself is infallible; everything here belongs to the
//! surrounding boundary (config loading, candidate files, CLI arguments).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("missing config: {0}")]
    MissingConfig(String),

    #[error("invalid candidates: {0}")]
    InvalidCandidates(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl EsError {
    /// Stable machine-readable code used in robot-mode error output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io_error",
            Self::Json(_) => "json_error",
            Self::Config(_) => "config_error",
            Self::MissingConfig(_) => "missing_config",
            Self::InvalidCandidates(_) => "invalid_candidates",
            Self::InvalidArgument(_) => "invalid_argument",
        }
    }
}

pub type Result<T> = std::result::Result<T, EsError>;
