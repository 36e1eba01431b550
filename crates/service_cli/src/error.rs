//! Error types for CLI operations.

use thiserror::Error;

use precio_engine::analysis::AnalysisError;

/// Convenience alias used by every command module.
pub type Result<T> = std::result::Result<T, CliError>;

/// Failures a CLI command can surface to the operator.
#[derive(Debug, Error)]
pub enum CliError {
    /// The named input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A flag value is outside its supported set.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Reading or writing a file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The cost model failed validation before the engine ran.
    #[error("Invalid cost model: {0}")]
    Analysis(#[from] AnalysisError),

    /// JSON input or output could not be processed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML input could not be parsed.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML output could not be rendered.
    #[error("TOML render error: {0}")]
    TomlRender(#[from] toml::ser::Error),

    /// One or more environment checks failed.
    #[error("Environment check failed: {0}")]
    CheckFailed(String),
}
