//! Error types for the analysis pipeline.

use thiserror::Error;

use precio_core::model::ValidationError;

/// Analysis pipeline error.
///
/// The pipeline is total for any structurally valid model, so the only
/// failure mode is a model that fails validation; the offending field
/// travels inside the wrapped [`ValidationError`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    /// The cost model failed a structural guard.
    #[error("invalid cost model: {0}")]
    InvalidModel(#[from] ValidationError),
}

impl AnalysisError {
    /// Returns the wire-form path of the field that caused the failure.
    pub fn field(&self) -> String {
        match self {
            AnalysisError::InvalidModel(err) => err.field(),
        }
    }
}
