//! HTTP error mapping
//!
//! Every fallible handler returns [`ApiError`]; its `IntoResponse`
//! implementation maps the failure onto a status code and a JSON body
//! of the shape `{error, message, field?}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use thiserror::Error;

use infra_store::StoreError;
use precio_engine::analysis::AnalysisError;

use crate::session::SessionError;

/// Wire form of every error response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Stable machine-readable error code
    pub error: String,
    /// Human-readable description
    pub message: String,
    /// Wire-form path of the offending field, present for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Error type returned by the API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body failed cost-model validation.
    #[error("{0}")]
    Validation(#[from] AnalysisError),

    /// A referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The session gate rejected the wait.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Storage or task failure the client cannot correct.
    #[error("{0}")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        if err.is_not_found() {
            ApiError::NotFound(err.to_string())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("blocking task failed: {}", err))
    }
}

impl ApiError {
    /// HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Session(SessionError::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Session(SessionError::Closed { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_failed",
            ApiError::NotFound(_) => "not_found",
            ApiError::Session(SessionError::Timeout { .. }) => "session_timeout",
            ApiError::Session(SessionError::Closed { .. }) => "session_closed",
            ApiError::Internal(_) => "internal",
        }
    }

    fn field(&self) -> Option<String> {
        match self {
            ApiError::Validation(err) => Some(err.field()),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = ErrorBody {
            error: self.code().to_string(),
            message: self.to_string(),
            field: self.field(),
        };
        (status, Json(body)).into_response()
    }
}
