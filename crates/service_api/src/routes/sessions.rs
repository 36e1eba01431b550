//! Session readiness endpoints
//!
//! The identity collaborator posts a readiness signal once the session
//! exists; clients issue a single bounded wait instead of polling.

use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;

/// Wire form of both session endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// The user whose session this describes
    pub user_id: String,
    /// Whether the session is established
    pub ready: bool,
}

/// Query parameters for the wait endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WaitParams {
    /// Wait bound in milliseconds; the server default applies when absent
    pub timeout_ms: Option<u64>,
}

/// Build the session routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/sessions/{user_id}/ready", post(mark_ready_handler))
        .route("/api/v1/sessions/{user_id}", get(wait_ready_handler))
}

/// POST /api/v1/sessions/{user_id}/ready - Signal session establishment
async fn mark_ready_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    state.sessions.mark_ready(&user_id).await;

    (
        StatusCode::OK,
        Json(SessionResponse {
            user_id,
            ready: true,
        }),
    )
}

/// GET /api/v1/sessions/{user_id}?timeout_ms=N - Await readiness
///
/// One bounded wait: 200 once the signal arrives, 504 when the bound
/// expires first. Clients are expected not to retry in a loop.
async fn wait_ready_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<WaitParams>,
) -> Result<impl IntoResponse, ApiError> {
    let timeout_ms = params.timeout_ms.unwrap_or(state.config.session_timeout_ms);
    state
        .sessions
        .wait_ready(&user_id, Duration::from_millis(timeout_ms))
        .await?;

    Ok((
        StatusCode::OK,
        Json(SessionResponse {
            user_id,
            ready: true,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use axum::body::Body;
    use axum::http::Request;
    use infra_store::Store;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let store = Arc::new(Store::open_in_memory().unwrap());
        AppState::new(Arc::new(ServerConfig::default()), store)
    }

    async fn signal_ready(router: Router, user_id: &str) -> axum::response::Response {
        router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/api/v1/sessions/{}/ready", user_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn wait_for(router: Router, uri: &str) -> axum::response::Response {
        router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_signal_then_wait_returns_200() {
        let router = routes().with_state(create_test_state());

        let response = signal_ready(router.clone(), "user-1").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["userId"], "user-1");
        assert_eq!(body["ready"], true);

        let response = wait_for(router, "/api/v1/sessions/user-1").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["ready"], true);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_times_out_with_504() {
        let router = routes().with_state(create_test_state());

        let response = wait_for(router, "/api/v1/sessions/user-1").await;
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);

        let body = json_body(response).await;
        assert_eq!(body["error"], "session_timeout");
        assert!(body["message"].as_str().unwrap().contains("7500 ms"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_honours_explicit_timeout_parameter() {
        let router = routes().with_state(create_test_state());

        let response = wait_for(router, "/api/v1/sessions/user-1?timeout_ms=250").await;
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);

        let body = json_body(response).await;
        assert!(body["message"].as_str().unwrap().contains("250 ms"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_resolves_when_signal_arrives_later() {
        let router = routes().with_state(create_test_state());

        let waiting = router.clone();
        let handle = tokio::spawn(async move {
            wait_for(waiting, "/api/v1/sessions/user-1").await
        });

        // Let the waiter register on the channel before signalling
        tokio::task::yield_now().await;
        signal_ready(router, "user-1").await;

        let response = handle.await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_signal_is_idempotent() {
        let router = routes().with_state(create_test_state());

        signal_ready(router.clone(), "user-1").await;
        let response = signal_ready(router.clone(), "user-1").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = wait_for(router, "/api/v1/sessions/user-1?timeout_ms=50").await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
