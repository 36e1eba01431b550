//! Organization provisioning, profile, and dashboard endpoints
//!
//! Tenant management mirrors the store API one to one: idempotent
//! provisioning keyed by the owning user, get-or-create profiles with
//! partial updates, setup completion, and the dashboard totals. Store
//! calls run on the blocking pool.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use infra_store::types::ProfileChanges;

use super::AppState;
use crate::error::ApiError;

/// Provisioning request body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionRequest {
    /// Identity-provider id of the owning user
    pub user_id: String,
    /// Email used to derive the slug
    #[serde(default)]
    pub email: Option<String>,
    /// Display name for the organization
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Provisioning response body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionResponse {
    /// Id of the organization owned by the user
    pub organization_id: String,
    /// Whether this call created the organization
    pub created: bool,
}

/// Build the organization routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/organizations", post(provision_handler))
        .route("/api/v1/organizations/{owner_id}", get(by_owner_handler))
        .route(
            "/api/v1/organizations/{org_id}/profile",
            get(get_profile_handler).put(update_profile_handler),
        )
        .route(
            "/api/v1/organizations/{org_id}/profile/complete",
            post(complete_setup_handler),
        )
        .route(
            "/api/v1/organizations/{org_id}/dashboard",
            get(dashboard_handler),
        )
}

/// POST /api/v1/organizations - Idempotent organization provisioning
///
/// Returns the organization owned by `userId`, creating it (and its
/// profile) on first sight. Concurrent first calls converge on one row.
async fn provision_handler(
    State(state): State<AppState>,
    Json(body): Json<ProvisionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.store.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        store.ensure_organization(&body.user_id, body.email.as_deref(), body.full_name.as_deref())
    })
    .await??;

    let response = ProvisionResponse {
        organization_id: outcome.organization.id,
        created: outcome.created,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// GET /api/v1/organizations/{owner_id} - Lookup by owning user
async fn by_owner_handler(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.store.clone();
    let lookup = owner_id.clone();
    let organization = tokio::task::spawn_blocking(move || store.organization_by_owner(&lookup))
        .await??
        .ok_or_else(|| ApiError::NotFound(format!("no organization for owner {}", owner_id)))?;

    Ok((StatusCode::OK, Json(organization)))
}

/// GET /api/v1/organizations/{org_id}/profile - Get or create the profile
async fn get_profile_handler(
    State(state): State<AppState>,
    Path(org_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.store.clone();
    let profile = tokio::task::spawn_blocking(move || store.get_or_create_profile(&org_id)).await??;

    Ok((StatusCode::OK, Json(profile)))
}

/// PUT /api/v1/organizations/{org_id}/profile - Partial profile update
///
/// Only the fields present in the body change; `updatedAt` refreshes.
async fn update_profile_handler(
    State(state): State<AppState>,
    Path(org_id): Path<String>,
    Json(changes): Json<ProfileChanges>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.store.clone();
    let profile =
        tokio::task::spawn_blocking(move || store.update_profile(&org_id, &changes)).await??;

    Ok((StatusCode::OK, Json(profile)))
}

/// POST /api/v1/organizations/{org_id}/profile/complete - Finish onboarding
async fn complete_setup_handler(
    State(state): State<AppState>,
    Path(org_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.store.clone();
    let profile = tokio::task::spawn_blocking(move || store.complete_setup(&org_id)).await??;

    Ok((StatusCode::OK, Json(profile)))
}

/// GET /api/v1/organizations/{org_id}/dashboard - Headline totals
async fn dashboard_handler(
    State(state): State<AppState>,
    Path(org_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.store.clone();
    let summary = tokio::task::spawn_blocking(move || store.dashboard_summary(&org_id)).await??;

    Ok((StatusCode::OK, Json(summary)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use axum::body::Body;
    use axum::http::Request;
    use infra_store::Store;
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let store = Arc::new(Store::open_in_memory().unwrap());
        AppState::new(Arc::new(ServerConfig::default()), store)
    }

    async fn send_json(
        router: Router,
        method: &str,
        uri: &str,
        body: serde_json::Value,
    ) -> axum::response::Response {
        router
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn send_get(router: Router, uri: &str) -> axum::response::Response {
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
    async fn test_provision_creates_then_reuses() {
        let state = create_test_state();
        let router = routes().with_state(state);

        let body = json!({"userId": "user-1", "email": "maria@tienda.com", "fullName": "Tienda María"});
        let response = send_json(router.clone(), "POST", "/api/v1/organizations", body.clone()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let first = json_body(response).await;
        assert_eq!(first["created"], true);
        let org_id = first["organizationId"].as_str().unwrap().to_string();
        assert!(!org_id.is_empty());

        let response = send_json(router, "POST", "/api/v1/organizations", body).await;
        let second = json_body(response).await;
        assert_eq!(second["created"], false);
        assert_eq!(second["organizationId"], org_id.as_str());
    }

    #[tokio::test]
    async fn test_provision_with_user_id_only() {
        let router = routes().with_state(create_test_state());

        let response = send_json(
            router,
            "POST",
            "/api/v1/organizations",
            json!({"userId": "user-2"}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["created"], true);
    }

    #[tokio::test]
    async fn test_lookup_by_owner() {
        let state = create_test_state();
        let router = routes().with_state(state);

        send_json(
            router.clone(),
            "POST",
            "/api/v1/organizations",
            json!({"userId": "user-1", "fullName": "Tienda María"}),
        )
        .await;

        let response = send_get(router, "/api/v1/organizations/user-1").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["ownerId"], "user-1");
        assert_eq!(body["name"], "Tienda María");
        assert!(body["slug"].as_str().unwrap().contains('-'));
    }

    #[tokio::test]
    async fn test_lookup_unknown_owner_returns_404() {
        let router = routes().with_state(create_test_state());

        let response = send_get(router, "/api/v1/organizations/nobody").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = json_body(response).await;
        assert_eq!(body["error"], "not_found");
    }

    async fn provision(router: Router, user_id: &str) -> String {
        let response = send_json(
            router,
            "POST",
            "/api/v1/organizations",
            json!({"userId": user_id}),
        )
        .await;
        json_body(response).await["organizationId"]
            .as_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_profile_defaults_on_first_get() {
        let router = routes().with_state(create_test_state());
        let org_id = provision(router.clone(), "user-1").await;

        let response = send_get(router, &format!("/api/v1/organizations/{}/profile", org_id)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["idealMonthlySalary"], 0.0);
        assert_eq!(body["province"], "Buenos Aires");
        assert_eq!(body["socioeconomicLevel"], "medium");
        assert_eq!(body["isSetupComplete"], false);
    }

    #[tokio::test]
    async fn test_profile_update_changes_named_fields_only() {
        let router = routes().with_state(create_test_state());
        let org_id = provision(router.clone(), "user-1").await;

        let response = send_json(
            router.clone(),
            "PUT",
            &format!("/api/v1/organizations/{}/profile", org_id),
            json!({"fixedCosts": 85000.0, "province": "Córdoba"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["fixedCosts"], 85000.0);
        assert_eq!(body["province"], "Córdoba");
        assert_eq!(body["idealMonthlySalary"], 0.0);
        assert_eq!(body["isSetupComplete"], false);
    }

    #[tokio::test]
    async fn test_profile_complete_flips_flag() {
        let router = routes().with_state(create_test_state());
        let org_id = provision(router.clone(), "user-1").await;

        let response = send_json(
            router.clone(),
            "POST",
            &format!("/api/v1/organizations/{}/profile/complete", org_id),
            json!({}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["isSetupComplete"], true);
    }

    #[tokio::test]
    async fn test_profile_for_unknown_organization_returns_404() {
        let router = routes().with_state(create_test_state());

        let response = send_get(router, "/api/v1/organizations/missing/profile").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_dashboard_for_empty_organization() {
        let router = routes().with_state(create_test_state());
        let org_id = provision(router.clone(), "user-1").await;

        let response = send_get(
            router,
            &format!("/api/v1/organizations/{}/dashboard", org_id),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["totalProducts"], 0);
        assert_eq!(body["totalEarnings"], 0.0);
    }
}
