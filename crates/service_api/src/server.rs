//! Server startup and binding
//!
//! Provides functionality to start the Axum server with configurable host/port.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use infra_store::{Store, StoreError};

use crate::config::ServerConfig;
use crate::routes;

/// Server instance that can be started
pub struct Server {
    /// Server configuration
    config: Arc<ServerConfig>,
    /// The built router
    router: Router,
}

impl Server {
    /// Create a new server instance, opening the store at the
    /// configured database path.
    pub fn new(config: ServerConfig) -> Result<Self, StoreError> {
        let store = Store::open(&config.db_path)?;
        Ok(Self::with_store(config, store))
    }

    /// Create a server around an existing store.
    ///
    /// Used by tests with an in-memory store; `new` is the production
    /// path.
    pub fn with_store(config: ServerConfig, store: Store) -> Self {
        let config = Arc::new(config);
        let router = routes::build_router(config.clone(), Arc::new(store));

        Self { config, router }
    }

    /// Get the address string the server will bind to
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Run the server
    ///
    /// This is the main entry point for starting the server.
    /// It binds to the configured host/port and serves requests.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let addr = self.socket_addr();
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, self.router).await
    }

    /// Run the server with a specific listener
    ///
    /// This is useful for testing where you want to use a listener bound to port 0
    /// to get a random available port.
    pub async fn run_with_listener(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, self.router).await
    }

    /// Create a test server and return the bound address
    ///
    /// This binds to port 0 to get a random available port, starts the server
    /// in a background task, and returns the actual bound address.
    #[cfg(test)]
    pub async fn spawn_test_server(
        config: ServerConfig,
    ) -> (std::net::SocketAddr, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let store = Store::open_in_memory().unwrap();
        let server = Self::with_store(config, store);
        let handle = tokio::spawn(async move {
            server.run_with_listener(listener).await.ok();
        });

        // Give the server a moment to start
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        (addr, handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use precio_core::model::CostModel;
    use reqwest::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_server_socket_addr() {
        let mut config = ServerConfig::default();
        config.host = "127.0.0.1".to_string();
        config.port = 3000;

        let server = Server::with_store(config, Store::open_in_memory().unwrap());

        assert_eq!(server.socket_addr(), "127.0.0.1:3000");
    }

    #[tokio::test]
    async fn test_server_config_access() {
        let mut config = ServerConfig::default();
        config.port = 9999;

        let server = Server::with_store(config, Store::open_in_memory().unwrap());

        assert_eq!(server.config().port, 9999);
    }

    #[tokio::test]
    async fn test_server_health_endpoint() {
        let (addr, handle) = Server::spawn_test_server(ServerConfig::default()).await;

        let client = reqwest::Client::new();
        let response = client
            .get(format!("http://{}/health", addr))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["status"], "healthy");

        handle.abort();
    }

    #[tokio::test]
    async fn test_server_ready_endpoint() {
        let (addr, handle) = Server::spawn_test_server(ServerConfig::default()).await;

        let client = reqwest::Client::new();
        let response = client
            .get(format!("http://{}/ready", addr))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["ready"], true);

        handle.abort();
    }

    #[tokio::test]
    async fn test_analysis_endpoint_over_http() {
        let (addr, handle) = Server::spawn_test_server(ServerConfig::default()).await;

        let client = reqwest::Client::new();
        let response = client
            .post(format!("http://{}/api/v1/analysis", addr))
            .json(&CostModel::starter())
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = response.json().await.unwrap();
        assert!(body["analysis"]["finalPrice"].as_f64().unwrap() > 0.0);
        assert!(body["recommendations"].is_array());

        handle.abort();
    }

    #[tokio::test]
    async fn test_full_tenant_flow_over_http() {
        let (addr, handle) = Server::spawn_test_server(ServerConfig::default()).await;
        let client = reqwest::Client::new();
        let base = format!("http://{}/api/v1", addr);

        // Provision
        let response = client
            .post(format!("{}/organizations", base))
            .json(&json!({"userId": "user-1", "email": "maria@tienda.com", "fullName": "Tienda María"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["created"], true);
        let org_id = body["organizationId"].as_str().unwrap().to_string();

        // Provision again: same organization, not created
        let response = client
            .post(format!("{}/organizations", base))
            .json(&json!({"userId": "user-1"}))
            .send()
            .await
            .unwrap();
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["created"], false);
        assert_eq!(body["organizationId"], org_id.as_str());

        // Update the profile
        let response = client
            .put(format!("{}/organizations/{}/profile", base, org_id))
            .json(&json!({"fixedCosts": 85000.0, "idealMonthlySalary": 450000.0}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["fixedCosts"], 85000.0);

        // Save a product
        let response = client
            .post(format!("{}/organizations/{}/products", base, org_id))
            .json(&CostModel::starter())
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        // List and check the dashboard
        let response = client
            .get(format!("{}/organizations/{}/products", base, org_id))
            .send()
            .await
            .unwrap();
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body.as_array().unwrap().len(), 1);

        let response = client
            .get(format!("{}/organizations/{}/dashboard", base, org_id))
            .send()
            .await
            .unwrap();
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["totalProducts"], 1);
        assert_eq!(body["fixedCosts"], 85000.0);

        handle.abort();
    }

    #[tokio::test]
    async fn test_session_gate_over_http() {
        let (addr, handle) = Server::spawn_test_server(ServerConfig::default()).await;
        let client = reqwest::Client::new();
        let base = format!("http://{}/api/v1", addr);

        // Waiting before any signal times out
        let response = client
            .get(format!("{}/sessions/user-1?timeout_ms=100", base))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "session_timeout");

        // Signal, then the same wait succeeds
        let response = client
            .post(format!("{}/sessions/user-1/ready", base))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = client
            .get(format!("{}/sessions/user-1?timeout_ms=100", base))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["ready"], true);

        handle.abort();
    }

    #[tokio::test]
    async fn test_server_unknown_route_returns_404() {
        let (addr, handle) = Server::spawn_test_server(ServerConfig::default()).await;

        let client = reqwest::Client::new();
        let response = client
            .get(format!("http://{}/unknown/path", addr))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        handle.abort();
    }

    #[tokio::test]
    async fn test_multiple_servers_on_different_ports() {
        let (addr1, handle1) = Server::spawn_test_server(ServerConfig::default()).await;
        let (addr2, handle2) = Server::spawn_test_server(ServerConfig::default()).await;

        assert_ne!(addr1.port(), addr2.port());

        let client = reqwest::Client::new();

        let response1 = client
            .get(format!("http://{}/health", addr1))
            .send()
            .await
            .unwrap();
        assert_eq!(response1.status(), StatusCode::OK);

        let response2 = client
            .get(format!("http://{}/health", addr2))
            .send()
            .await
            .unwrap();
        assert_eq!(response2.status(), StatusCode::OK);

        handle1.abort();
        handle2.abort();
    }
}
