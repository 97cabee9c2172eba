//! Test server harness for E2E testing
//!
//! Provides TestAuthServer for spawning real auth service instances in tests.

use crate::fixtures::{test_config, TEST_PASSWORD, TEST_USERNAME};
use auth_service::auth::{TokenIssuer, TokenVerifier};
use auth_service::config::Config;
use auth_service::crypto::SigningKeyStore;
use auth_service::models::{ApiResponse, TokenData};
use auth_service::routes::{self, AppState};
use auth_service::services::StaticAccount;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Test harness for spawning the auth service in E2E tests
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_login_flow_e2e() -> Result<()> {
///     let server = TestAuthServer::spawn_default().await?;
///
///     let token = server.login_token().await?;
///     let response = server
///         .client()
///         .get(format!("{}/home", server.url()))
///         .bearer_auth(&token)
///         .send()
///         .await?;
///
///     assert_eq!(response.status(), 200);
///     Ok(())
/// }
/// ```
pub struct TestAuthServer {
    addr: SocketAddr,
    client: reqwest::Client,
    handle: JoinHandle<()>,
}

impl TestAuthServer {
    /// Spawn a server with the fixed test configuration
    pub async fn spawn_default() -> Result<Self, anyhow::Error> {
        Self::spawn(test_config()).await
    }

    /// Spawn a new test server instance
    ///
    /// The server will:
    /// - Bind to a random available port (127.0.0.1:0)
    /// - Build the key store, issuer and verifier from `config`
    /// - Start the HTTP server in the background
    pub async fn spawn(config: Config) -> Result<Self, anyhow::Error> {
        let key_store = Arc::new(
            SigningKeyStore::from_config(&config)
                .map_err(|e| anyhow::anyhow!("Failed to initialize key store: {}", e))?,
        );
        let validator = Arc::new(StaticAccount::from_config(&config));

        let state = Arc::new(AppState {
            issuer: Arc::new(TokenIssuer::from_config(
                &config,
                key_store.clone(),
                validator,
            )),
            verifier: Arc::new(TokenVerifier::new(key_store)),
        });

        // Build routes using auth-service's real route builder
        let app = routes::build_routes(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        // Spawn server in background
        let handle = tokio::spawn(async move {
            // Use into_make_service_with_connect_info so the access log sees peers
            let make_service = app.into_make_service_with_connect_info::<SocketAddr>();
            if let Err(e) = axum::serve(listener, make_service).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            client: reqwest::Client::new(),
            handle,
        })
    }

    /// Get the base URL of the test server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Shared HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// POST /auth with the given credentials and return the parsed envelope
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<ApiResponse<TokenData>, anyhow::Error> {
        let response = self
            .client
            .post(format!("{}/auth", self.url()))
            .json(&serde_json::json!({"username": username, "password": password}))
            .send()
            .await?;

        anyhow::ensure!(
            response.status() == reqwest::StatusCode::OK,
            "login returned HTTP {}",
            response.status()
        );

        Ok(response.json().await?)
    }

    /// Log in as the test account and return the issued token
    pub async fn login_token(&self) -> Result<String, anyhow::Error> {
        let envelope = self.login(TEST_USERNAME, TEST_PASSWORD).await?;

        envelope
            .data
            .map(|data| data.token)
            .ok_or_else(|| anyhow::anyhow!("login failed: {} {}", envelope.code, envelope.msg))
    }
}

impl Drop for TestAuthServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
