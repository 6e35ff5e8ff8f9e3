//! Mock AnimaLineage API server.
//!
//! Provides an axum-based HTTP server in front of the [`mock_api`](crate::mock_api)
//! router. Every request except `/health` goes through a single fallback
//! handler that converts it to a [`MockRequest`] and writes the resulting
//! envelope back with its status code.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::state::MockState;
use crate::config::{MockConfig, UnhandledPolicy};
use crate::envelope::Envelope;
use crate::mock_api::{Dispatch, FixtureStore, Method, MockRequest};

type SharedState = Arc<RwLock<MockState>>;

/// A mock AnimaLineage API server for testing.
///
/// The server runs in the background on a random local port. Typical test
/// lifecycle: start once, call [`reset_overrides`](Self::reset_overrides)
/// after each test, and [`shutdown`](Self::shutdown) at the end.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Path prefix of the simulated endpoints.
    base_path: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: SharedState,
}

impl MockServer {
    /// Start a new mock server with the seed fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `api_url()` to get the base URL for a client.
    pub async fn start() -> Self {
        Self::with_state(MockState::seeded()).await
    }

    /// Start a mock server with no data.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::empty()).await
    }

    /// Start a mock server with custom state.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound; use [`try_start`](Self::try_start)
    /// to handle that case.
    pub async fn with_state(state: MockState) -> Self {
        Self::try_start(state, SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("Failed to bind mock server")
    }

    /// Start a mock server with custom state on `addr`.
    pub async fn try_start(state: MockState, addr: SocketAddr) -> io::Result<Self> {
        let base_path = state.router.base_path().trim_end_matches('/').to_string();
        let shared_state = state.shared();
        let app = create_router(shared_state.clone());

        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "mock server stopped");
            }
        });

        tracing::debug!(%addr, "mock server started");

        Ok(Self {
            url: format!("http://{}", addr),
            base_path,
            handle,
            state: shared_state,
        })
    }

    /// Get the root URL of the mock server (where `/health` lives).
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the URL of the simulated API, including the base path.
    ///
    /// Use this URL when creating a `LineageClient` for testing.
    pub fn api_url(&self) -> String {
        format!("{}{}", self.url, self.base_path)
    }

    /// Get access to the server's shared state.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Answer `method pattern` with a fixed envelope until the next reset.
    pub async fn use_override(&self, method: Method, pattern: &str, response: Envelope) {
        self.state
            .write()
            .await
            .use_override(method, pattern, response);
    }

    /// Drop every per-test override.
    pub async fn reset_overrides(&self) {
        self.state.write().await.reset_overrides();
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }
}

/// Run a mock backend in the foreground until Ctrl-C.
pub async fn serve(config: &MockConfig, fixtures: FixtureStore) -> io::Result<()> {
    let state = MockState::new(fixtures)
        .with_base_path(&config.base_path)
        .with_unhandled(config.unhandled)
        .shared();

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        base_path = %config.base_path,
        "mock AnimaLineage backend listening"
    );

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down mock backend");
        })
        .await
}

/// Create the axum router.
fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .fallback(dispatch)
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

/// Route every other request through the mock API.
async fn dispatch(
    State(state): State<SharedState>,
    method: axum::http::Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let method = match method.as_str().parse::<Method>() {
        Ok(method) => method,
        Err(e) => return envelope_response(Envelope::message(405, e.to_string())),
    };

    let mut request = MockRequest::new(method, uri.path()).with_body(body.to_vec());
    if let Some(query) = uri.query() {
        request = request.with_query_string(query);
    }
    for (name, value) in &headers {
        if let Ok(value) = value.to_str() {
            request = request.with_header(name.as_str(), value);
        }
    }

    let state = state.read().await;
    match state.dispatch(&request) {
        Ok(Dispatch::Handled(envelope)) => envelope_response(envelope),
        Ok(Dispatch::Unhandled) => unhandled_response(state.unhandled, &request),
        Err(e) => {
            tracing::error!(
                method = %request.method(),
                path = request.path(),
                error = %e,
                "mock handler failed"
            );
            envelope_response(Envelope::server_error(e.to_string()))
        }
    }
}

fn unhandled_response(policy: UnhandledPolicy, request: &MockRequest) -> Response {
    let message = format!(
        "Aucun gestionnaire pour {} {}",
        request.method(),
        request.path()
    );

    match policy {
        UnhandledPolicy::Warn => {
            tracing::warn!(method = %request.method(), path = request.path(), "unhandled request");
            envelope_response(Envelope::not_found(message))
        }
        UnhandledPolicy::Error => {
            tracing::error!(method = %request.method(), path = request.path(), "unhandled request");
            envelope_response(Envelope::server_error(message))
        }
        UnhandledPolicy::Bypass => envelope_response(Envelope::not_found(message)),
    }
}

fn envelope_response(envelope: Envelope) -> Response {
    let status =
        StatusCode::from_u16(envelope.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(envelope)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{Elevage, Get, LineageClient, List};

    async fn call(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_router_writes_envelope_status() {
        let app = create_router(MockState::seeded().shared());

        let (status, body) = call(
            app,
            Request::get("/api/elevages").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body,
            json!({"status": 401, "message": "Token d'authentification requis"})
        );
    }

    #[tokio::test]
    async fn test_router_passes_headers_query_and_body() {
        let state = MockState::seeded().shared();

        let (status, body) = call(
            create_router(state.clone()),
            Request::get("/api/elevages?search=Lyon")
                .header("authorization", "Bearer mock-token-admin")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        let (status, body) = call(
            create_router(state),
            Request::put("/api/elevages/1")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"nom":"Renommé"}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["nom"], "Renommé");
        assert_eq!(body["data"]["adresse"], "123 Rue de la Ferme, 75001 Paris");
    }

    #[tokio::test]
    async fn test_router_surfaces_handler_failures() {
        let app = create_router(MockState::seeded().shared());

        let (status, body) = call(
            app,
            Request::post("/api/auth/login")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], 500);
    }

    #[tokio::test]
    async fn test_unhandled_policies() {
        for (policy, expected) in [
            (UnhandledPolicy::Warn, StatusCode::NOT_FOUND),
            (UnhandledPolicy::Bypass, StatusCode::NOT_FOUND),
            (UnhandledPolicy::Error, StatusCode::INTERNAL_SERVER_ERROR),
        ] {
            let app = create_router(MockState::seeded().with_unhandled(policy).shared());
            let (status, body) = call(
                app,
                Request::get("/api/pedigrees").body(Body::empty()).unwrap(),
            )
            .await;
            assert_eq!(status, expected, "{policy:?}");
            assert_eq!(body["message"], "Aucun gestionnaire pour GET /api/pedigrees");
        }
    }

    #[tokio::test]
    async fn test_server_starts_and_responds() {
        let server = MockServer::start().await;

        // Server should be accessible
        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/health", server.url()))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "ok");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_get_elevage_with_lineage_client() {
        let server = MockServer::start().await;
        let client = LineageClient::new(&server.api_url()).unwrap();

        let elevage = Elevage::get(&client, 1)
            .await
            .expect("Failed to get elevage");

        assert_eq!(elevage.nom, "Élevage Test 1");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_empty_server() {
        let server = MockServer::start_empty().await;
        let client = LineageClient::new(&server.api_url())
            .unwrap()
            .with_token("mock-token-admin");

        let elevages = Elevage::list_all(&client).await.unwrap();
        assert!(elevages.is_empty());

        let result = Elevage::get(&client, 1).await;
        assert!(result.is_err());

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_override_and_reset() {
        let server = MockServer::start().await;
        let client = LineageClient::new(&server.api_url()).unwrap();

        server
            .use_override(Method::Get, "/elevages/:id", Envelope::server_error("Panne"))
            .await;
        let err = Elevage::get(&client, 1).await.unwrap_err();
        assert!(err.is_server_failure());

        server.reset_overrides().await;
        assert!(Elevage::get(&client, 1).await.is_ok());

        server.shutdown().await;
    }
}
