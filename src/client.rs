//! AnimaLineage API client.
//!
//! Low-level HTTP client that handles authentication and envelope decoding.
//! Higher-level operations are implemented via traits on entity types.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use url::Url;

use crate::envelope::Envelope;
use crate::error::{LineageError, Result};

const DEFAULT_API_URL: &str = "http://localhost:8000/api";
const USER_AGENT: &str = concat!("lineage/", env!("CARGO_PKG_VERSION"));

/// Interval between readiness probes.
pub const READINESS_INTERVAL: Duration = Duration::from_secs(2);

/// Number of readiness probes before giving up.
pub const READINESS_ATTEMPTS: u32 = 30;

/// Low-level AnimaLineage API client.
///
/// Every response is decoded as an [`Envelope`]; non-2xx envelopes are turned
/// into [`LineageError`] values before they reach the caller.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use lineage::LineageClient;
///
/// # fn example() -> lineage::Result<()> {
/// // Create from environment variables
/// let client = LineageClient::from_env()?;
///
/// // Or configure manually
/// let client = LineageClient::new("http://localhost:8000/api")?
///     .with_token("mock-token-admin");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct LineageClient {
    http: Client,
    base_url: Arc<Url>,
    token: Option<String>,
}

impl std::fmt::Debug for LineageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineageClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl LineageClient {
    /// Create a client from environment variables.
    ///
    /// Uses `LINEAGE_API_URL` for the base URL (defaults to
    /// `http://localhost:8000/api`) and, when set, `LINEAGE_API_TOKEN` as the
    /// bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("LINEAGE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let client = Self::new(&base_url)?;

        Ok(match env::var("LINEAGE_API_TOKEN") {
            Ok(token) if !token.is_empty() => client.with_token(&token),
            _ => client,
        })
    }

    /// Create a new unauthenticated client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(base_url: &str) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(LineageError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: None,
        })
    }

    /// Return a copy of this client that sends `token` as a bearer token.
    #[must_use]
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The bearer token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Envelope> {
        let url = self.base_url.join(path)?;
        self.send(self.http.get(url)).await
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Envelope> {
        let url = self.base_url.join(path)?;
        self.send(self.http.get(url).query(query)).await
    }

    /// Make a POST request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Envelope> {
        let url = self.base_url.join(path)?;
        self.send(self.http.post(url).json(body)).await
    }

    /// Make a PUT request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Envelope> {
        let url = self.base_url.join(path)?;
        self.send(self.http.put(url).json(body)).await
    }

    /// Make a DELETE request.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<Envelope> {
        let url = self.base_url.join(path)?;
        self.send(self.http.delete(url)).await
    }

    /// URL of the readiness endpoint, which lives at the server root.
    pub fn health_url(&self) -> Result<Url> {
        Ok(self.base_url.join("/health")?)
    }

    /// Probe the readiness endpoint once.
    pub async fn check_health(&self) -> Result<()> {
        let response = self
            .http
            .get(self.health_url()?)
            .send()
            .await
            .map_err(LineageError::HttpError)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(LineageError::ApiError {
                message: format!("health check returned HTTP {status}"),
                status_code: Some(status.as_u16()),
            })
        }
    }

    /// Poll the readiness endpoint until it answers, at most `attempts` times
    /// with `interval` between probes.
    ///
    /// # Errors
    ///
    /// Returns [`LineageError::NotReady`] if no probe succeeds.
    pub async fn wait_until_ready(&self, attempts: u32, interval: Duration) -> Result<()> {
        for attempt in 1..=attempts {
            match self.check_health().await {
                Ok(()) => {
                    tracing::info!(attempt, "backend is ready");
                    return Ok(());
                }
                Err(e) => {
                    tracing::debug!(attempt, attempts, error = %e, "backend not ready yet");
                }
            }

            if attempt < attempts {
                tokio::time::sleep(interval).await;
            }
        }

        tracing::warn!(attempts, "backend never became ready");
        Err(LineageError::NotReady { attempts })
    }

    /// Attach auth, send, and decode the envelope.
    async fn send(&self, request: RequestBuilder) -> Result<Envelope> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(LineageError::HttpError)?;
        let status = response.status();
        let body = response.text().await.map_err(LineageError::HttpError)?;

        let envelope = match serde_json::from_str::<Envelope>(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => return Err(LineageError::ParseError(e)),
            Err(_) => {
                return Err(LineageError::ApiError {
                    message: if body.is_empty() {
                        format!("HTTP {status}")
                    } else {
                        body
                    },
                    status_code: Some(status.as_u16()),
                })
            }
        };

        envelope.error_for_status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = LineageClient::new("http://localhost:8000/api")
            .unwrap()
            .with_token("mock-token-admin");
        let debug = format!("{:?}", client);
        assert!(debug.contains("LineageClient"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("mock-token-admin"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = LineageClient::new("http://localhost:8000/api").unwrap();
        let client2 = LineageClient::new("http://localhost:8000/api/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_health_url_is_at_root() {
        let client = LineageClient::new("http://localhost:8000/api").unwrap();
        assert_eq!(
            client.health_url().unwrap().as_str(),
            "http://localhost:8000/health"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = LineageClient::new("not a url");
        assert!(matches!(result, Err(LineageError::UrlError(_))));
    }

    #[tokio::test]
    async fn test_wait_until_ready_gives_up() {
        // Port 9 (discard) is never served in the test environment.
        let client = LineageClient::new("http://127.0.0.1:9/api").unwrap();
        let result = client
            .wait_until_ready(2, Duration::from_millis(10))
            .await;
        assert!(matches!(result, Err(LineageError::NotReady { attempts: 2 })));
    }
}
