//! Mock backend configuration.
//!
//! Values come from environment variables, with CLI flags taking precedence
//! in the `lineage` binary:
//!
//! - `LINEAGE_MOCK_ADDR` - bind address (defaults to `127.0.0.1:0`, a random port)
//! - `LINEAGE_MOCK_BASE_PATH` - path prefix of every endpoint (defaults to `/api`)
//! - `LINEAGE_MOCK_STRICT` - `1`/`true` turns unmatched requests into errors

use std::env;
use std::net::SocketAddr;

use clap::ValueEnum;

use crate::error::{LineageError, Result};
use crate::mock_api::DEFAULT_BASE_PATH;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:0";

/// What the server does with a request no route matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum UnhandledPolicy {
    /// Log a warning and answer 404.
    #[default]
    Warn,
    /// Log an error and answer 500.
    Error,
    /// Answer 404 without logging.
    Bypass,
}

/// Settings for a mock backend instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockConfig {
    pub bind_addr: SocketAddr,
    pub base_path: String,
    pub unhandled: UnhandledPolicy,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            base_path: DEFAULT_BASE_PATH.to_string(),
            unhandled: UnhandledPolicy::Warn,
        }
    }
}

impl MockConfig {
    /// Read the configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `LINEAGE_MOCK_ADDR` is not a valid socket address.
    pub fn from_env() -> Result<Self> {
        let addr = env::var("LINEAGE_MOCK_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = addr.parse().map_err(|e| {
            LineageError::ConfigMissing(format!("LINEAGE_MOCK_ADDR '{addr}' is invalid: {e}"))
        })?;

        let base_path =
            env::var("LINEAGE_MOCK_BASE_PATH").unwrap_or_else(|_| DEFAULT_BASE_PATH.to_string());

        let unhandled = match env::var("LINEAGE_MOCK_STRICT") {
            Ok(v) if is_truthy(&v) => UnhandledPolicy::Error,
            _ => UnhandledPolicy::Warn,
        };

        Ok(Self {
            bind_addr,
            base_path,
            unhandled,
        })
    }

    #[must_use]
    pub fn with_bind_addr(mut self, bind_addr: SocketAddr) -> Self {
        self.bind_addr = bind_addr;
        self
    }

    #[must_use]
    pub fn with_base_path(mut self, base_path: &str) -> Self {
        self.base_path = base_path.to_string();
        self
    }

    #[must_use]
    pub fn with_unhandled(mut self, unhandled: UnhandledPolicy) -> Self {
        self.unhandled = unhandled;
        self
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MockConfig::default();
        assert_eq!(config.base_path, "/api");
        assert_eq!(config.bind_addr.port(), 0);
        assert_eq!(config.unhandled, UnhandledPolicy::Warn);
    }

    #[test]
    fn test_builders() {
        let config = MockConfig::default()
            .with_base_path("/v2")
            .with_unhandled(UnhandledPolicy::Error)
            .with_bind_addr("0.0.0.0:8000".parse().unwrap());
        assert_eq!(config.base_path, "/v2");
        assert_eq!(config.unhandled, UnhandledPolicy::Error);
        assert_eq!(config.bind_addr.port(), 8000);
    }

    #[test]
    fn test_truthy_values() {
        assert!(is_truthy("1"));
        assert!(is_truthy(" TRUE "));
        assert!(!is_truthy("0"));
        assert!(!is_truthy(""));
    }
}
