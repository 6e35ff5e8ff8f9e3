//! AnimaLineage mock backend and API client library.
//!
//! A Rust library for working against the AnimaLineage livestock pedigree
//! REST API: a deterministic mock backend for tests and demos, plus a typed
//! client using a trait-based architecture where each operation (Get, List,
//! Create, Update, Delete) is defined as a trait that entity types implement.
//!
//! # Quick Start
//!
//! ```no_run
//! use lineage::{login, Credentials, Elevage, LineageClient, List};
//!
//! #[tokio::main]
//! async fn main() -> lineage::Result<()> {
//!     // Create client from environment variables
//!     let client = LineageClient::from_env()?;
//!
//!     // Log in and reuse the token
//!     let session = login(
//!         &client,
//!         &Credentials::new("admin@animalineage.com", "admin123"),
//!     )
//!     .await?;
//!     let client = client.with_token(&session.token);
//!
//!     // List all elevages
//!     let elevages = Elevage::list_all(&client).await?;
//!     println!("Found {} elevages", elevages.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`mock_api`] - transport-free router, handlers and fixture store
//! - `mock_server` - the same router served over HTTP with axum
//!   (feature `test-server`, on by default)
//! - [`LineageClient`] with the [`Get`], [`List`], [`Create`], [`Update`]
//!   and [`Delete`] traits
//! - [`MaintenanceWatch`] for tracking backend availability
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `LINEAGE_API_URL` (optional) - Base URL (defaults to `http://localhost:8000/api`)
//! - `LINEAGE_API_TOKEN` (optional) - Bearer token sent with every request
//!
//! The mock backend reads `LINEAGE_MOCK_ADDR`, `LINEAGE_MOCK_BASE_PATH` and
//! `LINEAGE_MOCK_STRICT`; see [`MockConfig`].

mod client;
mod config;
mod envelope;
mod error;
mod maintenance;
mod models;
mod traits;

pub mod cli;
pub mod mock_api;
pub mod output;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{LineageClient, READINESS_ATTEMPTS, READINESS_INTERVAL};
pub use config::{MockConfig, UnhandledPolicy};
pub use envelope::{
    Envelope, FieldErrors, STATUS_CREATED, STATUS_NOT_FOUND, STATUS_OK, STATUS_SERVER_ERROR,
    STATUS_UNAUTHORIZED, STATUS_UNPROCESSABLE,
};
pub use error::{LineageError, Result};
pub use maintenance::{BackendStatus, MaintenanceWatch, AUTO_RETRY_INTERVAL};

// Re-export traits
pub use traits::{Create, Delete, Get, List, Update};

// Re-export models
pub use models::{
    // Users and authentication
    Credentials,
    RegisterParams,
    Role,
    Session,
    User,
    UserParams,
    USER_ACTIVE,
    USER_PENDING,
    // Elevages
    Elevage,
    ElevageListQuery,
    ElevageParams,
    ElevageUpdateParams,
    // Animals
    Animal,
    AnimalListQuery,
    AnimalParams,
    Sexe,
    // Reference data
    Race,
    TypeAnimal,
};

// Re-export convenience functions
pub use models::{login, logout, register};
