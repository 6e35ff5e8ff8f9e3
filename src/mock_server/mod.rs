//! Mock AnimaLineage API server for E2E testing.
//!
//! This module serves the [`mock_api`](crate::mock_api) router over real HTTP
//! so that the client, the CLI, or any other HTTP consumer can be tested
//! against a deterministic backend.
//!
//! # Example
//!
//! ```ignore
//! use lineage::mock_server::MockServer;
//! use lineage::{LineageClient, Elevage, Get};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = LineageClient::new(&server.api_url()).unwrap();
//!
//!     // Server comes with the seed fixtures
//!     let elevage = Elevage::get(&client, 1).await.unwrap();
//!     assert_eq!(elevage.nom, "Élevage Test 1");
//!
//!     server.shutdown().await;
//! }
//! ```

mod server;
mod state;

pub use crate::mock_api::{FixtureStore, Fixtures};
pub use server::{serve, MockServer};
pub use state::MockState;
