//! Simulated AnimaLineage REST backend.
//!
//! This is the transport-free core: an immutable [`FixtureStore`], an ordered
//! [`Router`] and one handler function per endpoint. It runs synchronously
//! and can be driven directly from unit tests, or over HTTP through
//! [`mock_server`](crate::mock_server).
//!
//! # Example
//!
//! ```
//! use lineage::mock_api::{Dispatch, FixtureStore, MockRequest, Router};
//!
//! let store = FixtureStore::seeded();
//! let router = Router::default();
//!
//! let request = MockRequest::get("/api/animals?elevage_id=1");
//! match router.dispatch(&store, &request).unwrap() {
//!     Dispatch::Handled(envelope) => assert_eq!(envelope.status(), 200),
//!     Dispatch::Unhandled => unreachable!(),
//! }
//! ```

mod fixtures;
pub mod handlers;
mod request;
mod router;

pub use fixtures::{Account, FixtureStore, Fixtures};
pub use request::{Method, MockRequest};
pub use router::{
    Dispatch, Endpoint, PathParams, PathPattern, Route, RouteMatch, RouteOverride, Router,
    DEFAULT_BASE_PATH,
};
