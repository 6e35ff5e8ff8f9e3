//! Reference data and fault-injection handlers.

use crate::envelope::Envelope;
use crate::error::Result;
use crate::mock_api::fixtures::FixtureStore;
use crate::mock_api::request::MockRequest;
use crate::mock_api::router::PathParams;

pub const MSG_SERVER_ERROR: &str = "Erreur interne du serveur";

/// GET /races
pub fn list_races(
    store: &FixtureStore,
    _request: &MockRequest,
    _params: &PathParams,
) -> Result<Envelope> {
    Envelope::success(store.races())
}

/// GET /types-animaux
pub fn list_types_animaux(
    store: &FixtureStore,
    _request: &MockRequest,
    _params: &PathParams,
) -> Result<Envelope> {
    Envelope::success(store.types_animaux())
}

/// GET /error-test: always 500, for exercising client error paths.
pub fn error_test(
    _store: &FixtureStore,
    _request: &MockRequest,
    _params: &PathParams,
) -> Result<Envelope> {
    Ok(Envelope::server_error(MSG_SERVER_ERROR))
}
