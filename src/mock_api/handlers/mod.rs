//! Request handlers for the mock API.
//!
//! Every handler is a plain function of the fixture store, the request and
//! the extracted path parameters. Expected conditions (bad credentials,
//! missing fields, unknown ids) come back as error envelopes; only
//! unexpected failures such as unreadable JSON are returned as `Err`.

pub mod animals;
pub mod auth;
pub mod elevages;
pub mod reference;
pub mod users;

use crate::envelope::{Envelope, FieldErrors};
use crate::error::Result;
use crate::mock_api::fixtures::FixtureStore;
use crate::mock_api::request::MockRequest;
use crate::mock_api::router::{Endpoint, PathParams};

/// Substring an `Authorization` header must contain to pass auth-gated reads.
pub const MOCK_TOKEN_MARKER: &str = "mock-token";

pub const MSG_TOKEN_REQUIRED: &str = "Token d'authentification requis";

/// Run the handler for `endpoint`.
pub fn handle(
    endpoint: Endpoint,
    store: &FixtureStore,
    request: &MockRequest,
    params: &PathParams,
) -> Result<Envelope> {
    match endpoint {
        Endpoint::Login => auth::login(store, request, params),
        Endpoint::Register => auth::register(store, request, params),
        Endpoint::Logout => auth::logout(store, request, params),
        Endpoint::ListUsers => users::list_users(store, request, params),
        Endpoint::CreateUser => users::create_user(store, request, params),
        Endpoint::ListElevages => elevages::list_elevages(store, request, params),
        Endpoint::GetElevage => elevages::get_elevage(store, request, params),
        Endpoint::CreateElevage => elevages::create_elevage(store, request, params),
        Endpoint::UpdateElevage => elevages::update_elevage(store, request, params),
        Endpoint::DeleteElevage => elevages::delete_elevage(store, request, params),
        Endpoint::ListAnimals => animals::list_animals(store, request, params),
        Endpoint::CreateAnimal => animals::create_animal(store, request, params),
        Endpoint::ListRaces => reference::list_races(store, request, params),
        Endpoint::ListTypesAnimaux => reference::list_types_animaux(store, request, params),
        Endpoint::ErrorTest => reference::error_test(store, request, params),
    }
}

/// Check the `Authorization` header carries a mock token.
pub fn is_authenticated(request: &MockRequest) -> bool {
    request
        .authorization()
        .map(|value| value.contains(MOCK_TOKEN_MARKER))
        .unwrap_or(false)
}

/// Collects per-field validation messages.
///
/// Every checked field gets an entry, empty when the field is valid, so the
/// 422 body always lists the full set of required fields.
#[derive(Debug, Default)]
pub(crate) struct Validator {
    errors: FieldErrors,
    failed: bool,
}

impl Validator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Require a non-empty string.
    pub(crate) fn require_text(self, field: &str, value: Option<&str>, message: &str) -> Self {
        let present = value.map(|v| !v.is_empty()).unwrap_or(false);
        self.check(field, present, message)
    }

    /// Require any value.
    pub(crate) fn require<T>(self, field: &str, value: Option<&T>, message: &str) -> Self {
        self.check(field, value.is_some(), message)
    }

    fn check(mut self, field: &str, ok: bool, message: &str) -> Self {
        let messages = self.errors.entry(field.to_string()).or_default();
        if !ok {
            messages.push(message.to_string());
            self.failed = true;
        }
        self
    }

    /// `Some(422 envelope)` if any check failed.
    pub(crate) fn finish(self) -> Option<Envelope> {
        self.failed.then(|| Envelope::validation(self.errors))
    }
}
