//! User endpoint handlers.

use crate::envelope::Envelope;
use crate::error::Result;
use crate::mock_api::fixtures::FixtureStore;
use crate::mock_api::handlers::{is_authenticated, Validator, MSG_TOKEN_REQUIRED};
use crate::mock_api::request::MockRequest;
use crate::mock_api::router::PathParams;
use crate::{User, UserParams, USER_ACTIVE};

/// GET /users (auth-gated)
pub fn list_users(
    store: &FixtureStore,
    request: &MockRequest,
    _params: &PathParams,
) -> Result<Envelope> {
    if !is_authenticated(request) {
        return Ok(Envelope::unauthorized(MSG_TOKEN_REQUIRED));
    }
    Envelope::success(store.users())
}

/// POST /users
pub fn create_user(
    store: &FixtureStore,
    request: &MockRequest,
    _params: &PathParams,
) -> Result<Envelope> {
    let params: UserParams = request.json_body()?;

    if let Some(invalid) = Validator::new()
        .require_text("nom", params.nom.as_deref(), "Le nom est requis")
        .require_text("email", params.email.as_deref(), "L'email est requis")
        .finish()
    {
        return Ok(invalid);
    }

    let user = User {
        id: store.next_user_id(),
        nom: params.nom.unwrap_or_default(),
        email: params.email.unwrap_or_default(),
        status: params.status.unwrap_or(USER_ACTIVE),
        role: params.role.unwrap_or_default(),
    };
    Envelope::created(&user)
}
