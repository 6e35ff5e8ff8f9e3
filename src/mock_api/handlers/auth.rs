//! Authentication endpoint handlers.

use serde::Serialize;

use crate::envelope::Envelope;
use crate::error::Result;
use crate::mock_api::fixtures::FixtureStore;
use crate::mock_api::handlers::Validator;
use crate::mock_api::request::MockRequest;
use crate::mock_api::router::PathParams;
use crate::{Credentials, RegisterParams, Role, User, USER_PENDING};

pub const MSG_BAD_CREDENTIALS: &str = "Identifiants incorrects";
pub const MSG_LOGGED_OUT: &str = "Déconnexion réussie";

#[derive(Debug, Serialize)]
struct LoginResponse<'a> {
    token: &'a str,
    user: &'a User,
}

/// POST /auth/login
pub fn login(store: &FixtureStore, request: &MockRequest, _params: &PathParams) -> Result<Envelope> {
    let credentials: Credentials = request.json_body()?;

    match store.authenticate(credentials.email(), credentials.password()) {
        Some((account, user)) => Envelope::success(&LoginResponse {
            token: &account.token,
            user,
        }),
        None => Ok(Envelope::unauthorized(MSG_BAD_CREDENTIALS)),
    }
}

/// POST /auth/register
pub fn register(
    store: &FixtureStore,
    request: &MockRequest,
    _params: &PathParams,
) -> Result<Envelope> {
    let params: RegisterParams = request.json_body()?;

    if let Some(invalid) = Validator::new()
        .require_text("nom", params.nom.as_deref(), "Le nom est requis")
        .require_text("email", params.email.as_deref(), "L'email est requis")
        .require_text(
            "password",
            params.password.as_deref(),
            "Le mot de passe est requis",
        )
        .finish()
    {
        return Ok(invalid);
    }

    let user = User {
        id: store.next_user_id(),
        nom: params.nom.unwrap_or_default(),
        email: params.email.unwrap_or_default(),
        status: USER_PENDING,
        role: Role::Eleveur,
    };
    Envelope::created(&user)
}

/// POST /auth/logout
pub fn logout(
    _store: &FixtureStore,
    _request: &MockRequest,
    _params: &PathParams,
) -> Result<Envelope> {
    Ok(Envelope::message(200, MSG_LOGGED_OUT))
}
