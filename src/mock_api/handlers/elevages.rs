//! Elevage endpoint handlers.

use chrono::Utc;
use serde_json::Value;

use crate::envelope::Envelope;
use crate::error::{LineageError, Result};
use crate::mock_api::fixtures::FixtureStore;
use crate::mock_api::handlers::{is_authenticated, Validator, MSG_TOKEN_REQUIRED};
use crate::mock_api::request::MockRequest;
use crate::mock_api::router::PathParams;
use crate::{Elevage, ElevageParams};

pub const MSG_NOT_FOUND: &str = "Élevage non trouvé";
pub const MSG_DELETED: &str = "Élevage supprimé avec succès";

/// Owner assigned when a create request does not name one.
const DEFAULT_OWNER_ID: u64 = 1;

fn lookup<'a>(store: &'a FixtureStore, params: &PathParams) -> Option<&'a Elevage> {
    params.id("id").and_then(|id| store.find_elevage(id))
}

/// GET /elevages (auth-gated, optional `search`)
pub fn list_elevages(
    store: &FixtureStore,
    request: &MockRequest,
    _params: &PathParams,
) -> Result<Envelope> {
    if !is_authenticated(request) {
        return Ok(Envelope::unauthorized(MSG_TOKEN_REQUIRED));
    }

    let elevages = store.search_elevages(request.non_empty_query_param("search"));
    Envelope::success(&elevages)
}

/// GET /elevages/:id
pub fn get_elevage(
    store: &FixtureStore,
    _request: &MockRequest,
    params: &PathParams,
) -> Result<Envelope> {
    match lookup(store, params) {
        Some(elevage) => Envelope::success(elevage),
        None => Ok(Envelope::not_found(MSG_NOT_FOUND)),
    }
}

/// POST /elevages
pub fn create_elevage(
    store: &FixtureStore,
    request: &MockRequest,
    _params: &PathParams,
) -> Result<Envelope> {
    let body: ElevageParams = request.json_body()?;

    if let Some(invalid) = Validator::new()
        .require_text("nom", body.nom.as_deref(), "Le nom est requis")
        .require_text("adresse", body.adresse.as_deref(), "L'adresse est requise")
        .finish()
    {
        return Ok(invalid);
    }

    let elevage = Elevage {
        id: store.next_elevage_id(),
        nom: body.nom.unwrap_or_default(),
        adresse: body.adresse.unwrap_or_default(),
        telephone: body.telephone,
        email: body.email,
        user_id: body.user_id.unwrap_or(DEFAULT_OWNER_ID),
        created_at: Utc::now(),
    };
    Envelope::created(&elevage)
}

/// PUT /elevages/:id
///
/// Shallow merge: keys present in the body replace the stored values, every
/// other key is kept.
pub fn update_elevage(
    store: &FixtureStore,
    request: &MockRequest,
    params: &PathParams,
) -> Result<Envelope> {
    let Some(elevage) = lookup(store, params) else {
        return Ok(Envelope::not_found(MSG_NOT_FOUND));
    };

    let mut merged = serde_json::to_value(elevage)?;
    match request.json_body::<Value>()? {
        Value::Null => {}
        Value::Object(changes) => {
            if let Value::Object(fields) = &mut merged {
                fields.extend(changes);
            }
        }
        other => {
            return Err(LineageError::InvalidBody(format!(
                "expected a JSON object, got {other}"
            )))
        }
    }

    Envelope::success(&merged)
}

/// DELETE /elevages/:id
pub fn delete_elevage(
    store: &FixtureStore,
    _request: &MockRequest,
    params: &PathParams,
) -> Result<Envelope> {
    Ok(match lookup(store, params) {
        Some(_) => Envelope::message(200, MSG_DELETED),
        None => Envelope::not_found(MSG_NOT_FOUND),
    })
}
