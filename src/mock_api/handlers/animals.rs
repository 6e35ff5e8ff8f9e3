//! Animal endpoint handlers.

use crate::envelope::Envelope;
use crate::error::Result;
use crate::mock_api::fixtures::FixtureStore;
use crate::mock_api::handlers::Validator;
use crate::mock_api::request::MockRequest;
use crate::mock_api::router::PathParams;
use crate::{Animal, AnimalParams};

/// GET /animals (optional `elevage_id`)
///
/// A filter that is not a number matches nothing.
pub fn list_animals(
    store: &FixtureStore,
    request: &MockRequest,
    _params: &PathParams,
) -> Result<Envelope> {
    let animals = match request.non_empty_query_param("elevage_id") {
        None => store.animals_by_elevage(None),
        Some(raw) => match raw.parse::<u64>() {
            Ok(id) => store.animals_by_elevage(Some(id)),
            Err(_) => Vec::new(),
        },
    };
    Envelope::success(&animals)
}

/// POST /animals
pub fn create_animal(
    store: &FixtureStore,
    request: &MockRequest,
    _params: &PathParams,
) -> Result<Envelope> {
    let body: AnimalParams = request.json_body()?;

    if let Some(invalid) = Validator::new()
        .require_text("nom", body.nom.as_deref(), "Le nom est requis")
        .require("elevage_id", body.elevage_id.as_ref(), "L'élevage est requis")
        .finish()
    {
        return Ok(invalid);
    }

    let animal = Animal {
        id: store.next_animal_id(),
        nom: body.nom.unwrap_or_default(),
        numero: body.numero,
        elevage_id: body.elevage_id.unwrap_or_default(),
        race_id: body.race_id,
        type_animal_id: body.type_animal_id,
        date_naissance: body.date_naissance,
        sexe: body.sexe,
    };
    Envelope::created(&animal)
}
