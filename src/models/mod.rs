//! AnimaLineage model types.

mod animal;
mod elevage;
mod reference;
mod user;

pub use animal::*;
pub use elevage::*;
pub use reference::*;
pub use user::*;

use crate::error::LineageError;

/// Turn a 404 API error into a typed `NotFound` for the given entity.
pub(crate) fn not_found_as(
    err: LineageError,
    entity_type: &'static str,
    id: impl ToString,
) -> LineageError {
    match err {
        LineageError::ApiError {
            status_code: Some(404),
            ..
        } => LineageError::NotFound {
            entity_type,
            id: id.to_string(),
        },
        other => other,
    }
}
