//! Update trait for modifying entities.

use async_trait::async_trait;

use crate::client::LineageClient;
use crate::error::Result;

/// Update an existing entity.
///
/// Updates are partial: fields left as `None` in the params are kept by the
/// backend.
///
/// # Example
///
/// ```ignore
/// use lineage::{LineageClient, Elevage, ElevageUpdateParams, Update};
///
/// let client = LineageClient::from_env()?;
/// let updated = Elevage::update(
///     &client,
///     1,
///     ElevageUpdateParams {
///         telephone: Some("0102030405".to_string()),
///         ..Default::default()
///     },
/// ).await?;
/// ```
#[async_trait]
pub trait Update: Sized {
    /// The ID type for this entity.
    type Id;

    /// Parameters for the update.
    type Params;

    /// Update the entity and return the updated version.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn update(client: &LineageClient, id: Self::Id, params: Self::Params) -> Result<Self>;
}
