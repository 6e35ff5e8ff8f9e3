//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::client::LineageClient;
use crate::error::Result;

/// List entities, optionally filtered.
///
/// The AnimaLineage API returns whole collections in a single envelope,
/// so there is no paging here.
///
/// # Example
///
/// ```ignore
/// use lineage::{LineageClient, Animal, AnimalListQuery, List};
///
/// let client = LineageClient::from_env()?;
/// let query = AnimalListQuery { elevage_id: Some(1) };
/// let animals = Animal::list(&client, &query).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Query parameters for filtering.
    type Query: Default + Send + Sync;

    /// List entities matching the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the endpoint requires a
    /// token the client does not carry.
    async fn list(client: &LineageClient, query: &Self::Query) -> Result<Vec<Self>>;

    /// List every entity, without filtering.
    async fn list_all(client: &LineageClient) -> Result<Vec<Self>> {
        Self::list(client, &Self::Query::default()).await
    }
}
