//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::LineageClient;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// # Example
///
/// ```ignore
/// use lineage::{LineageClient, Elevage, Get};
///
/// let client = LineageClient::from_env()?;
/// let elevage = Elevage::get(&client, 1).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity.
    type Id;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns [`LineageError::NotFound`](crate::LineageError::NotFound) if the
    /// backend answers 404, or another error if the request fails.
    async fn get(client: &LineageClient, id: Self::Id) -> Result<Self>;
}
