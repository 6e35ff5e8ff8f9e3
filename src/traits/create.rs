//! Create trait for new entities.

use async_trait::async_trait;

use crate::client::LineageClient;
use crate::error::Result;

/// Create a new entity.
#[async_trait]
pub trait Create: Sized {
    /// Parameters for the new entity.
    type Params;

    /// Create the entity and return it as the backend stored it.
    ///
    /// # Errors
    ///
    /// Returns [`LineageError::Validation`](crate::LineageError::Validation)
    /// when required fields are missing.
    async fn create(client: &LineageClient, params: Self::Params) -> Result<Self>;
}
