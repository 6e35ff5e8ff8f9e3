//! Static reference data: breeds and animal types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::LineageClient;
use crate::error::Result;
use crate::traits::List;

/// A breed, attached to one animal type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Race {
    pub id: u64,
    pub nom: String,
    pub type_animal_id: u64,
    #[serde(default)]
    pub description: String,
}

/// A kind of animal (bovin, ovin, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeAnimal {
    pub id: u64,
    pub nom: String,
    #[serde(default)]
    pub description: String,
}

#[async_trait]
impl List for Race {
    type Query = ();

    #[tracing::instrument(skip(client))]
    async fn list(client: &LineageClient, _query: &Self::Query) -> Result<Vec<Self>> {
        client.get("races").await?.into_data()
    }
}

#[async_trait]
impl List for TypeAnimal {
    type Query = ();

    #[tracing::instrument(skip(client))]
    async fn list(client: &LineageClient, _query: &Self::Query) -> Result<Vec<Self>> {
        client.get("types-animaux").await?.into_data()
    }
}
