//! Elevage (farm) model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::LineageClient;
use crate::error::Result;
use crate::models::animal::{Animal, AnimalListQuery};
use crate::models::not_found_as;
use crate::traits::{Create, Delete, Get, List, Update};

/// A farm or breeding operation.
///
/// Elevages own animals (see [`Animal::elevage_id`]) and belong to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Elevage {
    pub id: u64,
    pub nom: String,
    pub adresse: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Owning user. Not checked against the user collection.
    pub user_id: u64,
    pub created_at: DateTime<Utc>,
}

impl Elevage {
    /// Check whether `needle` appears in the name or address, ignoring case.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.nom.to_lowercase().contains(&needle) || self.adresse.to_lowercase().contains(&needle)
    }

    /// Get all animals of this elevage.
    pub async fn animals(&self, client: &LineageClient) -> Result<Vec<Animal>> {
        Animal::list(
            client,
            &AnimalListQuery {
                elevage_id: Some(self.id),
            },
        )
        .await
    }
}

/// Query parameters for listing elevages.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ElevageListQuery {
    /// Case-insensitive substring matched against name and address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Body for creating an elevage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElevageParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adresse: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

/// Partial update for an elevage. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ElevageUpdateParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adresse: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[async_trait]
impl Get for Elevage {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &LineageClient, id: u64) -> Result<Self> {
        client
            .get(&format!("elevages/{id}"))
            .await
            .and_then(|envelope| envelope.into_data())
            .map_err(|e| not_found_as(e, "Elevage", id))
    }
}

#[async_trait]
impl List for Elevage {
    type Query = ElevageListQuery;

    #[tracing::instrument(skip(client))]
    async fn list(client: &LineageClient, query: &Self::Query) -> Result<Vec<Self>> {
        client
            .get_with_query("elevages", query)
            .await?
            .into_data()
    }
}

#[async_trait]
impl Create for Elevage {
    type Params = ElevageParams;

    #[tracing::instrument(skip(client))]
    async fn create(client: &LineageClient, params: Self::Params) -> Result<Self> {
        client.post("elevages", &params).await?.into_data()
    }
}

#[async_trait]
impl Update for Elevage {
    type Id = u64;
    type Params = ElevageUpdateParams;

    #[tracing::instrument(skip(client))]
    async fn update(client: &LineageClient, id: u64, params: Self::Params) -> Result<Self> {
        client
            .put(&format!("elevages/{id}"), &params)
            .await
            .and_then(|envelope| envelope.into_data())
            .map_err(|e| not_found_as(e, "Elevage", id))
    }
}

#[async_trait]
impl Delete for Elevage {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &LineageClient, id: u64) -> Result<String> {
        client
            .delete(&format!("elevages/{id}"))
            .await
            .and_then(|envelope| envelope.into_message())
            .map_err(|e| not_found_as(e, "Elevage", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(nom: &str, adresse: &str) -> Elevage {
        Elevage {
            id: 1,
            nom: nom.to_string(),
            adresse: adresse.to_string(),
            telephone: None,
            email: None,
            user_id: 1,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_matches_search_name_and_address() {
        let elevage = sample("Élevage Test 1", "123 Rue de la Ferme, 75001 Paris");
        assert!(elevage.matches_search("test 1"));
        assert!(elevage.matches_search("PARIS"));
        assert!(elevage.matches_search("élevage"));
        assert!(!elevage.matches_search("Lyon"));
    }

    #[test]
    fn test_optional_fields_omitted() {
        let value = serde_json::to_value(sample("A", "B")).unwrap();
        assert!(value.get("telephone").is_none());
        assert!(value.get("email").is_none());
        assert!(value.get("created_at").is_some());
    }

    #[test]
    fn test_list_query_serialization() {
        let query = ElevageListQuery {
            search: Some("Paris".to_string()),
        };
        let serialized = serde_qs::to_string(&query).expect("Failed to serialize query");
        assert_eq!(serialized, "search=Paris");

        let empty = serde_qs::to_string(&ElevageListQuery::default()).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_update_params_only_send_set_fields() {
        let params = ElevageUpdateParams {
            telephone: Some("0102030405".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value, serde_json::json!({"telephone": "0102030405"}));
    }
}
