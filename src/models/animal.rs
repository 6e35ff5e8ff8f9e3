//! Animal model and trait implementations.

use std::fmt;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::client::LineageClient;
use crate::error::Result;
use crate::traits::{Create, List};

/// Sex of an animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sexe {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Femelle,
}

impl fmt::Display for Sexe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sexe::Male => f.write_str("M"),
            Sexe::Femelle => f.write_str("F"),
        }
    }
}

/// An animal registered in an elevage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    pub id: u64,
    pub nom: String,

    /// Registration or ear-tag number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero: Option<String>,

    pub elevage_id: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_animal_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_naissance: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sexe: Option<Sexe>,
}

impl Animal {
    /// Age in whole years on `today`, if the birth date is known.
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        self.date_naissance
            .and_then(|born| today.years_since(born))
    }
}

/// Query parameters for listing animals.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnimalListQuery {
    /// Restrict to the animals of one elevage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevage_id: Option<u64>,
}

/// Body for creating an animal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimalParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevage_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_animal_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_naissance: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sexe: Option<Sexe>,
}

#[async_trait]
impl List for Animal {
    type Query = AnimalListQuery;

    #[tracing::instrument(skip(client))]
    async fn list(client: &LineageClient, query: &Self::Query) -> Result<Vec<Self>> {
        client.get_with_query("animals", query).await?.into_data()
    }
}

#[async_trait]
impl Create for Animal {
    type Params = AnimalParams;

    #[tracing::instrument(skip(client))]
    async fn create(client: &LineageClient, params: Self::Params) -> Result<Self> {
        client.post("animals", &params).await?.into_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animal_deserialize_minimal() {
        let json = r#"{"id": 7, "nom": "Bella", "elevage_id": 1}"#;
        let animal: Animal = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(animal.nom, "Bella");
        assert!(animal.sexe.is_none());
        assert!(animal.date_naissance.is_none());
    }

    #[test]
    fn test_animal_deserialize_full() {
        let json = r#"{
            "id": 1, "nom": "Bella", "numero": "FR1234", "elevage_id": 1,
            "race_id": 1, "type_animal_id": 1, "date_naissance": "2020-03-15", "sexe": "F"
        }"#;
        let animal: Animal = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(animal.sexe, Some(Sexe::Femelle));
        assert_eq!(
            animal.date_naissance,
            NaiveDate::from_ymd_opt(2020, 3, 15)
        );
    }

    #[test]
    fn test_age_on() {
        let animal = Animal {
            id: 1,
            nom: "Rex".to_string(),
            numero: None,
            elevage_id: 1,
            race_id: None,
            type_animal_id: None,
            date_naissance: NaiveDate::from_ymd_opt(2019, 6, 1),
            sexe: Some(Sexe::Male),
        };
        let today = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
        assert_eq!(animal.age_on(today), Some(4));
    }

    #[test]
    fn test_list_query_serialization() {
        let query = AnimalListQuery { elevage_id: Some(1) };
        let serialized = serde_qs::to_string(&query).expect("Failed to serialize query");
        assert_eq!(serialized, "elevage_id=1");
    }
}
