//! User model, authentication calls and trait implementations.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::LineageClient;
use crate::error::Result;
use crate::traits::{Create, List};

/// Account awaiting validation by an administrator.
pub const USER_PENDING: u8 = 0;

/// Validated account.
pub const USER_ACTIVE: u8 = 1;

/// Role of an AnimaLineage account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A breeder managing their own farms.
    #[default]
    Eleveur,
    /// Platform administrator.
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Eleveur => f.write_str("eleveur"),
            Role::Admin => f.write_str("admin"),
        }
    }
}

/// An AnimaLineage user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub nom: String,
    pub email: String,
    /// 0 = pending, 1 = active.
    pub status: u8,
    pub role: Role,
}

impl User {
    /// Check whether the account has been validated.
    pub fn is_active(&self) -> bool {
        self.status == USER_ACTIVE
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Login request body. Missing and `null` fields are both accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or_default()
    }
}

/// Successful login payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Self-registration request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Administrative user creation body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u8>,
}

/// Log in and return the session token and user.
///
/// Chain with [`LineageClient::with_token`] to make authenticated calls.
#[tracing::instrument(skip(client, credentials), fields(email = credentials.email()))]
pub async fn login(client: &LineageClient, credentials: &Credentials) -> Result<Session> {
    client.post("auth/login", credentials).await?.into_data()
}

/// Register a new (pending) account.
#[tracing::instrument(skip(client, params))]
pub async fn register(client: &LineageClient, params: &RegisterParams) -> Result<User> {
    client.post("auth/register", params).await?.into_data()
}

/// Log out; returns the backend's confirmation message.
#[tracing::instrument(skip(client))]
pub async fn logout(client: &LineageClient) -> Result<String> {
    client
        .post("auth/logout", &serde_json::json!({}))
        .await?
        .into_message()
}

#[async_trait]
impl List for User {
    type Query = ();

    #[tracing::instrument(skip(client))]
    async fn list(client: &LineageClient, _query: &Self::Query) -> Result<Vec<Self>> {
        client.get("users").await?.into_data()
    }
}

#[async_trait]
impl Create for User {
    type Params = UserParams;

    #[tracing::instrument(skip(client))]
    async fn create(client: &LineageClient, params: Self::Params) -> Result<Self> {
        client.post("users", &params).await?.into_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Eleveur).unwrap(), "\"eleveur\"");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(Role::Admin.to_string(), "admin");
    }

    #[test]
    fn test_user_deserialize() {
        let json = r#"{"id": 3, "nom": "Nouvel Eleveur", "email": "n@x.fr", "status": 0, "role": "eleveur"}"#;
        let user: User = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(user.id, 3);
        assert!(!user.is_active());
        assert!(!user.is_admin());
    }

    #[test]
    fn test_register_params_skip_missing_fields() {
        let params = RegisterParams {
            nom: Some("Jean".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value, serde_json::json!({"nom": "Jean"}));
    }

    #[test]
    fn test_credentials_default_missing_fields() {
        let creds: Credentials = serde_json::from_str("{}").unwrap();
        assert_eq!(creds.email(), "");
        assert_eq!(creds.password(), "");
    }

    #[test]
    fn test_credentials_accept_null_fields() {
        let creds: Credentials =
            serde_json::from_str(r#"{"email": null, "password": null}"#).unwrap();
        assert!(creds.email.is_none());
        assert_eq!(creds.password(), "");

        let value = serde_json::to_value(Credentials::new("a@b.fr", "x")).unwrap();
        assert_eq!(value, serde_json::json!({"email": "a@b.fr", "password": "x"}));
    }
}
