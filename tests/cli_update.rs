//! Execution tests for write calls (create, update, auth).

use lineage::{
    login, register, Create, Credentials, Elevage, ElevageParams, ElevageUpdateParams,
    LineageClient, LineageError, RegisterParams, Update,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_update_sends_only_set_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/elevages/1"))
        .and(body_json(serde_json::json!({"telephone": "0600000000"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": 200,
            "data": {
                "id": 1,
                "nom": "Élevage Test 1",
                "adresse": "123 Rue de la Ferme, 75001 Paris",
                "telephone": "0600000000",
                "user_id": 2,
                "created_at": "2024-01-15T10:00:00Z"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LineageClient::new(&mock_server.uri()).unwrap();
    let params = ElevageUpdateParams {
        telephone: Some("0600000000".to_string()),
        ..Default::default()
    };
    let updated = Elevage::update(&client, 1, params).await.unwrap();

    assert_eq!(updated.nom, "Élevage Test 1");
    assert_eq!(updated.telephone.as_deref(), Some("0600000000"));
}

#[tokio::test]
async fn test_create_validation_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/elevages"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "status": 422,
            "errors": {
                "nom": [],
                "adresse": ["L'adresse est requise"]
            }
        })))
        .mount(&mock_server)
        .await;

    let client = LineageClient::new(&mock_server.uri()).unwrap();
    let params = ElevageParams {
        nom: Some("Ferme du Lac".to_string()),
        ..Default::default()
    };
    let err = Elevage::create(&client, params).await.unwrap_err();

    match &err {
        LineageError::Validation(errors) => {
            assert!(errors["nom"].is_empty());
            assert_eq!(errors["adresse"], vec!["L'adresse est requise"]);
        }
        other => panic!("Expected Validation, got {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "Validation failed: adresse: L'adresse est requise"
    );
}

#[tokio::test]
async fn test_login_returns_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(serde_json::json!({
            "email": "eleveur@animalineage.com",
            "password": "eleveur123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": 200,
            "data": {
                "token": "mock-token-eleveur",
                "user": {
                    "id": 2,
                    "nom": "Eleveur Test",
                    "email": "eleveur@animalineage.com",
                    "status": 1,
                    "role": "eleveur"
                }
            }
        })))
        .mount(&mock_server)
        .await;

    let client = LineageClient::new(&mock_server.uri()).unwrap();
    let session = login(
        &client,
        &Credentials::new("eleveur@animalineage.com", "eleveur123"),
    )
    .await
    .unwrap();

    assert_eq!(session.token, "mock-token-eleveur");
    assert!(session.user.is_active());
    assert!(!session.user.is_admin());
}

#[tokio::test]
async fn test_register_returns_pending_user() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "status": 201,
            "data": {
                "id": 4,
                "nom": "Jeanne",
                "email": "jeanne@example.fr",
                "status": 0,
                "role": "eleveur"
            }
        })))
        .mount(&mock_server)
        .await;

    let client = LineageClient::new(&mock_server.uri()).unwrap();
    let params = RegisterParams {
        nom: Some("Jeanne".to_string()),
        email: Some("jeanne@example.fr".to_string()),
        password: Some("secret".to_string()),
    };
    let user = register(&client, &params).await.unwrap();

    assert_eq!(user.id, 4);
    assert!(!user.is_active());
}
