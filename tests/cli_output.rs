//! Tests for CLI output formatting.
//!
//! - JSON output with --json flag
//! - Pretty-print output as default

use lineage::output::PrettyPrint;
use lineage::{Animal, Elevage, Session, User};

// ============================================================================
// JSON Output Tests
// ============================================================================

#[test]
fn test_json_flag_outputs_valid_json() {
    let elevage = make_test_elevage();
    let json_output = serde_json::to_string_pretty(&elevage).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json_output).unwrap();
    assert!(parsed.is_object());
    assert_eq!(parsed["nom"], "Élevage Test 1");
    assert_eq!(parsed["created_at"], "2024-01-15T10:00:00Z");
}

#[test]
fn test_json_flag_for_list_outputs_array() {
    let animals = vec![make_test_animal(), make_test_animal()];
    let json_output = serde_json::to_string_pretty(&animals).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json_output).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
    assert_eq!(parsed[0]["sexe"], "F");
}

// ============================================================================
// Pretty-Print Tests
// ============================================================================

#[test]
fn test_default_output_is_not_json() {
    let pretty_output = make_test_elevage().pretty_print();

    let parse_result: Result<serde_json::Value, _> = serde_json::from_str(&pretty_output);
    assert!(
        parse_result.is_err(),
        "Default output should NOT be valid JSON"
    );
}

#[test]
fn test_elevage_pretty_print_shows_contact() {
    let output = make_test_elevage().pretty_print();

    assert!(output.contains("Élevage Test 1"), "Should show name");
    assert!(output.contains("0123456789"), "Should show phone");
    assert!(output.contains("contact@elevage-test1.fr"), "Should show email");
    assert!(output.contains("user #2"), "Should show owner");
}

#[test]
fn test_animal_pretty_print_skips_unknown_fields() {
    let output = make_test_animal().pretty_print();

    assert!(output.starts_with("Animal #1"));
    assert!(output.contains("Sexe:           F"));
    assert!(output.contains("2020-03-15"));
    assert!(!output.contains("Numéro"));
}

#[test]
fn test_session_pretty_print_shows_token_and_user() {
    let user: User = serde_json::from_value(serde_json::json!({
        "id": 3,
        "nom": "Nouvel Eleveur",
        "email": "nouveau@animalineage.com",
        "status": 0,
        "role": "eleveur"
    }))
    .unwrap();
    let session = Session {
        token: "mock-token-eleveur".to_string(),
        user,
    };

    let output = session.pretty_print();
    assert!(output.starts_with("Token:          mock-token-eleveur"));
    assert!(output.contains("en attente"));
    assert!(output.contains("Rôle:           eleveur"));
}

// ============================================================================
// Test Helpers
// ============================================================================

fn make_test_elevage() -> Elevage {
    serde_json::from_value(serde_json::json!({
        "id": 1,
        "nom": "Élevage Test 1",
        "adresse": "123 Rue de la Ferme, 75001 Paris",
        "telephone": "0123456789",
        "email": "contact@elevage-test1.fr",
        "user_id": 2,
        "created_at": "2024-01-15T10:00:00Z"
    }))
    .unwrap()
}

fn make_test_animal() -> Animal {
    serde_json::from_value(serde_json::json!({
        "id": 1,
        "nom": "Bella",
        "elevage_id": 1,
        "date_naissance": "2020-03-15",
        "sexe": "F"
    }))
    .unwrap()
}
