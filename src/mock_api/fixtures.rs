//! Test data fixtures for the mock API.
//!
//! [`Fixtures`] provides factory functions for single records and
//! [`FixtureStore`] holds the immutable dataset handlers read from.

use chrono::{DateTime, NaiveDate, Utc};

use crate::{Animal, Elevage, Race, Role, Sexe, TypeAnimal, User, USER_ACTIVE, USER_PENDING};

/// Creation timestamp of seeded elevages (2024-01-15T10:00:00Z).
const SEED_CREATED_AT: i64 = 1_705_312_800;

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // User Fixtures
    // =========================================================================

    /// Create an active user.
    pub fn user(id: u64, nom: &str, email: &str, role: Role) -> User {
        User {
            id,
            nom: nom.to_string(),
            email: email.to_string(),
            status: USER_ACTIVE,
            role,
        }
    }

    /// Create a breeder account still waiting for validation.
    pub fn pending_user(id: u64, nom: &str, email: &str) -> User {
        let mut user = Self::user(id, nom, email, Role::Eleveur);
        user.status = USER_PENDING;
        user
    }

    // =========================================================================
    // Elevage Fixtures
    // =========================================================================

    /// Create an elevage with required fields only.
    pub fn elevage(id: u64, nom: &str, adresse: &str, user_id: u64) -> Elevage {
        Elevage {
            id,
            nom: nom.to_string(),
            adresse: adresse.to_string(),
            telephone: None,
            email: None,
            user_id,
            created_at: DateTime::<Utc>::from_timestamp(SEED_CREATED_AT, 0).unwrap_or_default(),
        }
    }

    /// Create an elevage with contact details.
    pub fn elevage_with_contact(
        id: u64,
        nom: &str,
        adresse: &str,
        telephone: &str,
        email: &str,
        user_id: u64,
    ) -> Elevage {
        let mut elevage = Self::elevage(id, nom, adresse, user_id);
        elevage.telephone = Some(telephone.to_string());
        elevage.email = Some(email.to_string());
        elevage
    }

    // =========================================================================
    // Animal Fixtures
    // =========================================================================

    /// Create an animal with required fields only.
    pub fn animal(id: u64, nom: &str, elevage_id: u64) -> Animal {
        Animal {
            id,
            nom: nom.to_string(),
            numero: None,
            elevage_id,
            race_id: None,
            type_animal_id: None,
            date_naissance: None,
            sexe: None,
        }
    }

    /// Create a fully described animal.
    #[allow(clippy::too_many_arguments)]
    pub fn registered_animal(
        id: u64,
        nom: &str,
        numero: &str,
        elevage_id: u64,
        race_id: u64,
        type_animal_id: u64,
        date_naissance: Option<NaiveDate>,
        sexe: Sexe,
    ) -> Animal {
        let mut animal = Self::animal(id, nom, elevage_id);
        animal.numero = Some(numero.to_string());
        animal.race_id = Some(race_id);
        animal.type_animal_id = Some(type_animal_id);
        animal.date_naissance = date_naissance;
        animal.sexe = Some(sexe);
        animal
    }

    // =========================================================================
    // Reference Fixtures
    // =========================================================================

    pub fn type_animal(id: u64, nom: &str, description: &str) -> TypeAnimal {
        TypeAnimal {
            id,
            nom: nom.to_string(),
            description: description.to_string(),
        }
    }

    pub fn race(id: u64, nom: &str, type_animal_id: u64, description: &str) -> Race {
        Race {
            id,
            nom: nom.to_string(),
            type_animal_id,
            description: description.to_string(),
        }
    }
}

/// A login account known to the mock backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub email: String,
    pub password: String,
    pub token: String,
    pub user_id: u64,
}

/// Immutable in-memory dataset served by the mock API.
///
/// Built once at setup and shared read-only; handlers never modify it, so
/// "create" responses are not visible to later reads.
#[derive(Debug, Clone, Default)]
pub struct FixtureStore {
    users: Vec<User>,
    elevages: Vec<Elevage>,
    animals: Vec<Animal>,
    races: Vec<Race>,
    types_animaux: Vec<TypeAnimal>,
    accounts: Vec<Account>,
}

impl FixtureStore {
    /// An empty store: every list is empty and no login succeeds.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard seed dataset.
    pub fn seeded() -> Self {
        Self::empty()
            .with_user(Fixtures::user(
                1,
                "Admin Test",
                "admin@animalineage.com",
                Role::Admin,
            ))
            .with_user(Fixtures::user(
                2,
                "Eleveur Test",
                "eleveur@animalineage.com",
                Role::Eleveur,
            ))
            .with_user(Fixtures::pending_user(
                3,
                "Nouvel Eleveur",
                "nouveau@animalineage.com",
            ))
            .with_account("admin@animalineage.com", "admin123", "mock-token-admin", 1)
            .with_account(
                "eleveur@animalineage.com",
                "eleveur123",
                "mock-token-eleveur",
                2,
            )
            .with_elevage(Fixtures::elevage_with_contact(
                1,
                "Élevage Test 1",
                "123 Rue de la Ferme, 75001 Paris",
                "0123456789",
                "contact@elevage-test1.fr",
                2,
            ))
            .with_elevage(Fixtures::elevage(
                2,
                "Élevage Test 2",
                "456 Chemin des Prés, 69001 Lyon",
                2,
            ))
            .with_type_animal(Fixtures::type_animal(1, "Bovin", "Bovins domestiques"))
            .with_type_animal(Fixtures::type_animal(2, "Ovin", "Moutons"))
            .with_type_animal(Fixtures::type_animal(3, "Caprin", "Chèvres"))
            .with_type_animal(Fixtures::type_animal(4, "Canin", "Chiens"))
            .with_race(Fixtures::race(1, "Charolaise", 1, "Race bovine à viande"))
            .with_race(Fixtures::race(2, "Limousine", 1, "Race bovine rustique"))
            .with_race(Fixtures::race(3, "Mérinos", 2, "Race ovine à laine"))
            .with_race(Fixtures::race(4, "Alpine", 3, "Race caprine laitière"))
            .with_race(Fixtures::race(5, "Berger Allemand", 4, "Chien de berger"))
            .with_animal(Fixtures::registered_animal(
                1,
                "Bella",
                "FR0001",
                1,
                1,
                1,
                NaiveDate::from_ymd_opt(2020, 3, 15),
                Sexe::Femelle,
            ))
            .with_animal(Fixtures::registered_animal(
                2,
                "Rex",
                "FR0002",
                1,
                5,
                4,
                NaiveDate::from_ymd_opt(2019, 6, 1),
                Sexe::Male,
            ))
            .with_animal(Fixtures::animal(3, "Luna", 2))
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }

    pub fn with_elevage(mut self, elevage: Elevage) -> Self {
        self.elevages.push(elevage);
        self
    }

    pub fn with_animal(mut self, animal: Animal) -> Self {
        self.animals.push(animal);
        self
    }

    pub fn with_race(mut self, race: Race) -> Self {
        self.races.push(race);
        self
    }

    pub fn with_type_animal(mut self, type_animal: TypeAnimal) -> Self {
        self.types_animaux.push(type_animal);
        self
    }

    /// Register a login account for an existing user id.
    pub fn with_account(mut self, email: &str, password: &str, token: &str, user_id: u64) -> Self {
        self.accounts.push(Account {
            email: email.to_string(),
            password: password.to_string(),
            token: token.to_string(),
            user_id,
        });
        self
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn elevages(&self) -> &[Elevage] {
        &self.elevages
    }

    pub fn animals(&self) -> &[Animal] {
        &self.animals
    }

    pub fn races(&self) -> &[Race] {
        &self.races
    }

    pub fn types_animaux(&self) -> &[TypeAnimal] {
        &self.types_animaux
    }

    pub fn find_user(&self, id: u64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn find_elevage(&self, id: u64) -> Option<&Elevage> {
        self.elevages.iter().find(|e| e.id == id)
    }

    /// Elevages whose name or address contains `search`, ignoring case.
    /// `None` returns the whole collection in seed order.
    pub fn search_elevages(&self, search: Option<&str>) -> Vec<&Elevage> {
        self.elevages
            .iter()
            .filter(|e| search.map(|s| e.matches_search(s)).unwrap_or(true))
            .collect()
    }

    /// Animals belonging to `elevage_id`, or all animals for `None`.
    pub fn animals_by_elevage(&self, elevage_id: Option<u64>) -> Vec<&Animal> {
        self.animals
            .iter()
            .filter(|a| elevage_id.map(|id| a.elevage_id == id).unwrap_or(true))
            .collect()
    }

    /// First account, in declaration order, matching both email and password,
    /// together with its user record.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<(&Account, &User)> {
        self.accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
            .and_then(|account| {
                self.find_user(account.user_id)
                    .map(|user| (account, user))
            })
    }

    pub fn next_user_id(&self) -> u64 {
        self.users.len() as u64 + 1
    }

    pub fn next_elevage_id(&self) -> u64 {
        self.elevages.len() as u64 + 1
    }

    pub fn next_animal_id(&self) -> u64 {
        self.animals.len() as u64 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_ids_are_unique_and_positive() {
        let store = FixtureStore::seeded();

        let mut ids: Vec<u64> = store.users().iter().map(|u| u.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), store.users().len());
        assert!(ids.iter().all(|id| *id > 0));

        let mut ids: Vec<u64> = store.elevages().iter().map(|e| e.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), store.elevages().len());
    }

    #[test]
    fn test_search_elevages() {
        let store = FixtureStore::seeded();

        let matches = store.search_elevages(Some("Test 1"));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].nom, "Élevage Test 1");

        let by_address = store.search_elevages(Some("lyon"));
        assert_eq!(by_address.len(), 1);
        assert_eq!(by_address[0].id, 2);

        assert_eq!(store.search_elevages(None).len(), 2);
    }

    #[test]
    fn test_animals_by_elevage() {
        let store = FixtureStore::seeded();

        let names: Vec<&str> = store
            .animals_by_elevage(Some(1))
            .iter()
            .map(|a| a.nom.as_str())
            .collect();
        assert_eq!(names, vec!["Bella", "Rex"]);

        assert!(store.animals_by_elevage(Some(99)).is_empty());
        assert_eq!(store.animals_by_elevage(None).len(), 3);
    }

    #[test]
    fn test_authenticate() {
        let store = FixtureStore::seeded();

        let (account, user) = store
            .authenticate("admin@animalineage.com", "admin123")
            .expect("admin should log in");
        assert_eq!(account.token, "mock-token-admin");
        assert_eq!(user.role, Role::Admin);

        assert!(store
            .authenticate("admin@animalineage.com", "eleveur123")
            .is_none());
        assert!(store.authenticate("", "").is_none());
    }

    #[test]
    fn test_next_ids() {
        let store = FixtureStore::seeded();
        assert_eq!(store.next_user_id(), 4);
        assert_eq!(store.next_elevage_id(), 3);
        assert_eq!(store.next_animal_id(), 4);

        let empty = FixtureStore::empty();
        assert_eq!(empty.next_elevage_id(), 1);
    }

    #[test]
    fn test_pending_user() {
        let user = Fixtures::pending_user(9, "Jean", "jean@x.fr");
        assert_eq!(user.status, USER_PENDING);
        assert_eq!(user.role, Role::Eleveur);
    }
}
