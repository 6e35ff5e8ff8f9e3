//! AnimaLineage CLI binary.
//!
//! Runs the mock backend and queries any AnimaLineage-compatible API.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use lineage::cli::{Cli, Command, Entity};
use lineage::output::PrettyPrint;
use lineage::{
    login, Animal, AnimalListQuery, BackendStatus, Credentials, Delete, Elevage, ElevageListQuery,
    Get, LineageClient, LineageError, List, MaintenanceWatch, Race, TypeAnimal, User,
};
use serde::Serialize;
use tabled::{Table, Tabled};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    if let Command::Serve {
        addr,
        base_path,
        strict,
    } = &cli.command
    {
        return run_serve(*addr, base_path, *strict).await;
    }

    let client = match LineageClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Check the LINEAGE_API_URL environment variable");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr so `--json` output on stdout stays parseable.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lineage=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(feature = "test-server")]
async fn run_serve(addr: std::net::SocketAddr, base_path: &str, strict: bool) -> ExitCode {
    use lineage::mock_server::{serve, FixtureStore};
    use lineage::{MockConfig, UnhandledPolicy};

    let unhandled = match MockConfig::from_env() {
        _ if strict => UnhandledPolicy::Error,
        Ok(env_config) => env_config.unhandled,
        Err(_) => UnhandledPolicy::Warn,
    };
    let config = MockConfig::default()
        .with_bind_addr(addr)
        .with_base_path(base_path)
        .with_unhandled(unhandled);

    match serve(&config, FixtureStore::seeded()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "test-server"))]
async fn run_serve(_addr: std::net::SocketAddr, _base_path: &str, _strict: bool) -> ExitCode {
    eprintln!("Error: this build does not include the mock backend");
    eprintln!("Hint: Rebuild with '--features test-server'");
    ExitCode::FAILURE
}

async fn run(client: &LineageClient, cli: Cli) -> lineage::Result<()> {
    match cli.command {
        Command::Serve { .. } => Ok(()),
        Command::Login { email, password } => {
            let session = login(client, &Credentials::new(&email, &password)).await?;
            output_single(&session, cli.json)
        }
        Command::Get { entity, id } => handle_get(client, entity, id, cli.json).await,
        Command::List {
            entity,
            search,
            elevage_id,
        } => handle_list(client, entity, search, elevage_id, cli.json).await,
        Command::Delete { entity, id } => handle_delete(client, entity, id).await,
        Command::Wait {
            attempts,
            interval_secs,
        } => {
            client
                .wait_until_ready(attempts, Duration::from_secs(interval_secs))
                .await?;
            println!("Backend ready at {}", client.base_url());
            Ok(())
        }
        Command::Watch => handle_watch(client).await,
    }
}

async fn handle_get(
    client: &LineageClient,
    entity: Entity,
    id: u64,
    json: bool,
) -> lineage::Result<()> {
    match entity {
        Entity::Elevage => {
            let elevage = Elevage::get(client, id).await?;
            output_single(&elevage, json)
        }
        _ => {
            eprintln!("Hint: Use 'lineage list {}'", entity_name(entity));
            Err(LineageError::Unsupported(format!(
                "{} cannot be retrieved individually, only elevages",
                entity_name(entity)
            )))
        }
    }
}

async fn handle_list(
    client: &LineageClient,
    entity: Entity,
    search: Option<String>,
    elevage_id: Option<u64>,
    json: bool,
) -> lineage::Result<()> {
    match entity {
        Entity::User => {
            let users = User::list_all(client).await?;
            output_list(&users, json, |x| UserRow::from(x))
        }
        Entity::Elevage => {
            let elevages = Elevage::list(client, &ElevageListQuery { search }).await?;
            output_list(&elevages, json, |x| ElevageRow::from(x))
        }
        Entity::Animal => {
            let animals = Animal::list(client, &AnimalListQuery { elevage_id }).await?;
            output_list(&animals, json, |x| AnimalRow::from(x))
        }
        Entity::Race => {
            let races = Race::list_all(client).await?;
            output_list(&races, json, |x| RaceRow::from(x))
        }
        Entity::Type => {
            let types = TypeAnimal::list_all(client).await?;
            output_list(&types, json, |x| TypeRow::from(x))
        }
    }
}

async fn handle_delete(client: &LineageClient, entity: Entity, id: u64) -> lineage::Result<()> {
    match entity {
        Entity::Elevage => {
            let message = Elevage::delete(client, id).await?;
            println!("{message}");
            Ok(())
        }
        _ => Err(LineageError::Unsupported(format!(
            "{} cannot be deleted, only elevages",
            entity_name(entity)
        ))),
    }
}

async fn handle_watch(client: &LineageClient) -> lineage::Result<()> {
    let watch = MaintenanceWatch::new(client.clone());
    let probe = client.check_health().await;

    if watch.observe(&probe) == BackendStatus::Maintenance {
        eprintln!("Backend in maintenance, retrying automatically...");
        watch.run().await;
    } else {
        probe?;
    }

    println!("Backend available at {}", client.base_url());
    Ok(())
}

fn entity_name(entity: Entity) -> &'static str {
    match entity {
        Entity::User => "users",
        Entity::Elevage => "elevages",
        Entity::Animal => "animals",
        Entity::Race => "races",
        Entity::Type => "types",
    }
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> lineage::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_list<T, R, F>(items: &[T], json: bool, to_row: F) -> lineage::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!("\n{} item(s)", items.len());
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct UserRow {
    id: u64,
    nom: String,
    email: String,
    role: String,
    status: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            nom: u.nom.clone(),
            email: u.email.clone(),
            role: u.role.to_string(),
            status: if u.is_active() { "actif" } else { "en attente" }.to_string(),
        }
    }
}

#[derive(Tabled)]
struct ElevageRow {
    id: u64,
    nom: String,
    adresse: String,
    owner: u64,
}

impl From<&Elevage> for ElevageRow {
    fn from(e: &Elevage) -> Self {
        Self {
            id: e.id,
            nom: e.nom.clone(),
            adresse: e.adresse.clone(),
            owner: e.user_id,
        }
    }
}

#[derive(Tabled)]
struct AnimalRow {
    id: u64,
    nom: String,
    elevage: u64,
    sexe: String,
    numero: String,
}

impl From<&Animal> for AnimalRow {
    fn from(a: &Animal) -> Self {
        Self {
            id: a.id,
            nom: a.nom.clone(),
            elevage: a.elevage_id,
            sexe: a.sexe.map(|s| s.to_string()).unwrap_or_default(),
            numero: a.numero.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct RaceRow {
    id: u64,
    nom: String,
    #[tabled(rename = "type")]
    type_animal_id: u64,
}

impl From<&Race> for RaceRow {
    fn from(r: &Race) -> Self {
        Self {
            id: r.id,
            nom: r.nom.clone(),
            type_animal_id: r.type_animal_id,
        }
    }
}

#[derive(Tabled)]
struct TypeRow {
    id: u64,
    nom: String,
    description: String,
}

impl From<&TypeAnimal> for TypeRow {
    fn from(t: &TypeAnimal) -> Self {
        Self {
            id: t.id,
            nom: t.nom.clone(),
            description: t.description.clone(),
        }
    }
}
