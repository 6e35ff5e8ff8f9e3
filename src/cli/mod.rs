//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the lineage binary.

use std::net::SocketAddr;

use clap::{Parser, Subcommand, ValueEnum};

use crate::client::READINESS_ATTEMPTS;

/// AnimaLineage mock backend and API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "lineage", about = "AnimaLineage mock backend and API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the mock backend until Ctrl-C.
    Serve {
        /// Address to listen on.
        #[arg(long, env = "LINEAGE_MOCK_ADDR", default_value = "127.0.0.1:8000")]
        addr: SocketAddr,

        /// Path prefix of every endpoint.
        #[arg(long, env = "LINEAGE_MOCK_BASE_PATH", default_value = "/api")]
        base_path: String,

        /// Answer unmatched requests with 500 instead of 404.
        #[arg(long)]
        strict: bool,
    },

    /// Log in and print the session token.
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Get a single entity by ID.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// Numeric ID of the entity.
        id: u64,
    },

    /// List entities with optional filtering.
    List {
        /// The type of entity to list.
        entity: Entity,

        /// Case-insensitive filter on elevage name or address.
        #[arg(long)]
        search: Option<String>,

        /// Only list the animals of this elevage.
        #[arg(long)]
        elevage_id: Option<u64>,
    },

    /// Delete an entity.
    Delete {
        /// The type of entity to delete.
        entity: Entity,

        /// Numeric ID of the entity.
        id: u64,
    },

    /// Wait until the backend answers its health check.
    Wait {
        /// Number of probes before giving up.
        #[arg(long, default_value_t = READINESS_ATTEMPTS)]
        attempts: u32,

        /// Seconds between probes.
        #[arg(long, default_value_t = 2)]
        interval_secs: u64,
    },

    /// Probe the backend and keep retrying while it is in maintenance.
    Watch,
}

/// Entity types that can be operated on.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A platform account.
    #[value(alias = "users")]
    User,
    /// A farm.
    #[value(alias = "elevages")]
    Elevage,
    /// An animal registered in an elevage.
    #[value(alias = "animals")]
    Animal,
    /// A breed.
    #[value(alias = "races")]
    Race,
    /// An animal type.
    #[value(alias = "types", alias = "types-animaux")]
    Type,
}
