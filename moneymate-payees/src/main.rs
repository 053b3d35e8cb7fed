//! moneymate-payees - payer/payee command-line host
//!
//! Loads bootstrap configuration, opens the database and runs one service
//! operation, printing the resulting view(s) as JSON on stdout. Logs go to
//! stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use moneymate_common::config::{load_config, resolve_database_path, resolve_place_api_key};
use moneymate_common::models::{Pagination, PayerPayeeType};
use moneymate_payees::places::PlacesClient;
use moneymate_payees::{build_service, NewPayerPayee};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "moneymate-payees", version, about = "Payer/payee lookup with place enrichment")]
struct Cli {
    /// TOML configuration file (default: <config_dir>/moneymate/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List payers or payees
    List {
        /// payers | payees
        kind: PayerPayeeType,
        #[arg(long, default_value_t = 0)]
        offset: u32,
        #[arg(long, default_value_t = 20)]
        limit: u32,
        /// Skip address enrichment
        #[arg(long)]
        no_enrich: bool,
    },
    /// Show one payer or payee with its address
    Show {
        /// payer | payee
        kind: PayerPayeeType,
        id: Uuid,
    },
    /// Create a payer or payee
    Add {
        /// payer | payee
        kind: PayerPayeeType,
        name: String,
        /// Place Lookup Service identifier to link
        #[arg(long)]
        external_id: Option<String>,
    },
    /// Find payers or payees by name prefix
    Autocomplete {
        /// payer | payee
        kind: PayerPayeeType,
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    info!("Starting moneymate-payees v{}", env!("CARGO_PKG_VERSION"));

    let db_path = resolve_database_path(cli.database.as_deref(), &config);
    info!("Database: {}", db_path.display());
    let pool = moneymate_common::db::init_database(&db_path)
        .await
        .context("Failed to open database")?;

    let api_key = resolve_place_api_key(&config)?;
    let client = PlacesClient::from_config(&config.place_api, api_key)
        .context("Failed to build Place Lookup Service client")?;

    let service = build_service(pool, Arc::new(client));

    match cli.command {
        Command::List {
            kind,
            offset,
            limit,
            no_enrich,
        } => {
            let views = service
                .list(kind, Pagination { offset, limit }, !no_enrich)
                .await?;
            print_json(&views)
        }
        Command::Show { kind, id } => print_json(&service.get(kind, id).await?),
        Command::Add {
            kind,
            name,
            external_id,
        } => {
            let view = service
                .create(kind, NewPayerPayee { name, external_id })
                .await?;
            print_json(&view)
        }
        Command::Autocomplete { kind, query } => {
            print_json(&service.autocomplete(kind, &query).await?)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
