//! RocketShoes CLI - drive the cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Start the local catalog/stock fixture on :3333
//! rocketshoes serve --db fixtures/db.json
//!
//! # Browse the catalog with stock levels
//! rocketshoes catalog
//!
//! # Work with the cart
//! rocketshoes cart add 1
//! rocketshoes cart update 1 3
//! rocketshoes cart remove 1
//! rocketshoes cart show --json
//!
//! # Write a config file with the defaults
//! rocketshoes config init
//! ```
//!
//! # Commands
//!
//! - `cart` - Show and mutate the persisted cart
//! - `catalog` - List products and their stock
//! - `serve` - Run the fixture server
//! - `config` - Inspect or initialize `config.toml`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "rocketshoes")]
#[command(author, version, about = "RocketShoes cart CLI")]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show and mutate the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// List catalog products with their stock
    Catalog,
    /// Serve the catalog and stock routes from a db.json fixture
    Serve {
        /// Fixture document
        #[arg(long, default_value = "fixtures/db.json")]
        db: PathBuf,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind
        #[arg(short, long, default_value_t = rocketshoes_api::DEFAULT_FIXTURE_PORT)]
        port: u16,
    },
    /// Inspect or initialize the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart and its totals
    Show {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add one unit of a product
    Add {
        /// Product id
        id: u64,
    },
    /// Remove a product entirely
    Remove {
        /// Product id
        id: u64,
    },
    /// Set a product's quantity (0 or less is ignored)
    Update {
        /// Product id
        id: u64,

        /// New quantity
        #[arg(allow_hyphen_values = true)]
        amount: i64,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = cli.config;

    match cli.command {
        Commands::Cart { action } => {
            let ctx = commands::Context::load(config_path)?;
            match action {
                CartAction::Show { json } => commands::cart::show(&ctx, json).await?,
                CartAction::Add { id } => commands::cart::add(&ctx, id).await?,
                CartAction::Remove { id } => commands::cart::remove(&ctx, id).await?,
                CartAction::Update { id, amount } => {
                    commands::cart::update(&ctx, id, amount).await?
                }
            }
        }
        Commands::Catalog => {
            let ctx = commands::Context::load(config_path)?;
            commands::catalog::list(&ctx).await?;
        }
        Commands::Serve { db, host, port } => {
            commands::serve::run(&db, &host, port).await?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(config_path)?,
            ConfigAction::Path => commands::config::path(config_path)?,
            ConfigAction::Init { force } => commands::config::init(config_path, force)?,
        },
    }
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=rocketshoes_cart=trace` - Trace the cart store only
/// - Default: INFO, DEBUG for the rocketshoes crates
///
/// Logs go to stderr so `cart show --json` stays pipeable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rocketshoes=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
