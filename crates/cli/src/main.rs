//! Brandboard CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! bb-cli migrate
//!
//! # Seed a demo company with products and a year of orders
//! bb-cli seed
//!
//! # Seed under a custom slug
//! bb-cli seed --slug acme-outfitters --name "Acme Outfitters"
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed database with demo data

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bb-cli")]
#[command(author, version, about = "Brandboard CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database with a demo company, products, and orders
    Seed {
        /// Company slug to seed under
        #[arg(long, default_value = "demo")]
        slug: String,

        /// Company display name
        #[arg(long, default_value = "Demo Outfitters")]
        name: String,

        /// How many orders to generate
        #[arg(long, default_value_t = 200)]
        orders: usize,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { slug, name, orders } => {
            commands::seed::run(&slug, &name, orders).await?;
        }
    }
    Ok(())
}
