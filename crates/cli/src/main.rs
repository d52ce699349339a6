//! Al-Raqi CLI - database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply schema migrations
//! alraqi-cli migrate
//!
//! # Load the starter catalog and settings
//! alraqi-cli seed
//!
//! # Load a catalog from YAML
//! alraqi-cli seed --file catalog.yaml
//!
//! # Set the back-office password
//! alraqi-cli admin set-password --password 'new-password'
//! ```
//!
//! All commands read `DATABASE_URL` (a `.env` file is honored).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "alraqi-cli")]
#[command(author, version, about = "Al-Raqi CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the catalog, categories and settings
    Seed {
        /// YAML file with `categories`, `products` and `settings`;
        /// the built-in starter data when omitted
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Manage the back-office login
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Replace the shared admin password
    SetPassword {
        /// New password (at least 4 characters)
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
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
        Commands::Seed { file } => commands::seed::run(file.as_deref()).await?,
        Commands::Admin { action } => match action {
            AdminAction::SetPassword { password } => {
                commands::admin::set_password(&password).await?;
            }
        },
    }
    Ok(())
}
