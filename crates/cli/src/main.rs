//! Loja CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply the SQL migrations
//! loja-cli migrate
//!
//! # Create an admin account
//! loja-cli admin create -e gestao@lojavapor.pt -n "Gestão" -p 'uma-palavra-passe-longa'
//!
//! # Grant or revoke the admin flag on an existing account
//! loja-cli admin promote -e ana@example.pt
//! loja-cli admin demote -e ana@example.pt
//!
//! # Upsert site content from YAML
//! loja-cli seed content crates/cli/seeds/site_content.yaml
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string (schema `shop`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "loja-cli")]
#[command(author, version, about = "Loja CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage admin accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Load data from files
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new account with the admin flag set
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Password (at least 8 characters)
        #[arg(short, long)]
        password: String,
    },
    /// Give an existing account back-office access
    Promote {
        /// Email address
        #[arg(short, long)]
        email: String,
    },
    /// Remove back-office access from an account
    Demote {
        /// Email address
        #[arg(short, long)]
        email: String,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Upsert site content entries from a YAML file
    Content {
        /// Path to the YAML file
        file: String,
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
        Commands::Admin { action } => match action {
            AdminAction::Create {
                email,
                name,
                password,
            } => {
                commands::admin::create_user(&email, &name, &password).await?;
            }
            AdminAction::Promote { email } => commands::admin::set_flag(&email, true).await?,
            AdminAction::Demote { email } => commands::admin::set_flag(&email, false).await?,
        },
        Commands::Seed { target } => match target {
            SeedTarget::Content { file } => commands::seed::content(&file).await?,
        },
    }
    Ok(())
}
