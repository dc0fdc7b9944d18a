//! # bizquery-cli: A CLI for `bizquery`
//!
//! This is the main entry point for the `bizquery` command-line interface. It
//! prepares the database, fills it with sample data, answers questions from the
//! terminal and checks that the completion API is reachable.

mod ask;
mod check;
mod db;
mod table;

use anyhow::Result;
use bizquery::config::get_config;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

// --- CLI Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a config.yml. Defaults to ./config.yml when present.
    #[arg(long, global = true, env = "CONFIG_PATH")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the inventory and sales tables if they do not exist
    InitDb(db::InitDbArgs),
    /// Fill the database with generated sample data
    Seed(db::SeedArgs),
    /// Answer a business question from the command line
    Ask(ask::AskArgs),
    /// Send one short prompt to the configured completion API
    CheckApi,
}

// --- Main Application Entry ---

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so that command output stays clean on stdout.
    let subscriber = fmt::Subscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let config = match get_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Could not load configuration: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    // Handle the command
    let result = match &cli.command {
        Commands::InitDb(args) => db::handle_init_db(args, &config).await,
        Commands::Seed(args) => db::handle_seed(args, &config).await,
        Commands::Ask(args) => ask::handle_ask(args, &config).await,
        Commands::CheckApi => return Ok(check::handle_check_api(&config).await),
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("❌ {e:#}");
            Ok(ExitCode::FAILURE)
        }
    }
}
