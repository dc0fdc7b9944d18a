use anyhow::{Context, Result};
use bizquery::{
    config::AppConfig,
    providers::db::{sqlite::SqliteProvider, storage::Storage},
    seed::{seed_sample_data, SeedMode, SeedOptions},
};
use clap::Parser;
use std::{fs, path::Path};
use tracing::info;

#[derive(Parser, Debug)]
pub struct InitDbArgs {
    /// The database file. Defaults to `db_url` from the configuration.
    #[arg(long)]
    db: Option<String>,
    /// Delete the existing database file first
    #[arg(long)]
    reset: bool,
}

#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// The database file. Defaults to `db_url` from the configuration.
    #[arg(long)]
    db: Option<String>,
    /// Keep existing rows and add new ones instead of starting over
    #[arg(long)]
    append: bool,
    /// Seed for the random generator, for reproducible data
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 5)]
    warehouses: usize,
    #[arg(long, default_value_t = 15)]
    suppliers: usize,
    #[arg(long, default_value_t = 60)]
    products: usize,
    #[arg(long, default_value_t = 50)]
    customers: usize,
    #[arg(long, default_value_t = 300)]
    sales: usize,
}

fn db_path<'a>(arg: &'a Option<String>, config: &'a AppConfig) -> &'a str {
    arg.as_deref().unwrap_or(&config.db_url)
}

pub async fn handle_init_db(args: &InitDbArgs, config: &AppConfig) -> Result<()> {
    let path = db_path(&args.db, config);
    println!("🗄️  Initializing database at '{path}'...");

    if args.reset {
        remove_database_files(path)?;
    }

    let provider = SqliteProvider::new(path).await?;
    provider.initialize_schema().await?;

    let missing = provider.missing_tables().await?;
    if !missing.is_empty() {
        anyhow::bail!("Tables missing after initialization: {}", missing.join(", "));
    }
    let tables = provider.list_tables().await?;
    println!(
        "✅ Database ready with {} tables: {}",
        tables.len(),
        tables.join(", ")
    );
    Ok(())
}

/// Removes the database file and its WAL companions, if present.
fn remove_database_files(path: &str) -> Result<()> {
    for file in [path.to_string(), format!("{path}-wal"), format!("{path}-shm")] {
        if Path::new(&file).exists() {
            fs::remove_file(&file).with_context(|| format!("Failed to remove '{file}'"))?;
            info!("Removed {file}");
        }
    }
    println!("🧹 Removed the existing database.");
    Ok(())
}

pub async fn handle_seed(args: &SeedArgs, config: &AppConfig) -> Result<()> {
    let path = db_path(&args.db, config);
    let mode = if args.append {
        SeedMode::Append
    } else {
        SeedMode::Reset
    };
    println!("🌱 Seeding sample data into '{path}' ({mode:?})...");

    let options = SeedOptions {
        mode,
        warehouses: args.warehouses,
        suppliers: args.suppliers,
        products: args.products,
        customers: args.customers,
        sales: args.sales,
        rng_seed: args.seed,
        ..Default::default()
    };

    let provider = SqliteProvider::new(path).await?;
    let report = seed_sample_data(&provider, &options).await?;

    for count in &report.inserted {
        println!("  {:<22}{:>6}", count.table, count.rows);
    }
    println!("✅ Inserted {} rows.", report.total());
    Ok(())
}
