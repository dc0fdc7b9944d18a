//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. The state holds the configuration, the database
//! provider and the query agent, all behind `Arc` so handlers share them.

use bizquery::{
    config::AppConfig,
    providers::{db::sqlite::SqliteProvider, factory::create_provider},
    AgentOptions, QueryAgent,
};
use std::sync::Arc;
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    /// The inventory and sales database. Canned views and stats run on it directly.
    pub sqlite_provider: Arc<SqliteProvider>,
    /// Answers natural-language questions.
    pub agent: Arc<QueryAgent>,
}

/// Builds the shared application state from the configuration.
///
/// Opens the database and makes sure the schema exists, then builds the AI
/// provider and the query agent. A missing API key fails startup.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let sqlite_provider = SqliteProvider::new(&config.db_url).await?;
    info!(db_path = %config.db_url, "Initialized local storage provider (SQLite).");
    sqlite_provider.initialize_schema().await?;

    let ai_provider = create_provider(&config.ai)?;
    let agent = QueryAgent::builder()
        .ai_provider(ai_provider)
        .storage(Box::new(sqlite_provider.clone()))
        .options(AgentOptions::from(&config.agent))
        .build()?;

    Ok(AppState {
        config: Arc::new(config),
        sqlite_provider: Arc::new(sqlite_provider),
        agent: Arc::new(agent),
    })
}
