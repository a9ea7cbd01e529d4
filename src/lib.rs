//! Team Roster
//!
//! HTTP backend for users, teams and team memberships:
//! - Pluggable database handlers (SQLite, fixture mock, failing mock)
//! - Per-request backend selection via `?backend=`
//! - Argon2 password hashing before anything reaches storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use api::state::AppState;
use infrastructure::database::HandlerRegistry;
use tracing::info;

/// Create the application state from configuration, opening the database on the way
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    info!(
        file = %config.database.database_file().display(),
        backend = %config.database.backend,
        "Initializing database handlers"
    );

    let registry = HandlerRegistry::from_config(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize database handlers: {}", e))?;

    Ok(AppState::new(registry))
}
