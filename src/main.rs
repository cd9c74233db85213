use dotenvy::dotenv;
use partner_badge::{
    config::{self, database},
    core::seed,
    errors::Result,
    http::{self, AppState},
};
use std::{env, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    let addr = app_config.server.socket_addr()?;
    info!("Successfully processed application configuration.");

    // 4. Connect and ensure the schema
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Seed from BADGE_SEED_FILE, if given
    if let Ok(seed_path) = env::var("BADGE_SEED_FILE") {
        let seed_config = config::seed::load_seed(&seed_path)?;
        seed::seed_database(&db, &seed_config)
            .await
            .inspect_err(|e| error!("Failed to seed database from {}: {}", seed_path, e))?;
    }

    // 6. Serve
    let state = AppState::new(db, Arc::new(app_config));
    http::serve(state, addr).await
}
