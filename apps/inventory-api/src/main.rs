//! Inventory API - REST server for product inventory tracking

use axum_helpers::create_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_inventory::{PgProductRepository, ProductService};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to Postgres");

    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("Database connection failed: {}", e))?;

    database::postgres::run_migrations::<migration::Migrator>(&db, "inventory-api")
        .await
        .map_err(|e| eyre::eyre!("Migration failed: {}", e))?;

    let state = AppState { db: db.clone() };

    // Build REST router
    let repository = PgProductRepository::new(db.clone());
    let service = ProductService::new(repository);

    let api_routes = api::routes(service);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes);
    let app = router.merge(api::health::router(state));

    info!(
        "Starting Inventory API - REST on port {}",
        config.server.port
    );

    create_app(app, &config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Shutting down: closing database connection");
    db.close().await?;

    info!("Inventory API shutdown complete");
    Ok(())
}
