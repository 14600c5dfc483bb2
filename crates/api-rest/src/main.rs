//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! This binary is useful for development and debugging of the HTTP layer (with OpenAPI/Swagger
//! UI). The workspace's main `carechain-run` binary serves the same router.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use carechain_core::{
    dataset_path_from_env_value, demo_fallback_from_env_value, CoreConfig, InteractionIndex,
    InteractionService, InteractionTable,
};

/// Main entry point for the CareChain REST API server
///
/// Starts the REST API server on the configured address (default: 0.0.0.0:3000).
///
/// # Environment Variables
/// - `CARECHAIN_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `DRUG_INTERACTIONS_FILE`: Interaction CSV (default: "public/drug_interactions.csv")
/// - `CARECHAIN_DEMO_FALLBACK`: Add flagged demonstration results (default: false)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("CARECHAIN_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let dataset_path = dataset_path_from_env_value(std::env::var("DRUG_INTERACTIONS_FILE").ok());
    let demo_fallback =
        demo_fallback_from_env_value(std::env::var("CARECHAIN_DEMO_FALLBACK").ok())?;
    let cfg = Arc::new(CoreConfig::new(dataset_path, demo_fallback)?);

    let table = Arc::new(InteractionTable::new(InteractionIndex::load(
        cfg.dataset_path(),
    )));
    let state = AppState {
        service: InteractionService::new(table, cfg),
    };

    tracing::info!("-- Starting CareChain REST API on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
