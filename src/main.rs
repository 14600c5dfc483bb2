use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use carechain_core::{
    dataset_path_from_env_value, demo_fallback_from_env_value, CoreConfig, InteractionIndex,
    InteractionService, InteractionTable,
};

/// Main entry point for the CareChain application
///
/// Resolves configuration from the environment once, loads the interaction dataset (falling back
/// to the built-in sample if it cannot be read) and serves the REST API.
///
/// # Environment Variables
/// - `CARECHAIN_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `DRUG_INTERACTIONS_FILE`: Interaction CSV (default: "public/drug_interactions.csv")
/// - `CARECHAIN_DEMO_FALLBACK`: Add flagged demonstration results when nothing is found
///   (`true`/`false`, default: false)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration is invalid or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("carechain=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("CARECHAIN_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = Arc::new(CoreConfig::new(
        dataset_path_from_env_value(std::env::var("DRUG_INTERACTIONS_FILE").ok()),
        demo_fallback_from_env_value(std::env::var("CARECHAIN_DEMO_FALLBACK").ok())?,
    )?);

    let index = InteractionIndex::load(cfg.dataset_path());
    tracing::info!(
        "++ Interaction dataset: {} ({} records, {} drugs)",
        index.source(),
        index.record_count(),
        index.drug_count()
    );
    if cfg.demo_fallback() {
        tracing::info!("++ Demonstration fallback enabled; synthesized results are flagged");
    }

    let service = InteractionService::new(Arc::new(InteractionTable::new(index)), cfg);

    tracing::info!("++ Starting CareChain REST on {}", rest_addr);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, router(AppState { service })).await?;

    Ok(())
}
