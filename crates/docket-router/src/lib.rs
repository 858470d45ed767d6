//! Docket Router
//!
//! The HTTP surface of the risk pipeline. Each prediction request runs
//! through validation, feature derivation and the classifier, and the
//! resulting probability is persisted so ground truth can be attached later.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod pipeline;

use config::RouterConfig;
use docket_features::{RaceReferenceCounts, ReferenceError};
use docket_gatekeeper::Gatekeeper;
use docket_model::{LogisticModel, ModelError};
use docket_store::{SqliteStore, StoreError};
use handlers::{create_router, AppState};
use pipeline::Pipeline;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Router error
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Model artifact could not be loaded
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Race reference table could not be loaded
    #[error("Reference data error: {0}")]
    Reference(#[from] ReferenceError),

    /// Prediction store could not be opened
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Load the model, reference table and store named by `config`
pub fn build_state(config: &RouterConfig) -> Result<AppState, RouterError> {
    let model = LogisticModel::from_file(&config.model_path)?;
    let reference = RaceReferenceCounts::from_file(&config.race_counts_path)?;
    info!(
        categories = reference.len(),
        min_count = reference.min_count(),
        "race reference counts loaded"
    );

    let store = SqliteStore::open(&config.database_path)?;
    info!(path = %config.database_path, "prediction store opened");

    let pipeline = Pipeline::new(
        Gatekeeper::new(config.validation.clone()),
        reference,
        model,
        config.threshold,
    );

    Ok(AppState::new(pipeline, store))
}

/// Start the Router HTTP server
///
/// Initializes tracing, loads every artifact once and starts the axum
/// server.
pub async fn start_server(config: RouterConfig) -> Result<(), RouterError> {
    // Initialize tracing; a subscriber installed by the embedding process wins
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();

    info!("Starting Docket Router");
    info!("Bind address: {}", config.bind_addr());
    info!("Decision threshold: {}", config.threshold);

    let state = build_state(&config)?;
    let app = create_router(state);

    // Bind and serve
    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Router listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| RouterError::Server(e.to_string()))?;

    Ok(())
}
