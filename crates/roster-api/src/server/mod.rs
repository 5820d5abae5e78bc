//! Server setup and initialization
//!
//! Provides the application builder and server runner.

use std::sync::Arc;

use axum::Router;
use roster_common::{AppConfig, AppError, StoreBackend};
use roster_core::AllianceConfig;
use roster_db::{
    create_pool, run_migrations, InMemoryConfigStore, InMemorySnapshotStore, PgConfigRepository,
    PgSnapshotRepository, PoolConfig,
};
use roster_service::{GeminiConfig, GeminiRecognizer, ServiceContext, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    let health = apply_middleware(health_routes());

    api.merge(health).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let builder = match config.store {
        StoreBackend::Postgres => postgres_repositories(&config).await?,
        StoreBackend::Memory => {
            info!("Using the in-memory record store");
            ServiceContext::builder()
                .snapshot_repo(Arc::new(InMemorySnapshotStore::new()))
                .config_repo(Arc::new(InMemoryConfigStore::new()))
        }
    };

    let builder = match GeminiConfig::from_settings(&config.recognition) {
        Some(gemini) => {
            info!(model = %gemini.model, "Name recognition enabled");
            builder.recognizer(Arc::new(GeminiRecognizer::new(gemini)))
        }
        None => {
            info!("Name recognition disabled (no RECOGNITION_API_KEY)");
            builder
        }
    };

    let service_context = builder
        .alliance_defaults(AllianceConfig {
            logo: Some(config.alliance.logo.clone()),
            alliance_name: Some(config.alliance.name.clone()),
        })
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

async fn postgres_repositories(config: &AppConfig) -> Result<ServiceContextBuilder, AppError> {
    let db_config = config
        .database
        .as_ref()
        .ok_or_else(|| AppError::Config("DATABASE_URL is required for the postgres store".to_string()))?;

    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(db_config))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    Ok(ServiceContext::builder()
        .snapshot_repo(Arc::new(PgSnapshotRepository::new(pool.clone())))
        .config_repo(Arc::new(PgConfigRepository::new(pool))))
}

/// Run the HTTP server on an already bound listener
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Failed to read local address: {e}")))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state);

    info!("Starting HTTP server on {}", addr);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    run_server(app, listener).await
}
