//! HTTP server for the service.
//!
//! Builds the axum router, wires the agents to the chosen backend, and runs
//! until interrupted.

use std::sync::Arc;

use axum::{
    extract::Request,
    routing::{get, post},
    Router,
};
use kala_core::{LearningInsightAgent, MarketingStrategyAgent, TextGenerator};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::{handlers, LogLevel, Result, ServiceError, ServiceOptions};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub marketing: Arc<MarketingStrategyAgent>,
    pub insight: Arc<LearningInsightAgent>,
}

impl AppState {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            marketing: Arc::new(MarketingStrategyAgent::new(generator.clone())),
            insight: Arc::new(LearningInsightAgent::new(generator)),
        }
    }
}

/// Build the router with both agents talking to `generator`.
pub fn build_router(generator: Arc<dyn TextGenerator>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/marketing-agent/strategy", post(handlers::marketing_strategy))
        .route("/learning-manager/insight", post(handlers::learning_insight))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            info_span!(
                "request",
                request_id = %Uuid::new_v4(),
                method = %request.method(),
                uri = %request.uri(),
            )
        }))
        .with_state(AppState::new(generator))
}

/// Serve the agents on an already bound listener.
pub async fn serve(listener: TcpListener, generator: Arc<dyn TextGenerator>) -> Result<()> {
    axum::serve(listener, build_router(generator))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServiceError::ServerError(format!("Server error: {}", e)))
}

/// Run the server with the provided options.
pub async fn run_server(options: ServiceOptions) -> Result<()> {
    if options.init_tracing {
        init_tracing(options.log_level);
    }

    let generator = options.backend.into_generator();

    info!("Starting Kala service on {} with {} backend", options.bind_address, generator.name());
    let listener = TcpListener::bind(options.bind_address).await
        .map_err(|e| ServiceError::ServerError(format!("Failed to bind to address: {}", e)))?;

    serve(listener, generator).await?;

    info!("Kala service stopped");
    Ok(())
}

/// Install the global fmt subscriber. `RUST_LOG` overrides the level default.
fn init_tracing(level: LogLevel) {
    let filter = match level {
        LogLevel::Debug => "kala_service=debug,kala_core=debug,kala_backend_vertex=debug,tower_http=debug",
        LogLevel::Normal => "kala_service=info,kala_core=info,kala_backend_vertex=info,tower_http=info",
        LogLevel::Quiet => "kala_service=error,kala_core=error,kala_backend_vertex=error,tower_http=error",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        // Without a signal handler the server runs until the process exits
        Err(e) => {
            warn!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
