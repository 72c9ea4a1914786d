//! HTTP service for the Kala agents.
//!
//! Exposes the marketing strategy and learning insight agents over JSON/HTTP.
//! The text generation backend is chosen at startup and injected into both
//! agents; the agents themselves never read configuration.

pub mod server;
pub mod handlers;
pub mod options;

use std::net::SocketAddr;
use std::sync::Arc;

use kala_backend_vertex::{VertexGenerator, VertexSettings};
use kala_core::{AgentError, StubGenerator, TextGenerator};
use thiserror::Error;

/// Error type for service operations
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Server error: {0}")]
    ServerError(String),
}

/// Type alias for service results
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Default log verbosity for the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Normal,
    Quiet,
}

/// Which text generation backend the agents talk to.
#[derive(Debug, Clone, PartialEq)]
pub enum Backend {
    /// Deterministic fixed answers
    Stub,
    /// Gemini on Vertex AI
    Vertex(VertexSettings),
}

impl Backend {
    pub fn into_generator(self) -> Arc<dyn TextGenerator> {
        match self {
            Backend::Stub => Arc::new(StubGenerator::new()),
            Backend::Vertex(settings) => Arc::new(VertexGenerator::new(settings)),
        }
    }
}

/// Configuration options for the service.
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    /// Address to bind the server to
    pub bind_address: SocketAddr,

    /// Text generation backend
    pub backend: Backend,

    /// Whether to install the global tracing subscriber
    pub init_tracing: bool,

    pub log_level: LogLevel,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 8000)),
            backend: Backend::Stub,
            init_tracing: true,
            log_level: LogLevel::Normal,
        }
    }
}

/// Start the service with the given options.
///
/// This is the main entry point for starting the service programmatically.
pub async fn start_service(options: ServiceOptions) -> Result<()> {
    server::run_server(options).await
}
