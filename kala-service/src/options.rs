//! Command-line and environment configuration for the service.

use std::net::SocketAddr;

use clap::{Parser, ValueEnum};
use kala_backend_vertex::settings::{DEFAULT_LOCATION, DEFAULT_MODEL, DEFAULT_PROJECT_ID};
use kala_backend_vertex::VertexSettings;

use crate::{Backend, LogLevel, Result, ServiceError, ServiceOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    Stub,
    Vertex,
}

/// Command-line arguments for the service.
#[derive(Parser, Debug)]
#[command(author, version, about = "HTTP service for the Kala marketing and learning agents")]
pub struct CliOptions {
    /// Address to bind the server to
    #[arg(short, long, env = "KALA_BIND", default_value = "127.0.0.1:8000")]
    pub bind: String,

    /// Text generation backend
    #[arg(long, env = "KALA_BACKEND", value_enum, default_value_t = BackendKind::Stub)]
    pub backend: BackendKind,

    /// Log debug output, including every prompt sent to the backend
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Google Cloud project hosting the model
    #[arg(long, env = "VERTEX_PROJECT_ID", default_value = DEFAULT_PROJECT_ID)]
    pub vertex_project_id: String,

    /// Vertex AI region
    #[arg(long, env = "VERTEX_LOCATION", default_value = DEFAULT_LOCATION)]
    pub vertex_location: String,

    /// Vertex AI model
    #[arg(long, env = "VERTEX_MODEL", default_value = DEFAULT_MODEL)]
    pub vertex_model: String,

    /// OAuth access token for Vertex AI
    #[arg(long, env = "VERTEX_ACCESS_TOKEN", hide_env_values = true)]
    pub vertex_access_token: Option<String>,

    /// Base URL override for Vertex AI
    #[arg(long, env = "VERTEX_ENDPOINT")]
    pub vertex_endpoint: Option<String>,
}

impl CliOptions {
    /// Convert CLI options to ServiceOptions
    pub fn into_service_options(self) -> Result<ServiceOptions> {
        let bind_address = self.bind.parse::<SocketAddr>()
            .map_err(|e| ServiceError::InvalidOptions(format!("Invalid bind address '{}': {}", self.bind, e)))?;

        let backend = match self.backend {
            BackendKind::Stub => Backend::Stub,
            BackendKind::Vertex => Backend::Vertex(VertexSettings {
                project_id: self.vertex_project_id,
                location: self.vertex_location,
                model: self.vertex_model,
                access_token: self.vertex_access_token,
                endpoint: self.vertex_endpoint,
                ..VertexSettings::default()
            }),
        };

        let log_level = if self.verbose {
            LogLevel::Debug
        } else if self.quiet {
            LogLevel::Quiet
        } else {
            LogLevel::Normal
        };

        Ok(ServiceOptions {
            bind_address,
            backend,
            init_tracing: true,
            log_level,
        })
    }
}
