//! Docker Engine API access.
//!
//! The conformity engine only ever talks to the orchestrator through the
//! [`OrchestrationClient`] trait. [`DockerClient`] is the production
//! implementation; tests substitute in-memory fakes.
//!
//! # Example
//!
//! ```rust,ignore
//! use swarm_conformity::docker::{ConnectionTarget, DockerClient, OrchestrationClient};
//!
//! let target = ConnectionTarget::resolve(&config.connection)?;
//! let client = DockerClient::connect(target, config.connection.timeout())?;
//! for service in client.list_services().await? {
//!     println!("{}", service.name());
//! }
//! ```

pub mod client;
pub mod types;

pub use client::{ConnectionTarget, DockerClient};
pub use types::{NetworkDescription, RestartPolicy, ServiceDescription};

use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;

/// Kind of swarm object a lookup was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Service,
    Network,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Network => "network",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur when talking to the Docker daemon.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The requested service or network does not exist
    #[error("No such {kind}: {name}")]
    NotFound { kind: ResourceKind, name: String },

    /// HTTP request failed (connection refused, timeout, TLS, etc.)
    #[error("Docker API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Daemon returned an error response
    #[error("Docker API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected model
    #[error("Failed to decode Docker API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// DOCKER_HOST (or its override) could not be understood
    #[error("Invalid Docker host '{0}'")]
    InvalidHost(String),

    /// TLS material could not be loaded
    #[error("Failed to load TLS material from {}: {reason}", path.display())]
    Certificate { path: PathBuf, reason: String },
}

impl ClientError {
    pub fn not_found(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Read-only view of a swarm used by the conformity checks.
#[async_trait]
pub trait OrchestrationClient: Send + Sync {
    /// Fetch one service by name or ID.
    ///
    /// Returns [`ClientError::NotFound`] if no such service exists.
    async fn get_service(&self, name: &str) -> Result<ServiceDescription, ClientError>;

    /// List every service in the swarm, in the order the manager reports them.
    async fn list_services(&self) -> Result<Vec<ServiceDescription>, ClientError>;

    /// Fetch one network by ID or name.
    ///
    /// Returns [`ClientError::NotFound`] if no such network exists.
    async fn get_network(&self, id_or_name: &str) -> Result<NetworkDescription, ClientError>;
}
