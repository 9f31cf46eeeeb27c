//! Crate-level error types.

use crate::analyzer::swarmlint::AuditError;
use crate::docker::ClientError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SwarmConformityError {
    #[error(transparent)]
    Audit(#[from] AuditError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {reason}", path.display())]
    ParsingFailed { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, SwarmConformityError>;
