use crate::analyzer::swarmlint::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub output: OutputConfig,
}

/// Docker daemon connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Daemon address in DOCKER_HOST syntax (tcp://, http://, https://, unix://)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Directory holding ca.pem, cert.pem and key.pem
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert_path: Option<PathBuf>,
    /// Socket used when no host is configured
    pub socket_path: PathBuf,
    /// Connect and request timeout; 0 disables it
    pub timeout_secs: u64,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color: bool,
}

fn default_socket_path() -> PathBuf {
    PathBuf::from("/var/run/docker.sock")
}

impl ConnectionConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: None,
            cert_path: None,
            socket_path: default_socket_path(),
            timeout_secs: 30,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Plain,
            color: true,
        }
    }
}
