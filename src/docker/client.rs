//! Docker Engine API client.
//!
//! Picks a transport the same way the docker CLI does:
//!
//! 1. an explicit host (`DOCKER_HOST`, `--host` or the config file). With a
//!    certificate directory the connection uses mutual TLS, otherwise plain HTTP.
//! 2. the local unix socket, if it exists
//! 3. plain HTTP on `localhost:2375`

use crate::config::types::ConnectionConfig;
use crate::docker::types::{NetworkDescription, ServiceDescription};
use crate::docker::{ClientError, OrchestrationClient, ResourceKind};

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_HTTP_PORT: u16 = 2375;
const DEFAULT_TLS_PORT: u16 = 2376;
/// Requests over a unix socket still need an http URL; the host is ignored.
#[cfg(unix)]
const SOCKET_BASE_URL: &str = "http://localhost";
const USER_AGENT: &str = concat!("swarm-conformity/", env!("CARGO_PKG_VERSION"));

/// Where and how to reach the Docker daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionTarget {
    /// HTTPS with client certificates from `cert_path`
    Tls { base_url: String, cert_path: PathBuf },
    /// Plaintext HTTP
    Http { base_url: String },
    /// HTTP over a unix domain socket
    Socket { path: PathBuf },
}

impl ConnectionTarget {
    /// Resolve the connection target from merged connection settings.
    pub fn resolve(config: &ConnectionConfig) -> Result<Self, ClientError> {
        if let Some(host) = config.host.as_deref().filter(|h| !h.trim().is_empty()) {
            return Self::from_host(host, config.cert_path.as_deref());
        }

        if config.socket_path.exists() {
            return Ok(Self::Socket {
                path: config.socket_path.clone(),
            });
        }

        Ok(Self::Http {
            base_url: format!("http://localhost:{}", DEFAULT_HTTP_PORT),
        })
    }

    /// Parse a DOCKER_HOST style address.
    pub fn from_host(host: &str, cert_path: Option<&Path>) -> Result<Self, ClientError> {
        let host = host.trim();

        if let Some(path) = host.strip_prefix("unix://") {
            if path.is_empty() {
                return Err(ClientError::InvalidHost(host.to_string()));
            }
            return Ok(Self::Socket {
                path: PathBuf::from(path),
            });
        }

        let (scheme, authority) = if let Some(rest) = host.strip_prefix("tcp://") {
            let scheme = if cert_path.is_some() { "https" } else { "http" };
            (scheme, rest)
        } else if let Some(rest) = host.strip_prefix("https://") {
            ("https", rest)
        } else if let Some(rest) = host.strip_prefix("http://") {
            ("http", rest)
        } else {
            return Err(ClientError::InvalidHost(host.to_string()));
        };

        let authority = authority.trim_end_matches('/');
        if authority.is_empty() || authority.starts_with(':') || authority.contains('/') {
            return Err(ClientError::InvalidHost(host.to_string()));
        }

        let authority = if has_port(authority) {
            authority.to_string()
        } else {
            let port = if scheme == "https" {
                DEFAULT_TLS_PORT
            } else {
                DEFAULT_HTTP_PORT
            };
            format!("{}:{}", authority, port)
        };

        let base_url = format!("{}://{}", scheme, authority);
        Url::parse(&base_url).map_err(|_| ClientError::InvalidHost(host.to_string()))?;

        match (scheme, cert_path) {
            ("https", Some(cert_path)) => Ok(Self::Tls {
                base_url,
                cert_path: cert_path.to_path_buf(),
            }),
            _ => Ok(Self::Http { base_url }),
        }
    }
}

/// True when the authority ends in `:<digits>` (bracketed IPv6 aware).
fn has_port(authority: &str) -> bool {
    let host_end = authority.rfind(']').map_or(0, |i| i + 1);
    authority[host_end..]
        .rsplit_once(':')
        .is_some_and(|(_, port)| !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()))
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tls { base_url, .. } => write!(f, "{} (tls)", base_url),
            Self::Http { base_url } => write!(f, "{}", base_url),
            Self::Socket { path } => write!(f, "unix://{}", path.display()),
        }
    }
}

/// Docker Engine API client implementing [`OrchestrationClient`].
pub struct DockerClient {
    target: ConnectionTarget,
    client: reqwest::Client,
    base_url: Url,
}

impl DockerClient {
    /// Build a client for the given target. No request is made yet.
    ///
    /// `timeout` bounds both connecting and each request; `None` waits
    /// indefinitely.
    pub fn connect(target: ConnectionTarget, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let (client, base_url) = match &target {
            ConnectionTarget::Http { base_url } => (http_builder(timeout).build()?, base_url.as_str()),
            ConnectionTarget::Tls {
                base_url,
                cert_path,
            } => (tls_client(cert_path, timeout)?, base_url.as_str()),
            #[cfg(unix)]
            ConnectionTarget::Socket { path } => (
                http_builder(timeout).unix_socket(path.clone()).build()?,
                SOCKET_BASE_URL,
            ),
            #[cfg(not(unix))]
            ConnectionTarget::Socket { path } => {
                return Err(ClientError::InvalidHost(format!(
                    "unix://{} (unix sockets are not supported on this platform)",
                    path.display()
                )));
            }
        };

        let base_url = parse_base_url(base_url)?;
        log::trace!("docker client targeting {}", target);
        Ok(Self {
            target,
            client,
            base_url,
        })
    }

    /// The target this client talks to.
    pub fn target(&self) -> &ConnectionTarget {
        &self.target
    }

    /// GET a path and return the status code with the raw body.
    async fn get(&self, segments: &[&str]) -> Result<(u16, Vec<u8>), ClientError> {
        let url = endpoint(&self.base_url, segments);
        log::trace!("GET {} via {}", url.path(), self.target);
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        Ok((status, body.to_vec()))
    }

    /// GET a path and decode the JSON body, mapping 404 to `NotFound`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        kind: ResourceKind,
        name: &str,
    ) -> Result<T, ClientError> {
        let (status, body) = self.get(segments).await?;
        match status {
            200..=299 => Ok(serde_json::from_slice(&body)?),
            404 => Err(ClientError::not_found(kind, name)),
            _ => Err(ClientError::Api {
                status,
                message: error_message(&body),
            }),
        }
    }
}

#[async_trait]
impl OrchestrationClient for DockerClient {
    async fn get_service(&self, name: &str) -> Result<ServiceDescription, ClientError> {
        self.get_json(&["services", name], ResourceKind::Service, name)
            .await
    }

    async fn list_services(&self) -> Result<Vec<ServiceDescription>, ClientError> {
        self.get_json(&["services"], ResourceKind::Service, "*").await
    }

    async fn get_network(&self, id_or_name: &str) -> Result<NetworkDescription, ClientError> {
        self.get_json(&["networks", id_or_name], ResourceKind::Network, id_or_name)
            .await
    }
}

fn http_builder(timeout: Option<Duration>) -> reqwest::ClientBuilder {
    let builder = reqwest::Client::builder().user_agent(USER_AGENT);
    match timeout {
        Some(timeout) => builder.connect_timeout(timeout).timeout(timeout),
        None => builder,
    }
}

fn tls_client(cert_path: &Path, timeout: Option<Duration>) -> Result<reqwest::Client, ClientError> {
    let ca = read_pem(cert_path, "ca.pem")?;
    let mut identity = read_pem(cert_path, "cert.pem")?;
    identity.extend_from_slice(&read_pem(cert_path, "key.pem")?);

    let ca = reqwest::Certificate::from_pem(&ca).map_err(|e| ClientError::Certificate {
        path: cert_path.join("ca.pem"),
        reason: e.to_string(),
    })?;
    let identity = reqwest::Identity::from_pem(&identity).map_err(|e| ClientError::Certificate {
        path: cert_path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(http_builder(timeout)
        .add_root_certificate(ca)
        .identity(identity)
        .build()?)
}

fn read_pem(dir: &Path, file: &str) -> Result<Vec<u8>, ClientError> {
    let path = dir.join(file);
    fs::read(&path).map_err(|e| ClientError::Certificate {
        path,
        reason: e.to_string(),
    })
}

fn parse_base_url(base_url: &str) -> Result<Url, ClientError> {
    Url::parse(base_url).map_err(|_| ClientError::InvalidHost(base_url.to_string()))
}

/// Append percent-encoded path segments to a base URL.
fn endpoint(base_url: &Url, segments: &[&str]) -> Url {
    let mut url = base_url.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Extract the daemon's `message` field from an error body.
fn error_message(body: &[u8]) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
    }

    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(err) => err.message,
        Err(_) => String::from_utf8_lossy(body).trim().to_string(),
    }
}
