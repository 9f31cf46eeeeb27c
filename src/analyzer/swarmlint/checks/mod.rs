//! Built-in conformity checks.
//!
//! The registry is fixed at build time. Every check is independent of the
//! others: it reads the service description, may look up networks through
//! the client, and produces exactly one verdict.

pub mod interlock;
pub mod resources;
pub mod restart_policy;
pub mod routing_mesh;

use crate::analyzer::swarmlint::types::{AuditError, Severity};
use crate::docker::{OrchestrationClient, ServiceDescription};
use async_trait::async_trait;

/// Label prefix reserved for the UCP HTTP routing mesh.
pub const ROUTING_MESH_LABEL_PREFIX: &str = "com.docker.ucp.mesh.http";

/// Label listing the hostnames Interlock routes to a service.
pub const LB_HOSTS_LABEL: &str = "com.docker.lb.hosts";

/// Label naming the network Interlock should use to reach a service.
pub const LB_NETWORK_LABEL: &str = "com.docker.lb.network";

/// A single conformity rule.
#[async_trait]
pub trait ServiceCheck: Send + Sync {
    /// Human-readable name shown in reports.
    fn name(&self) -> &'static str;

    /// How a non-conforming service is counted.
    fn severity(&self) -> Severity;

    /// Whether the service conforms to this rule.
    ///
    /// Missing fields are input, not errors: they resolve to `Ok(true)` or
    /// `Ok(false)`. Only lookups that cannot be answered return `Err`.
    async fn conforms(
        &self,
        service: &ServiceDescription,
        client: &dyn OrchestrationClient,
    ) -> Result<bool, AuditError>;
}

/// Get all built-in checks, in reporting order.
pub fn builtin_checks() -> Vec<Box<dyn ServiceCheck>> {
    vec![
        Box::new(resources::CpuLimitCheck),
        Box::new(resources::MemoryLimitCheck),
        Box::new(routing_mesh::RoutingMeshLabelsCheck),
        Box::new(routing_mesh::RoutingMeshNetworkCheck),
        Box::new(interlock::InterlockNetworkLabelCheck),
        Box::new(interlock::InterlockUpdateDelayCheck),
        Box::new(restart_policy::MaxAttemptsCheck),
        Box::new(restart_policy::RestartDelayCheck),
    ]
}
