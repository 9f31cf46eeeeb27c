//! Interlock load balancer checks.
//!
//! Both checks only apply to services published through Interlock, i.e.
//! services carrying the `com.docker.lb.hosts` label. Every other service
//! trivially conforms.

use crate::analyzer::swarmlint::checks::{LB_HOSTS_LABEL, LB_NETWORK_LABEL, ServiceCheck};
use crate::analyzer::swarmlint::types::{AuditError, Severity};
use crate::docker::{OrchestrationClient, ServiceDescription};
use async_trait::async_trait;

/// Published services must name an existing network for Interlock.
///
/// With several attached networks the `com.docker.lb.network` label is
/// mandatory. Whenever the label is missing or empty the check fails without
/// a lookup; otherwise the named network must exist.
pub struct InterlockNetworkLabelCheck;

#[async_trait]
impl ServiceCheck for InterlockNetworkLabelCheck {
    fn name(&self) -> &'static str {
        "Interlock Network Label"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    async fn conforms(
        &self,
        service: &ServiceDescription,
        client: &dyn OrchestrationClient,
    ) -> Result<bool, AuditError> {
        if !service.has_label(LB_HOSTS_LABEL) {
            return Ok(true);
        }

        let Some(network) = service.label(LB_NETWORK_LABEL).filter(|n| !n.is_empty()) else {
            log::trace!(
                "service {} is published without {} ({} networks attached)",
                service.name(),
                LB_NETWORK_LABEL,
                service.network_count()
            );
            return Ok(false);
        };

        match client.get_network(network).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Published services should declare an update delay.
pub struct InterlockUpdateDelayCheck;

#[async_trait]
impl ServiceCheck for InterlockUpdateDelayCheck {
    fn name(&self) -> &'static str {
        "Interlock Update Delay"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    async fn conforms(
        &self,
        service: &ServiceDescription,
        _client: &dyn OrchestrationClient,
    ) -> Result<bool, AuditError> {
        if !service.has_label(LB_HOSTS_LABEL) {
            return Ok(true);
        }
        Ok(service.update_delay().is_some())
    }
}
