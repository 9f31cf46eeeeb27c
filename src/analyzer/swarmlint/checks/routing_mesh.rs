//! HTTP routing mesh checks.
//!
//! The UCP HTTP routing mesh is configured through reserved labels. Setting
//! them by hand on a service, or attaching a service to a network that
//! carries them, indicates legacy configuration.

use crate::analyzer::swarmlint::checks::{ROUTING_MESH_LABEL_PREFIX, ServiceCheck};
use crate::analyzer::swarmlint::types::{AuditError, Severity};
use crate::docker::{OrchestrationClient, ServiceDescription};
use async_trait::async_trait;

/// Services must not carry routing mesh labels.
pub struct RoutingMeshLabelsCheck;

#[async_trait]
impl ServiceCheck for RoutingMeshLabelsCheck {
    fn name(&self) -> &'static str {
        "HTTP Routing Mesh Labels"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    async fn conforms(
        &self,
        service: &ServiceDescription,
        _client: &dyn OrchestrationClient,
    ) -> Result<bool, AuditError> {
        Ok(!service
            .label_keys()
            .any(|key| key.starts_with(ROUTING_MESH_LABEL_PREFIX)))
    }
}

/// Services must not be attached to routing mesh networks.
///
/// Networks are inspected in attachment order and the scan stops at the
/// first routing mesh network. A network the service is attached to but the
/// daemon cannot find aborts the run.
pub struct RoutingMeshNetworkCheck;

#[async_trait]
impl ServiceCheck for RoutingMeshNetworkCheck {
    fn name(&self) -> &'static str {
        "HTTP Routing Mesh Network"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    async fn conforms(
        &self,
        service: &ServiceDescription,
        client: &dyn OrchestrationClient,
    ) -> Result<bool, AuditError> {
        for network_id in service.network_targets() {
            let network = client.get_network(network_id).await.map_err(|e| {
                if e.is_not_found() {
                    AuditError::AttachedNetworkMissing {
                        service: service.name().to_string(),
                        network: network_id.to_string(),
                    }
                } else {
                    AuditError::Client(e)
                }
            })?;

            if network.has_label_prefix(ROUTING_MESH_LABEL_PREFIX) {
                log::trace!(
                    "service {} is attached to routing mesh network {}",
                    service.name(),
                    network_id
                );
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::swarmlint::checks::testing::NoLookups;
    use proptest::prelude::*;

    fn labels_conform(service: &ServiceDescription) -> bool {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        rt.block_on(RoutingMeshLabelsCheck.conforms(service, &NoLookups))
            .unwrap()
    }

    #[test]
    fn test_no_labels() {
        assert!(labels_conform(&ServiceDescription::new("web")));
    }

    #[test]
    fn test_routing_mesh_label() {
        let service = ServiceDescription::new("web")
            .with_label("com.docker.ucp.mesh.http.80", "external_route=http://app.example.org");
        assert!(!labels_conform(&service));
    }

    #[test]
    fn test_prefix_must_match_at_start() {
        let service = ServiceDescription::new("web")
            .with_label("x.com.docker.ucp.mesh.http", "1")
            .with_label("com.docker.ucp.mesh", "1");
        assert!(labels_conform(&service));
    }

    #[tokio::test]
    async fn test_no_networks_makes_no_lookups() {
        let service = ServiceDescription::new("web");
        assert!(
            RoutingMeshNetworkCheck
                .conforms(&service, &NoLookups)
                .await
                .unwrap()
        );
    }

    proptest! {
        #[test]
        fn prop_labels_without_prefix_pass(keys in proptest::collection::vec("[a-z.]{1,24}", 0..6)) {
            let mut service = ServiceDescription::new("svc");
            for key in keys.iter().filter(|k| !k.starts_with(ROUTING_MESH_LABEL_PREFIX)) {
                service = service.with_label(key.clone(), "v");
            }
            prop_assert!(labels_conform(&service));
        }

        #[test]
        fn prop_any_prefixed_label_fails(
            keys in proptest::collection::vec("[a-z.]{1,24}", 0..6),
            suffix in "[a-z0-9.]{0,8}",
        ) {
            let mut service = ServiceDescription::new("svc")
                .with_label(format!("{}{}", ROUTING_MESH_LABEL_PREFIX, suffix), "v");
            for key in keys {
                service = service.with_label(key, "v");
            }
            prop_assert!(!labels_conform(&service));
        }
    }
}
