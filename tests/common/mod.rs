//! In-memory swarm shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use swarm_conformity::docker::{
    ClientError, NetworkDescription, OrchestrationClient, ResourceKind, RestartPolicy,
    ServiceDescription,
};

pub const SECOND: i64 = 1_000_000_000;

/// A swarm held in memory. Services are listed in insertion order.
#[derive(Default)]
pub struct FakeSwarm {
    services: Vec<ServiceDescription>,
    networks: HashMap<String, NetworkDescription>,
    network_lookups: AtomicUsize,
}

impl FakeSwarm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_service(mut self, service: ServiceDescription) -> Self {
        self.services.push(service);
        self
    }

    pub fn with_network(mut self, network: NetworkDescription) -> Self {
        self.networks.insert(network.id.clone(), network);
        self
    }

    /// Number of network lookups that reached this client.
    pub fn network_lookups(&self) -> usize {
        self.network_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrchestrationClient for FakeSwarm {
    async fn get_service(&self, name: &str) -> Result<ServiceDescription, ClientError> {
        self.services
            .iter()
            .find(|s| s.name() == name)
            .cloned()
            .ok_or_else(|| ClientError::not_found(ResourceKind::Service, name))
    }

    async fn list_services(&self) -> Result<Vec<ServiceDescription>, ClientError> {
        Ok(self.services.clone())
    }

    async fn get_network(&self, id_or_name: &str) -> Result<NetworkDescription, ClientError> {
        self.network_lookups.fetch_add(1, Ordering::SeqCst);
        self.networks
            .get(id_or_name)
            .cloned()
            .ok_or_else(|| ClientError::not_found(ResourceKind::Network, id_or_name))
    }
}

/// A service that passes every check.
pub fn conforming(name: &str) -> ServiceDescription {
    ServiceDescription::new(name)
        .with_limits(Some(SECOND / 2), Some(256 * 1024 * 1024))
        .with_restart_policy(RestartPolicy {
            condition: Some("on-failure".to_string()),
            delay: Some(5 * SECOND),
            max_attempts: Some(3),
            window: Some(60 * SECOND),
        })
}

/// Missing memory limit and no restart delay: one failure, one warning.
pub fn sloppy(name: &str) -> ServiceDescription {
    ServiceDescription::new(name).with_limits(Some(SECOND), None)
}
