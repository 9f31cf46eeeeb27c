//! Network lookup memoisation for a single service evaluation.

use crate::docker::{ClientError, NetworkDescription, OrchestrationClient, ResourceKind, ServiceDescription};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Wraps a client and remembers network answers by identifier.
///
/// Successful lookups and `NotFound` answers are cached; transport errors
/// are not. Service lookups pass straight through.
pub struct NetworkCache<'a> {
    inner: &'a dyn OrchestrationClient,
    networks: Mutex<HashMap<String, Option<NetworkDescription>>>,
}

impl<'a> NetworkCache<'a> {
    pub fn new(inner: &'a dyn OrchestrationClient) -> Self {
        Self {
            inner,
            networks: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl OrchestrationClient for NetworkCache<'_> {
    async fn get_service(&self, name: &str) -> Result<ServiceDescription, ClientError> {
        self.inner.get_service(name).await
    }

    async fn list_services(&self) -> Result<Vec<ServiceDescription>, ClientError> {
        self.inner.list_services().await
    }

    async fn get_network(&self, id_or_name: &str) -> Result<NetworkDescription, ClientError> {
        if let Some(cached) = self.networks.lock().await.get(id_or_name) {
            return cached
                .clone()
                .ok_or_else(|| ClientError::not_found(ResourceKind::Network, id_or_name));
        }

        // Lock released during the fetch; concurrent misses may fetch twice.
        let fetched = match self.inner.get_network(id_or_name).await {
            Ok(network) => Some(network),
            Err(e) if e.is_not_found() => None,
            Err(e) => return Err(e),
        };

        self.networks
            .lock()
            .await
            .insert(id_or_name.to_string(), fetched.clone());

        fetched.ok_or_else(|| ClientError::not_found(ResourceKind::Network, id_or_name))
    }
}
