//! Docker Engine API models for swarm services and networks.
//!
//! Only the fields the conformity checks read are modelled. Every nested
//! section is optional because the daemon omits fields that were never set,
//! and "never set" has to stay distinguishable from an explicit zero.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A swarm service as returned by `GET /services/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceDescription {
    /// Service ID assigned by the swarm manager.
    #[serde(rename = "ID", default)]
    pub id: String,
    /// The user-supplied service specification.
    #[serde(default)]
    pub spec: ServiceSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceSpec {
    #[serde(default)]
    pub name: String,
    pub labels: Option<HashMap<String, String>>,
    #[serde(default)]
    pub task_template: TaskTemplate,
    pub update_config: Option<UpdateConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskTemplate {
    pub resources: Option<Resources>,
    pub networks: Option<Vec<NetworkAttachment>>,
    pub restart_policy: Option<RestartPolicy>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Resources {
    pub limits: Option<ResourceLimits>,
    pub reservations: Option<ResourceLimits>,
}

/// CPU and memory quotas. CPU is expressed in units of 10^-9 CPUs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceLimits {
    #[serde(rename = "NanoCPUs")]
    pub nano_cpus: Option<i64>,
    #[serde(rename = "MemoryBytes")]
    pub memory_bytes: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkAttachment {
    /// Network ID or name the service is attached to.
    pub target: String,
    pub aliases: Option<Vec<String>>,
}

/// Task restart policy. `delay` and `window` are nanoseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RestartPolicy {
    pub condition: Option<String>,
    pub delay: Option<i64>,
    pub max_attempts: Option<i64>,
    pub window: Option<i64>,
}

/// Rolling update settings. `delay` is nanoseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateConfig {
    pub parallelism: Option<u64>,
    pub delay: Option<i64>,
    pub failure_action: Option<String>,
}

impl ServiceDescription {
    /// Create an empty service description with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            spec: ServiceSpec {
                name: name.into(),
                ..Default::default()
            },
        }
    }

    /// Parse a service from the daemon's JSON representation.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// Look up a single label value.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.spec
            .labels
            .as_ref()
            .and_then(|labels| labels.get(key))
            .map(String::as_str)
    }

    /// Check whether a label key is present, regardless of its value.
    pub fn has_label(&self, key: &str) -> bool {
        self.spec
            .labels
            .as_ref()
            .is_some_and(|labels| labels.contains_key(key))
    }

    /// Iterate over the service's label keys.
    pub fn label_keys(&self) -> impl Iterator<Item = &str> {
        self.spec
            .labels
            .iter()
            .flat_map(|labels| labels.keys().map(String::as_str))
    }

    /// Attached network identifiers, in attachment order.
    pub fn network_targets(&self) -> impl Iterator<Item = &str> {
        self.spec
            .task_template
            .networks
            .iter()
            .flatten()
            .map(|attachment| attachment.target.as_str())
    }

    pub fn network_count(&self) -> usize {
        self.spec
            .task_template
            .networks
            .as_ref()
            .map_or(0, Vec::len)
    }

    pub fn limits(&self) -> Option<&ResourceLimits> {
        self.spec
            .task_template
            .resources
            .as_ref()
            .and_then(|resources| resources.limits.as_ref())
    }

    pub fn restart_policy(&self) -> Option<&RestartPolicy> {
        self.spec.task_template.restart_policy.as_ref()
    }

    /// Update delay in nanoseconds, if one is declared.
    pub fn update_delay(&self) -> Option<i64> {
        self.spec.update_config.as_ref().and_then(|config| config.delay)
    }

    /// Set a label.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.spec
            .labels
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Attach a network by ID or name.
    pub fn with_network(mut self, target: impl Into<String>) -> Self {
        self.spec
            .task_template
            .networks
            .get_or_insert_with(Vec::new)
            .push(NetworkAttachment {
                target: target.into(),
                aliases: None,
            });
        self
    }

    /// Set resource limits.
    pub fn with_limits(mut self, nano_cpus: Option<i64>, memory_bytes: Option<i64>) -> Self {
        self.spec
            .task_template
            .resources
            .get_or_insert_with(Resources::default)
            .limits = Some(ResourceLimits {
            nano_cpus,
            memory_bytes,
        });
        self
    }

    /// Set the restart policy.
    pub fn with_restart_policy(mut self, policy: RestartPolicy) -> Self {
        self.spec.task_template.restart_policy = Some(policy);
        self
    }

    /// Set the update delay in nanoseconds.
    pub fn with_update_delay(mut self, delay: i64) -> Self {
        self.spec
            .update_config
            .get_or_insert_with(UpdateConfig::default)
            .delay = Some(delay);
        self
    }
}

/// A network as returned by `GET /networks/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkDescription {
    #[serde(rename = "Id", default)]
    pub id: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Labels")]
    pub labels: Option<HashMap<String, String>>,
}

impl NetworkDescription {
    /// Create a network with the given ID, also used as its name.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            labels: None,
        }
    }

    /// Set a label.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Check whether any label key starts with `prefix`.
    pub fn has_label_prefix(&self, prefix: &str) -> bool {
        self.labels
            .as_ref()
            .is_some_and(|labels| labels.keys().any(|key| key.starts_with(prefix)))
    }
}
