//! Resource limit checks.

use crate::analyzer::swarmlint::checks::ServiceCheck;
use crate::analyzer::swarmlint::types::{AuditError, Severity};
use crate::docker::{OrchestrationClient, ServiceDescription};
use async_trait::async_trait;

/// Services must declare a CPU limit.
pub struct CpuLimitCheck;

#[async_trait]
impl ServiceCheck for CpuLimitCheck {
    fn name(&self) -> &'static str {
        "CPU Limit"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    async fn conforms(
        &self,
        service: &ServiceDescription,
        _client: &dyn OrchestrationClient,
    ) -> Result<bool, AuditError> {
        Ok(service
            .limits()
            .is_some_and(|limits| limits.nano_cpus.is_some()))
    }
}

/// Services must declare a memory limit.
pub struct MemoryLimitCheck;

#[async_trait]
impl ServiceCheck for MemoryLimitCheck {
    fn name(&self) -> &'static str {
        "Memory Limit"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    async fn conforms(
        &self,
        service: &ServiceDescription,
        _client: &dyn OrchestrationClient,
    ) -> Result<bool, AuditError> {
        Ok(service
            .limits()
            .is_some_and(|limits| limits.memory_bytes.is_some()))
    }
}
