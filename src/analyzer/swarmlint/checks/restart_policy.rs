//! Restart policy checks.

use crate::analyzer::swarmlint::checks::ServiceCheck;
use crate::analyzer::swarmlint::types::{AuditError, Severity};
use crate::docker::{OrchestrationClient, ServiceDescription};
use async_trait::async_trait;

const NANOS_PER_SECOND: f64 = 1e9;

/// Minimum restart delay, in seconds, for services restarted indefinitely.
pub const MIN_RESTART_DELAY_SECS: f64 = 10.0;

fn has_bounded_attempts(service: &ServiceDescription) -> bool {
    service
        .restart_policy()
        .and_then(|policy| policy.max_attempts)
        .is_some_and(|attempts| attempts > 0)
}

/// A bounded number of restarts needs a window to reset the count in.
pub struct MaxAttemptsCheck;

#[async_trait]
impl ServiceCheck for MaxAttemptsCheck {
    fn name(&self) -> &'static str {
        "Restart Policy Max Attempts"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    async fn conforms(
        &self,
        service: &ServiceDescription,
        _client: &dyn OrchestrationClient,
    ) -> Result<bool, AuditError> {
        let window = service.restart_policy().and_then(|policy| policy.window);
        let missing_window = matches!(window, None | Some(0));
        Ok(!(has_bounded_attempts(service) && missing_window))
    }
}

/// Services restarted indefinitely should back off for at least ten seconds.
pub struct RestartDelayCheck;

#[async_trait]
impl ServiceCheck for RestartDelayCheck {
    fn name(&self) -> &'static str {
        "Restart Policy Delay"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    async fn conforms(
        &self,
        service: &ServiceDescription,
        _client: &dyn OrchestrationClient,
    ) -> Result<bool, AuditError> {
        let delay_secs = service
            .restart_policy()
            .and_then(|policy| policy.delay)
            .map(|nanos| nanos as f64 / NANOS_PER_SECOND);

        Ok(has_bounded_attempts(service)
            || delay_secs.is_some_and(|secs| secs >= MIN_RESTART_DELAY_SECS))
    }
}
