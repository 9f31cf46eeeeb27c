//! Service and fleet evaluation.
//!
//! A service is evaluated by running every registered check concurrently
//! and collecting the results in registration order. A fleet is evaluated
//! one service at a time, in the order the swarm manager lists them.

use crate::analyzer::swarmlint::cache::NetworkCache;
use crate::analyzer::swarmlint::checks::{ServiceCheck, builtin_checks};
use crate::analyzer::swarmlint::types::{AuditError, CheckResult, Outcome};
use crate::docker::{OrchestrationClient, ServiceDescription};

use futures_util::future::join_all;
use serde::Serialize;

/// Service name meaning "every service in the swarm".
pub const ALL_SERVICES: &str = "all";

/// Which services a run covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "scope", content = "service", rename_all = "lowercase")]
pub enum Target {
    All,
    Service(String),
}

impl Target {
    /// Interpret an optional service argument; `None`, empty and `all` select every service.
    pub fn parse(service: Option<&str>) -> Self {
        match service.map(str::trim) {
            None | Some("") | Some(ALL_SERVICES) => Self::All,
            Some(name) => Self::Service(name.to_string()),
        }
    }
}

/// Verdict for one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceReport {
    pub service: String,
    /// One result per registered check, in registration order.
    pub results: Vec<CheckResult>,
}

impl ServiceReport {
    fn count(&self, outcome: Outcome) -> usize {
        self.results.iter().filter(|r| r.outcome == outcome).count()
    }

    pub fn passed_count(&self) -> usize {
        self.count(Outcome::Passed)
    }

    pub fn failed_count(&self) -> usize {
        self.count(Outcome::Failed)
    }

    pub fn warned_count(&self) -> usize {
        self.count(Outcome::Warning)
    }

    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }
}

/// Verdict for a whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetReport {
    pub target: Target,
    /// Per-service reports, in evaluation order.
    pub services: Vec<ServiceReport>,
}

impl FleetReport {
    pub fn total_failures(&self) -> usize {
        self.services.iter().map(ServiceReport::failed_count).sum()
    }

    pub fn total_warnings(&self) -> usize {
        self.services.iter().map(ServiceReport::warned_count).sum()
    }

    /// Warnings never count toward this.
    pub fn has_failures(&self) -> bool {
        self.total_failures() > 0
    }
}

/// Runs the check registry against single services.
pub struct ServiceEvaluator<'a> {
    client: &'a dyn OrchestrationClient,
    checks: Vec<Box<dyn ServiceCheck>>,
}

impl<'a> ServiceEvaluator<'a> {
    /// Evaluator running the built-in checks.
    pub fn new(client: &'a dyn OrchestrationClient) -> Self {
        Self::with_checks(client, builtin_checks())
    }

    pub fn with_checks(client: &'a dyn OrchestrationClient, checks: Vec<Box<dyn ServiceCheck>>) -> Self {
        Self { client, checks }
    }

    /// Evaluate one service. The first check error aborts the evaluation.
    pub async fn evaluate(&self, service: &ServiceDescription) -> Result<ServiceReport, AuditError> {
        log::trace!(
            "running {} checks against service {}",
            self.checks.len(),
            service.name()
        );

        let networks = NetworkCache::new(self.client);
        let networks = &networks;
        let runs = self.checks.iter().map(|check| async move {
            let conforms = check.conforms(service, networks).await?;
            Ok::<_, AuditError>(CheckResult::evaluate(check.name(), conforms, check.severity()))
        });

        let results = join_all(runs)
            .await
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ServiceReport {
            service: service.name().to_string(),
            results,
        })
    }
}

/// Evaluates every service in a run.
pub struct FleetEvaluator<'a> {
    client: &'a dyn OrchestrationClient,
    services: ServiceEvaluator<'a>,
}

impl<'a> FleetEvaluator<'a> {
    pub fn new(client: &'a dyn OrchestrationClient) -> Self {
        Self {
            client,
            services: ServiceEvaluator::new(client),
        }
    }

    /// Evaluate the target and return the fleet report.
    pub async fn evaluate(&self, target: &Target) -> Result<FleetReport, AuditError> {
        self.evaluate_with(target, |_| {}).await
    }

    /// Evaluate the target, handing each service report to `on_service` as
    /// soon as it is complete.
    pub async fn evaluate_with<F>(&self, target: &Target, mut on_service: F) -> Result<FleetReport, AuditError>
    where
        F: FnMut(&ServiceReport),
    {
        let services = match target {
            Target::Service(name) => vec![self.client.get_service(name).await?],
            Target::All => self.client.list_services().await?,
        };
        log::trace!("evaluating {} service(s)", services.len());

        let mut reports = Vec::with_capacity(services.len());
        for service in &services {
            let report = self.services.evaluate(service).await?;
            on_service(&report);
            reports.push(report);
        }

        Ok(FleetReport {
            target: target.clone(),
            services: reports,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::swarmlint::checks::testing::NoLookups;
    use crate::analyzer::swarmlint::types::Severity;
    use async_trait::async_trait;
    use std::time::Duration;

    /// Conforms after a delay; later registrations finish first.
    struct Delayed {
        name: &'static str,
        delay_ms: u64,
        conforms: bool,
        severity: Severity,
    }

    #[async_trait]
    impl ServiceCheck for Delayed {
        fn name(&self) -> &'static str {
            self.name
        }

        fn severity(&self) -> Severity {
            self.severity
        }

        async fn conforms(
            &self,
            _service: &ServiceDescription,
            _client: &dyn OrchestrationClient,
        ) -> Result<bool, AuditError> {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            Ok(self.conforms)
        }
    }

    struct Broken;

    #[async_trait]
    impl ServiceCheck for Broken {
        fn name(&self) -> &'static str {
            "Broken"
        }

        fn severity(&self) -> Severity {
            Severity::Error
        }

        async fn conforms(
            &self,
            service: &ServiceDescription,
            _client: &dyn OrchestrationClient,
        ) -> Result<bool, AuditError> {
            Err(AuditError::AttachedNetworkMissing {
                service: service.name().to_string(),
                network: "gone".to_string(),
            })
        }
    }

    fn delayed(name: &'static str, delay_ms: u64, conforms: bool, severity: Severity) -> Box<dyn ServiceCheck> {
        Box::new(Delayed {
            name,
            delay_ms,
            conforms,
            severity,
        })
    }

    #[test]
    fn test_target_parse() {
        assert_eq!(Target::parse(None), Target::All);
        assert_eq!(Target::parse(Some("all")), Target::All);
        assert_eq!(Target::parse(Some("  ")), Target::All);
        assert_eq!(Target::parse(Some("web")), Target::Service("web".to_string()));
    }

    #[tokio::test]
    async fn test_results_keep_registration_order() {
        let evaluator = ServiceEvaluator::with_checks(
            &NoLookups,
            vec![
                delayed("slow", 60, true, Severity::Error),
                delayed("medium", 30, false, Severity::Warning),
                delayed("fast", 0, false, Severity::Error),
            ],
        );

        let report = evaluator
            .evaluate(&ServiceDescription::new("web"))
            .await
            .unwrap();
        let names: Vec<_> = report.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["slow", "medium", "fast"]);
        assert_eq!(report.passed_count(), 1);
        assert_eq!(report.warned_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert!(report.has_failures());
    }

    #[tokio::test]
    async fn test_checks_run_concurrently() {
        let evaluator = ServiceEvaluator::with_checks(
            &NoLookups,
            (0..5)
                .map(|_| delayed("sleep", 100, true, Severity::Error))
                .collect(),
        );

        let started = std::time::Instant::now();
        evaluator
            .evaluate(&ServiceDescription::new("web"))
            .await
            .unwrap();
        assert!(started.elapsed() < Duration::from_millis(400));
    }

    #[tokio::test]
    async fn test_check_error_aborts_evaluation() {
        let evaluator = ServiceEvaluator::with_checks(
            &NoLookups,
            vec![delayed("fine", 0, true, Severity::Error), Box::new(Broken)],
        );

        let err = evaluator
            .evaluate(&ServiceDescription::new("web"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuditError::AttachedNetworkMissing { .. }));
    }

    #[test]
    fn test_fleet_totals_ignore_warnings() {
        let report = FleetReport {
            target: Target::All,
            services: vec![
                ServiceReport {
                    service: "a".to_string(),
                    results: vec![CheckResult::new("x", Outcome::Warning)],
                },
                ServiceReport {
                    service: "b".to_string(),
                    results: vec![
                        CheckResult::new("x", Outcome::Passed),
                        CheckResult::new("y", Outcome::Warning),
                    ],
                },
            ],
        };
        assert_eq!(report.total_failures(), 0);
        assert_eq!(report.total_warnings(), 2);
        assert!(!report.has_failures());
    }
}
