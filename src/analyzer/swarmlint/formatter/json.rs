//! JSON formatter.

use crate::analyzer::swarmlint::lint::{FleetReport, ServiceReport, Target};
use crate::analyzer::swarmlint::types::CheckResult;
use serde::Serialize;

/// Format a fleet report as JSON.
pub fn format(report: &FleetReport) -> String {
    let output = JsonOutput::from(report);
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    target: &'a Target,
    services: Vec<JsonService<'a>>,
    total_failures: usize,
    total_warnings: usize,
    passed: bool,
}

#[derive(Serialize)]
struct JsonService<'a> {
    name: &'a str,
    passed: usize,
    failed: usize,
    warnings: usize,
    checks: Vec<JsonCheck<'a>>,
}

#[derive(Serialize)]
struct JsonCheck<'a> {
    name: &'a str,
    status: &'static str,
}

impl<'a> From<&'a FleetReport> for JsonOutput<'a> {
    fn from(report: &'a FleetReport) -> Self {
        Self {
            target: &report.target,
            services: report.services.iter().map(JsonService::from).collect(),
            total_failures: report.total_failures(),
            total_warnings: report.total_warnings(),
            passed: !report.has_failures(),
        }
    }
}

impl<'a> From<&'a ServiceReport> for JsonService<'a> {
    fn from(report: &'a ServiceReport) -> Self {
        Self {
            name: &report.service,
            passed: report.passed_count(),
            failed: report.failed_count(),
            warnings: report.warned_count(),
            checks: report.results.iter().map(JsonCheck::from).collect(),
        }
    }
}

impl<'a> From<&'a CheckResult> for JsonCheck<'a> {
    fn from(result: &'a CheckResult) -> Self {
        Self {
            name: &result.name,
            status: result.outcome.as_str(),
        }
    }
}
