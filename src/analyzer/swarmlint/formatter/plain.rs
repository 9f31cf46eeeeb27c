//! Plain text output through the `log` facade.
//!
//! Each line is emitted at the level matching its weight, so the logger's
//! filter decides what is shown: passing checks only appear at debug level.

use crate::analyzer::swarmlint::lint::{FleetReport, ServiceReport, Target};
use crate::analyzer::swarmlint::types::{CheckResult, Outcome, report_line};
use colored::Colorize;
use log::Level;

/// Summary line for one service, e.g. `web (6 passed, 1 failed, 1 warning)`.
pub fn summary_line(report: &ServiceReport) -> String {
    let mut line = format!(
        "{} ({} {}",
        report.service,
        report.passed_count(),
        "passed".green()
    );

    let failed = report.failed_count();
    if failed > 0 {
        line.push_str(&format!(", {} {}", failed, "failed".red()));
    }

    let warned = report.warned_count();
    if warned > 0 {
        let noun = if warned == 1 { "warning" } else { "warnings" };
        line.push_str(&format!(", {} {}", warned, noun.yellow()));
    }

    line.push(')');
    line
}

/// Report line for one check with a coloured status word.
pub fn result_line(result: &CheckResult) -> String {
    let label = result.outcome.label();
    let status = match result.outcome {
        Outcome::Passed => label.green(),
        Outcome::Warning => label.yellow(),
        Outcome::Failed => label.red(),
    };
    report_line(&result.name, status)
}

/// Closing line for a whole-swarm run.
pub fn fleet_line(report: &FleetReport) -> String {
    match report.total_failures() {
        0 => "No failures found in any service".to_string(),
        1 => "1 failure found across all services".to_string(),
        n => format!("{} failures found across all services", n),
    }
}

/// Log one service report.
///
/// A failing service's summary goes out at `warn`, or at `error` when warn
/// lines are filtered out, so failure lines never appear without it.
pub fn log_service(report: &ServiceReport) {
    let level = if !report.has_failures() {
        Level::Info
    } else if log::log_enabled!(Level::Warn) {
        Level::Warn
    } else {
        Level::Error
    };
    log::log!(level, "{}", summary_line(report));

    for result in &report.results {
        match result.outcome {
            Outcome::Passed => log::debug!("{}", result_line(result)),
            Outcome::Warning => log::info!("{}", result_line(result)),
            Outcome::Failed => log::error!("{}", result_line(result)),
        }
    }
}

/// Log the closing line of a run. Single-service runs have none.
pub fn log_fleet(report: &FleetReport) {
    if report.target != Target::All {
        return;
    }
    let line = fleet_line(report);
    if report.has_failures() {
        log::warn!("\n{}", line);
    } else {
        log::info!("\n{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(outcomes: &[Outcome]) -> ServiceReport {
        ServiceReport {
            service: "web".to_string(),
            results: outcomes
                .iter()
                .enumerate()
                .map(|(i, o)| CheckResult::new(format!("Check {}", i), *o))
                .collect(),
        }
    }

    #[test]
    fn test_summary_line() {
        colored::control::set_override(false);

        assert_eq!(
            summary_line(&report(&[Outcome::Passed, Outcome::Passed])),
            "web (2 passed)"
        );
        assert_eq!(
            summary_line(&report(&[Outcome::Passed, Outcome::Failed, Outcome::Warning])),
            "web (1 passed, 1 failed, 1 warning)"
        );
        assert_eq!(
            summary_line(&report(&[Outcome::Warning, Outcome::Warning])),
            "web (0 passed, 2 warnings)"
        );
    }

    #[test]
    fn test_result_line_matches_message_without_color() {
        colored::control::set_override(false);

        let result = CheckResult::new("Memory Limit", Outcome::Failed);
        assert_eq!(result_line(&result), result.message);
    }

    #[test]
    fn test_fleet_line() {
        let fleet = |outcomes: &[Outcome]| FleetReport {
            target: Target::All,
            services: vec![report(outcomes)],
        };
        assert_eq!(fleet_line(&fleet(&[Outcome::Warning])), "No failures found in any service");
        assert_eq!(fleet_line(&fleet(&[Outcome::Failed])), "1 failure found across all services");
        assert_eq!(
            fleet_line(&fleet(&[Outcome::Failed, Outcome::Failed])),
            "2 failures found across all services"
        );
    }
}
