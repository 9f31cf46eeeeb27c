use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::Mutex;
use swarm_conformity::analyzer::swarmlint::formatter::plain::{log_fleet, log_service};
use swarm_conformity::analyzer::swarmlint::types::report_line;
use swarm_conformity::analyzer::swarmlint::{CheckResult, Outcome};
use swarm_conformity::{FleetReport, ServiceReport, Target};

/// Records plain formatter output with its level.
struct Capture {
    lines: Mutex<Vec<(Level, String)>>,
}

impl Log for Capture {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if record.target().ends_with("formatter::plain") {
            self.lines
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture {
    lines: Mutex::new(Vec::new()),
};

/// The logger is process-wide, so captures run one at a time.
static SERIAL: Mutex<()> = Mutex::new(());

fn capture(max_level: LevelFilter, emit: impl FnOnce()) -> Vec<(Level, String)> {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let _ = log::set_logger(&CAPTURE);
    colored::control::set_override(false);
    log::set_max_level(max_level);

    CAPTURE.lines.lock().unwrap().clear();
    emit();
    std::mem::take(&mut *CAPTURE.lines.lock().unwrap())
}

fn service(name: &str, outcomes: &[(&str, Outcome)]) -> ServiceReport {
    ServiceReport {
        service: name.to_string(),
        results: outcomes
            .iter()
            .map(|(check, outcome)| CheckResult::new(*check, *outcome))
            .collect(),
    }
}

fn mixed() -> ServiceReport {
    service(
        "worker",
        &[
            ("CPU Limit", Outcome::Passed),
            ("Memory Limit", Outcome::Failed),
            ("Restart Policy Delay", Outcome::Warning),
        ],
    )
}

#[test]
fn test_lines_are_tiered_by_outcome() {
    let lines = capture(LevelFilter::Trace, || log_service(&mixed()));
    assert_eq!(
        lines,
        vec![
            (Level::Warn, "worker (1 passed, 1 failed, 1 warning)".to_string()),
            (Level::Debug, report_line("CPU Limit", "OK")),
            (Level::Error, report_line("Memory Limit", "FAIL")),
            (Level::Info, report_line("Restart Policy Delay", "WARN")),
        ]
    );
}

#[test]
fn test_clean_service_summary_is_info() {
    let report = service("api", &[("CPU Limit", Outcome::Passed)]);
    let lines = capture(LevelFilter::Info, || log_service(&report));
    assert_eq!(lines, vec![(Level::Info, "api (1 passed)".to_string())]);
}

#[test]
fn test_failing_summary_survives_error_filter() {
    let lines = capture(LevelFilter::Error, || log_service(&mixed()));
    assert_eq!(
        lines,
        vec![
            (Level::Error, "worker (1 passed, 1 failed, 1 warning)".to_string()),
            (Level::Error, report_line("Memory Limit", "FAIL")),
        ]
    );
}

#[test]
fn test_fleet_closing_line() {
    let failing = FleetReport {
        target: Target::All,
        services: vec![mixed()],
    };
    let lines = capture(LevelFilter::Trace, || log_fleet(&failing));
    assert_eq!(
        lines,
        vec![(Level::Warn, "\n1 failure found across all services".to_string())]
    );

    let clean = FleetReport {
        target: Target::All,
        services: vec![service("api", &[("CPU Limit", Outcome::Passed)])],
    };
    let lines = capture(LevelFilter::Trace, || log_fleet(&clean));
    assert_eq!(
        lines,
        vec![(Level::Info, "\nNo failures found in any service".to_string())]
    );
}

#[test]
fn test_single_service_run_has_no_closing_line() {
    let report = FleetReport {
        target: Target::Service("worker".to_string()),
        services: vec![mixed()],
    };
    assert!(capture(LevelFilter::Trace, || log_fleet(&report)).is_empty());
}
