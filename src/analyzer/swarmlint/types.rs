//! Core types for the swarm conformity checks.
//!
//! - `Severity` - how a failed check counts toward the verdict
//! - `Outcome` - the tri-state result of one check
//! - `CheckResult` - a named outcome with its report line
//! - `AuditError` - failures that abort a run instead of producing a result

use crate::docker::ClientError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width the check name is padded to (with dots) in report lines.
const NAME_COLUMN_WIDTH: usize = 32;

/// How a non-conforming check is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Counts toward the failure total and the exit status
    Error,
    /// Reported, but never affects the exit status
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of evaluating one check against one service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Passed,
    Warning,
    Failed,
}

impl Outcome {
    /// Outcome of a check that did or did not conform, given its severity.
    pub fn from_conformity(conforms: bool, severity: Severity) -> Self {
        match (conforms, severity) {
            (true, _) => Self::Passed,
            (false, Severity::Warning) => Self::Warning,
            (false, Severity::Error) => Self::Failed,
        }
    }

    /// Status word used in report lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Passed => "OK",
            Self::Warning => "WARN",
            Self::Failed => "FAIL",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Warning => "warning",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The result of one check against one service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Human-readable check name (e.g. "CPU Limit").
    pub name: String,
    pub outcome: Outcome,
    /// Report line, e.g. `    CPU Limit..........................OK`.
    pub message: String,
}

impl CheckResult {
    pub fn new(name: impl Into<String>, outcome: Outcome) -> Self {
        let name = name.into();
        let message = report_line(&name, outcome.label());
        Self {
            name,
            outcome,
            message,
        }
    }

    /// Build a result from a conformity verdict and the check's severity.
    pub fn evaluate(name: impl Into<String>, conforms: bool, severity: Severity) -> Self {
        Self::new(name, Outcome::from_conformity(conforms, severity))
    }

    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Passed
    }

    /// Only ever true for a result that did not pass.
    pub fn warning(&self) -> bool {
        self.outcome == Outcome::Warning
    }

    pub fn failed(&self) -> bool {
        self.outcome == Outcome::Failed
    }
}

/// Format a report line with an arbitrary (possibly coloured) status word.
pub fn report_line(name: &str, status: impl fmt::Display) -> String {
    format!(
        "    {:.<width$}...{}",
        name,
        status,
        width = NAME_COLUMN_WIDTH
    )
}

/// Errors that abort a conformity run.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A service references a network the daemon no longer knows about
    #[error("service '{service}' is attached to network '{network}' which no longer exists")]
    AttachedNetworkMissing { service: String, network: String },
}
