//! Output formatters for conformity reports.

pub mod json;
pub mod plain;

use serde::{Deserialize, Serialize};

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Severity-tiered log lines, streamed per service.
    #[default]
    Plain,
    /// A single JSON document printed after the run.
    Json,
}
