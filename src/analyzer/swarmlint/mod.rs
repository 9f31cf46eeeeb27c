//! Swarmlint: Docker Swarm service conformity checks
//!
//! Audits running swarm services against a fixed set of operational
//! best-practice rules. It only reads from the daemon and never changes
//! the services it inspects.
//!
//! # Example
//!
//! ```rust,ignore
//! use swarm_conformity::analyzer::swarmlint::{FleetEvaluator, Target, formatter::plain};
//!
//! let evaluator = FleetEvaluator::new(&client);
//! let report = evaluator
//!     .evaluate_with(&Target::All, plain::log_service)
//!     .await?;
//! plain::log_fleet(&report);
//! std::process::exit(if report.has_failures() { 1 } else { 0 });
//! ```
//!
//! # Checks
//!
//! ## Resources
//! - CPU limit declared
//! - Memory limit declared
//!
//! ## HTTP routing mesh
//! - No reserved routing mesh labels on the service
//! - Not attached to a routing mesh network
//!
//! ## Interlock (services labelled `com.docker.lb.hosts`)
//! - Load balancer network label names an existing network
//! - Update delay declared (warning)
//!
//! ## Restart policy
//! - Bounded max attempts come with a window (warning)
//! - Unbounded restarts back off for at least 10s (warning)

pub mod cache;
pub mod checks;
pub mod formatter;
pub mod lint;
pub mod types;

// Re-export main types and functions
pub use checks::{ServiceCheck, builtin_checks};
pub use formatter::OutputFormat;
pub use lint::{ALL_SERVICES, FleetEvaluator, FleetReport, ServiceEvaluator, ServiceReport, Target};
pub use types::{AuditError, CheckResult, Outcome, Severity};
