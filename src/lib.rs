//! # Swarm Conformity
//!
//! Audits Docker Swarm services against a fixed set of operational best
//! practices and reports, per service, which checks pass, warn or fail.
//!
//! ## Checks
//!
//! - **Resources**: CPU and memory limits are declared
//! - **Routing mesh**: HTTP routing labels are present and the service is not
//!   attached to a routing-mesh network directly
//! - **Interlock**: load balancer labels name an existing network and the
//!   update delay is declared
//! - **Restart policy**: restarts are bounded and spaced out
//!
//! ## Example
//!
//! ```rust,no_run
//! use swarm_conformity::analyzer::{FleetEvaluator, Target};
//! use swarm_conformity::docker::{ConnectionTarget, DockerClient};
//! use std::time::Duration;
//!
//! # async fn run() -> swarm_conformity::Result<()> {
//! let target = ConnectionTarget::from_host("tcp://manager:2375", None)?;
//! let client = DockerClient::connect(target, Some(Duration::from_secs(30)))?;
//! let report = FleetEvaluator::new(&client).evaluate(&Target::All).await?;
//! println!("{} failures", report.total_failures());
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod docker;
pub mod error;
pub mod handlers;

// Re-export commonly used types and functions
pub use analyzer::swarmlint::{FleetEvaluator, FleetReport, ServiceEvaluator, ServiceReport, Target};
pub use error::{Result, SwarmConformityError};
pub use handlers::*;

/// No check failed.
pub const EXIT_SUCCESS: i32 = 0;
/// At least one check failed.
pub const EXIT_FAILURES: i32 = 1;
/// The audit could not be completed.
pub const EXIT_FATAL: i32 = 2;
