//! # Analyzer Module
//!
//! Conformity analysis of live orchestrator state.
//!
//! - `swarmlint` - Docker Swarm service best-practice checks

pub mod swarmlint;

pub use swarmlint::{FleetEvaluator, FleetReport, ServiceEvaluator, ServiceReport, Target};
