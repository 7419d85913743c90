//! # kinema-bench
//!
//! Benchmark suite for the Kinema engine.
//!
//! Four procedural scenarios cover the main evaluator families (cloth
//! membranes, penalty joints, tetrahedral FEM with ground contact, rigid
//! body contact). The runner drives any [`SolverStrategy`](kinema_solver::SolverStrategy)
//! and reports metrics with CSV/JSON export for regression tracking.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::BenchmarkMetrics;
pub use runner::BenchmarkRunner;
pub use scenarios::{Scenario, ScenarioKind};
