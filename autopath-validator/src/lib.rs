//! # AutoPath Validator
//!
//! Validates robot-motion trajectories (time-stamped pose/velocity samples)
//! against kinematic limits and reports located, ranked violations.
//!
//! ## Quick Start
//!
//! ```no_run
//! use autopath_validator::{Constraints, KinematicsEstimator, RouteAnalyzer};
//! use autopath_validator::trajectory::normalizer::normalize;
//! use autopath_validator::validation::validator::validate;
//!
//! let raw: serde_json::Value = serde_json::from_str(
//!     r#"[{"t":0,"x":0,"y":0,"v":2},{"t":1,"x":2,"y":0,"v":2},{"t":2,"x":4,"y":0,"v":2}]"#,
//! ).expect("valid JSON");
//!
//! let points = normalize(&raw).expect("Failed to normalize");
//! let enriched = KinematicsEstimator::new().enrich(&points);
//!
//! let constraints = Constraints::new(3.0, 2.0, 0.0, 0.0);
//! for violation in validate(&enriched, &constraints) {
//!     println!("[{}] {}: {}", violation.severity, violation.kind, violation.message);
//! }
//!
//! let analysis = RouteAnalyzer::new().analyze(&enriched, &constraints);
//! println!("first problem at {:?}", analysis.index);
//! ```
//!
//! ## Architecture
//!
//! - [`trajectory`]: Input normalization into a time-sorted sample sequence
//! - [`kinematics`]: Finite-difference derivatives and moving-average smoothing
//! - [`validation`]: Constraint checks, whole-path diagnostics, violation records
//! - [`analysis`]: Path statistics and first-problem route analysis
//! - [`workflow`]: The end-to-end pipeline and persisted reports
//! - [`app`]: CLI and configuration management
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │  Raw JSON   │───▶│ Normalizer  │───▶│ Kinematics  │───▶│ Constraint  │
//! │  (any shape)│    │ (sorted)    │    │ Estimator   │    │ Validator   │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//!                                              │                  │
//!                                              ▼                  ▼
//!                                       ┌─────────────┐    ┌─────────────┐
//!                                       │   Route     │    │ Violations  │
//!                                       │  Analyzer   │    │  + Report   │
//!                                       └─────────────┘    └─────────────┘
//! ```
//!
//! Every stage is a pure function of its inputs: re-running it with the same
//! trajectory and constraints yields identical output.

pub mod trajectory;
pub mod kinematics;
pub mod validation;
pub mod analysis;
pub mod workflow;
pub mod app;

// Re-export commonly used types
pub use analysis::route_analyzer::{RouteAnalysis, RouteAnalyzer};
pub use analysis::statistics::PathStatistics;
pub use kinematics::estimator::{KinematicsEstimator, SmoothingConfig};
pub use trajectory::normalizer::{normalize, normalize_file, normalize_str, ParseError};
pub use trajectory::types::{EnrichedPoint, TrajectoryPoint};
pub use validation::constraints::{Constraints, RobotProfile};
pub use validation::violation::{Severity, Violation, ViolationKind};
pub use workflow::{PipelineOutput, TrajectoryPipeline, ValidationReport};

/// Result type alias for the validator
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the validator
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse trajectory: {0}")]
    Parse(#[from] ParseError),

    #[error("Trajectory too short: {0} sample(s), at least 2 are required")]
    TooFewSamples(usize),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
