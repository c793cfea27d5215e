//! Kinematic derivation
//!
//! Derives acceleration, jerk and angular velocity from a normalized
//! trajectory using finite differences, then suppresses the sampling noise
//! those differences amplify with per-channel moving averages:
//! - [`formulas`]: pure math shared with the validator and route analyzer
//! - [`smoothing`]: symmetric moving average
//! - [`estimator`]: the two-pass estimator

pub mod formulas;
pub mod smoothing;
pub mod estimator;

pub use estimator::{enrich, KinematicsEstimator, SmoothingConfig};
