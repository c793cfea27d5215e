//! Trajectory input normalization
//!
//! Maps heterogeneous producer schemas (WPILib-style state arrays,
//! `{ "states": [...] }` documents, flat or nested poses) onto one canonical,
//! time-sorted sequence of [`TrajectoryPoint`]s.

pub mod types;
pub mod fields;
pub mod normalizer;

pub use normalizer::{normalize, normalize_file, normalize_str, ParseError};
pub use types::{EnrichedPoint, RawDerivatives, TrajectoryPoint};
