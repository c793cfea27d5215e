//! Constraint validation
//!
//! Checks an enriched trajectory against physical limits and reports
//! located, human-readable [`Violation`] records:
//! - Per-sample limit checks aggregated per constraint
//! - Whole-path diagnostics
//! - Robot constraint presets

pub mod constraints;
pub mod diagnostics;
pub mod location;
pub mod validator;
pub mod violation;

pub use constraints::{Constraints, RobotProfile};
pub use location::{FieldDimensions, FieldZones};
pub use validator::{validate, ConstraintValidator};
pub use violation::{Severity, Violation, ViolationKind};
