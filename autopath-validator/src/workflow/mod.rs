//! Workflow Module
//!
//! Runs the complete validation workflow from raw trajectory JSON to a
//! persisted report.

pub mod pipeline;
pub mod report;

pub use pipeline::{PipelineOutput, TrajectoryPipeline};
pub use report::{ReportMetadata, ValidationReport};
