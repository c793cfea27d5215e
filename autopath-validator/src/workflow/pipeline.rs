//! Trajectory Pipeline
//!
//! Chains normalization, kinematics estimation, constraint validation and
//! route analysis into one call.

use crate::analysis::route_analyzer::{RouteAnalysis, RouteAnalyzer};
use crate::analysis::statistics::PathStatistics;
use crate::app::config::Config;
use crate::kinematics::estimator::{KinematicsEstimator, SmoothingConfig};
use crate::trajectory::normalizer::normalize;
use crate::trajectory::types::{EnrichedPoint, TrajectoryPoint};
use crate::validation::constraints::Constraints;
use crate::validation::location::FieldZones;
use crate::validation::validator::ConstraintValidator;
use crate::validation::violation::{Severity, Violation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// Everything the pipeline derives from one trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    /// Enriched, time-sorted samples
    pub points: Vec<EnrichedPoint>,
    pub statistics: PathStatistics,
    /// Findings in evaluation order
    pub violations: Vec<Violation>,
    pub route_analysis: RouteAnalysis,
}

impl PipelineOutput {
    /// Number of findings with the given severity
    pub fn count(&self, severity: Severity) -> usize {
        self.violations.iter().filter(|v| v.severity == severity).count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    /// True when validation produced only the success record
    pub fn is_clean(&self) -> bool {
        self.violations.iter().all(|v| !v.severity.is_problem())
    }
}

/// The four-stage validation pipeline
#[derive(Debug, Clone, Default)]
pub struct TrajectoryPipeline {
    estimator: KinematicsEstimator,
    validator: ConstraintValidator,
    analyzer: RouteAnalyzer,
}

impl TrajectoryPipeline {
    /// Create with default smoothing and the standard field
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .with_smoothing(config.kinematics)
            .with_zones(config.field.zones())
    }

    pub fn with_smoothing(mut self, smoothing: SmoothingConfig) -> Self {
        self.estimator = KinematicsEstimator::with_config(smoothing);
        self
    }

    pub fn with_zones(mut self, zones: FieldZones) -> Self {
        self.validator = ConstraintValidator::with_zones(zones);
        self
    }

    pub fn smoothing(&self) -> &SmoothingConfig {
        self.estimator.config()
    }

    /// Normalize raw JSON and run every stage
    pub fn run(&self, raw: &Value, constraints: &Constraints) -> crate::Result<PipelineOutput> {
        let points = normalize(raw)?;
        self.run_points(&points, constraints)
    }

    /// Parse a JSON document and run every stage
    pub fn run_str(&self, json: &str, constraints: &Constraints) -> crate::Result<PipelineOutput> {
        let raw: Value = serde_json::from_str(json)?;
        self.run(&raw, constraints)
    }

    /// Run every stage after normalization.
    ///
    /// `points` must already be sorted by time.
    pub fn run_points(
        &self,
        points: &[TrajectoryPoint],
        constraints: &Constraints,
    ) -> crate::Result<PipelineOutput> {
        if points.len() < 2 {
            return Err(crate::Error::TooFewSamples(points.len()));
        }

        let enriched = self.estimator.enrich(points);
        debug!(samples = enriched.len(), "Kinematics estimated");

        let statistics = PathStatistics::from_points(&enriched);
        let violations = self.validator.validate(&enriched, constraints);
        let route_analysis = self.analyzer.analyze(&enriched, constraints);

        info!(
            samples = enriched.len(),
            violations = violations.len(),
            first_problem = ?route_analysis.index,
            "Pipeline complete"
        );

        Ok(PipelineOutput {
            points: enriched,
            statistics,
            violations,
            route_analysis,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejects_single_sample() {
        let pipeline = TrajectoryPipeline::new();
        let err = pipeline
            .run(&json!([{"t": 0, "x": 0, "y": 0}]), &Constraints::default())
            .unwrap_err();
        assert!(matches!(err, crate::Error::TooFewSamples(1)));
    }

    #[test]
    fn test_parse_error_propagates() {
        let pipeline = TrajectoryPipeline::new();
        let err = pipeline
            .run(&json!({"waypoints": [{"x": 1, "y": 2}]}), &Constraints::default())
            .unwrap_err();
        assert!(matches!(err, crate::Error::Parse(_)));
    }

    #[test]
    fn test_run_str_invalid_json() {
        let err = TrajectoryPipeline::new()
            .run_str("not json", &Constraints::default())
            .unwrap_err();
        assert!(matches!(err, crate::Error::Serialization(_)));
    }

    #[test]
    fn test_clean_run() {
        let output = TrajectoryPipeline::new()
            .run(
                &json!([
                    {"t": 0, "x": 0, "y": 0, "v": 2},
                    {"t": 1, "x": 2, "y": 0, "v": 2},
                    {"t": 2, "x": 4, "y": 0, "v": 2}
                ]),
                &Constraints::new(3.0, 2.0, 0.0, 0.0),
            )
            .unwrap();
        assert_eq!(output.points.len(), 3);
        assert!(output.is_clean());
        assert!(!output.has_errors());
        assert!(!output.route_analysis.has_problem());
        assert_eq!(output.statistics.elapsed_time, 2.0);
    }

    #[test]
    fn test_from_config_uses_smoothing() {
        let mut config = Config::default();
        config.kinematics = SmoothingConfig::RAW;
        let pipeline = TrajectoryPipeline::from_config(&config);
        assert_eq!(*pipeline.smoothing(), SmoothingConfig::RAW);
    }
}
