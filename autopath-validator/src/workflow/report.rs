//! Validation Reports
//!
//! Defines the persisted format of a validation run.

use super::pipeline::PipelineOutput;
use crate::analysis::route_analyzer::RouteAnalysis;
use crate::analysis::statistics::PathStatistics;
use crate::validation::constraints::Constraints;
use crate::validation::violation::{Severity, Violation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Current report format version
pub const CURRENT_FORMAT_VERSION: &str = "1.0";

/// Report metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportMetadata {
    /// Unique report ID
    pub id: Uuid,
    /// Name of the validated trajectory (usually its file name)
    pub source: String,
    /// Robot profile the constraints came from
    pub profile: Option<String>,
    pub generated_at: DateTime<Utc>,
    /// Version of the report format
    pub format_version: String,
}

impl ReportMetadata {
    pub fn new(source: impl Into<String>, profile: Option<String>) -> Self {
        Self {
            source: source.into(),
            profile,
            ..Default::default()
        }
    }
}

impl Default for ReportMetadata {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            source: String::new(),
            profile: None,
            generated_at: Utc::now(),
            format_version: CURRENT_FORMAT_VERSION.to_string(),
        }
    }
}

/// A complete validation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub metadata: ReportMetadata,
    pub constraints: Constraints,
    pub statistics: PathStatistics,
    pub violations: Vec<Violation>,
    pub route_analysis: RouteAnalysis,
}

impl ValidationReport {
    /// Build a report from a pipeline run
    pub fn new(metadata: ReportMetadata, constraints: Constraints, output: &PipelineOutput) -> Self {
        Self {
            metadata,
            constraints,
            statistics: output.statistics,
            violations: output.violations.clone(),
            route_analysis: output.route_analysis.clone(),
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.violations.iter().filter(|v| v.severity == severity).count()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Save report to a file as pretty JSON
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load report from a file.
    ///
    /// Reports from another major format version are rejected; a different
    /// minor version only logs a warning.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let report: ValidationReport = serde_json::from_str(&content)?;
        let found = report.metadata.format_version.as_str();
        if found != CURRENT_FORMAT_VERSION {
            if major_version(found) != major_version(CURRENT_FORMAT_VERSION) {
                return Err(crate::Error::Report(format!(
                    "unsupported format version {} in {} (expected {})",
                    found,
                    path.display(),
                    CURRENT_FORMAT_VERSION
                )));
            }
            tracing::warn!(
                source = %report.metadata.source,
                found = %found,
                expected = CURRENT_FORMAT_VERSION,
                "Report has different format version; some fields may use default values"
            );
        }
        Ok(report)
    }

    /// Human-readable multi-line summary
    pub fn render_text(&self) -> String {
        let mut output = String::new();
        let stats = &self.statistics;

        output.push_str(&format!("Trajectory: {}\n", self.metadata.source));
        if let Some(profile) = &self.metadata.profile {
            output.push_str(&format!("Profile:    {}\n", profile));
        }
        output.push_str(&format!(
            "Limits:     v {} m/s, a {} m/s², j {} m/s³, lateral {} m/s²\n",
            self.constraints.max_velocity,
            self.constraints.max_acceleration,
            self.constraints.max_jerk,
            self.constraints.max_centripetal
        ));
        output.push_str(&format!(
            "Path:       {} samples, {:.2} m over {:.2} s ({:.1}% efficient)\n\n",
            stats.sample_count, stats.total_distance, stats.elapsed_time, stats.path_efficiency
        ));

        for v in &self.violations {
            output.push_str(&format!(
                "[{}] {} @ {:.2}s",
                v.severity.as_str().to_uppercase(),
                v.kind,
                v.time
            ));
            if let Some(count) = v.count {
                output.push_str(&format!(" ({} samples)", count));
            }
            output.push('\n');
            output.push_str(&format!("    {}\n", v.message));
            if let Some(location) = &v.location {
                output.push_str(&format!("    Location: {}\n", location));
            }
            if !v.suggestion.is_empty() {
                output.push_str(&format!("    Suggestion: {}\n", v.suggestion));
            }
            if let Some(impact) = &v.impact {
                output.push_str(&format!("    Impact: {}\n", impact));
            }
        }

        output.push_str(&format!(
            "\nSummary: {} error(s), {} warning(s), {} info\n",
            self.count(Severity::Error),
            self.count(Severity::Warning),
            self.count(Severity::Info)
        ));
        output
    }
}

/// Leading component of a dotted version string
fn major_version(version: &str) -> &str {
    version.split('.').next().unwrap_or(version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::violation::ViolationKind;
    use crate::workflow::pipeline::TrajectoryPipeline;
    use serde_json::json;
    use tempfile::TempDir;

    fn fast_run() -> (Constraints, PipelineOutput) {
        let constraints = Constraints::new(3.0, 2.0, 0.0, 0.0);
        let output = TrajectoryPipeline::new()
            .run(
                &json!([
                    {"t": 0, "x": 0, "y": 0, "v": 5},
                    {"t": 1, "x": 5, "y": 0, "v": 5},
                    {"t": 2, "x": 10, "y": 0, "v": 5}
                ]),
                &constraints,
            )
            .unwrap();
        (constraints, output)
    }

    #[test]
    fn test_metadata_creation() {
        let metadata = ReportMetadata::new("auto.json", Some("swerve".to_string()));
        assert_eq!(metadata.source, "auto.json");
        assert_eq!(metadata.profile.as_deref(), Some("swerve"));
        assert_eq!(metadata.format_version, "1.0");
    }

    #[test]
    fn test_save_and_load() {
        let (constraints, output) = fast_run();
        let report = ValidationReport::new(ReportMetadata::new("fast.json", None), constraints, &output);

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        report.save(&path).unwrap();

        let loaded = ValidationReport::load(&path).unwrap();
        assert_eq!(loaded, report);
        assert!(loaded.has_errors());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = ValidationReport::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }

    fn save_with_version(dir: &TempDir, version: &str) -> std::path::PathBuf {
        let (constraints, output) = fast_run();
        let mut report = ValidationReport::new(ReportMetadata::new("fast.json", None), constraints, &output);
        report.metadata.format_version = version.to_string();
        let path = dir.path().join(format!("report-{}.json", version));
        report.save(&path).unwrap();
        path
    }

    #[test]
    fn test_load_accepts_minor_version_difference() {
        let dir = TempDir::new().unwrap();
        let path = save_with_version(&dir, "1.3");

        let loaded = ValidationReport::load(&path).unwrap();
        assert_eq!(loaded.metadata.format_version, "1.3");
    }

    #[test]
    fn test_load_rejects_other_major_version() {
        let dir = TempDir::new().unwrap();
        let path = save_with_version(&dir, "2.0");

        let err = ValidationReport::load(&path).unwrap_err();
        assert!(matches!(err, crate::Error::Report(_)));
        assert!(err.to_string().contains("2.0"));
    }

    #[test]
    fn test_major_version() {
        assert_eq!(major_version("1.0"), "1");
        assert_eq!(major_version("12.4.1"), "12");
        assert_eq!(major_version("legacy"), "legacy");
    }

    #[test]
    fn test_render_text() {
        let (constraints, output) = fast_run();
        let report = ValidationReport::new(ReportMetadata::new("fast.json", None), constraints, &output);
        let text = report.render_text();

        assert!(text.contains("Trajectory: fast.json"));
        assert!(text.contains("[ERROR] Velocity Limit Exceeded @ 0.00s (3 samples)"));
        assert!(text.contains("Summary: 1 error(s)"));
        assert_eq!(report.violations[0].kind, ViolationKind::VelocityLimit);
    }
}
