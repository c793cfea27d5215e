//! Integration tests for persisted validation reports

use autopath_validator::workflow::report::{ReportMetadata, ValidationReport};
use autopath_validator::{RobotProfile, Severity, TrajectoryPipeline};
use serde_json::json;
use tempfile::TempDir;

fn sample_report() -> ValidationReport {
    let constraints = RobotProfile::Mecanum.constraints();
    let raw = json!([
        {"t": 0.0, "x": 1.0, "y": 1.0, "v": 0.0},
        {"t": 1.0, "x": 2.5, "y": 1.0, "v": 3.0},
        {"t": 2.0, "x": 5.5, "y": 1.2, "v": 4.0, "curvature": 0.6},
        {"t": 3.0, "x": 8.0, "y": 3.0, "v": 2.0}
    ]);
    let output = TrajectoryPipeline::new().run(&raw, &constraints).unwrap();
    ValidationReport::new(
        ReportMetadata::new("mecanum_auto.json", Some("mecanum".to_string())),
        constraints,
        &output,
    )
}

#[test]
fn test_report_roundtrip_through_file() {
    let report = sample_report();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.json");

    report.save(&path).unwrap();
    let loaded = ValidationReport::load(&path).unwrap();

    assert_eq!(loaded.metadata.id, report.metadata.id);
    assert_eq!(loaded.metadata.profile.as_deref(), Some("mecanum"));
    assert_eq!(loaded.violations.len(), report.violations.len());
    assert_eq!(loaded.error_count(), report.error_count());
}

#[test]
fn test_report_json_shape() {
    let report = sample_report();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["metadata"]["format_version"], "1.0");
    assert_eq!(json["metadata"]["source"], "mecanum_auto.json");
    assert!(json["violations"].is_array());
    assert_eq!(json["violations"][0]["type"], "Velocity Limit Exceeded");
    assert_eq!(json["violations"][0]["severity"], "error");
    assert!(json["statistics"]["path_efficiency"].is_number());
}

#[test]
fn test_report_errors_and_text() {
    let report = sample_report();
    assert!(report.has_errors());
    assert!(report.count(Severity::Error) >= 1);

    let text = report.render_text();
    assert!(text.contains("Profile:    mecanum"));
    assert!(text.contains("Velocity Limit Exceeded"));
}

#[test]
fn test_load_rejects_garbage() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.json");
    std::fs::write(&path, "{\"metadata\": 3}").unwrap();

    assert!(ValidationReport::load(&path).is_err());
}
