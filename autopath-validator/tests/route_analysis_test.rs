//! Integration tests for the first-problem route scan

use autopath_validator::analysis::{analyze_first_problem, IssueKind, ProblemSeverity};
use autopath_validator::{Constraints, KinematicsEstimator, TrajectoryPipeline};
use autopath_validator::normalize;
use serde_json::json;

#[test]
fn test_sharp_reversal_stops_at_turn() {
    // ~175° reversal at the third sample, tight curvature at 1.5 m/s
    let raw = json!([
        {"time": 0.0, "x": 0.0, "y": 0.0, "velocity": 1.5, "curvature": 0.0},
        {"time": 1.0, "x": 1.0, "y": 0.0, "velocity": 1.5, "curvature": 0.0},
        {"time": 2.0, "x": 0.0, "y": 0.09, "velocity": 1.5, "curvature": 2.0}
    ]);
    let points = KinematicsEstimator::new().enrich(&normalize(&raw).unwrap());
    let analysis = analyze_first_problem(&points, &Constraints::default());

    assert_eq!(analysis.index, Some(2));
    let kinds: Vec<_> = analysis.issues.iter().map(|i| i.kind).collect();
    assert!(kinds.contains(&IssueKind::SharpTurn));
    assert!(kinds.contains(&IssueKind::SharpDirectionChange));
    assert_eq!(analysis.severity, ProblemSeverity::Warning);
    assert_eq!(analysis.suggestions.len(), analysis.issues.len());

    let angle = analysis
        .issues
        .iter()
        .find(|i| i.kind == IssueKind::SharpDirectionChange)
        .map(|i| i.value)
        .unwrap();
    assert!(angle > 170.0 && angle < 180.0);

    let range = analysis.highlight_range(points.len()).unwrap();
    assert_eq!((range.start, range.end), (0, 2));
}

#[test]
fn test_clean_route_gives_general_suggestions() {
    let raw = json!([
        {"t": 0, "x": 0, "y": 0, "v": 3.5},
        {"t": 1, "x": 3.5, "y": 0, "v": 3.5},
        {"t": 2, "x": 7.0, "y": 0, "v": 3.5}
    ]);
    let output = TrajectoryPipeline::new()
        .run(&raw, &Constraints::default())
        .unwrap();
    let analysis = &output.route_analysis;

    assert!(!analysis.has_problem());
    assert_eq!(analysis.severity, ProblemSeverity::None);
    assert!(analysis.issues.is_empty());
    assert!(analysis.point.is_none());
    assert!(analysis.highlight_range(output.points.len()).is_none());
    // fast, straight and gentle: nothing to suggest
    assert!(analysis.suggestions.is_empty());
}

#[test]
fn test_soft_margin_differs_from_validator() {
    // 3.9 m/s breaks the 3.8 limit but stays inside the 5% analyzer margin
    let raw = json!([
        {"t": 0, "x": 0, "y": 0, "v": 3.9},
        {"t": 1, "x": 3.9, "y": 0, "v": 3.9}
    ]);
    let output = TrajectoryPipeline::new()
        .run(&raw, &Constraints::default())
        .unwrap();

    assert!(output.has_errors());
    assert!(!output.route_analysis.has_problem());
}

#[test]
fn test_analysis_serializes_snake_case_kinds() {
    let raw = json!([
        {"t": 0, "x": 0, "y": 0, "v": 1},
        {"t": 0.1, "x": 5, "y": 0, "v": 1}
    ]);
    let output = TrajectoryPipeline::new()
        .run(&raw, &Constraints::default())
        .unwrap();
    let json = serde_json::to_value(&output.route_analysis).unwrap();

    assert_eq!(json["index"], 1);
    assert_eq!(json["severity"], "critical");
    assert_eq!(json["issues"][0]["type"], "unrealistic_movement");
}
