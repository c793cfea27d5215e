//! First-problem route scan
//!
//! Walks the trajectory in order and stops at the first sample that shows
//! any problem, reporting every issue found at that sample together with
//! targeted remediation suggestions. Limit checks here are soft: they allow
//! a small margin above each constraint, unlike the validator.
//!
//! When nothing is wrong the result carries general improvement suggestions
//! for the whole path instead.

use crate::analysis::statistics::PathStatistics;
use crate::kinematics::formulas;
use crate::trajectory::types::EnrichedPoint;
use crate::validation::constraints::Constraints;
use crate::validation::violation::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Margin applied to every constraint before a sample is flagged
pub const LIMIT_TOLERANCE: f64 = 1.05;

/// Velocity change rate (m/s per s) considered jerky
pub const JERKY_VELOCITY_RATE: f64 = 2.0;

/// Implied speed between samples (m/s) considered a position jump
pub const UNREALISTIC_SPEED: f64 = 10.0;

/// Heading change between displacements (degrees) considered sharp
pub const SHARP_DIRECTION_DEGREES: f64 = 120.0;

/// Samples highlighted before a located problem
const HIGHLIGHT_BEFORE: usize = 5;

/// Samples highlighted after a located problem
const HIGHLIGHT_AFTER: usize = 10;

/// Per-sample issue categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    VelocityViolation,
    AccelerationViolation,
    JerkViolation,
    SharpTurn,
    JerkyMovement,
    UnrealisticMovement,
    SharpDirectionChange,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VelocityViolation => "velocity_violation",
            Self::AccelerationViolation => "acceleration_violation",
            Self::JerkViolation => "jerk_violation",
            Self::SharpTurn => "sharp_turn",
            Self::JerkyMovement => "jerky_movement",
            Self::UnrealisticMovement => "unrealistic_movement",
            Self::SharpDirectionChange => "sharp_direction_change",
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::VelocityViolation => "Excessive Velocity",
            Self::AccelerationViolation => "Excessive Acceleration",
            Self::JerkViolation => "Excessive Jerk",
            Self::SharpTurn => "Sharp Turn Detected",
            Self::JerkyMovement => "Jerky Movement Pattern",
            Self::UnrealisticMovement => "Unrealistic Position Jump",
            Self::SharpDirectionChange => "Sharp Direction Change",
        }
    }

    fn severity(&self) -> Severity {
        match self {
            Self::VelocityViolation | Self::AccelerationViolation | Self::UnrealisticMovement => {
                Severity::Error
            }
            Self::JerkViolation | Self::SharpTurn | Self::JerkyMovement | Self::SharpDirectionChange => {
                Severity::Warning
            }
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One problem found at a sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteIssue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub name: String,
    pub severity: Severity,
    /// Measured quantity: the over-limit value, velocity change, implied
    /// speed or turn angle depending on the kind
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curvature: Option<f64>,
}

impl RouteIssue {
    fn new(kind: IssueKind, value: f64) -> Self {
        Self {
            kind,
            name: kind.name().to_string(),
            severity: kind.severity(),
            value,
            limit: None,
            curvature: None,
        }
    }

    fn with_limit(mut self, limit: f64) -> Self {
        self.limit = Some(limit);
        self
    }

    fn with_curvature(mut self, curvature: f64) -> Self {
        self.curvature = Some(curvature);
        self
    }
}

/// Overall severity of the located problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProblemSeverity {
    None,
    Info,
    Warning,
    Critical,
}

impl ProblemSeverity {
    /// Critical if any issue is an error, else warning if any is a warning
    pub fn from_issues(issues: &[RouteIssue]) -> Self {
        if issues.is_empty() {
            Self::None
        } else if issues.iter().any(|i| i.severity == Severity::Error) {
            Self::Critical
        } else if issues.iter().any(|i| i.severity == Severity::Warning) {
            Self::Warning
        } else {
            Self::Info
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for ProblemSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A titled remediation with concrete steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub description: String,
    pub actions: Vec<String>,
}

impl Suggestion {
    fn new(title: &str, description: impl Into<String>, actions: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            actions: actions.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Inclusive index window to emphasise around a problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightRange {
    pub start: usize,
    pub end: usize,
}

/// Result of the first-problem scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteAnalysis {
    /// Index of the first problematic sample
    pub index: Option<usize>,
    pub point: Option<EnrichedPoint>,
    pub severity: ProblemSeverity,
    /// Issues at the first problematic sample only
    pub issues: Vec<RouteIssue>,
    pub suggestions: Vec<Suggestion>,
}

impl RouteAnalysis {
    fn empty() -> Self {
        Self {
            index: None,
            point: None,
            severity: ProblemSeverity::None,
            issues: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn has_problem(&self) -> bool {
        self.index.is_some()
    }

    /// `[max(0, i-5), min(len-1, i+10)]` around the problem, if any
    pub fn highlight_range(&self, len: usize) -> Option<HighlightRange> {
        let index = self.index?;
        if len == 0 {
            return None;
        }
        Some(HighlightRange {
            start: index.saturating_sub(HIGHLIGHT_BEFORE),
            end: (index + HIGHLIGHT_AFTER).min(len - 1),
        })
    }
}

/// Point-by-point anomaly scanner
#[derive(Debug, Clone, Default)]
pub struct RouteAnalyzer;

impl RouteAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Scan in order and report the first problematic sample
    pub fn analyze(&self, points: &[EnrichedPoint], constraints: &Constraints) -> RouteAnalysis {
        if points.len() < 2 {
            return RouteAnalysis::empty();
        }

        for index in 0..points.len() {
            let issues = self.detect(points, index, constraints);
            if issues.is_empty() {
                continue;
            }

            debug!(
                index,
                time = points[index].time(),
                issues = issues.len(),
                "First problem located"
            );

            let suggestions = issues.iter().map(suggestion_for).collect();
            return RouteAnalysis {
                index: Some(index),
                point: Some(points[index]),
                severity: ProblemSeverity::from_issues(&issues),
                issues,
                suggestions,
            };
        }

        RouteAnalysis {
            suggestions: general_suggestions(points, constraints),
            ..RouteAnalysis::empty()
        }
    }

    /// Every issue at one sample, in check order
    fn detect(&self, points: &[EnrichedPoint], index: usize, constraints: &Constraints) -> Vec<RouteIssue> {
        let point = &points[index];
        let mut issues = Vec::new();

        let velocity = point.velocity().abs();
        if formulas::exceeds(velocity, constraints.max_velocity, LIMIT_TOLERANCE) {
            issues.push(
                RouteIssue::new(IssueKind::VelocityViolation, velocity).with_limit(constraints.max_velocity),
            );
        }

        let accel = effective_acceleration(point);
        if formulas::exceeds(accel, constraints.max_acceleration, LIMIT_TOLERANCE) {
            issues.push(
                RouteIssue::new(IssueKind::AccelerationViolation, accel)
                    .with_limit(constraints.max_acceleration),
            );
        }

        let jerk = point.calculated_jerk.abs();
        if constraints.jerk_limited() && formulas::exceeds(jerk, constraints.max_jerk, LIMIT_TOLERANCE) {
            issues.push(RouteIssue::new(IssueKind::JerkViolation, jerk).with_limit(constraints.max_jerk));
        }

        if constraints.centripetal_limited() {
            if let Some(lateral) = formulas::turning_centripetal(point.velocity(), point.curvature()) {
                if formulas::exceeds(lateral, constraints.max_centripetal, LIMIT_TOLERANCE) {
                    issues.push(
                        RouteIssue::new(IssueKind::SharpTurn, lateral)
                            .with_limit(constraints.max_centripetal)
                            .with_curvature(point.curvature()),
                    );
                }
            }
        }

        if index > 0 {
            let prev = &points[index - 1];
            let dt = point.time() - prev.time();

            let velocity_change = (point.velocity() - prev.velocity()).abs();
            if dt > 0.0 && velocity_change / dt > JERKY_VELOCITY_RATE {
                issues.push(RouteIssue::new(IssueKind::JerkyMovement, velocity_change));
            }

            let distance = prev.distance_to(point);
            if dt > 0.0 && distance / dt > UNREALISTIC_SPEED {
                issues.push(RouteIssue::new(IssueKind::UnrealisticMovement, distance / dt));
            }
        }

        if index > 1 {
            let (p1, p2) = (&points[index - 2].point, &points[index - 1].point);
            let p3 = &point.point;
            let angle = formulas::direction_change_degrees(p2.x - p1.x, p2.y - p1.y, p3.x - p2.x, p3.y - p2.y)
                .abs();
            if angle > SHARP_DIRECTION_DEGREES {
                issues.push(RouteIssue::new(IssueKind::SharpDirectionChange, angle));
            }
        }

        issues
    }
}

/// Smoothed acceleration, falling back to the source value when none was derived
fn effective_acceleration(point: &EnrichedPoint) -> f64 {
    if point.calculated_accel != 0.0 {
        point.calculated_accel.abs()
    } else {
        point.point.acceleration.abs()
    }
}

fn suggestion_for(issue: &RouteIssue) -> Suggestion {
    let limit = issue.limit.unwrap_or_default();
    match issue.kind {
        IssueKind::VelocityViolation => Suggestion {
            title: "Reduce Velocity".to_string(),
            description: format!(
                "The velocity at this point ({:.2} m/s) exceeds the maximum ({:.2} m/s).",
                issue.value, limit
            ),
            actions: vec![
                format!("Reduce the target velocity to {:.2} m/s or less", limit * 0.95),
                "Extend the trajectory over a longer distance to allow smoother acceleration".to_string(),
                "Check whether the path waypoints are too close together".to_string(),
            ],
        },
        IssueKind::AccelerationViolation => Suggestion {
            title: "Reduce Acceleration".to_string(),
            description: format!(
                "The acceleration ({:.2} m/s²) exceeds the maximum ({:.2} m/s²).",
                issue.value, limit
            ),
            actions: vec![
                format!("Reduce the target acceleration to {:.2} m/s² or less", limit * 0.95),
                "Extend the time interval for acceleration changes".to_string(),
                "Use a more gradual ramp profile for speed changes".to_string(),
            ],
        },
        IssueKind::JerkViolation => Suggestion::new(
            "Smooth Acceleration Changes",
            format!(
                "The jerk ({:.2} m/s³) exceeds the maximum ({:.2} m/s³).",
                issue.value, limit
            ),
            &[
                "Add intermediate waypoints to smooth out acceleration transitions",
                "Increase the time interval between trajectory points",
                "Use a smoother trajectory generation profile",
            ],
        ),
        IssueKind::SharpTurn => Suggestion {
            title: "Adjust Turn Sharpness".to_string(),
            description: format!(
                "The centripetal acceleration at this turn ({:.2} m/s²) exceeds the limit ({:.2} m/s²).",
                issue.value, limit
            ),
            actions: vec![
                "Reduce the velocity through the turn".to_string(),
                "Increase the turning radius in your path planning".to_string(),
                format!(
                    "Reduce the curvature from {:.3} to a smaller value",
                    issue.curvature.unwrap_or_default()
                ),
                "Add more waypoints around the turn for a gentler curve".to_string(),
            ],
        },
        IssueKind::JerkyMovement => Suggestion::new(
            "Smooth Out Velocity Changes",
            format!(
                "The velocity changes by {:.2} m/s too abruptly at this point.",
                issue.value
            ),
            &[
                "Add intermediate waypoints for gradual velocity transitions",
                "Reduce the acceleration limits",
                "Ensure the trajectory generator ramps velocity",
            ],
        ),
        IssueKind::UnrealisticMovement => Suggestion::new(
            "Fix Position Discontinuity",
            format!(
                "The robot position jumps at an implied {:.1} m/s.",
                issue.value
            ),
            &[
                "Check the input trajectory file for data corruption",
                "Re-generate the path with your path planning tool",
                "Verify the coordinate system matches your field setup",
            ],
        ),
        IssueKind::SharpDirectionChange => Suggestion::new(
            "Soften Direction Change",
            format!(
                "The path direction changes sharply ({:.1}°) at this point.",
                issue.value
            ),
            &[
                "Create a smoother curve in the path planning",
                "Add more waypoints to transition more gradually",
                "Reduce the robot speed through this section",
                "Review the waypoint placement to avoid sharp angles",
            ],
        ),
    }
}

/// Forward-looking advice for a path with no located problem
fn general_suggestions(points: &[EnrichedPoint], constraints: &Constraints) -> Vec<Suggestion> {
    let stats = PathStatistics::from_points(points);
    let mut suggestions = Vec::new();

    if stats.path_efficiency < 70.0 {
        suggestions.push(Suggestion::new(
            "Optimize Path Efficiency",
            format!(
                "The path takes an indirect route ({:.1}% efficiency).",
                stats.path_efficiency
            ),
            &[
                "Place waypoints more directly toward the target",
                "Minimize unnecessary detours",
                "Review whether obstacles force the indirect route",
            ],
        ));
    }

    if stats.average_velocity < constraints.max_velocity * 0.5 {
        suggestions.push(Suggestion::new(
            "Consider Increasing Speed",
            format!(
                "The average velocity ({:.2} m/s) is well below the maximum ({:.2} m/s).",
                stats.average_velocity, constraints.max_velocity
            ),
            &[
                "If the path allows, increase target velocity for faster execution",
                "Check that the velocity constraints suit your robot",
            ],
        ));
    }

    if stats.max_curvature > 0.5 {
        suggestions.push(Suggestion::new(
            "Smooth Out Curves",
            format!(
                "The path contains tight curves (up to {:.2} rad/m).",
                stats.max_curvature
            ),
            &[
                "Use a spline-based path generator for smoother curves",
                "Add waypoints through transitions to reduce the required curvature",
                "Consider the turning radius of your robot",
            ],
        ));
    }

    if stats.peak_acceleration > constraints.max_acceleration * 0.8 {
        suggestions.push(Suggestion::new(
            "Consider Smoother Acceleration Profile",
            format!(
                "Peak acceleration reaches {:.0}% of the limit.",
                formulas::percent_of(stats.peak_acceleration, constraints.max_acceleration)
            ),
            &[
                "Allow more time for acceleration transitions",
                "Check whether smoother ramping works for your use case",
                "Review the constraint settings",
            ],
        ));
    }

    suggestions
}

/// Scan with a default analyzer
pub fn analyze_first_problem(points: &[EnrichedPoint], constraints: &Constraints) -> RouteAnalysis {
    RouteAnalyzer::new().analyze(points, constraints)
}
