//! Violation records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a violation record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Synthetic "everything passed" record
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// Anything other than the synthetic success record
    pub fn is_problem(&self) -> bool {
        !matches!(self, Self::Success)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Violation taxonomy; serialized as its human-readable label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    #[serde(rename = "Velocity Limit Exceeded")]
    VelocityLimit,
    #[serde(rename = "Acceleration Limit Exceeded")]
    AccelerationLimit,
    #[serde(rename = "High Jerk Warning")]
    HighJerk,
    #[serde(rename = "Turn Speed Too High (Slip Risk)")]
    CentripetalLimit,
    #[serde(rename = "Path Efficiency Analysis")]
    PathEfficiency,
    #[serde(rename = "Sharp Turn Detected")]
    SharpTurn,
    #[serde(rename = "Velocity Smoothness")]
    VelocitySmoothness,
    #[serde(rename = "Acceleration Consistency")]
    AccelerationConsistency,
    #[serde(rename = "Irregular Waypoint Spacing")]
    WaypointSpacing,
    #[serde(rename = "Extreme Curvature")]
    ExtremeCurvature,
    #[serde(rename = "Time Efficiency Analysis")]
    TimeEfficiency,
    #[serde(rename = "Path Optimal")]
    PathOptimal,
}

impl ViolationKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::VelocityLimit => "Velocity Limit Exceeded",
            Self::AccelerationLimit => "Acceleration Limit Exceeded",
            Self::HighJerk => "High Jerk Warning",
            Self::CentripetalLimit => "Turn Speed Too High (Slip Risk)",
            Self::PathEfficiency => "Path Efficiency Analysis",
            Self::SharpTurn => "Sharp Turn Detected",
            Self::VelocitySmoothness => "Velocity Smoothness",
            Self::AccelerationConsistency => "Acceleration Consistency",
            Self::WaypointSpacing => "Irregular Waypoint Spacing",
            Self::ExtremeCurvature => "Extreme Curvature",
            Self::TimeEfficiency => "Time Efficiency Analysis",
            Self::PathOptimal => "Path Optimal",
        }
    }

    /// One of the four per-sample limit checks
    pub fn is_primary(&self) -> bool {
        matches!(
            self,
            Self::VelocityLimit | Self::AccelerationLimit | Self::HighJerk | Self::CentripetalLimit
        )
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One reported finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    #[serde(rename = "type")]
    pub kind: ViolationKind,
    pub severity: Severity,
    /// Time of first occurrence (seconds), 0 for whole-path findings
    pub time: f64,
    /// Number of offending samples, for aggregate findings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub message: String,
    /// Coarse field-zone description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub suggestion: String,
    /// Heuristic estimate of the consequence, not a measured value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
}

impl Violation {
    pub fn new(kind: ViolationKind, severity: Severity, time: f64, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            time,
            count: None,
            message: message.into(),
            location: None,
            suggestion: String::new(),
            impact: None,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn at_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = suggestion.into();
        self
    }

    pub fn with_impact(mut self, impact: impl Into<String>) -> Self {
        self.impact = Some(impact.into());
        self
    }
}
