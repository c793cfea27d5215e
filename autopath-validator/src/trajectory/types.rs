//! Trajectory sample types

use serde::{Deserialize, Serialize};

/// One normalized sample along a path
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectoryPoint {
    /// Sample time (seconds)
    pub time: f64,
    /// Field position (meters)
    pub x: f64,
    pub y: f64,
    /// Heading (radians)
    pub rotation: f64,
    /// Translational speed (m/s)
    pub velocity: f64,
    /// Source-supplied acceleration (m/s²), 0 when absent
    pub acceleration: f64,
    /// Signed path curvature (rad/m), 0 on straight segments
    pub curvature: f64,
    /// Index of this sample in the source document, before sorting
    #[serde(default)]
    pub source_index: usize,
}

impl TrajectoryPoint {
    pub fn new(time: f64, x: f64, y: f64, velocity: f64) -> Self {
        Self {
            time,
            x,
            y,
            velocity,
            ..Default::default()
        }
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_acceleration(mut self, acceleration: f64) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn with_curvature(mut self, curvature: f64) -> Self {
        self.curvature = curvature;
        self
    }

    /// Euclidean distance to another sample
    pub fn distance_to(&self, other: &TrajectoryPoint) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Unsmoothed finite-difference derivatives of a sample
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDerivatives {
    pub acceleration: f64,
    pub jerk: f64,
    pub angular_velocity: f64,
}

/// A trajectory sample with derived kinematic channels
///
/// The `calculated_*` channels are the smoothed values that constraint checks
/// run against; `raw` keeps the unsmoothed derivatives for display.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedPoint {
    #[serde(flatten)]
    pub point: TrajectoryPoint,
    /// Smoothed acceleration (m/s²)
    pub calculated_accel: f64,
    /// Smoothed jerk (m/s³)
    pub calculated_jerk: f64,
    /// Smoothed angular velocity (rad/s)
    pub calculated_ang_vel: f64,
    pub raw: RawDerivatives,
}

impl EnrichedPoint {
    pub fn time(&self) -> f64 {
        self.point.time
    }

    pub fn velocity(&self) -> f64 {
        self.point.velocity
    }

    pub fn curvature(&self) -> f64 {
        self.point.curvature
    }

    /// Euclidean distance to another sample
    pub fn distance_to(&self, other: &EnrichedPoint) -> f64 {
        self.point.distance_to(&other.point)
    }
}
