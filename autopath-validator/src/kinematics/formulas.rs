//! Shared kinematic arithmetic
//!
//! The constraint validator and the route analyzer ask different questions of
//! a trajectory but must agree on how a quantity is measured, so every formula
//! they both use lives here.

use std::f64::consts::{PI, TAU};

/// Time steps at or below this (seconds) are treated as duplicates
pub const MIN_TIME_STEP: f64 = 1e-4;

/// Curvature magnitudes at or below this (rad/m) count as straight
pub const MIN_CURVATURE: f64 = 1e-3;

/// Wrap an angle into (-π, π]
pub fn wrap_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let mut wrapped = angle % TAU;
    while wrapped > PI {
        wrapped -= TAU;
    }
    while wrapped <= -PI {
        wrapped += TAU;
    }
    wrapped
}

/// Rate of change between two samples, or `None` when the step is too short
pub fn finite_difference(current: f64, previous: f64, dt: f64) -> Option<f64> {
    (dt > MIN_TIME_STEP).then(|| (current - previous) / dt)
}

/// Lateral acceleration v²·|κ| (m/s²)
pub fn centripetal_acceleration(velocity: f64, curvature: f64) -> f64 {
    velocity * velocity * curvature.abs()
}

/// Lateral acceleration for a turning sample; `None` on straight segments
pub fn turning_centripetal(velocity: f64, curvature: f64) -> Option<f64> {
    (curvature.abs() > MIN_CURVATURE).then(|| centripetal_acceleration(velocity, curvature))
}

/// Turn radius 1/|κ| (m); `None` on straight segments
pub fn turn_radius(curvature: f64) -> Option<f64> {
    (curvature.abs() > MIN_CURVATURE).then(|| 1.0 / curvature.abs())
}

/// Whether `value` exceeds `limit` scaled by `tolerance`
pub fn exceeds(value: f64, limit: f64, tolerance: f64) -> bool {
    value > limit * tolerance
}

/// Signed angle between two displacement vectors (degrees, in (-180, 180])
pub fn direction_change_degrees(dx1: f64, dy1: f64, dx2: f64, dy2: f64) -> f64 {
    let dot = dx1 * dx2 + dy1 * dy2;
    let cross = dx1 * dy2 - dy1 * dx2;
    cross.atan2(dot).to_degrees()
}

/// `value` as a percentage of `limit`; 0 when the limit is not positive
pub fn percent_of(value: f64, limit: f64) -> f64 {
    if limit > 0.0 {
        value / limit * 100.0
    } else {
        0.0
    }
}

/// Arithmetic mean; 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation; 0 for an empty slice
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Coefficient of variation (stddev / mean × 100); `None` when the mean is ~0
pub fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
    let avg = mean(values);
    (avg.abs() > f64::EPSILON).then(|| population_std_dev(values) / avg * 100.0)
}
