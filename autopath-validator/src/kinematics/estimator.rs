//! Kinematics Estimator
//!
//! Two passes over a time-sorted trajectory:
//!
//! 1. Raw finite differences. Acceleration is trusted from the source when it
//!    supplies a non-zero value, otherwise derived from velocity. Jerk chains
//!    off the previous sample's resolved acceleration. Angular velocity uses
//!    the wrapped heading difference.
//! 2. Per-channel symmetric moving averages. Jerk is a second difference of
//!    discrete samples and gets the widest window.
//!
//! Raw derivatives are kept alongside the smoothed channels so displays can
//! show both while constraint checks only ever see the smoothed values.

use super::formulas::{finite_difference, wrap_angle, MIN_TIME_STEP};
use super::smoothing::moving_average;
use crate::trajectory::types::{EnrichedPoint, RawDerivatives, TrajectoryPoint};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default acceleration smoothing window (samples)
pub const DEFAULT_ACCELERATION_WINDOW: usize = 5;

/// Default jerk smoothing window (samples)
pub const DEFAULT_JERK_WINDOW: usize = 11;

/// Default angular velocity smoothing window (samples)
pub const DEFAULT_ANGULAR_VELOCITY_WINDOW: usize = 5;

/// Smoothing window sizes, one per derived channel.
///
/// A window of `w` averages `±w/2` neighbors; 1 disables smoothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    pub acceleration_window: usize,
    pub jerk_window: usize,
    pub angular_velocity_window: usize,
}

impl SmoothingConfig {
    /// No smoothing on any channel
    pub const RAW: Self = Self {
        acceleration_window: 1,
        jerk_window: 1,
        angular_velocity_window: 1,
    };

    /// Lighter windows (3/5/3) used by earlier tuning
    pub const LIGHT: Self = Self {
        acceleration_window: 3,
        jerk_window: 5,
        angular_velocity_window: 3,
    };

    pub fn validate(&self) -> Result<(), crate::Error> {
        for (name, window) in [
            ("acceleration_window", self.acceleration_window),
            ("jerk_window", self.jerk_window),
            ("angular_velocity_window", self.angular_velocity_window),
        ] {
            if window == 0 {
                return Err(crate::Error::Config(format!("{} must be >= 1", name)));
            }
        }
        Ok(())
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            acceleration_window: DEFAULT_ACCELERATION_WINDOW,
            jerk_window: DEFAULT_JERK_WINDOW,
            angular_velocity_window: DEFAULT_ANGULAR_VELOCITY_WINDOW,
        }
    }
}

/// Derives and smooths kinematic channels for a trajectory
#[derive(Debug, Clone, Default)]
pub struct KinematicsEstimator {
    config: SmoothingConfig,
}

impl KinematicsEstimator {
    /// Create with default smoothing windows
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom smoothing windows
    pub fn with_config(config: SmoothingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SmoothingConfig {
        &self.config
    }

    /// Enrich a time-sorted trajectory with derived kinematics.
    ///
    /// Fewer than two samples yields an empty result: there is nothing to
    /// differentiate.
    pub fn enrich(&self, points: &[TrajectoryPoint]) -> Vec<EnrichedPoint> {
        if points.len() < 2 {
            return Vec::new();
        }

        let raw = self.differentiate(points);

        let accel: Vec<f64> = raw.iter().map(|d| d.acceleration).collect();
        let jerk: Vec<f64> = raw.iter().map(|d| d.jerk).collect();
        let ang_vel: Vec<f64> = raw.iter().map(|d| d.angular_velocity).collect();

        let accel = moving_average(&accel, self.config.acceleration_window);
        let jerk = moving_average(&jerk, self.config.jerk_window);
        let ang_vel = moving_average(&ang_vel, self.config.angular_velocity_window);

        points
            .iter()
            .zip(raw)
            .enumerate()
            .map(|(i, (point, raw))| EnrichedPoint {
                point: *point,
                calculated_accel: accel[i],
                calculated_jerk: jerk[i],
                calculated_ang_vel: ang_vel[i],
                raw,
            })
            .collect()
    }

    /// Pass 1: unsmoothed finite differences
    fn differentiate(&self, points: &[TrajectoryPoint]) -> Vec<RawDerivatives> {
        let mut derivatives: Vec<RawDerivatives> = Vec::with_capacity(points.len());
        let mut skipped = 0usize;

        for (i, current) in points.iter().enumerate() {
            let mut derived = RawDerivatives {
                acceleration: current.acceleration,
                jerk: 0.0,
                angular_velocity: 0.0,
            };

            if i > 0 {
                let previous = &points[i - 1];
                let previous_accel = derivatives[i - 1].acceleration;
                let dt = current.time - previous.time;

                if dt > MIN_TIME_STEP {
                    if current.acceleration == 0.0 {
                        derived.acceleration =
                            finite_difference(current.velocity, previous.velocity, dt)
                                .unwrap_or(0.0);
                    }
                    derived.jerk =
                        finite_difference(derived.acceleration, previous_accel, dt).unwrap_or(0.0);
                    derived.angular_velocity =
                        wrap_angle(current.rotation - previous.rotation) / dt;
                } else {
                    skipped += 1;
                }
            }

            derivatives.push(derived);
        }

        if skipped > 0 {
            debug!(skipped, "Skipped derivative steps with near-duplicate timestamps");
        }

        derivatives
    }
}

/// Enrich with default smoothing windows
pub fn enrich(points: &[TrajectoryPoint]) -> Vec<EnrichedPoint> {
    KinematicsEstimator::new().enrich(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn line(velocities: &[f64], dt: f64) -> Vec<TrajectoryPoint> {
        let mut x = 0.0;
        velocities
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let p = TrajectoryPoint::new(i as f64 * dt, x, 0.0, *v);
                x += v * dt;
                p
            })
            .collect()
    }

    #[test]
    fn test_too_short_is_empty() {
        let estimator = KinematicsEstimator::new();
        assert!(estimator.enrich(&[]).is_empty());
        assert!(estimator.enrich(&[TrajectoryPoint::new(0.0, 0.0, 0.0, 1.0)]).is_empty());
    }

    #[test]
    fn test_constant_velocity_has_zero_derivatives() {
        let enriched = enrich(&line(&[2.0, 2.0, 2.0], 1.0));
        assert_eq!(enriched.len(), 3);
        for p in &enriched {
            assert_eq!(p.calculated_accel, 0.0);
            assert_eq!(p.calculated_jerk, 0.0);
            assert_eq!(p.calculated_ang_vel, 0.0);
        }
    }

    #[test]
    fn test_two_points_do_not_produce_nan() {
        let enriched = enrich(&line(&[0.0, 1.0], 0.5));
        assert_eq!(enriched.len(), 2);
        for p in &enriched {
            assert!(p.calculated_accel.is_finite());
            assert!(p.calculated_jerk.is_finite());
        }
        assert_eq!(enriched[1].raw.acceleration, 2.0);
    }

    #[test]
    fn test_derives_acceleration_from_velocity() {
        let estimator = KinematicsEstimator::with_config(SmoothingConfig::RAW);
        let enriched = estimator.enrich(&line(&[0.0, 1.0, 2.0, 3.0], 0.5));
        assert_eq!(enriched[0].calculated_accel, 0.0);
        for p in &enriched[1..] {
            assert_relative_eq!(p.calculated_accel, 2.0);
        }
    }

    #[test]
    fn test_trusts_supplied_acceleration() {
        let points = vec![
            TrajectoryPoint::new(0.0, 0.0, 0.0, 0.0),
            TrajectoryPoint::new(1.0, 0.5, 0.0, 1.0).with_acceleration(0.75),
            TrajectoryPoint::new(2.0, 1.5, 0.0, 2.0),
        ];
        let estimator = KinematicsEstimator::with_config(SmoothingConfig::RAW);
        let enriched = estimator.enrich(&points);
        assert_eq!(enriched[1].calculated_accel, 0.75);
        assert_eq!(enriched[2].calculated_accel, 1.0);
    }

    #[test]
    fn test_jerk_chains_off_resolved_acceleration() {
        let points = vec![
            TrajectoryPoint::new(0.0, 0.0, 0.0, 0.0),
            TrajectoryPoint::new(1.0, 0.0, 0.0, 0.0).with_acceleration(3.0),
            TrajectoryPoint::new(2.0, 0.0, 0.0, 1.0),
        ];
        let estimator = KinematicsEstimator::with_config(SmoothingConfig::RAW);
        let enriched = estimator.enrich(&points);
        // a1 = 3 (supplied), a2 = (1 - 0) / 1 = 1
        assert_eq!(enriched[1].calculated_jerk, 3.0);
        assert_eq!(enriched[2].calculated_jerk, -2.0);
    }

    #[test]
    fn test_duplicate_timestamps_skip_derivatives() {
        let points = vec![
            TrajectoryPoint::new(0.0, 0.0, 0.0, 0.0),
            TrajectoryPoint::new(0.0, 0.0, 0.0, 5.0),
            TrajectoryPoint::new(1.0, 1.0, 0.0, 5.0),
        ];
        let estimator = KinematicsEstimator::with_config(SmoothingConfig::RAW);
        let enriched = estimator.enrich(&points);
        assert_eq!(enriched[1].calculated_accel, 0.0);
        assert_eq!(enriched[1].calculated_jerk, 0.0);
        assert!(enriched.iter().all(|p| p.calculated_accel.is_finite()));
    }

    #[test]
    fn test_angular_velocity_wraps() {
        let points = vec![
            TrajectoryPoint::new(0.0, 0.0, 0.0, 1.0).with_rotation(PI - 0.05),
            TrajectoryPoint::new(0.5, 0.5, 0.0, 1.0).with_rotation(-PI + 0.05),
        ];
        let estimator = KinematicsEstimator::with_config(SmoothingConfig::RAW);
        let enriched = estimator.enrich(&points);
        assert_relative_eq!(enriched[1].calculated_ang_vel, 0.2, epsilon = 1e-9);
    }

    #[test]
    fn test_smoothing_spreads_spike() {
        let mut velocities = vec![1.0; 15];
        velocities[7] = 3.0;
        let points = line(&velocities, 0.1);

        let raw = KinematicsEstimator::with_config(SmoothingConfig::RAW).enrich(&points);
        let smoothed = KinematicsEstimator::new().enrich(&points);

        let peak = |pts: &[EnrichedPoint]| {
            pts.iter().map(|p| p.calculated_jerk.abs()).fold(0.0, f64::max)
        };
        assert!(peak(&smoothed) < peak(&raw));
        assert_eq!(smoothed[7].raw, raw[7].raw);
    }

    #[test]
    fn test_interior_of_constant_acceleration_is_unchanged() {
        let velocities: Vec<f64> = (0..20).map(|i| i as f64 * 0.2).collect();
        let enriched = enrich(&line(&velocities, 0.1));
        // 2 m/s² everywhere except the first sample, which has no predecessor
        for p in &enriched[6..14] {
            assert_relative_eq!(p.calculated_accel, 2.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(SmoothingConfig::default().validate().is_ok());
        let bad = SmoothingConfig {
            jerk_window: 0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
