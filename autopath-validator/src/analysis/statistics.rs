//! Whole-path statistics

use crate::kinematics::formulas::{self, MIN_CURVATURE};
use crate::trajectory::types::EnrichedPoint;
use serde::{Deserialize, Serialize};

/// Aggregate measurements over an enriched trajectory
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PathStatistics {
    pub sample_count: usize,
    /// Arc length along the samples (m)
    pub total_distance: f64,
    /// Start-to-end displacement (m)
    pub straight_line_distance: f64,
    /// straight-line / arc length × 100; 100 for stationary or closed paths
    pub path_efficiency: f64,
    /// Last minus first sample time (s)
    pub elapsed_time: f64,
    pub peak_velocity: f64,
    pub average_velocity: f64,
    pub peak_acceleration: f64,
    pub peak_jerk: f64,
    pub peak_centripetal: f64,
    pub max_curvature: f64,
}

impl PathStatistics {
    pub fn from_points(points: &[EnrichedPoint]) -> Self {
        let (first, last) = match (points.first(), points.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Self::default(),
        };

        let total_distance: f64 = points.windows(2).map(|w| w[0].distance_to(&w[1])).sum();
        let straight_line_distance = first.distance_to(last);

        let path_efficiency = if straight_line_distance > 0.0 && total_distance > 0.0 {
            straight_line_distance / total_distance * 100.0
        } else {
            100.0
        };

        let speeds: Vec<f64> = points.iter().map(|p| p.velocity().abs()).collect();

        let peak = |f: fn(&EnrichedPoint) -> f64| points.iter().map(f).fold(0.0, f64::max);

        Self {
            sample_count: points.len(),
            total_distance,
            straight_line_distance,
            path_efficiency,
            elapsed_time: last.time() - first.time(),
            peak_velocity: speeds.iter().copied().fold(0.0, f64::max),
            average_velocity: formulas::mean(&speeds),
            peak_acceleration: peak(|p| p.calculated_accel.abs()),
            peak_jerk: peak(|p| p.calculated_jerk.abs()),
            peak_centripetal: peak(|p| {
                formulas::turning_centripetal(p.velocity(), p.curvature()).unwrap_or(0.0)
            }),
            max_curvature: peak(|p| {
                let c = p.curvature().abs();
                if c > MIN_CURVATURE {
                    c
                } else {
                    0.0
                }
            }),
        }
    }

    /// Extra distance traveled beyond the straight line (m)
    pub fn excess_distance(&self) -> f64 {
        (self.total_distance - self.straight_line_distance).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::types::TrajectoryPoint;
    use approx::assert_relative_eq;

    fn enriched(t: f64, x: f64, y: f64, v: f64, c: f64) -> EnrichedPoint {
        EnrichedPoint {
            point: TrajectoryPoint::new(t, x, y, v).with_curvature(c),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty() {
        assert_eq!(PathStatistics::from_points(&[]), PathStatistics::default());
    }

    #[test]
    fn test_l_shaped_path() {
        let points = vec![
            enriched(0.0, 0.0, 0.0, 1.0, 0.0),
            enriched(1.0, 3.0, 0.0, 2.0, 0.5),
            enriched(2.0, 3.0, 4.0, 3.0, 0.0),
        ];
        let stats = PathStatistics::from_points(&points);
        assert_eq!(stats.sample_count, 3);
        assert_relative_eq!(stats.total_distance, 7.0);
        assert_relative_eq!(stats.straight_line_distance, 5.0);
        assert_relative_eq!(stats.path_efficiency, 5.0 / 7.0 * 100.0);
        assert_relative_eq!(stats.excess_distance(), 2.0);
        assert_eq!(stats.elapsed_time, 2.0);
        assert_eq!(stats.peak_velocity, 3.0);
        assert_relative_eq!(stats.average_velocity, 2.0);
        assert_relative_eq!(stats.peak_centripetal, 2.0);
        assert_eq!(stats.max_curvature, 0.5);
    }

    #[test]
    fn test_closed_loop_is_fully_efficient() {
        let points = vec![
            enriched(0.0, 0.0, 0.0, 1.0, 0.0),
            enriched(1.0, 1.0, 0.0, 1.0, 0.0),
            enriched(2.0, 0.0, 0.0, 1.0, 0.0),
        ];
        assert_eq!(PathStatistics::from_points(&points).path_efficiency, 100.0);
    }
}
