//! Whole-path diagnostics
//!
//! Secondary checks that look at the trajectory as a whole rather than at
//! individual limit breaches. Each check yields at most one record.

use super::constraints::Constraints;
use super::location::FieldZones;
use super::violation::{Severity, Violation, ViolationKind};
use crate::analysis::statistics::PathStatistics;
use crate::kinematics::formulas;
use crate::trajectory::types::EnrichedPoint;

/// Path efficiency (%) below which the detour is reported
pub const PATH_EFFICIENCY_THRESHOLD: f64 = 70.0;

/// Path efficiency (%) below which the detour is a warning
pub const PATH_EFFICIENCY_WARNING: f64 = 50.0;

/// Curvature (rad/m) above which a fast sample counts as a sharp turn
pub const SHARP_TURN_CURVATURE: f64 = 0.5;

/// Speed (m/s) above which a curved sample counts as a sharp turn
pub const SHARP_TURN_VELOCITY: f64 = 1.0;

/// Std-dev of consecutive velocity deltas (m/s) considered jittery
pub const VELOCITY_DELTA_STD_DEV: f64 = 0.5;

/// Acceleration coefficient of variation (%) considered inconsistent
pub const ACCELERATION_CV_THRESHOLD: f64 = 50.0;

/// Max/min inter-sample spacing ratio considered irregular
pub const SPACING_RATIO_THRESHOLD: f64 = 3.0;

/// Path max curvature (rad/m) that triggers the extreme-curvature scan
pub const EXTREME_PATH_CURVATURE: f64 = 2.0;

/// Per-sample curvature (rad/m) reported by the extreme-curvature scan
pub const EXTREME_SAMPLE_CURVATURE: f64 = 1.5;

/// Optimal/actual time ratio (%) below which the path is reported as slow
pub const TIME_EFFICIENCY_THRESHOLD: f64 = 60.0;

/// Run every diagnostic in reporting order
pub fn run_all(
    points: &[EnrichedPoint],
    constraints: &Constraints,
    stats: &PathStatistics,
    zones: &FieldZones,
) -> Vec<Violation> {
    [
        path_efficiency(stats),
        sharp_turn(points, zones),
        velocity_smoothness(points),
        acceleration_consistency(points),
        waypoint_spacing(points),
        extreme_curvature(points, stats, zones),
        time_efficiency(stats, constraints),
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub fn path_efficiency(stats: &PathStatistics) -> Option<Violation> {
    if stats.path_efficiency >= PATH_EFFICIENCY_THRESHOLD {
        return None;
    }

    let severity = if stats.path_efficiency < PATH_EFFICIENCY_WARNING {
        Severity::Warning
    } else {
        Severity::Info
    };

    Some(
        Violation::new(
            ViolationKind::PathEfficiency,
            severity,
            0.0,
            format!(
                "Path efficiency is {:.1}%. The robot travels {:.2} m to cover a straight-line distance of {:.2} m.",
                stats.path_efficiency, stats.total_distance, stats.straight_line_distance
            ),
        )
        .with_suggestion(format!(
            "Remove unnecessary waypoints or straighten the route. Roughly {:.2} m of travel could be saved.",
            stats.excess_distance()
        ))
        .with_impact(format!(
            "Estimated: {:.0}% longer than a direct route",
            100.0 - stats.path_efficiency
        )),
    )
}

/// Reports the worst fast, tight turn by curvature × speed
pub fn sharp_turn(points: &[EnrichedPoint], zones: &FieldZones) -> Option<Violation> {
    let (count, worst) = points
        .iter()
        .filter(|p| {
            p.curvature().abs() > SHARP_TURN_CURVATURE && p.velocity().abs() > SHARP_TURN_VELOCITY
        })
        .fold((0usize, None::<&EnrichedPoint>), |(count, worst), p| {
            let severity = |p: &EnrichedPoint| p.curvature().abs() * p.velocity().abs();
            let worst = match worst {
                Some(w) if severity(w) >= severity(p) => Some(w),
                _ => Some(p),
            };
            (count + 1, worst)
        });

    let worst = worst?;
    let curvature = worst.curvature().abs();
    let radius = formulas::turn_radius(curvature).unwrap_or(f64::INFINITY);
    let location = zones.describe(worst.point.x, worst.point.y);

    Some(
        Violation::new(
            ViolationKind::SharpTurn,
            Severity::Warning,
            worst.time(),
            format!(
                "{} samples take tight turns at speed. Sharpest: radius {:.2} m at {:.2} m/s",
                count,
                radius,
                worst.velocity().abs()
            ),
        )
        .with_count(count)
        .at_location(location.clone())
        .with_suggestion(format!(
            "Slow down before the turn at {} or spread the waypoints to widen the radius.",
            location
        ))
        .with_impact(format!(
            "Estimated: lateral acceleration of {:.2} m/s² through the turn",
            formulas::centripetal_acceleration(worst.velocity(), curvature)
        )),
    )
}

pub fn velocity_smoothness(points: &[EnrichedPoint]) -> Option<Violation> {
    let deltas: Vec<f64> = points
        .windows(2)
        .map(|w| w[1].velocity() - w[0].velocity())
        .collect();
    let std_dev = formulas::population_std_dev(&deltas);

    if std_dev <= VELOCITY_DELTA_STD_DEV {
        return None;
    }

    Some(
        Violation::new(
            ViolationKind::VelocitySmoothness,
            Severity::Warning,
            0.0,
            format!(
                "Velocity changes are uneven between samples (std-dev {:.2} m/s)",
                std_dev
            ),
        )
        .with_suggestion(
            "Use gradual velocity transitions. Check for abrupt constraint zones or closely spaced waypoints.",
        ),
    )
}

pub fn acceleration_consistency(points: &[EnrichedPoint]) -> Option<Violation> {
    let magnitudes: Vec<f64> = points.iter().map(|p| p.calculated_accel.abs()).collect();
    let cv = formulas::coefficient_of_variation(&magnitudes)?;

    if cv <= ACCELERATION_CV_THRESHOLD {
        return None;
    }

    Some(
        Violation::new(
            ViolationKind::AccelerationConsistency,
            Severity::Info,
            0.0,
            format!("Acceleration varies by {:.0}% around its mean", cv),
        )
        .with_suggestion(
            "A more uniform acceleration profile is easier to track. Consider a constant acceleration limit for the whole path.",
        ),
    )
}

pub fn waypoint_spacing(points: &[EnrichedPoint]) -> Option<Violation> {
    let spacings: Vec<f64> = points.windows(2).map(|w| w[0].distance_to(&w[1])).collect();
    let max = spacings.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = spacings.iter().copied().fold(f64::INFINITY, f64::min);

    if spacings.is_empty() || min <= 0.0 || max / min <= SPACING_RATIO_THRESHOLD {
        return None;
    }

    Some(
        Violation::new(
            ViolationKind::WaypointSpacing,
            Severity::Info,
            0.0,
            format!(
                "Sample spacing ranges from {:.3} m to {:.3} m ({:.1}x)",
                min,
                max,
                max / min
            ),
        )
        .with_suggestion("Resample the path or distribute waypoints more evenly."),
    )
}

/// Reports the earliest sample above [`EXTREME_SAMPLE_CURVATURE`] once the
/// path peak exceeds [`EXTREME_PATH_CURVATURE`]
pub fn extreme_curvature(
    points: &[EnrichedPoint],
    stats: &PathStatistics,
    zones: &FieldZones,
) -> Option<Violation> {
    if stats.max_curvature <= EXTREME_PATH_CURVATURE {
        return None;
    }

    let offenders: Vec<&EnrichedPoint> = points
        .iter()
        .filter(|p| p.curvature().abs() > EXTREME_SAMPLE_CURVATURE)
        .collect();
    let first = offenders
        .iter()
        .min_by(|a, b| a.time().partial_cmp(&b.time()).unwrap_or(std::cmp::Ordering::Equal))?;
    let location = zones.describe(first.point.x, first.point.y);

    Some(
        Violation::new(
            ViolationKind::ExtremeCurvature,
            Severity::Warning,
            first.time(),
            format!(
                "{} samples have curvature above {} rad/m. Peak: {:.2} rad/m (radius {:.2} m)",
                offenders.len(),
                EXTREME_SAMPLE_CURVATURE,
                stats.max_curvature,
                1.0 / stats.max_curvature
            ),
        )
        .with_count(offenders.len())
        .at_location(location.clone())
        .with_suggestion(format!(
            "The path nearly pivots in place at {}. Add intermediate waypoints to round the corner.",
            location
        )),
    )
}

/// Compares elapsed time with driving the straight line at full speed
pub fn time_efficiency(stats: &PathStatistics, constraints: &Constraints) -> Option<Violation> {
    if stats.elapsed_time <= 0.0 || stats.straight_line_distance <= 0.0 || constraints.max_velocity <= 0.0 {
        return None;
    }

    let optimal = stats.straight_line_distance / constraints.max_velocity;
    let efficiency = optimal / stats.elapsed_time * 100.0;

    if efficiency >= TIME_EFFICIENCY_THRESHOLD {
        return None;
    }

    Some(
        Violation::new(
            ViolationKind::TimeEfficiency,
            Severity::Info,
            0.0,
            format!(
                "Path takes {:.2} s; a direct run at max velocity would take {:.2} s ({:.0}% time efficiency)",
                stats.elapsed_time, optimal, efficiency
            ),
        )
        .with_suggestion(
            "Raise velocity where constraints allow or shorten the route to save time in autonomous.",
        )
        .with_impact(format!(
            "Estimated: up to {:.2} s could be saved",
            stats.elapsed_time - optimal
        )),
    )
}
