//! Constraint Validator
//!
//! Scans an enriched trajectory against [`Constraints`] and produces one
//! aggregate [`Violation`] per breached limit, anchored at the earliest
//! offending sample, followed by the whole-path diagnostics. A clean path
//! yields exactly one `success` record carrying summary statistics.
//!
//! Output order is the fixed evaluation order (velocity, acceleration, jerk,
//! centripetal, then diagnostics), not severity or time.

use super::constraints::Constraints;
use super::diagnostics;
use super::location::FieldZones;
use super::violation::{Severity, Violation, ViolationKind};
use crate::analysis::statistics::PathStatistics;
use crate::kinematics::formulas::{self, percent_of};
use crate::trajectory::types::EnrichedPoint;
use tracing::debug;

/// Tracking error per m/s of excess speed (heuristic, uncalibrated)
const VELOCITY_TRACKING_ERROR_PER_MPS: f64 = 0.1;

/// Lateral slide per m/s² of excess centripetal acceleration (heuristic, uncalibrated)
const LATERAL_SLIDE_PER_MPS2: f64 = 0.05;

/// Primary per-sample limit checks, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LimitCheck {
    Velocity,
    Acceleration,
    Jerk,
    Centripetal,
}

impl LimitCheck {
    const ALL: [LimitCheck; 4] = [
        LimitCheck::Velocity,
        LimitCheck::Acceleration,
        LimitCheck::Jerk,
        LimitCheck::Centripetal,
    ];

    /// Measured value if the sample breaks this limit
    fn offending_value(&self, point: &EnrichedPoint, constraints: &Constraints) -> Option<f64> {
        match self {
            Self::Velocity => {
                let v = point.velocity().abs();
                (v > constraints.max_velocity).then_some(v)
            }
            Self::Acceleration => {
                let a = point.calculated_accel.abs();
                (a > constraints.max_acceleration).then_some(a)
            }
            Self::Jerk => {
                let j = point.calculated_jerk.abs();
                (constraints.jerk_limited() && j > constraints.max_jerk).then_some(j)
            }
            Self::Centripetal => {
                if !constraints.centripetal_limited() {
                    return None;
                }
                formulas::turning_centripetal(point.velocity(), point.curvature())
                    .filter(|c| *c > constraints.max_centripetal)
            }
        }
    }
}

/// Offenders of one limit check
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    count: usize,
    first: Option<EnrichedPoint>,
    peak: f64,
    max_curvature: f64,
}

impl Tally {
    fn record(&mut self, point: &EnrichedPoint, value: f64) {
        self.count += 1;
        self.peak = self.peak.max(value);
        self.max_curvature = self.max_curvature.max(point.curvature().abs());
        if self.first.map_or(true, |f| point.time() < f.time()) {
            self.first = Some(*point);
        }
    }
}

/// Validates enriched trajectories against kinematic constraints
#[derive(Debug, Clone, Default)]
pub struct ConstraintValidator {
    zones: FieldZones,
}

impl ConstraintValidator {
    /// Create with the standard field zones
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom field zones
    pub fn with_zones(zones: FieldZones) -> Self {
        Self { zones }
    }

    pub fn zones(&self) -> &FieldZones {
        &self.zones
    }

    /// Validate a trajectory.
    ///
    /// Never fails: limit breaches are reported as data. An empty input has
    /// nothing to validate and yields an empty list.
    pub fn validate(&self, points: &[EnrichedPoint], constraints: &Constraints) -> Vec<Violation> {
        if points.is_empty() {
            return Vec::new();
        }

        let stats = PathStatistics::from_points(points);
        let mut violations = self.check_limits(points, constraints);
        violations.extend(diagnostics::run_all(points, constraints, &stats, &self.zones));

        if violations.is_empty() {
            violations.push(self.success_record(&stats, constraints));
        }

        debug!(
            errors = violations.iter().filter(|v| v.severity == Severity::Error).count(),
            warnings = violations.iter().filter(|v| v.severity == Severity::Warning).count(),
            info = violations.iter().filter(|v| v.severity == Severity::Info).count(),
            "Validated {} samples",
            points.len()
        );

        violations
    }

    /// Primary checks: one aggregate record per breached limit
    fn check_limits(&self, points: &[EnrichedPoint], constraints: &Constraints) -> Vec<Violation> {
        let mut tallies = [Tally::default(); 4];

        for point in points {
            for (check, tally) in LimitCheck::ALL.iter().zip(tallies.iter_mut()) {
                if let Some(value) = check.offending_value(point, constraints) {
                    tally.record(point, value);
                }
            }
        }

        LimitCheck::ALL
            .iter()
            .zip(tallies)
            .filter_map(|(check, tally)| {
                let first = tally.first?;
                Some(self.limit_violation(*check, &tally, &first, constraints))
            })
            .collect()
    }

    fn limit_violation(
        &self,
        check: LimitCheck,
        tally: &Tally,
        first: &EnrichedPoint,
        constraints: &Constraints,
    ) -> Violation {
        let location = self.zones.describe(first.point.x, first.point.y);
        let count = tally.count;
        let peak = tally.peak;

        let violation = match check {
            LimitCheck::Velocity => {
                let limit = constraints.max_velocity;
                Violation::new(
                    ViolationKind::VelocityLimit,
                    Severity::Error,
                    first.time(),
                    format!(
                        "{} points exceed velocity limit. Peak: {:.2} m/s (limit: {} m/s)",
                        count, peak, limit
                    ),
                )
                .with_suggestion(format!(
                    "Add a velocity constraint zone for {} or raise max velocity to {} m/s.",
                    location,
                    round_up_tenth(peak)
                ))
                .with_impact(format!(
                    "Estimated: path-following error up to ~{:.2} m where output saturates",
                    (peak - limit) * VELOCITY_TRACKING_ERROR_PER_MPS
                ))
            }
            LimitCheck::Acceleration => {
                let limit = constraints.max_acceleration;
                Violation::new(
                    ViolationKind::AccelerationLimit,
                    Severity::Error,
                    first.time(),
                    format!(
                        "{} points exceed acceleration limit. Peak: {:.2} m/s² (limit: {} m/s²)",
                        count, peak, limit
                    ),
                )
                .with_suggestion(format!(
                    "Increase path duration for {} or add waypoints. Minimum acceleration limit for this path: {} m/s².",
                    location,
                    round_up_tenth(peak)
                ))
                .with_impact(format!(
                    "Estimated: ~{:.0}% over the traction budget, wheel slip likely",
                    percent_of(peak, limit) - 100.0
                ))
            }
            LimitCheck::Jerk => {
                let limit = constraints.max_jerk;
                Violation::new(
                    ViolationKind::HighJerk,
                    Severity::Warning,
                    first.time(),
                    format!(
                        "{} points have high jerk. Peak: {:.2} m/s³ (limit: {} m/s³)",
                        count, peak, limit
                    ),
                )
                .with_suggestion(format!(
                    "Sudden acceleration changes near {}. Use an S-curve acceleration profile or smooth rotation changes at waypoints.",
                    location
                ))
                .with_impact(format!(
                    "Estimated: ~{:.0}% above the jerk limit, increased mechanical stress and slip risk",
                    percent_of(peak, limit) - 100.0
                ))
            }
            LimitCheck::Centripetal => {
                let limit = constraints.max_centripetal;
                let safe_speed = if tally.max_curvature > 0.0 {
                    (limit / tally.max_curvature).sqrt()
                } else {
                    0.0
                };
                Violation::new(
                    ViolationKind::CentripetalLimit,
                    Severity::Error,
                    first.time(),
                    format!(
                        "{} points exceed lateral acceleration (friction limit). Peak: {:.2} m/s² (limit: {} m/s²)",
                        count, peak, limit
                    ),
                )
                .with_suggestion(format!(
                    "Widen the turn radius at {} or reduce speed below {:.1} m/s through the turn.",
                    location, safe_speed
                ))
                .with_impact(format!(
                    "Estimated: lateral slide of up to ~{:.2} m in the turn",
                    (peak - limit) * LATERAL_SLIDE_PER_MPS2
                ))
            }
        };

        violation.with_count(count).at_location(location)
    }

    /// The single record emitted when nothing was found
    fn success_record(&self, stats: &PathStatistics, constraints: &Constraints) -> Violation {
        Violation::new(
            ViolationKind::PathOptimal,
            Severity::Success,
            0.0,
            format!(
                "All checks passed! Peak velocity: {:.2} m/s ({:.0}% of limit), peak acceleration: {:.2} m/s² ({:.0}% of limit), path efficiency: {:.1}%, elapsed time: {:.2} s",
                stats.peak_velocity,
                percent_of(stats.peak_velocity, constraints.max_velocity),
                stats.peak_acceleration,
                percent_of(stats.peak_acceleration, constraints.max_acceleration),
                stats.path_efficiency,
                stats.elapsed_time
            ),
        )
        .with_suggestion(
            "This path is within robot constraints and ready for deployment. Verify performance in field testing.",
        )
    }
}

/// Round up to one decimal place
fn round_up_tenth(value: f64) -> f64 {
    (value * 10.0).ceil() / 10.0
}

/// Validate with the standard field zones
pub fn validate(points: &[EnrichedPoint], constraints: &Constraints) -> Vec<Violation> {
    ConstraintValidator::new().validate(points, constraints)
}
