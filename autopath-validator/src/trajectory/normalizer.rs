//! Trajectory Normalizer
//!
//! Accepts either a bare array of state objects or an object with a `states`
//! array, resolves each field through the accessor tables in
//! [`fields`](super::fields), and returns the samples sorted by time.
//!
//! Kinematic fields are lenient (garbage collapses to 0) while positions are
//! strict: a sample without a finite `x`/`y` invalidates the whole input.

use super::fields::{
    self, ACCELERATION_FIELDS, CURVATURE_FIELDS, ROTATION_FIELDS, TIME_FIELDS, VELOCITY_FIELDS,
};
use super::types::TrajectoryPoint;
use serde_json::Value;
use std::cmp::Ordering;
use std::path::Path;
use tracing::debug;

/// Structural errors raised while normalizing trajectory input
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid input: expected a JSON object or array")]
    NotAnObject,

    #[error(
        "This looks like a raw path file with 'waypoints' only; waypoints carry no time or \
         velocity data. Provide a generated trajectory with 'states' or an array of samples"
    )]
    WaypointsOnly,

    #[error("Unknown trajectory format: expected an object with a 'states' array or an array of samples")]
    UnknownFormat,

    #[error("The trajectory contains no samples")]
    EmptyTrajectory,

    #[error("Invalid state at index {index}: {reason}")]
    InvalidState { index: usize, reason: String },

    #[error("Missing position at index {index}: expected x/y under pose.translation, pose, the state itself, or position")]
    MissingPosition { index: usize },

    #[error("Invalid position at index {index}: x={x}, y={y}")]
    InvalidPosition { index: usize, x: String, y: String },
}

impl ParseError {
    /// Index of the offending sample, if the error concerns a single sample
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::InvalidState { index, .. }
            | Self::MissingPosition { index }
            | Self::InvalidPosition { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// Top-level document shape the samples were found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceSchema {
    /// `[ {...}, {...} ]`
    StateArray,
    /// `{ "states": [ ... ] }`
    StatesObject,
}

/// Normalize an arbitrary JSON document into a time-sorted trajectory
pub fn normalize(raw: &Value) -> Result<Vec<TrajectoryPoint>, ParseError> {
    let (states, schema) = extract_states(raw)?;

    if states.is_empty() {
        return Err(ParseError::EmptyTrajectory);
    }

    let mut points = states
        .iter()
        .enumerate()
        .map(|(index, state)| normalize_state(index, state))
        .collect::<Result<Vec<_>, _>>()?;

    // Vec::sort_by is stable, so equal timestamps keep their input order
    points.sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(Ordering::Equal));

    debug!(count = points.len(), ?schema, "Normalized trajectory");
    Ok(points)
}

/// Parse JSON text and normalize it
pub fn normalize_str(json: &str) -> crate::Result<Vec<TrajectoryPoint>> {
    let raw: Value = serde_json::from_str(json)?;
    Ok(normalize(&raw)?)
}

/// Read a trajectory file and normalize it
pub fn normalize_file(path: &Path) -> crate::Result<Vec<TrajectoryPoint>> {
    let content = std::fs::read_to_string(path)?;
    normalize_str(&content)
}

/// Find the state array inside the document
fn extract_states(raw: &Value) -> Result<(&[Value], SourceSchema), ParseError> {
    match raw {
        Value::Array(states) => Ok((states.as_slice(), SourceSchema::StateArray)),
        Value::Object(map) => {
            if let Some(Value::Array(states)) = map.get("states") {
                Ok((states.as_slice(), SourceSchema::StatesObject))
            } else if map.contains_key("waypoints") {
                Err(ParseError::WaypointsOnly)
            } else {
                Err(ParseError::UnknownFormat)
            }
        }
        _ => Err(ParseError::NotAnObject),
    }
}

/// Map one state object to a canonical point
fn normalize_state(index: usize, state: &Value) -> Result<TrajectoryPoint, ParseError> {
    if !state.is_object() {
        return Err(ParseError::InvalidState {
            index,
            reason: "not an object".to_string(),
        });
    }

    let (raw_x, raw_y) =
        fields::resolve_position(state).ok_or(ParseError::MissingPosition { index })?;

    let (x, y) = match (fields::parse_finite(raw_x), fields::parse_finite(raw_y)) {
        (Some(x), Some(y)) => (x, y),
        _ => {
            return Err(ParseError::InvalidPosition {
                index,
                x: raw_x.to_string(),
                y: raw_y.to_string(),
            })
        }
    };

    Ok(TrajectoryPoint {
        time: fields::resolve_number(state, TIME_FIELDS),
        x,
        y,
        rotation: fields::resolve_number(state, ROTATION_FIELDS),
        velocity: fields::resolve_number(state, VELOCITY_FIELDS),
        acceleration: fields::resolve_number(state, ACCELERATION_FIELDS),
        curvature: fields::resolve_number(state, CURVATURE_FIELDS),
        source_index: index,
    })
}
