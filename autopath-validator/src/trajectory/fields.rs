//! Field accessor tables
//!
//! Producers disagree on key names, so every normalized field is resolved
//! through an ordered list of candidate paths; the first one present (and not
//! `null`) wins. Supporting a new source format means appending a path here.

use serde_json::Value;

/// A sequence of object keys leading to a value inside one state.
/// The empty path addresses the state itself.
pub type FieldPath = &'static [&'static str];

pub const TIME_FIELDS: &[FieldPath] = &[&["time"], &["t"]];

pub const VELOCITY_FIELDS: &[FieldPath] = &[&["velocity"], &["vel"], &["v"]];

pub const ACCELERATION_FIELDS: &[FieldPath] = &[&["acceleration"], &["accel"], &["a"]];

pub const CURVATURE_FIELDS: &[FieldPath] = &[&["curvature"], &["c"]];

/// Heading candidates: nested WPILib rotation objects, a bare `pose.rotation`
/// number, then top-level aliases.
pub const ROTATION_FIELDS: &[FieldPath] = &[
    &["pose", "rotation", "radians"],
    &["pose", "rotation", "rotationRadians"],
    &["pose", "rotation"],
    &["rotation", "radians"],
    &["rotation"],
    &["heading"],
    &["h"],
];

/// Objects that may carry the `x`/`y` pair, in priority order.
pub const POSITION_SOURCES: &[FieldPath] = &[
    &["pose", "translation"],
    &["pose"],
    &[],
    &["position"],
];

/// Follow a path into a state, treating `null` the same as a missing key
pub fn lookup<'a>(state: &'a Value, path: FieldPath) -> Option<&'a Value> {
    let mut current = state;
    for key in path {
        current = current.get(*key)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// First defined value along a fallback chain
pub fn resolve<'a>(state: &'a Value, chain: &[FieldPath]) -> Option<&'a Value> {
    chain.iter().find_map(|path| lookup(state, *path))
}

/// Locate the object holding both `x` and `y`
pub fn resolve_position(state: &Value) -> Option<(&Value, &Value)> {
    POSITION_SOURCES.iter().find_map(|path| {
        let source = lookup(state, *path)?;
        if !source.is_object() {
            return None;
        }
        Some((lookup(source, &["x"])?, lookup(source, &["y"])?))
    })
}

/// Lenient numeric coercion: anything unparseable or non-finite becomes 0
pub fn coerce_number(value: &Value) -> f64 {
    let number = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(0.0)
            }
        }
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };
    if number.is_finite() {
        number
    } else {
        0.0
    }
}

/// Strict numeric parse used for positions: only finite numbers or numeric strings
pub fn parse_finite(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Resolve a fallback chain and coerce the result, defaulting to 0
pub fn resolve_number(state: &Value, chain: &[FieldPath]) -> f64 {
    resolve(state, chain).map(coerce_number).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_defined_wins() {
        let state = json!({ "t": 2.0, "time": 1.0 });
        assert_eq!(resolve_number(&state, TIME_FIELDS), 1.0);

        let state = json!({ "t": 2.0 });
        assert_eq!(resolve_number(&state, TIME_FIELDS), 2.0);
    }

    #[test]
    fn test_null_falls_through() {
        let state = json!({ "velocity": null, "vel": 3.5 });
        assert_eq!(resolve_number(&state, VELOCITY_FIELDS), 3.5);
    }

    #[test]
    fn test_missing_defaults_to_zero() {
        let state = json!({});
        assert_eq!(resolve_number(&state, CURVATURE_FIELDS), 0.0);
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(&json!(1.5)), 1.5);
        assert_eq!(coerce_number(&json!(" 2.25 ")), 2.25);
        assert_eq!(coerce_number(&json!("fast")), 0.0);
        assert_eq!(coerce_number(&json!("")), 0.0);
        assert_eq!(coerce_number(&json!(true)), 1.0);
        assert_eq!(coerce_number(&json!({ "value": 3 })), 0.0);
        assert_eq!(coerce_number(&json!("inf")), 0.0);
    }

    #[test]
    fn test_parse_finite() {
        assert_eq!(parse_finite(&json!(4)), Some(4.0));
        assert_eq!(parse_finite(&json!("4.5")), Some(4.5));
        assert_eq!(parse_finite(&json!("abc")), None);
        assert_eq!(parse_finite(&json!(false)), None);
        assert_eq!(parse_finite(&json!("NaN")), None);
    }

    #[test]
    fn test_rotation_resolution_order() {
        let nested = json!({ "pose": { "rotation": { "radians": 0.5 } }, "heading": 1.0 });
        assert_eq!(resolve_number(&nested, ROTATION_FIELDS), 0.5);

        let alt = json!({ "pose": { "rotation": { "rotationRadians": 0.7 } } });
        assert_eq!(resolve_number(&alt, ROTATION_FIELDS), 0.7);

        let bare = json!({ "pose": { "rotation": 0.9 } });
        assert_eq!(resolve_number(&bare, ROTATION_FIELDS), 0.9);

        let heading = json!({ "heading": 1.2 });
        assert_eq!(resolve_number(&heading, ROTATION_FIELDS), 1.2);
    }

    #[test]
    fn test_position_sources() {
        let nested = json!({ "pose": { "translation": { "x": 1, "y": 2 } } });
        let (x, y) = resolve_position(&nested).unwrap();
        assert_eq!((parse_finite(x), parse_finite(y)), (Some(1.0), Some(2.0)));

        let flat_pose = json!({ "pose": { "x": 3, "y": 4 } });
        let (x, _) = resolve_position(&flat_pose).unwrap();
        assert_eq!(parse_finite(x), Some(3.0));

        let top = json!({ "x": 5, "y": 6 });
        let (x, _) = resolve_position(&top).unwrap();
        assert_eq!(parse_finite(x), Some(5.0));

        let position = json!({ "position": { "x": 7, "y": 8 } });
        let (_, y) = resolve_position(&position).unwrap();
        assert_eq!(parse_finite(y), Some(8.0));

        assert!(resolve_position(&json!({ "x": 1 })).is_none());
    }
}
