//! Coarse field-zone descriptions
//!
//! Reports name a qualitative zone ("start zone (bottom)") instead of raw
//! coordinates.

use serde::{Deserialize, Serialize};

/// Standard FRC field length (m)
pub const FRC_FIELD_WIDTH: f64 = 16.54;

/// Standard FRC field width (m)
pub const FRC_FIELD_HEIGHT: f64 = 8.21;

/// Playing field size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldDimensions {
    /// Extent along x (m)
    pub width: f64,
    /// Extent along y (m)
    pub height: f64,
}

impl FieldDimensions {
    /// Zone thresholds scaled to this field
    pub fn zones(&self) -> FieldZones {
        let defaults = FieldZones::default();
        let sx = self.width / FRC_FIELD_WIDTH;
        let sy = self.height / FRC_FIELD_HEIGHT;
        FieldZones {
            start_x: defaults.start_x * sx,
            target_x: defaults.target_x * sx,
            bottom_y: defaults.bottom_y * sy,
            top_y: defaults.top_y * sy,
        }
    }
}

impl Default for FieldDimensions {
    fn default() -> Self {
        Self {
            width: FRC_FIELD_WIDTH,
            height: FRC_FIELD_HEIGHT,
        }
    }
}

/// Thresholds binning a position into a named zone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldZones {
    /// x below this is the start zone
    pub start_x: f64,
    /// x above this is the target zone
    pub target_x: f64,
    /// y below this is the bottom
    pub bottom_y: f64,
    /// y above this is the top
    pub top_y: f64,
}

impl Default for FieldZones {
    fn default() -> Self {
        Self {
            start_x: 5.5,
            target_x: 11.0,
            bottom_y: 2.7,
            top_y: 5.5,
        }
    }
}

impl FieldZones {
    pub fn x_zone(&self, x: f64) -> &'static str {
        if x < self.start_x {
            "start zone"
        } else if x > self.target_x {
            "target zone"
        } else {
            "mid-field"
        }
    }

    pub fn y_zone(&self, y: f64) -> &'static str {
        if y < self.bottom_y {
            "bottom"
        } else if y > self.top_y {
            "top"
        } else {
            "center"
        }
    }

    /// e.g. `"mid-field (top)"`
    pub fn describe(&self, x: f64, y: f64) -> String {
        format!("{} ({})", self.x_zone(x), self.y_zone(y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_default_zones() {
        let zones = FieldZones::default();
        assert_eq!(zones.describe(1.0, 1.0), "start zone (bottom)");
        assert_eq!(zones.describe(8.0, 4.0), "mid-field (center)");
        assert_eq!(zones.describe(12.0, 7.0), "target zone (top)");
    }

    #[test]
    fn test_boundaries_are_mid() {
        let zones = FieldZones::default();
        assert_eq!(zones.x_zone(5.5), "mid-field");
        assert_eq!(zones.x_zone(11.0), "mid-field");
        assert_eq!(zones.y_zone(2.7), "center");
        assert_eq!(zones.y_zone(5.5), "center");
    }

    #[test]
    fn test_default_field_reproduces_default_zones() {
        assert_eq!(FieldDimensions::default().zones(), FieldZones::default());
    }

    #[test]
    fn test_zones_scale_with_field() {
        let half = FieldDimensions {
            width: FRC_FIELD_WIDTH / 2.0,
            height: FRC_FIELD_HEIGHT / 2.0,
        };
        let zones = half.zones();
        assert!((zones.start_x - 2.75).abs() < 1e-9);
        assert!((zones.top_y - 2.75).abs() < 1e-9);
        assert_eq!(zones.describe(3.0, 0.5), "mid-field (bottom)");
    }
}
