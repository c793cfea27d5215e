//! Kinematic constraints and robot profiles

use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical limits a trajectory is validated against.
///
/// Velocity and acceleration limits must be positive. A jerk or centripetal
/// limit of 0 means that quantity is unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    /// Maximum speed (m/s)
    #[serde(alias = "maxVelocity")]
    pub max_velocity: f64,
    /// Maximum acceleration magnitude (m/s²)
    #[serde(alias = "maxAcceleration")]
    pub max_acceleration: f64,
    /// Maximum jerk magnitude (m/s³), 0 = unconstrained
    #[serde(alias = "maxJerk", default)]
    pub max_jerk: f64,
    /// Maximum lateral acceleration in turns (m/s²), 0 = unconstrained
    #[serde(alias = "maxCentripetal", default)]
    pub max_centripetal: f64,
}

impl Constraints {
    pub fn new(max_velocity: f64, max_acceleration: f64, max_jerk: f64, max_centripetal: f64) -> Self {
        Self {
            max_velocity,
            max_acceleration,
            max_jerk,
            max_centripetal,
        }
    }

    pub fn jerk_limited(&self) -> bool {
        self.max_jerk > 0.0
    }

    pub fn centripetal_limited(&self) -> bool {
        self.max_centripetal > 0.0
    }

    /// Check the limits are meaningful
    pub fn validate(&self) -> Result<(), crate::Error> {
        if !(self.max_velocity > 0.0 && self.max_velocity.is_finite()) {
            return Err(crate::Error::Config(format!(
                "max_velocity must be > 0, got {}",
                self.max_velocity
            )));
        }
        if !(self.max_acceleration > 0.0 && self.max_acceleration.is_finite()) {
            return Err(crate::Error::Config(format!(
                "max_acceleration must be > 0, got {}",
                self.max_acceleration
            )));
        }
        if !(self.max_jerk >= 0.0 && self.max_jerk.is_finite()) {
            return Err(crate::Error::Config(format!(
                "max_jerk must be >= 0, got {}",
                self.max_jerk
            )));
        }
        if !(self.max_centripetal >= 0.0 && self.max_centripetal.is_finite()) {
            return Err(crate::Error::Config(format!(
                "max_centripetal must be >= 0, got {}",
                self.max_centripetal
            )));
        }
        Ok(())
    }
}

impl Default for Constraints {
    fn default() -> Self {
        RobotProfile::Custom.constraints()
    }
}

/// Preset constraint profiles for common drivetrains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RobotProfile {
    KitBot,
    Swerve,
    Mecanum,
    Tank,
    Custom,
}

impl RobotProfile {
    pub const ALL: [RobotProfile; 5] = [
        RobotProfile::KitBot,
        RobotProfile::Swerve,
        RobotProfile::Mecanum,
        RobotProfile::Tank,
        RobotProfile::Custom,
    ];

    /// Lookup key
    pub fn key(&self) -> &'static str {
        match self {
            Self::KitBot => "kitbot",
            Self::Swerve => "swerve",
            Self::Mecanum => "mecanum",
            Self::Tank => "tank",
            Self::Custom => "custom",
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::KitBot => "KitBot / Everybot",
            Self::Swerve => "Swerve Drive",
            Self::Mecanum => "Mecanum Drive",
            Self::Tank => "Tank Drive",
            Self::Custom => "Custom",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::KitBot => "Standard kit chassis, conservative acceleration",
            Self::Swerve => "High-performance swerve drive",
            Self::Mecanum => "Omnidirectional mecanum wheels, lower traction",
            Self::Tank => "Standard tank drive configuration",
            Self::Custom => "User-defined constraints",
        }
    }

    pub fn constraints(&self) -> Constraints {
        match self {
            // ~12.5 ft/s
            Self::KitBot => Constraints::new(3.8, 2.5, 10.0, 2.5),
            // ~15 ft/s
            Self::Swerve => Constraints::new(4.5, 3.0, 12.0, 3.0),
            // wheel slip lowers usable acceleration and lateral grip
            Self::Mecanum => Constraints::new(3.5, 2.0, 8.0, 1.5),
            Self::Tank => Constraints::new(3.5, 2.2, 9.0, 2.2),
            Self::Custom => Constraints::new(3.8, 2.5, 10.0, 2.5),
        }
    }

    /// Case-insensitive lookup by key
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|p| p.key() == key)
    }

    /// Lookup falling back to [`RobotProfile::Custom`]
    pub fn from_key_or_custom(key: &str) -> Self {
        Self::from_key(key).unwrap_or(Self::Custom)
    }
}

impl fmt::Display for RobotProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
