//! Configuration Management

use crate::kinematics::estimator::SmoothingConfig;
use crate::validation::constraints::{Constraints, RobotProfile};
use crate::validation::location::FieldDimensions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Limits used when no profile is selected
    pub constraints: Constraints,
    /// Smoothing windows for derived channels
    pub kinematics: SmoothingConfig,
    /// Playing field size
    pub field: FieldDimensions,
    /// User-defined constraint profiles, by name
    pub profiles: BTreeMap<String, Constraints>,
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.constraints.validate()?;
        self.kinematics.validate()?;

        if !(self.field.width > 0.0 && self.field.height > 0.0) {
            return Err(crate::Error::Config(format!(
                "field dimensions must be > 0, got {} x {}",
                self.field.width, self.field.height
            )));
        }

        for (name, constraints) in &self.profiles {
            constraints
                .validate()
                .map_err(|e| crate::Error::Config(format!("profile '{}': {}", name, e)))?;
        }
        Ok(())
    }

    /// Constraints for a profile name.
    ///
    /// User-defined profiles shadow built-in presets; no name selects
    /// `[constraints]`. Unknown names are an error.
    pub fn resolve_constraints(&self, profile: Option<&str>) -> Result<Constraints, crate::Error> {
        let Some(name) = profile else {
            return Ok(self.constraints);
        };

        if let Some(custom) = self.profiles.get(name) {
            return Ok(*custom);
        }

        RobotProfile::from_key(name)
            .map(|p| p.constraints())
            .ok_or_else(|| crate::Error::Config(format!("unknown profile '{}'", name)))
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load from an explicit path, or from the default location when none is given.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load_from(path: Option<&Path>) -> Result<Self, crate::Error> {
        match path {
            Some(path) => Self::load(&path.to_path_buf()),
            None => Self::load_default(),
        }
    }

    /// Write defaults to `path` (or the default location) without reading
    /// what is already there, so a broken file can be replaced.
    pub fn write_defaults(path: Option<&Path>) -> Result<PathBuf, crate::Error> {
        let defaults = Self::default();
        match path {
            Some(path) => {
                let path = path.to_path_buf();
                defaults.save(&path)?;
                Ok(path)
            }
            None => {
                defaults.save_default()?;
                Ok(Self::default_path())
            }
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content = self.to_toml()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save to default location
    pub fn save_default(&self) -> Result<(), crate::Error> {
        self.save(&Self::default_path())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".autopath").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Look up a value by dotted key, e.g. `constraints.max_velocity`
    pub fn get_value(&self, key: &str) -> Result<toml::Value, crate::Error> {
        let root = toml::Value::try_from(self).map_err(|e| crate::Error::Config(e.to_string()))?;

        key.split('.')
            .try_fold(&root, |node, part| node.get(part))
            .cloned()
            .ok_or_else(|| crate::Error::Config(format!("configuration key '{}' not found", key)))
    }

    /// Return a copy with one dotted key set.
    ///
    /// `value` is read as a TOML literal (number, boolean) and falls back to a
    /// plain string. The result is validated before it is returned.
    pub fn with_value(&self, key: &str, value: &str) -> Result<Self, crate::Error> {
        let mut root = toml::Value::try_from(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        let parts: Vec<&str> = key.split('.').collect();
        let (leaf, sections) = parts
            .split_last()
            .ok_or_else(|| crate::Error::Config("empty configuration key".to_string()))?;

        let mut node = &mut root;
        for section in sections {
            let table = node
                .as_table_mut()
                .ok_or_else(|| crate::Error::Config(format!("'{}' is not a section", section)))?;
            // profiles.<name>.<field> may introduce a new profile
            node = table
                .entry(section.to_string())
                .or_insert(toml::Value::Table(toml::map::Map::new()));
        }

        let table = node
            .as_table_mut()
            .ok_or_else(|| crate::Error::Config(format!("configuration key '{}' not found", key)))?;
        table.insert(leaf.to_string(), parse_literal(value));

        let updated: Config = root
            .try_into()
            .map_err(|e: toml::de::Error| crate::Error::Config(format!("invalid value for '{}': {}", key, e)))?;
        updated.validate()?;
        Ok(updated)
    }
}

/// Read a CLI string as the TOML scalar it looks like
fn parse_literal(value: &str) -> toml::Value {
    if let Ok(i) = value.parse::<i64>() {
        return toml::Value::Integer(i);
    }
    if let Ok(f) = value.parse::<f64>() {
        return toml::Value::Float(f);
    }
    if let Ok(b) = value.parse::<bool>() {
        return toml::Value::Boolean(b);
    }
    toml::Value::String(value.to_string())
}
