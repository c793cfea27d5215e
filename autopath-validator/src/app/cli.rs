//! Command-Line Interface

use crate::validation::constraints::Constraints;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// AutoPath Validator - Check robot trajectories against kinematic limits
#[derive(Parser, Debug)]
#[command(name = "autopath")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Constraint selection shared by commands that validate
#[derive(Args, Debug, Clone, Default)]
pub struct ConstraintArgs {
    /// Robot profile (kitbot, swerve, mecanum, tank, custom, or a configured name)
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Override max velocity (m/s)
    #[arg(long)]
    pub max_velocity: Option<f64>,

    /// Override max acceleration (m/s²)
    #[arg(long)]
    pub max_acceleration: Option<f64>,

    /// Override max jerk (m/s³, 0 = unconstrained)
    #[arg(long)]
    pub max_jerk: Option<f64>,

    /// Override max centripetal acceleration (m/s², 0 = unconstrained)
    #[arg(long)]
    pub max_centripetal: Option<f64>,
}

impl ConstraintArgs {
    /// Apply individual overrides on top of profile constraints
    pub fn apply(&self, mut constraints: Constraints) -> Constraints {
        if let Some(v) = self.max_velocity {
            constraints.max_velocity = v;
        }
        if let Some(a) = self.max_acceleration {
            constraints.max_acceleration = a;
        }
        if let Some(j) = self.max_jerk {
            constraints.max_jerk = j;
        }
        if let Some(c) = self.max_centripetal {
            constraints.max_centripetal = c;
        }
        constraints
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a trajectory against constraints
    Validate {
        /// Trajectory JSON file
        file: PathBuf,

        #[command(flatten)]
        constraints: ConstraintArgs,

        /// Print violations as JSON
        #[arg(long)]
        json: bool,

        /// Save a full report to this path
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Locate the first problematic point and suggest fixes
    Analyze {
        /// Trajectory JSON file
        file: PathBuf,

        #[command(flatten)]
        constraints: ConstraintArgs,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export the enriched trajectory (derived acceleration, jerk, angular velocity)
    Kinematics {
        /// Trajectory JSON file
        file: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List robot profiles
    Profiles,

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "constraints.max_velocity", "kinematics.jerk_window")
        key: String,

        /// Value to set
        value: String,
    },

    /// Get a specific configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Commands {
    /// Whether the command needs the existing config file.
    ///
    /// `init` and `config reset` only write defaults, so they must work even
    /// when the file is missing or invalid.
    pub fn reads_config(&self) -> bool {
        !matches!(
            self,
            Commands::Init { .. } | Commands::Config { action: ConfigAction::Reset { .. } }
        )
    }
}
