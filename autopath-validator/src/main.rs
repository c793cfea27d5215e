//! AutoPath Validator - Robot Trajectory Checker
//!
//! Validates autonomous-path trajectories against robot kinematic limits.

use autopath_validator::app::cli::{Cli, Commands, ConfigAction, ConstraintArgs};
use autopath_validator::app::config::Config;
use autopath_validator::validation::constraints::{Constraints, RobotProfile};
use autopath_validator::workflow::pipeline::{PipelineOutput, TrajectoryPipeline};
use autopath_validator::workflow::report::{ReportMetadata, ValidationReport};
use autopath_validator::{normalize_file, KinematicsEstimator};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = if cli.command.reads_config() {
        Config::load_from(cli.config.as_deref())?
    } else {
        Config::default()
    };

    match cli.command {
        Commands::Validate {
            file,
            constraints,
            json,
            report,
        } => {
            run_validate(&file, &constraints, json, report.as_deref(), &config)?;
        }
        Commands::Analyze {
            file,
            constraints,
            json,
        } => {
            run_analyze(&file, &constraints, json, &config)?;
        }
        Commands::Kinematics { file, output } => {
            run_kinematics(&file, output.as_deref(), &config)?;
        }
        Commands::Profiles => {
            run_profiles(&config);
        }
        Commands::Init { force } => {
            run_init(force, cli.config.as_deref())?;
        }
        Commands::Config { action } => {
            run_config(action, &config, cli.config.as_deref())?;
        }
    }

    Ok(())
}

/// Profile constraints with CLI overrides, checked for sanity
fn resolve_constraints(args: &ConstraintArgs, config: &Config) -> anyhow::Result<Constraints> {
    let constraints = args.apply(config.resolve_constraints(args.profile.as_deref())?);
    constraints.validate()?;
    Ok(constraints)
}

fn run_pipeline(
    file: &Path,
    args: &ConstraintArgs,
    config: &Config,
) -> anyhow::Result<(Constraints, PipelineOutput)> {
    let constraints = resolve_constraints(args, config)?;
    let points = normalize_file(file)?;
    info!("Loaded {} samples from {}", points.len(), file.display());

    let output = TrajectoryPipeline::from_config(config).run_points(&points, &constraints)?;
    Ok((constraints, output))
}

fn run_validate(
    file: &Path,
    args: &ConstraintArgs,
    json: bool,
    report_path: Option<&Path>,
    config: &Config,
) -> anyhow::Result<()> {
    let (constraints, output) = run_pipeline(file, args, config)?;

    let source = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());
    let report = ValidationReport::new(
        ReportMetadata::new(source, args.profile.clone()),
        constraints,
        &output,
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report.violations)?);
    } else {
        print!("{}", report.render_text());
    }

    if let Some(path) = report_path {
        report.save(path)?;
        info!("Report saved to {}", path.display());
    }

    if report.has_errors() {
        anyhow::bail!(
            "{} error violation(s) in {}",
            report.error_count(),
            file.display()
        );
    }

    Ok(())
}

fn run_analyze(file: &Path, args: &ConstraintArgs, json: bool, config: &Config) -> anyhow::Result<()> {
    let (_, output) = run_pipeline(file, args, config)?;
    let analysis = &output.route_analysis;

    if json {
        println!("{}", serde_json::to_string_pretty(analysis)?);
        return Ok(());
    }

    match (analysis.index, &analysis.point) {
        (Some(index), Some(point)) => {
            println!(
                "First problem at point {} (t = {:.2}s, x = {:.2}, y = {:.2}) [{}]",
                index,
                point.time(),
                point.point.x,
                point.point.y,
                analysis.severity
            );
            if let Some(range) = analysis.highlight_range(output.points.len()) {
                println!("Highlight points {}..={}", range.start, range.end);
            }
            println!();
            for issue in &analysis.issues {
                match issue.limit {
                    Some(limit) => println!(
                        "  - {} ({}): {:.2} (limit {:.2})",
                        issue.name, issue.severity, issue.value, limit
                    ),
                    None => println!("  - {} ({}): {:.2}", issue.name, issue.severity, issue.value),
                }
            }
        }
        _ => println!("No problems found."),
    }

    for suggestion in &analysis.suggestions {
        println!();
        println!("{}", suggestion.title);
        println!("  {}", suggestion.description);
        for action in &suggestion.actions {
            println!("  * {}", action);
        }
    }

    Ok(())
}

fn run_kinematics(file: &Path, output: Option<&Path>, config: &Config) -> anyhow::Result<()> {
    let points = normalize_file(file)?;
    if points.len() < 2 {
        anyhow::bail!("{} has {} sample(s); at least 2 are required", file.display(), points.len());
    }

    let enriched = KinematicsEstimator::with_config(config.kinematics).enrich(&points);
    let json = serde_json::to_string_pretty(&enriched)?;

    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            info!("Wrote {} enriched samples to {}", enriched.len(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn run_profiles(config: &Config) {
    println!("Built-in profiles:");
    for profile in RobotProfile::ALL {
        print_profile(profile.key(), &profile.constraints(), Some(profile.description()));
    }

    if !config.profiles.is_empty() {
        println!();
        println!("Configured profiles:");
        for (name, constraints) in &config.profiles {
            if RobotProfile::from_key(name).is_some() {
                warn!("Configured profile '{}' shadows a built-in preset", name);
            }
            print_profile(name, constraints, None);
        }
    }
}

fn print_profile(name: &str, c: &Constraints, description: Option<&str>) {
    println!(
        "  {:<10} v {:>4.1} m/s  a {:>4.1} m/s²  j {:>5.1} m/s³  lateral {:>4.1} m/s²",
        name, c.max_velocity, c.max_acceleration, c.max_jerk, c.max_centripetal
    );
    if let Some(description) = description {
        println!("  {:<10} {}", "", description);
    }
}

fn run_init(force: bool, path: Option<&Path>) -> anyhow::Result<()> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(Config::default_path);

    if config_path.exists() && !force {
        warn!("Config already exists at {:?}", config_path);
        println!("Config already exists. Use --force to overwrite.");
        return Ok(());
    }

    let config_path = Config::write_defaults(path)?;
    info!("Created config at {:?}", config_path);
    println!("Configuration initialized at {:?}", config_path);

    Ok(())
}

fn run_config(action: ConfigAction, config: &Config, path: Option<&Path>) -> anyhow::Result<()> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(Config::default_path);

    match action {
        ConfigAction::Show => {
            println!("Configuration ({:?}):\n", config_path);
            println!("{}", config.to_toml()?);
        }
        ConfigAction::Get { key } => {
            let value = config.get_value(&key)?;
            println!("{} = {}", key, value);
        }
        ConfigAction::Set { key, value } => {
            if !config_path.exists() {
                anyhow::bail!("No config file found. Run 'autopath init' first.");
            }

            let updated = config.with_value(&key, &value)?;
            updated.save(&config_path)?;
            println!("Set {} = {}", key, updated.get_value(&key)?);
        }
        ConfigAction::Reset { force } => {
            if config_path.exists() && !force {
                println!("Config exists at {:?}", config_path);
                println!("Use --force to reset to defaults");
                return Ok(());
            }

            let config_path = Config::write_defaults(path)?;
            println!("Configuration reset to defaults at {:?}", config_path);
        }
    }

    Ok(())
}
