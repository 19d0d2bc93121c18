//! Main CLI application for the impossible puzzle simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use impossible_puzzle::{
    config::{CliOverrides, OutputFormat, Settings, MAX_RANGE_WIDTH},
    puzzle::{CandidateSet, Dialogue},
    simulation::{Outcome, RangeSpec, Simulator, Summary},
    utils::{ColorOutput, OutcomeFormatter, SimulationProgress, Tone},
};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "impossible_puzzle")]
#[command(about = "Impossible Puzzle Simulator")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every pair of a range by the round it gets resolved in
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// First value of the range (overrides config)
        #[arg(short, long, allow_negative_numbers = true)]
        start: Option<i64>,

        /// End of the range, exclusive (overrides config)
        #[arg(short, long, allow_negative_numbers = true)]
        end: Option<i64>,

        /// Only consider pairs of two different values
        #[arg(long)]
        distinct: bool,

        /// Simulate pairs in parallel
        #[arg(long)]
        parallel: bool,

        /// Show the round-count grid
        #[arg(long)]
        grid: bool,

        /// Directory results are saved to (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Format of saved results (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Replay a script of answers and show the pairs still possible
    Ask {
        /// First value of the range
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        start: i64,

        /// End of the range, exclusive
        #[arg(short, long, default_value_t = 10, allow_negative_numbers = true)]
        end: i64,

        /// Only consider pairs of two different values
        #[arg(long)]
        distinct: bool,

        /// Statements such as `pete:no susan:no pete:yes`
        #[arg(required = true)]
        statements: Vec<String>,
    },

    /// Create an example configuration file
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config, start, end, distinct, parallel, grid, output, format, verbose
        } => {
            let overrides = CliOverrides {
                start,
                end,
                distinct,
                parallel,
                show_grid: grid,
                format,
                output_dir: output,
            };
            run_command(config, overrides, verbose)
        }
        Commands::Ask { start, end, distinct, statements } => {
            ask_command(start, end, !distinct, &statements)
        }
        Commands::Setup { directory, force } => {
            setup_command(directory, force)
        }
    }
}

fn load_settings(config_path: &Path) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!("{}", ColorOutput::paint(&format!(
            "Config file {} not found, using defaults", config_path.display()
        ), Tone::Warning));
        Ok(Settings::default())
    }
}

fn run_command(
    config_path: PathBuf,
    overrides: CliOverrides,
    verbose: bool,
) -> Result<()> {
    println!("{}", ColorOutput::paint("🔄 Starting Impossible Puzzle Simulator", Tone::Info));

    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);

    if verbose {
        println!("Configuration:");
        println!("  Range: [{}, {})", settings.range.start, settings.range.end);
        println!("  Equal pairs: {}", settings.range.allow_equal);
        println!("  Parallel: {}", settings.simulation.parallel);
        println!("  Output dir: {}", settings.output.output_directory.display());
        println!();
    }

    settings.validate()
        .context("Configuration validation failed")?;

    let simulator = Simulator::from_settings(&settings)
        .context("Failed to seed candidate set")?;

    let start_time = Instant::now();
    let (outcomes, summary) = if settings.simulation.parallel {
        let outcomes: Vec<Outcome> = simulator.run_parallel();
        let summary = Summary::from_outcomes(&outcomes);
        (outcomes, summary)
    } else {
        let mut progress = SimulationProgress::new(simulator.pair_count(), verbose);
        let mut outcomes = Vec::with_capacity(simulator.pair_count());
        for outcome in simulator.outcomes() {
            progress.record(&outcome);
            outcomes.push(outcome);
        }
        (outcomes, progress.finish())
    };
    let total_time = start_time.elapsed();

    println!("{}", ColorOutput::paint(&format!(
        "✅ Simulated {} pair(s) in {:.3}s",
        outcomes.len(),
        total_time.as_secs_f64()
    ), Tone::Success));

    println!();
    for outcome in &outcomes {
        println!("{}: {}", outcome.pair, ColorOutput::classification(outcome.classification));
    }

    println!("\n{}", OutcomeFormatter::format_summary(&summary));

    if settings.output.show_grid {
        println!("{}", ColorOutput::paint("Resolution rounds:", Tone::Info));
        println!("{}", OutcomeFormatter::format_round_grid(&outcomes));
    }

    println!("{}", ColorOutput::paint("💾 Saving outcomes...", Tone::Info));
    OutcomeFormatter::save_outcomes(
        &outcomes,
        &settings.output.output_directory,
        settings.output.format,
    )
    .context("Failed to save outcomes")?;

    println!("{}", ColorOutput::paint(&format!(
        "Outcomes saved to {}",
        settings.output.output_directory.display()
    ), Tone::Success));

    Ok(())
}

fn ask_command(start: i64, end: i64, allow_equal: bool, statements: &[String]) -> Result<()> {
    let dialogue = Dialogue::parse(statements)
        .context("Failed to parse statements")?;

    let width = RangeSpec::new(start, end, allow_equal).width();
    if width > MAX_RANGE_WIDTH {
        anyhow::bail!("Range [{}, {}) has {} values, at most {} are supported", start, end, width, MAX_RANGE_WIDTH);
    }

    let mut candidates = CandidateSet::from_range(start, end, allow_equal)
        .context("Failed to seed candidate set")?;

    println!("{}", ColorOutput::paint(&format!(
        "🔍 {} candidate pair(s) in [{}, {})", candidates.len(), start, end
    ), Tone::Info));

    for statement in dialogue.statements() {
        let next = statement.apply(&candidates);
        println!("  {:10} {:5} -> {}", statement.to_string(), candidates.len(), next.len());
        candidates = next;
    }

    println!();
    if candidates.is_empty() {
        println!("{}", ColorOutput::paint("❌ No pair is consistent with these answers", Tone::Warning));
    } else {
        println!("{}", ColorOutput::paint(&OutcomeFormatter::format_candidates(&candidates), Tone::Success));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::paint("🛠️  Setting up configuration...", Tone::Info));

    let config_dir = directory.join("config");
    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create directory {}", config_dir.display()))?;

    // Create default configuration
    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default().to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    // Create example configuration variants
    let examples_dir = config_dir.join("examples");

    let mut distinct_config = Settings::default();
    distinct_config.range.end = 20;
    distinct_config.range.allow_equal = false;
    distinct_config.output.show_grid = true;
    distinct_config.to_file(&examples_dir.join("distinct.yaml"))?;

    let mut wide_config = Settings::default();
    wide_config.range.end = 100;
    wide_config.simulation.parallel = true;
    wide_config.output.format = OutputFormat::Json;
    wide_config.to_file(&examples_dir.join("wide.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::paint("✅ Setup complete!", Tone::Success));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- run --config config/default.yaml");

    Ok(())
}
