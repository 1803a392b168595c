use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;
use tabled::{settings::Style, Table, Tabled};

use steptracker::batch::BatchReport;
use steptracker::export::{self, ExportFormat};
use steptracker::logging::{self, LogFormat};
use steptracker::{AppConfig, ErrorSeverity, PersonProfile, TrackerError, ValidationError};

/// steptracker - distance and calorie reports for walking and running
///
/// Records are comma-separated: `<steps>,<activity>,<duration>` for a
/// training and `<steps>,<duration>` for a pedometer day.
#[derive(Parser)]
#[command(name = "steptracker")]
#[command(version)]
#[command(about = "Distance and calorie reports for walking and running", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of log output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log format (pretty, json, compact)
    #[arg(long, value_name = "FORMAT", global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

/// Body measurements, falling back to the configured profile
#[derive(Args)]
struct ProfileArgs {
    /// Weight in kilograms
    #[arg(short, long)]
    weight: Option<f64>,

    /// Height in meters
    #[arg(long)]
    height: Option<f64>,
}

impl ProfileArgs {
    fn resolve(&self, defaults: &PersonProfile) -> Result<PersonProfile, ValidationError> {
        PersonProfile::new(
            self.weight.unwrap_or(defaults.weight_kg),
            self.height.unwrap_or(defaults.height_m),
        )
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Report a training record, e.g. "3456,Running,3h00m"
    Training {
        /// Record in the form <steps>,<activity>,<duration>
        record: String,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report a pedometer record, e.g. "6000,1h"
    Day {
        /// Record in the form <steps>,<duration>
        record: String,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report every training record in a file, one per line
    Batch {
        /// Input file path
        #[arg(short, long)]
        input: PathBuf,

        /// Export results to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format (csv, json), inferred from the output file when omitted
        #[arg(short = 'f', long)]
        format: Option<ExportFormat>,

        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Show or create the configuration file
    Config {
        /// Print the effective configuration as TOML
        #[arg(long, conflicts_with = "init")]
        show: bool,

        /// Write a default configuration file
        #[arg(long)]
        init: bool,

        /// Overwrite an existing file with --init
        #[arg(long)]
        force: bool,
    },
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Line")]
    line: usize,
    #[tabled(rename = "Activity")]
    activity: String,
    #[tabled(rename = "Steps")]
    steps: i64,
    #[tabled(rename = "Hours")]
    hours: String,
    #[tabled(rename = "Distance (km)")]
    distance: String,
    #[tabled(rename = "Speed (km/h)")]
    speed: String,
    #[tabled(rename = "Calories")]
    calories: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<TrackerError>() {
                Some(tracker_err) => {
                    let severity = tracker_err.severity();
                    let label = match severity {
                        ErrorSeverity::Warning => severity.label().yellow().bold(),
                        _ => severity.label().red().bold(),
                    };
                    eprintln!("{} {}", label, tracker_err.user_message());
                }
                None => eprintln!("{} {:#}", "error:".red().bold(), err),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load_or_default(cli.config.as_deref());

    let mut log_config = config.logging.clone().with_verbosity(cli.verbose);
    if let Some(format) = cli.log_format {
        log_config.format = format;
    }
    logging::init_logging(&log_config)?;

    match cli.command {
        Commands::Training {
            record,
            profile,
            json,
        } => {
            let profile = profile.resolve(&config.profile).map_err(TrackerError::from)?;
            let summary = steptracker::training_summary_for(&record, &profile)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", summary);
            }
        }

        Commands::Day {
            record,
            profile,
            json,
        } => {
            let profile = profile.resolve(&config.profile).map_err(TrackerError::from)?;
            let summary = steptracker::day_summary(&record, profile.weight_kg, profile.height_m)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", summary);
            }
        }

        Commands::Batch {
            input,
            output,
            format,
            profile,
        } => {
            let profile = profile.resolve(&config.profile).map_err(TrackerError::from)?;
            let report = steptracker::process_file(&input, &profile)?;
            print_batch(&report);

            if let Some(output) = output {
                let format = format
                    .or_else(|| ExportFormat::from_path(&output))
                    .unwrap_or(config.output.default_export);
                export::export_training_summaries(&report.summaries(), &output, format)
                    .map_err(TrackerError::from)?;
                println!(
                    "{}",
                    format!("✓ Exported {} rows to {}", report.entries.len(), output.display())
                        .green()
                );
            }
        }

        Commands::Config { show, init, force } => {
            let path = cli
                .config
                .clone()
                .unwrap_or_else(AppConfig::default_config_path);

            if init {
                if path.exists() && !force {
                    bail!(
                        "{} already exists, pass --force to overwrite it",
                        path.display()
                    );
                }
                AppConfig::default().save_to_file(&path)?;
                println!("{}", format!("✓ Wrote {}", path.display()).green());
            } else if show {
                println!("{}", format!("# {}", path.display()).dimmed());
                let content = toml::to_string_pretty(&config)
                    .context("Failed to serialize configuration")?;
                print!("{}", content);
            } else {
                let state = if path.exists() { "" } else { " (not created yet)" };
                println!("{}{}", path.display(), state.dimmed());
            }
        }
    }

    Ok(())
}

fn print_batch(report: &BatchReport) {
    if report.entries.is_empty() {
        println!("{}", "No records could be summarized".yellow());
    } else {
        let rows: Vec<SummaryRow> = report
            .entries
            .iter()
            .map(|entry| SummaryRow {
                line: entry.line,
                activity: entry.summary.activity.to_string(),
                steps: entry.summary.steps,
                hours: format!("{:.2}", entry.summary.duration_hours),
                distance: format!("{:.2}", entry.summary.distance_km),
                speed: format!("{:.2}", entry.summary.speed_kmh),
                calories: format!("{:.2}", entry.summary.calories),
            })
            .collect();

        println!("{}", Table::new(rows).with(Style::rounded()));
        println!(
            "{} {:.2}",
            "Total calories:".bold(),
            report.total_calories()
        );
    }

    for failure in &report.failures {
        eprintln!(
            "{} line {}: {} ({})",
            "skipped".yellow().bold(),
            failure.line,
            failure.record,
            failure.error.user_message()
        );
    }
}
