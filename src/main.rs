use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

mod back_to_back;
mod calendar;
mod error;
mod models;
mod report;
mod roster;
mod schedule;
mod weekly;

use roster::TeamRoster;

const RAW_CSV: &str = "data/weekly_games.csv";
const PROCESSED_CSV: &str = "data/processed_weekly_games.csv";

#[derive(Parser)]
#[command(name = "nba-weekly-schedule")]
#[command(about = "Weekly games and back-to-backs per NBA team", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the weekly summary table from raw game rows
    Process {
        #[arg(long, default_value = RAW_CSV)]
        input: PathBuf,
        #[arg(long, default_value = PROCESSED_CSV)]
        output: PathBuf,
    },
    /// Show every team's games for one ISO week
    Week {
        #[arg(long)]
        week: u32,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long, default_value = PROCESSED_CSV)]
        input: PathBuf,
        /// Output format: table, json or csv
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// List the ISO weeks present in the summary table
    Weeks {
        #[arg(long, default_value = PROCESSED_CSV)]
        input: PathBuf,
    },
    /// Generate a markdown report for one ISO week
    Report {
        #[arg(long)]
        week: u32,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long, default_value = PROCESSED_CSV)]
        input: PathBuf,
        #[arg(long, default_value = "week-report.md")]
        out: PathBuf,
    },
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use table, json, or csv.", s)),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let roster = TeamRoster::nba();

    match cli.command {
        Commands::Process { input, output } => {
            let loaded = schedule::load_games(&input)?;
            let loaded_count = loaded.games.len();
            let summaries = weekly::process_schedule(loaded.games, &roster);
            schedule::save_summaries(&output, &summaries)?;

            println!(
                "Processed {loaded_count} game rows ({} skipped) into {} weekly rows.",
                loaded.skipped,
                summaries.len()
            );
            if !summaries.is_empty() {
                print!("{}", report::render_table(&summaries[..summaries.len().min(5)]));
            }
        }
        Commands::Week {
            week,
            year,
            input,
            format,
        } => {
            let summaries = schedule::load_summaries(&input)?;
            let rows = report::select_week(&summaries, week, year);

            if rows.is_empty() {
                println!("No games found for week {week}.");
                return Ok(());
            }

            match format {
                OutputFormat::Table => print!("{}", report::render_table(&rows)),
                OutputFormat::Json => println!(
                    "{}",
                    report::render_json(&rows).context("failed to encode week as JSON")?
                ),
                OutputFormat::Csv => print!("{}", report::render_csv(&rows)?),
            }
        }
        Commands::Weeks { input } => {
            let summaries = schedule::load_summaries(&input)?;
            let totals = report::week_totals(&summaries);

            if totals.is_empty() {
                println!("No weeks found in {}.", input.display());
                return Ok(());
            }

            for total in &totals {
                println!(
                    "- {}: {} games across {} teams, {} back-to-backs",
                    total.week,
                    total.games_played,
                    total.team_count,
                    total.back_to_backs
                );
            }
        }
        Commands::Report {
            week,
            year,
            input,
            out,
        } => {
            let summaries = schedule::load_summaries(&input)?;
            let rows = report::select_week(&summaries, week, year);
            let report = report::build_report(week, year, &rows, &roster);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
