//! Streakwise CLI
//!
//! Command-line interface for viewing habit streaks and statistics.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use streakwise_core::{
    date::{local_today, parse_date},
    export::{ExportFormat, Exporter},
    Settings, Snapshot, StreakStats, Tracker,
};
use tabled::{settings::Style, Table, Tabled};
use tracing::debug;

#[derive(Parser)]
#[command(name = "streakwise")]
#[command(about = "Habit streaks and adherence statistics")]
#[command(version)]
struct Cli {
    /// Snapshot file with habits and check-ins (JSON)
    #[arg(short, long, global = true, default_value = "habits.json")]
    snapshot: PathBuf,

    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Evaluate as of this date (YYYY-MM-DD) instead of the local date
    #[arg(long, global = true)]
    today: Option<String>,

    /// Override whether a skipped day breaks the streak
    #[arg(long, global = true)]
    skip_breaks_streak: Option<bool>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List habits with their current streak
    List,

    /// Show full statistics for one habit
    Stats {
        /// Habit id
        habit: String,
    },

    /// Show statistics for every habit
    Report,

    /// Export statistics to CSV or JSON
    Export {
        /// Output format (csv or json)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Tabled)]
struct HabitRow {
    #[tabled(rename = "Habit")]
    name: String,
    #[tabled(rename = "Schedule")]
    schedule: String,
    #[tabled(rename = "Streak")]
    streak: String,
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Habit")]
    name: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Longest")]
    longest: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Check-ins")]
    checkins: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("streakwise=warn".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?,
        None => Settings::load_default()?,
    };
    if let Some(flag) = cli.skip_breaks_streak {
        settings.skipped_breaks_streak = flag;
    }

    let today = match &cli.today {
        Some(raw) => parse_date(raw)?,
        None => local_today(),
    };
    debug!("Evaluating as of {}", today);

    let snapshot = Snapshot::open(&cli.snapshot)
        .with_context(|| format!("Failed to open snapshot {:?}", cli.snapshot))?;
    let tracker = Tracker::new(&snapshot, &settings);

    match cli.command {
        Commands::List => show_list(&tracker, today),
        Commands::Stats { habit } => show_stats(&snapshot, &tracker, &habit, today),
        Commands::Report => show_report(&tracker, today),
        Commands::Export { format, output } => {
            let export_format = ExportFormat::from_str(&format).unwrap_or(ExportFormat::Json);
            let reports = tracker.report(today)?;

            let writer: Box<dyn Write> = match output {
                Some(path) => Box::new(File::create(path)?),
                None => Box::new(io::stdout()),
            };

            Exporter::new(today).export(writer, &reports, export_format)?;
            Ok(())
        }
    }
}

fn format_streak(streak: u32) -> String {
    if streak == 0 {
        "-".to_string()
    } else {
        format!("🔥 {}", streak)
    }
}

fn show_list(tracker: &Tracker, today: NaiveDate) -> Result<()> {
    let summaries = tracker.summaries(today)?;

    if summaries.is_empty() {
        println!("\n{}", "No active habits in this snapshot.".yellow());
        return Ok(());
    }

    println!("\n{}", format!("📋 Habits as of {}", today).bold().cyan());
    println!("{}", "─".repeat(40));

    let rows: Vec<HabitRow> = summaries
        .into_iter()
        .map(|s| HabitRow {
            name: s.name,
            schedule: s.schedule,
            streak: format_streak(s.current_streak),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);

    Ok(())
}

fn show_stats(snapshot: &Snapshot, tracker: &Tracker, id: &str, today: NaiveDate) -> Result<()> {
    let habit = snapshot.habit(id)?;
    let stats: StreakStats = tracker.stats(id, today)?;

    println!("\n{}", format!("📊 {} Statistics", habit.name).bold().cyan());
    println!("{}", "─".repeat(40));

    let rows = vec![
        StatRow {
            metric: "Current Streak".to_string(),
            value: stats.current_streak.to_string(),
        },
        StatRow {
            metric: "Longest Streak".to_string(),
            value: stats.longest_streak.to_string(),
        },
        StatRow {
            metric: "Completion Rate".to_string(),
            value: format!("{}%", stats.completion_rate),
        },
        StatRow {
            metric: "Check-ins".to_string(),
            value: format!("{} / {}", stats.total_checkins, stats.total_expected_days),
        },
    ];

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);

    Ok(())
}

fn show_report(tracker: &Tracker, today: NaiveDate) -> Result<()> {
    let reports = tracker.report(today)?;

    if reports.is_empty() {
        println!("\n{}", "No active habits in this snapshot.".yellow());
        return Ok(());
    }

    println!("\n{}", format!("📈 Report as of {}", today).bold().cyan());
    println!("{}", "─".repeat(60));

    let rows: Vec<ReportRow> = reports
        .into_iter()
        .map(|r| ReportRow {
            name: r.name,
            current: r.stats.current_streak.to_string(),
            longest: r.stats.longest_streak.to_string(),
            rate: format!("{}%", r.stats.completion_rate),
            checkins: format!("{} / {}", r.stats.total_checkins, r.stats.total_expected_days),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);

    Ok(())
}
