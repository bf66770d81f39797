use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use dialoguer::{Confirm, Input};
use std::path::PathBuf;
use std::process;

use storage_audit::audit::{AuditOptions, StorageAuditor};
use storage_audit::config::get_config;
use storage_audit::logging;
use storage_audit::report::OutputFormat;

#[derive(Parser)]
#[command(name = "storage-audit")]
#[command(about = "Reconcile last-login and disk usage logs into an inactive-account storage cost report")]
#[command(version)]
struct Cli {
    /// Last-login log file
    #[arg(long, default_value = "lastlog.txt")]
    lastlog: PathBuf,

    /// Per-user disk usage log file
    #[arg(long, default_value = "usage.txt")]
    usage: PathBuf,

    /// Directory the report and chart are written into
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Report format: csv or xlsx (prompted for when omitted)
    #[arg(long)]
    format: Option<String>,

    /// Sort the report by descending storage cost
    #[arg(long)]
    sort: bool,
}

fn main() {
    logging::init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // The two questions the tool needs answered; prompted for when not
    // given as flags.
    let (format, sort_by_cost) = match cli.format {
        Some(raw) => (raw.parse::<OutputFormat>()?, cli.sort),
        None => prompt_for_choices()?,
    };

    let auditor = StorageAuditor::new(get_config().reconcile);
    let outcome = auditor.run(&AuditOptions {
        lastlog_path: cli.lastlog,
        usage_path: cli.usage,
        output_dir: cli.out_dir,
        format,
        sort_by_cost,
    })?;

    println!(
        "{} Data has been successfully written to {}",
        "✓".green(),
        outcome.report_path.display().to_string().cyan()
    );
    println!(
        "{} Top 10 users plot has been saved as {}",
        "✓".green(),
        outcome.chart_path.display().to_string().cyan()
    );

    Ok(())
}

fn prompt_for_choices() -> Result<(OutputFormat, bool)> {
    let raw: String = Input::new()
        .with_prompt("Enter the desired output format (CSV or XLSX)")
        .interact_text()?;
    let format = raw.parse::<OutputFormat>()?;

    let sort_by_cost = Confirm::new()
        .with_prompt("Sort based on storage cost?")
        .default(false)
        .interact()?;

    Ok((format, sort_by_cost))
}
