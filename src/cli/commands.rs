use crate::dispatcher::Dispatcher;
use crate::error::DispatchResult;
use crate::excel::CalamineSource;
use crate::processor::ToolProcessor;
use crate::report::{write_report, ReportFormat};
use crate::types::{CollisionPolicy, DispatchConfig, RunSummary, SheetOutcome, SheetStatus};
use colored::Colorize;
use std::path::PathBuf;

/// Format a duration for the summary table
fn format_duration(ms: u64) -> String {
    if ms < 1_000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1_000.0)
    } else {
        format!("{}m{:02}s", ms / 60_000, (ms % 60_000) / 1_000)
    }
}

/// Render the tool command line the way a user would type it
fn format_tool(config: &DispatchConfig) -> String {
    let mut parts = vec![config.tool.program.clone()];
    parts.extend(config.tool.args.iter().cloned());
    if config.zip {
        parts.push("... --zip".to_string());
    }
    parts.join(" ")
}

fn status_cell(status: &SheetStatus) -> String {
    match status {
        SheetStatus::Succeeded => format!("✅ {}", status.label()).green().to_string(),
        SheetStatus::Planned => format!("📋 {}", status.label()).cyan().to_string(),
        _ => format!("❌ {}", status.label()).red().to_string(),
    }
}

fn print_outcome(outcome: &SheetOutcome) {
    println!(
        "   {:>3}  {:<28} {:<48} {:>8}  {}",
        outcome.job.index + 1,
        outcome.job.sheet.bright_blue(),
        outcome.job.output.display(),
        format_duration(outcome.duration_ms),
        status_cell(&outcome.status)
    );
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("{}", "📊 Summary".bold());
    println!("   {}", "─".repeat(100));
    for outcome in &summary.outcomes {
        print_outcome(outcome);
    }
    println!("   {}", "─".repeat(100));

    if summary.dry_run {
        println!(
            "{}",
            format!(
                "📋 Dry run: {} worksheet(s) planned, nothing executed",
                summary.outcomes.len()
            )
            .yellow()
        );
    } else if summary.is_success() {
        println!(
            "{}",
            format!(
                "✅ All {} worksheet(s) reclassified",
                summary.succeeded()
            )
            .bold()
            .green()
        );
    } else {
        println!(
            "{}",
            format!(
                "❌ {} of {} worksheet(s) failed",
                summary.failed(),
                summary.outcomes.len()
            )
            .bold()
            .red()
        );
        for failure in summary.failures() {
            println!(
                "   • {} → {}",
                failure.job.sheet.bright_blue(),
                failure.status.label()
            );
        }
    }
}

/// Execute the dispatch command
///
/// Returns the run summary even when sheets failed; the caller decides the
/// exit code. Only input-level problems come back as `Err`.
pub fn dispatch(config: DispatchConfig, report: Option<PathBuf>) -> DispatchResult<RunSummary> {
    println!("{}", "🗂️  Inventory Reclass - Dispatching worksheets".bold().green());
    println!("   Input:      {}", config.input.display());
    println!("   Output dir: {}", config.output_dir.display());
    println!("   Version:    {}", config.version);
    println!("   Tool:       {}", format_tool(&config));
    if config.collision == CollisionPolicy::Suffix {
        println!("   Collisions: {}", "suffix".bright_yellow());
    }
    println!();

    // Fail on a bad report path before spending time on the tool
    if let Some(ref path) = report {
        ReportFormat::from_path(path)?;
    }

    if config.dry_run {
        println!(
            "{}",
            "📋 DRY RUN MODE - The tool will not be invoked\n".yellow()
        );
    }

    let processor = ToolProcessor::new(config.tool.clone()).with_zip(config.zip);
    let mut dispatcher = Dispatcher::new(config, CalamineSource, processor);
    let summary = dispatcher.run()?;

    print_summary(&summary);

    if let Some(path) = report {
        write_report(&path, &summary)?;
        println!("   Report: {}\n", path.display());
    }

    Ok(summary)
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
