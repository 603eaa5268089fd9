//! Parse command: print the events found in individual result sheets

use crate::Result;
use crate::app::services::results_parser::{ParseStats, ResultsParser};
use crate::cli::args::ParseArgs;
use crate::cli::commands::shared::CommandSummary;
use crate::config::Config;
use colored::*;
use std::time::Instant;
use tracing::warn;

/// Parse each file in turn and print its listing
///
/// Unreadable files are reported and skipped; the remaining files are
/// still parsed.
pub async fn run_parse(args: &ParseArgs, config: &Config) -> Result<CommandSummary> {
    let start = Instant::now();
    let parser = match args.track.as_ref().or(config.processing.track_name.as_ref()) {
        Some(track) => ResultsParser::new().with_track_name(track.clone()),
        None => ResultsParser::new(),
    };

    let mut summary = CommandSummary::default();

    for path in &args.files {
        summary.files_processed += 1;

        let outcome = match parser.parse_file(path) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                eprintln!("{} {}", "Skipped:".bright_red(), e);
                summary.errors_encountered += 1;
                continue;
            }
        };

        match &outcome.event {
            Some(event) => {
                summary.events += 1;
                summary.rows += event.rows.len();
                println!("{}", format!("Results from file {}", event.source).bright_cyan());
                println!("{}", event.render_listing(args.listing));
            }
            None => {
                println!(
                    "{} {}",
                    "No result rows found in".bright_yellow(),
                    path.display()
                );
            }
        }

        if args.stats {
            print_stats(&outcome.stats);
        }
    }

    summary.elapsed = start.elapsed();
    Ok(summary)
}

fn print_stats(stats: &ParseStats) {
    println!("{}", "Line accounting:".bright_cyan());
    println!("   • Lines scanned: {}", stats.lines_scanned);
    println!("   • Header lines: {}", stats.header_lines);
    println!("   • Table headers: {}", stats.table_headers);
    println!("   • Rows emitted: {}", stats.rows_emitted);
    println!(
        "   • Lines skipped: {} ({:.1}% row yield)",
        stats.lines_skipped,
        stats.row_yield()
    );
    for diagnostic in &stats.diagnostics {
        println!("   {} {}", "⚠".bright_yellow(), diagnostic);
    }
    println!();
}
