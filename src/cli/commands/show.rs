//! Show command: filter an exported results table and print listings

use crate::Result;
use crate::app::models::ExportRecord;
use crate::app::services::race_table::{ResultQuery, load_events};
use crate::cli::args::ShowArgs;
use crate::cli::commands::shared::CommandSummary;
use colored::*;
use std::time::Instant;

/// Build the query from the command-line filters
pub fn build_query(args: &ShowArgs) -> ResultQuery {
    ResultQuery {
        driver: args.driver.clone(),
        track: args.track.clone(),
        year: args.year,
        class_name: args.class_name.clone(),
    }
}

/// Print listings of the events that match the filters
///
/// With a driver filter, the driver's own finishes are printed first.
pub async fn run_show(args: &ShowArgs) -> Result<CommandSummary> {
    let start = Instant::now();
    let events = load_events(&args.table)?;
    let query = build_query(args);

    if query.driver.is_some() {
        let records: Vec<ExportRecord> = events.iter().flat_map(|e| e.export_records()).collect();
        let finishes = query.apply(&records);
        print_finishes(&finishes);
    }

    let selected = query.select_events(&events);
    if selected.is_empty() {
        println!("{}", "No events match the given filters".bright_yellow());
    }
    for event in &selected {
        println!("{}", format!("Results from file {}", event.source).bright_cyan());
        println!("{}", event.render_listing(args.listing));
    }

    Ok(CommandSummary {
        files_processed: 1,
        events: selected.len(),
        rows: selected.iter().map(|e| e.rows.len()).sum(),
        errors_encountered: 0,
        elapsed: start.elapsed(),
    })
}

fn print_finishes(finishes: &[ExportRecord]) {
    let Some(first) = finishes.first() else {
        println!("{}", "Driver not found in the results table".bright_yellow());
        return;
    };

    println!("{} {}", "Finishes of".bright_green().bold(), first.driver_name.bold());
    for finish in finishes {
        let event = group_label(finish);
        println!("   • P{} at {}", finish.position, event);
    }
    println!();
}

fn group_label(record: &ExportRecord) -> String {
    let parts: Vec<&str> = [
        record.track_name.as_deref(),
        record.date.as_deref(),
        record.class_name.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        record.source.clone()
    } else {
        parts.join(" - ")
    }
}
