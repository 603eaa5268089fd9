//! Export command: batch parse a directory and write the results table

use crate::Result;
use crate::app::services::batch_processor::{BatchProcessor, BatchStats};
use crate::app::services::race_table::{RaceTableWriter, TableFormat, WriteSummary};
use crate::cli::args::ExportArgs;
use crate::cli::commands::shared::{CommandSummary, format_size};
use crate::config::Config;
use colored::*;
use tracing::info;

/// Parse every matching sheet under the input path and write one table
pub async fn run_export(
    args: &ExportArgs,
    config: Config,
    show_progress: bool,
) -> Result<CommandSummary> {
    args.validate()?;
    let config = apply_cli_overrides(config, args);
    config.validate()?;

    if show_progress {
        println!("{}", "Parsing motocross result sheets".bright_green().bold());
        println!("  {} {}", "Input:".bright_cyan(), args.input_path.display());
        println!("  {} {}", "Output:".bright_cyan(), config.export.output.display());
    }

    let processor = BatchProcessor::new(&config.processing)?.with_progress(show_progress);
    let outcome = processor.process_directory(&args.input_path).await?;

    let writer = RaceTableWriter::new(config.export.format)
        .with_compact(config.export.compact)
        .with_source_rewrite(config.export.source_rewrite.clone());
    let written = writer.write(&outcome.events, &config.export.output)?;
    info!(
        "Results table written: {} ({} rows, {}{})",
        written.path.display(),
        written.rows,
        writer.format(),
        if writer.is_compact() { ", compact" } else { "" }
    );

    if show_progress {
        print_summary(&outcome.stats, &written);
    }

    Ok(CommandSummary {
        files_processed: outcome.stats.files_seen,
        events: outcome.stats.events,
        rows: outcome.stats.rows,
        errors_encountered: outcome.stats.files_failed,
        elapsed: outcome.stats.elapsed,
    })
}

/// Command-line flags override the loaded configuration
///
/// Without `--format`, a `.parquet` output name selects Parquet.
pub fn apply_cli_overrides(mut config: Config, args: &ExportArgs) -> Config {
    if let Some(workers) = args.workers {
        config = config.with_workers(workers);
    }
    if let Some(pattern) = &args.pattern {
        config = config.with_file_pattern(pattern.clone());
    }
    if let Some(track) = &args.track {
        config = config.with_track_name(track.clone());
    }
    if let Some(output) = &args.output_path {
        config = config.with_output(output.clone());
    }
    if args.compact {
        config = config.with_compact();
    }

    let format = match args.format {
        Some(format) => format,
        None if args.output_path.is_some() => TableFormat::from_path(&config.export.output),
        None => config.export.format,
    };
    config.with_format(format)
}

fn print_summary(stats: &BatchStats, written: &WriteSummary) {
    println!("\n{}", "Export complete".bright_green().bold());
    println!("   • Files found: {}", stats.files_seen);
    println!("   • Events parsed: {}", stats.events.to_string().bright_white().bold());
    println!("   • Result rows: {}", stats.rows.to_string().bright_white().bold());
    println!("   • Files without results: {}", stats.files_skipped);
    println!("   • Files with results: {:.1}%", stats.success_rate());
    if stats.diagnostics > 0 {
        println!("   • Unresolved fields: {}", stats.diagnostics);
    }
    println!("   • Processing time: {:.2?}", stats.elapsed);
    println!(
        "   • Output: {} ({}, {})",
        written.path.display(),
        written.format,
        format_size(written.bytes_written)
    );
    if stats.files_failed > 0 {
        println!(
            "{} {}",
            "⚠️  Files that could not be read:".bright_yellow(),
            stats.files_failed
        );
    }
    println!();
}
