use anyhow::Context;
use clap::Parser;
use mx_results::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result: anyhow::Result<commands::CommandSummary> = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result.context("Command failed"),
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for CTRL+C")?;
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(mx_results::Error::processing_interrupted("Processing interrupted by user").into())
            }
        }
    });

    match result {
        Ok(summary) if summary.errors_encountered > 0 && summary.events == 0 => {
            eprintln!(
                "Error: none of the {} files could be parsed",
                summary.files_processed
            );
            process::exit(1);
        }
        Ok(_) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("mx-results - AMA Motocross Result Sheet Parser");
    println!("==============================================");
    println!();
    println!("Parse text extracted from AMA motocross result PDFs into race events");
    println!("and export them as a CSV or Parquet results table.");
    println!();
    println!("USAGE:");
    println!("    mx-results <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    parse       Parse result sheets and print the events");
    println!("    export      Parse a directory of sheets and write the results table");
    println!("    show        Filter a results table and print listings");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Print the top ten of one sheet:");
    println!("    mx-results parse 2024/hangtown/450_moto1.txt --listing top10");
    println!();
    println!("    # Export every sheet under a directory as Parquet:");
    println!("    mx-results export --input ./results --output race_results.parquet");
    println!();
    println!("    # List a driver's finishes in 2024:");
    println!("    mx-results show --table race_results.csv --driver \"Jett Lawrence\" --year 2024");
    println!();
    println!("For detailed help on any command, use:");
    println!("    mx-results <COMMAND> --help");
}
