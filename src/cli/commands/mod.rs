//! Command implementations for the results parser CLI
//!
//! Each subcommand lives in its own module:
//! - `parse`: parse sheets and print events
//! - `export`: batch parse a directory and write the results table
//! - `show`: filter a results table and print listings

pub mod export;
pub mod parse;
pub mod shared;
pub mod show;

pub use shared::CommandSummary;

use crate::Result;
use crate::cli::args::{Args, Commands};
use tracing::debug;

/// Main command runner
///
/// Loads the layered configuration, initializes logging and dispatches to
/// the subcommand handler.
pub async fn run(args: Args) -> Result<CommandSummary> {
    let config = shared::load_configuration(&args)?;
    shared::setup_logging(&args.get_log_level(&config.logging.level), args.quiet)?;
    debug!("Effective configuration: {:?}", config);

    match &args.command {
        Some(Commands::Parse(parse_args)) => parse::run_parse(parse_args, &config).await,
        Some(Commands::Export(export_args)) => {
            export::run_export(export_args, config, args.show_progress()).await
        }
        Some(Commands::Show(show_args)) => show::run_show(show_args).await,
        None => Ok(CommandSummary::default()),
    }
}
