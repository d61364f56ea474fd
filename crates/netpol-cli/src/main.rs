//! netpol CLI
//!
//! Command-line interface for converting network policies between schema
//! versions and recording change causes.

use clap::{Parser, Subcommand};
use netpol_core::logging;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "netpol")]
#[command(about = "netpol - Network policy schema tooling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Convert a policy document between schema versions
    Convert(commands::convert::ConvertArgs),
    /// Record a change cause on a policy document
    Annotate(commands::annotate::AnnotateArgs),
}

fn main() {
    logging::init(logging::Profile::Development);

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert(args) => commands::convert::execute(args),
        Commands::Annotate(args) => commands::annotate::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
