#![deny(missing_docs)]

//! # Opgen CLI
//!
//! Command Line Interface for the operation persistence-mapping generator.
//!
//! Supported Commands:
//! - `generate`: Header description -> per-operation storage artifacts.

use clap::{Parser, Subcommand};

use crate::error::CliResult;

mod error;
mod generate;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Operation storage artifact generator")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generates storage artifacts from an operation header description.
    Generate(generate::GenerateArgs),
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Generate(args) => generate::execute(args)?,
    }

    Ok(())
}
