//! Command line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use field_data::DecodeMode;

/// Validate JSON records against a `field_data` schema
#[derive(Parser, Debug)]
#[command(name = "field-data")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log at debug level (overridden by `RUST_LOG`)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Inputs shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct Inputs {
    /// Path to the schema declaration (JSON)
    #[arg(long)]
    pub schema: PathBuf,

    /// Path to the raw record (JSON object)
    #[arg(long)]
    pub data: PathBuf,

    /// Coercion backend
    #[arg(long, default_value_t = DecodeMode::Weak)]
    pub mode: DecodeMode,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the record and print every declared field, resolved
    Check {
        #[command(flatten)]
        inputs: Inputs,
    },

    /// Print a single field
    Get {
        #[command(flatten)]
        inputs: Inputs,

        /// Field name
        field: String,
    },
}
