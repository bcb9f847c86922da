use std::path::PathBuf;
use clap::{Parser, Subcommand};
use eventbrite_cetd::run::DEFAULT_OUTPUT_FILE;

/// Fetch attendees of all your Eventbrite organizations and export them to CSV.
#[derive(Parser, Debug)]
#[command(name = "eventbrite-cetd", version, arg_required_else_help = true)]
pub struct Cli {
    /// Show debug information and exit
    #[arg(short = 'D', long)]
    pub debug_info: bool,

    #[command(subcommand)]
    pub command: Option<Command>
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Fetch and export Eventbrite attendee data (token read from PRIVATE_TOKEN)
    Generate {
        /// Path to the output CSV file
        #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
        output_file: PathBuf
    },
    /// Summarize an attendees export into report tables
    Report {
        /// Attendees CSV produced by `generate`
        #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
        input_file: PathBuf,
        /// Directory receiving the report files
        #[arg(long, default_value = "output")]
        output_dir: PathBuf
    }
}
