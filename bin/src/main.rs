extern crate clap;
extern crate env_logger;
extern crate eventbrite_cetd;
extern crate failure;
#[macro_use]
extern crate log;
extern crate tokio;

mod cli;
mod debug;

use std::env;
use std::path::Path;
use std::process;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use env_logger::Env;
use failure::Error;
use eventbrite_cetd::config::Config;
use eventbrite_cetd::report::generate_reports;
use eventbrite_cetd::run::run;

use cli::{Cli, Command};

async fn generate(output_file: &Path) -> Result<(), Error> {
    let config = Config::from_env()?;
    let summary = run(&config, output_file).await?;
    for organization in &summary.organizations {
        println!("{} - {} attendees", organization.name, organization.attendees);
    }
    println!("Attendee data export completed successfully! ({} attendees written to {})", summary.total_attendees, summary.output_file.display());
    Ok(())
}

fn report(input_file: &Path, output_dir: &Path) -> Result<(), Error> {
    let written = generate_reports(input_file, output_dir)?;
    println!("{} reports written to {}", written.len(), output_dir.display());
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.debug_info {
        println!("{}", debug::debug_info(|variable| env::var(variable).ok()));
        return;
    }

    let outcome = match cli.command {
        Some(Command::Generate { ref output_file }) => generate(output_file).await,
        Some(Command::Report { ref input_file, ref output_dir }) => report(input_file, output_dir),
        None => Cli::command().error(ErrorKind::MissingSubcommand, "a subcommand is required").exit()
    };

    if let Err(err) = outcome {
        error!("An error occurred: {}", err);
        for cause in err.iter_causes() {
            error!("caused by: {}", cause);
        }
        process::exit(1);
    }
}
