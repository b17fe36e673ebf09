// Calendar engine command-line front end
// Main entry point

mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting calendar-engine");

    cli::run(cli::Cli::parse())
}
