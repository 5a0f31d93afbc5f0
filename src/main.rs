//! fwtask CLI - firmware configure/build/program task runner
//!
//! Entry point for the fwtask command-line application.

use clap::Parser;

use fwtask::cli::output::{display_error, OutputConfig};
use fwtask::cli::Cli;

fn main() {
    let cli = Cli::parse();

    let output_config = OutputConfig::new(cli.quiet, cli.json, cli.verbose);
    output_config.init_tracing();
    output_config.apply_global();

    // Run the command and handle errors
    if let Err(e) = cli.run() {
        display_error(&e);
        std::process::exit(1);
    }
}
