//! Verify override files baked into a container image.
//!
//! Usage: `validate-artifacts <expected_dir>`

use clap::Parser;
use colored::Colorize;

use imgcheck_cli::cli::ArtifactsCli;
use imgcheck_cli::{commands, logging};

fn main() {
    let cli = ArtifactsCli::parse();
    logging::init(cli.verbose);

    match commands::run_artifacts(&cli.expected_dir) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(e.exit_code());
        }
    }
}
