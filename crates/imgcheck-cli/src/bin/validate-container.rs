//! Validate container image contents.
//!
//! Usage: `validate-container [--checklist <file>]`

use clap::Parser;
use colored::Colorize;

use imgcheck_cli::cli::ContainerCli;
use imgcheck_cli::{commands, logging};

fn main() {
    let cli = ContainerCli::parse();
    logging::init(cli.verbose);

    match commands::run_container(cli.checklist.as_deref()) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(e.exit_code());
        }
    }
}
