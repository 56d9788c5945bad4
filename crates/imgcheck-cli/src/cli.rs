//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;

/// Verify that override files baked into the image match their reference copies
///
/// Every regular file under EXPECTED_DIR is compared by SHA-256 digest with
/// the file at the same path relative to `/`.
///
/// Exit codes: 0 all files match, 1 verification failed, 2 usage error.
#[derive(Parser, Debug)]
#[command(name = "validate-artifacts")]
#[command(author, version, about, long_about)]
pub struct ArtifactsCli {
    /// Reference directory mirroring the live filesystem layout
    pub expected_dir: PathBuf,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Validate container image contents: packages, binaries, libraries,
/// directories and service units
///
/// Exit codes: 0 all checks pass, 1 one or more checks failed, 2 unusable
/// checklist.
#[derive(Parser, Debug)]
#[command(name = "validate-container")]
#[command(author, version, about, long_about)]
pub struct ContainerCli {
    /// Replace the built-in checklist (TOML, JSON or YAML)
    #[arg(short, long, env = "IMGCHECK_CHECKLIST")]
    pub checklist: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
