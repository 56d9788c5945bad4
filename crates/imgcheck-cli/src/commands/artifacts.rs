//! `validate-artifacts` implementation

use std::io::Write;
use std::path::Path;

use imgcheck_core::ArtifactVerifier;

use crate::error::Result;

/// Verify `expected_dir` against the live root filesystem, reporting to stdout.
///
/// Returns the process exit code.
pub fn run_artifacts(expected_dir: &Path) -> Result<i32> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_artifacts_to(expected_dir, &mut out)
}

/// Verify `expected_dir` against the live root filesystem, reporting to `out`.
pub fn run_artifacts_to<W: Write>(expected_dir: &Path, out: &mut W) -> Result<i32> {
    let verifier = ArtifactVerifier::new(expected_dir);
    let report = verifier.run(out)?;
    out.flush()?;
    Ok(report.exit_code())
}
