//! `validate-container` implementation

use std::io::Write;
use std::path::Path;

use imgcheck_core::{Checklist, ChecklistExecutor, SystemQuery};

use crate::error::Result;

/// Load the checklist from `path`, or the built-in one when `None`.
pub fn load_checklist(path: Option<&Path>) -> Result<Checklist> {
    let checklist = match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading checklist");
            Checklist::load(path)?
        }
        None => Checklist::embedded()?,
    };
    Ok(checklist)
}

/// Run the container checklist against the host, reporting to stdout.
///
/// Returns the process exit code.
pub fn run_container(checklist_path: Option<&Path>) -> Result<i32> {
    let checklist = load_checklist(checklist_path)?;
    let host = checklist.host_system();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_container_to(&checklist, &host, &mut out)
}

/// Run `checklist` against `system`, reporting to `out`.
pub fn run_container_to<Q, W>(checklist: &Checklist, system: &Q, out: &mut W) -> Result<i32>
where
    Q: SystemQuery + ?Sized,
    W: Write,
{
    let report = ChecklistExecutor::new(system).run(checklist, out)?;
    out.flush()?;
    Ok(report.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;

    #[test]
    fn test_load_embedded_checklist() {
        let checklist = load_checklist(None).unwrap();
        assert_eq!(checklist.sections.len(), 5);
    }

    #[test]
    fn test_missing_checklist_is_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let err = load_checklist(Some(missing.as_path())).unwrap_err();
        assert!(matches!(err, CliError::Core(_)));
        assert_eq!(err.exit_code(), 2);
    }
}
