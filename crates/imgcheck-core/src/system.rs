//! Read-only queries against the running system
//!
//! The checklist executor only sees the [`SystemQuery`] trait, so it can be
//! exercised against fakes without a package manager or service supervisor.

use std::path::Path;
use std::process::{Command, Output};

/// Errors from querying system state
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The package query ran and reported the package as absent
    #[error("package {name} is not installed")]
    NotInstalled { name: String },

    /// The external command could not be spawned
    #[error("failed to run '{command}': {source}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Capability interface over package, service and filesystem state.
pub trait SystemQuery {
    /// Query an installed package, returning its version string.
    fn query_package(&self, name: &str) -> Result<String, QueryError>;

    /// List the service unit files known to the service supervisor, one per line.
    fn list_service_units(&self) -> Result<Vec<String>, QueryError>;

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_executable(&self, path: &Path) -> bool {
        is_executable(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// Whether `path` resolves to a regular file with an execute bit set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    match std::fs::metadata(path) {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

/// Whether `path` resolves to a regular file.
#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// [`SystemQuery`] backed by external commands on the host.
#[derive(Debug, Clone)]
pub struct HostSystem {
    package_query: Vec<String>,
    unit_listing: Vec<String>,
}

impl Default for HostSystem {
    fn default() -> Self {
        Self {
            package_query: vec!["rpm".into(), "-q".into()],
            unit_listing: vec!["systemctl".into(), "list-unit-files".into()],
        }
    }
}

impl HostSystem {
    /// Use custom command lines.
    ///
    /// The package name is appended to `package_query` as its last argument.
    /// An empty command line falls back to the default.
    pub fn with_commands(package_query: Vec<String>, unit_listing: Vec<String>) -> Self {
        let defaults = Self::default();
        Self {
            package_query: if package_query.is_empty() {
                defaults.package_query
            } else {
                package_query
            },
            unit_listing: if unit_listing.is_empty() {
                defaults.unit_listing
            } else {
                unit_listing
            },
        }
    }

    fn run(argv: &[String], extra: Option<&str>) -> Result<Output, QueryError> {
        let command_line = match extra {
            Some(arg) => format!("{} {}", argv.join(" "), arg),
            None => argv.join(" "),
        };

        let mut cmd = Command::new(&argv[0]);
        cmd.args(&argv[1..]);
        if let Some(arg) = extra {
            cmd.arg(arg);
        }

        tracing::debug!(command = %command_line, "Running query command");
        cmd.output().map_err(|source| QueryError::CommandFailed {
            command: command_line,
            source,
        })
    }
}

impl SystemQuery for HostSystem {
    fn query_package(&self, name: &str) -> Result<String, QueryError> {
        let output = Self::run(&self.package_query, Some(name))?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(QueryError::NotInstalled {
                name: name.to_string(),
            })
        }
    }

    fn list_service_units(&self) -> Result<Vec<String>, QueryError> {
        // The exit status is not consulted; whatever was listed is used.
        let output = Self::run(&self.unit_listing, None)?;
        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_string)
            .collect())
    }
}
