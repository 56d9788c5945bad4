//! Declarative container content checks
//!
//! A [`Checklist`] is plain data: ordered sections, each holding item names of
//! a single [`CheckKind`]. The [`ChecklistExecutor`] evaluates every item on
//! its own against a [`SystemQuery`] and tallies the failures.

use std::io::Write;
use std::path::Path;

use imgcheck_fs::{ConfigFormat, ConfigStore};
use serde::{Deserialize, Serialize};

use crate::report::Status;
use crate::system::{HostSystem, QueryError, SystemQuery};
use crate::{Error, Result};

/// Checklist shipped with the binary
const EMBEDDED_CHECKLIST: &str = include_str!("../data/checklist.toml");

/// What an item name refers to and how it is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Package name, queried through the package manager
    Package,
    /// Path that must be an executable file
    Binary,
    /// Path that must exist
    Library,
    /// Path that must be a directory
    Directory,
    /// Marker token that must appear in the unit file listing
    ServiceUnit,
}

/// A single named check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckItem {
    pub name: String,
    pub kind: CheckKind,
}

/// A titled group of checks sharing one kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub kind: CheckKind,
    pub heading: String,
    #[serde(default)]
    pub items: Vec<String>,
}

impl Section {
    pub fn check_items(&self) -> impl Iterator<Item = CheckItem> + '_ {
        self.items.iter().map(|name| CheckItem {
            name: name.clone(),
            kind: self.kind,
        })
    }
}

/// Command lines used by [`HostSystem`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    #[serde(default)]
    pub package_query: Vec<String>,
    #[serde(default)]
    pub unit_listing: Vec<String>,
}

/// Ordered set of check sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    pub title: String,
    #[serde(default)]
    pub commands: CommandSpec,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Checklist {
    /// The checklist compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::parse(EMBEDDED_CHECKLIST, ConfigFormat::Toml)
    }

    /// Parse and validate checklist content.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        let checklist: Self = ConfigStore::new()
            .parse(content, format)
            .map_err(|message| Error::InvalidChecklist { message })?;
        checklist.validate()?;
        Ok(checklist)
    }

    /// Load and validate a checklist file (TOML, JSON or YAML).
    pub fn load(path: &Path) -> Result<Self> {
        let checklist: Self = ConfigStore::new().load(path)?;
        checklist.validate()?;
        Ok(checklist)
    }

    /// Reject sections without a heading and blank item names.
    pub fn validate(&self) -> Result<()> {
        for (idx, section) in self.sections.iter().enumerate() {
            if section.heading.trim().is_empty() {
                return Err(Error::InvalidChecklist {
                    message: format!("section {} has no heading", idx + 1),
                });
            }
            if section.items.iter().any(|item| item.trim().is_empty()) {
                return Err(Error::InvalidChecklist {
                    message: format!("section '{}' has an empty item", section.heading),
                });
            }
        }
        Ok(())
    }

    /// All items in section order.
    pub fn items(&self) -> impl Iterator<Item = CheckItem> + '_ {
        self.sections.iter().flat_map(|section| section.check_items())
    }

    /// A host query using this checklist's command lines.
    pub fn host_system(&self) -> HostSystem {
        HostSystem::with_commands(
            self.commands.package_query.clone(),
            self.commands.unit_listing.clone(),
        )
    }
}

/// Result of evaluating one [`CheckItem`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Package is installed at this version
    Installed { version: String },
    NotInstalled,
    /// The query command could not be run
    QueryFailed,
    Present,
    Absent,
    /// Unit listing lines containing the marker (may be empty)
    UnitsFound { units: Vec<String> },
    /// The unit listing command could not be run
    ListingFailed,
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        match self {
            Self::Installed { .. } | Self::Present => true,
            Self::UnitsFound { units } => !units.is_empty(),
            Self::NotInstalled | Self::QueryFailed | Self::Absent | Self::ListingFailed => false,
        }
    }

    /// Write the report line(s) for `item`.
    pub fn write_to<W: Write>(&self, out: &mut W, item: &CheckItem) -> std::io::Result<()> {
        let name = &item.name;
        match (item.kind, self) {
            (_, Self::Installed { version }) => writeln!(out, "PASS: {} ({})", name, version),
            (_, Self::NotInstalled) => writeln!(out, "FAIL: {} (not installed)", name),
            (_, Self::QueryFailed) => writeln!(out, "FAIL: {} (command error)", name),
            (CheckKind::Directory, Self::Present) => writeln!(out, "PASS: {} exists", name),
            (CheckKind::Directory, Self::Absent) => writeln!(out, "FAIL: {} missing", name),
            (CheckKind::Binary, Self::Absent) => {
                writeln!(out, "FAIL: {} (missing or not executable)", name)
            }
            (_, Self::Present) => writeln!(out, "PASS: {}", name),
            (_, Self::Absent) => writeln!(out, "FAIL: {} (missing)", name),
            (_, Self::UnitsFound { units }) if units.is_empty() => {
                writeln!(out, "FAIL: no {} systemd services found", name)
            }
            (_, Self::UnitsFound { units }) => {
                for unit in units {
                    writeln!(out, "FOUND: {}", unit)?;
                }
                writeln!(out, "PASS: {} {} service(s) found", units.len(), name)
            }
            (_, Self::ListingFailed) => writeln!(out, "FAIL: cannot list systemd unit files"),
        }
    }
}

/// Counts for one executed section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionReport {
    pub heading: String,
    pub kind: CheckKind,
    pub checked: usize,
    pub failed: usize,
}

/// Report from a finished checklist run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerReport {
    pub sections: Vec<SectionReport>,
}

impl ContainerReport {
    /// Total failed checks across all sections.
    pub fn failed(&self) -> usize {
        self.sections.iter().map(|s| s.failed).sum()
    }

    pub fn status(&self) -> Status {
        Status::from_failures(self.failed())
    }

    pub fn exit_code(&self) -> i32 {
        self.status().exit_code()
    }
}

/// Runs checklist items against a [`SystemQuery`].
pub struct ChecklistExecutor<'a, Q: SystemQuery + ?Sized> {
    query: &'a Q,
}

impl<'a, Q: SystemQuery + ?Sized> ChecklistExecutor<'a, Q> {
    pub fn new(query: &'a Q) -> Self {
        Self { query }
    }

    /// Evaluate a single item.
    pub fn evaluate(&self, item: &CheckItem) -> CheckOutcome {
        let path = Path::new(&item.name);
        match item.kind {
            CheckKind::Package => match self.query.query_package(&item.name) {
                Ok(version) => CheckOutcome::Installed { version },
                Err(QueryError::NotInstalled { .. }) => CheckOutcome::NotInstalled,
                Err(e) => {
                    tracing::warn!("{}", e);
                    CheckOutcome::QueryFailed
                }
            },
            CheckKind::Binary => present_if(self.query.is_executable(path)),
            CheckKind::Library => present_if(self.query.exists(path)),
            CheckKind::Directory => present_if(self.query.is_dir(path)),
            CheckKind::ServiceUnit => match self.query.list_service_units() {
                Ok(lines) => CheckOutcome::UnitsFound {
                    units: lines
                        .iter()
                        .filter(|line| line.contains(item.name.as_str()))
                        .map(|line| line.trim().to_string())
                        .collect(),
                },
                Err(e) => {
                    tracing::warn!("{}", e);
                    CheckOutcome::ListingFailed
                }
            },
        }
    }

    /// Run every section in order, writing the report to `out`.
    pub fn run<W: Write>(
        &self,
        checklist: &Checklist,
        out: &mut W,
    ) -> std::io::Result<ContainerReport> {
        writeln!(out, "=== {} ===", checklist.title)?;

        let mut sections = Vec::with_capacity(checklist.sections.len());
        for section in &checklist.sections {
            writeln!(out)?;
            writeln!(out, "--- {} ---", section.heading)?;

            let mut report = SectionReport {
                heading: section.heading.clone(),
                kind: section.kind,
                checked: 0,
                failed: 0,
            };
            for item in section.check_items() {
                let outcome = self.evaluate(&item);
                tracing::debug!(name = %item.name, kind = ?item.kind, ?outcome, "Checked item");
                outcome.write_to(out, &item)?;
                report.checked += 1;
                if !outcome.passed() {
                    report.failed += 1;
                }
            }
            sections.push(report);
        }

        let report = ContainerReport { sections };
        writeln!(out)?;
        writeln!(out, "=== Summary ===")?;
        if report.failed() > 0 {
            writeln!(out, "FAIL: {} check(s) failed", report.failed())?;
        } else {
            writeln!(out, "PASS: All container checks passed")?;
        }
        Ok(report)
    }
}

fn present_if(condition: bool) -> CheckOutcome {
    if condition {
        CheckOutcome::Present
    } else {
        CheckOutcome::Absent
    }
}
