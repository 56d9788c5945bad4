//! Artifact verification: override files versus the live filesystem
//!
//! Every regular file under a reference root is expected, byte for byte, at
//! the same root-relative path on the live filesystem. Files are processed in
//! sorted order and each one ends in exactly one [`ComparisonOutcome`]. A
//! failure never stops the run.

use std::io::Write;
use std::path::{Path, PathBuf};

use imgcheck_fs::{ExcludeRules, FileRecord, ReferenceRoot, collect, compute_file_checksum};

use crate::report::Status;

/// Why a file failed verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailReason {
    /// The reference copy could not be read
    SourceUnreadable,
    /// Nothing exists at the live path
    TargetMissing,
    /// The live path exists but could not be read
    TargetUnreadable,
    /// Both sides were read but their digests differ
    DigestMismatch { expected: String, actual: String },
}

/// Result of comparing a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonOutcome {
    Pass,
    Fail(FailReason),
    Skip,
}

impl ComparisonOutcome {
    /// Write the report line(s) for this outcome.
    pub fn write_to<W: Write>(&self, out: &mut W, rel_path: &Path) -> std::io::Result<()> {
        let path = rel_path.display();
        match self {
            Self::Pass => writeln!(out, "PASS: {}", path),
            Self::Skip => writeln!(out, "SKIP: {}", path),
            Self::Fail(FailReason::SourceUnreadable) => {
                writeln!(out, "FAIL: {} (cannot read source)", path)
            }
            Self::Fail(FailReason::TargetMissing) => {
                writeln!(out, "FAIL: {} (not found on filesystem)", path)
            }
            Self::Fail(FailReason::TargetUnreadable) => {
                writeln!(out, "FAIL: {} (cannot read from filesystem)", path)
            }
            Self::Fail(FailReason::DigestMismatch { expected, actual }) => {
                writeln!(out, "FAIL: {}", path)?;
                writeln!(out, "  expected: {}", expected)?;
                writeln!(out, "  actual:   {}", actual)
            }
        }
    }
}

/// Counters for a single verification run.
///
/// Counts only ever increase while the run is in progress. Skipped files are
/// not part of `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    total: usize,
    skipped: usize,
    failed: usize,
}

impl Tally {
    /// Account for one outcome.
    pub fn record(&mut self, outcome: &ComparisonOutcome) {
        match outcome {
            ComparisonOutcome::Skip => self.skipped += 1,
            ComparisonOutcome::Pass => self.total += 1,
            ComparisonOutcome::Fail(_) => {
                self.total += 1;
                self.failed += 1;
            }
        }
    }

    /// Files that were compared (passed or failed)
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn failed(&self) -> usize {
        self.failed
    }
}

/// Report from a finished artifact verification run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactReport {
    /// Final counts
    pub tally: Tally,
    /// Outcome per root-relative path, in report order
    pub outcomes: Vec<(PathBuf, ComparisonOutcome)>,
    /// Reference directories that could not be opened
    pub unreadable_dirs: Vec<PathBuf>,
}

impl ArtifactReport {
    /// Whether the reference tree contained no files at all.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn status(&self) -> Status {
        Status::from_failures(self.tally.failed())
    }

    pub fn exit_code(&self) -> i32 {
        self.status().exit_code()
    }
}

/// Compares a reference tree of override files against the live filesystem.
#[derive(Debug, Clone)]
pub struct ArtifactVerifier {
    reference: ReferenceRoot,
    live_root: PathBuf,
    rules: ExcludeRules,
}

impl ArtifactVerifier {
    /// Create a verifier for the given reference directory.
    ///
    /// Live paths are resolved from `/` and the default exclusion rules apply.
    pub fn new(reference: impl AsRef<Path>) -> Self {
        Self {
            reference: ReferenceRoot::new(reference),
            live_root: PathBuf::from("/"),
            rules: ExcludeRules::default(),
        }
    }

    /// Resolve live paths under `live_root` instead of `/`.
    pub fn with_live_root(mut self, live_root: impl Into<PathBuf>) -> Self {
        self.live_root = live_root.into();
        self
    }

    /// Replace the exclusion rules.
    pub fn with_rules(mut self, rules: ExcludeRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn reference(&self) -> &ReferenceRoot {
        &self.reference
    }

    /// Compare a single record against its live counterpart.
    pub fn compare(&self, record: &FileRecord) -> ComparisonOutcome {
        if self.rules.should_skip(record.relative()) {
            return ComparisonOutcome::Skip;
        }

        let expected = match compute_file_checksum(record.absolute()) {
            Ok(digest) => digest,
            Err(e) => {
                tracing::debug!(error = %e, "Reference file unreadable");
                return ComparisonOutcome::Fail(FailReason::SourceUnreadable);
            }
        };

        let live = record.live_path(&self.live_root);
        if !live.exists() {
            return ComparisonOutcome::Fail(FailReason::TargetMissing);
        }

        let actual = match compute_file_checksum(&live) {
            Ok(digest) => digest,
            Err(e) => {
                tracing::debug!(error = %e, "Live file unreadable");
                return ComparisonOutcome::Fail(FailReason::TargetUnreadable);
            }
        };

        if expected == actual {
            ComparisonOutcome::Pass
        } else {
            ComparisonOutcome::Fail(FailReason::DigestMismatch { expected, actual })
        }
    }

    /// Run the verification, writing the report to `out`.
    ///
    /// An empty reference tree prints a single informational line and
    /// succeeds without a summary block.
    pub fn run<W: Write>(&self, out: &mut W) -> std::io::Result<ArtifactReport> {
        let collection = collect(&self.reference);
        let mut report = ArtifactReport {
            tally: Tally::default(),
            outcomes: Vec::with_capacity(collection.len()),
            unreadable_dirs: collection.unreadable,
        };

        if collection.records.is_empty() {
            writeln!(out, "INFO: No files found in {}", self.reference)?;
            return Ok(report);
        }

        tracing::debug!(
            files = collection.records.len(),
            root = %self.reference,
            "Verifying override files"
        );

        for record in &collection.records {
            let outcome = self.compare(record);
            tracing::debug!(path = %record.display_path(), ?outcome, "Compared file");
            outcome.write_to(out, record.relative())?;
            report.tally.record(&outcome);
            report.outcomes.push((record.relative().to_path_buf(), outcome));
        }

        write_summary(out, &report.tally)?;
        Ok(report)
    }
}

fn write_summary<W: Write>(out: &mut W, tally: &Tally) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Summary:")?;
    writeln!(out, "- Files checked: {}", tally.total())?;
    writeln!(out, "- Files skipped: {}", tally.skipped())?;
    writeln!(out, "- Files failed:  {}", tally.failed())?;

    if tally.failed() > 0 {
        writeln!(
            out,
            "FAIL: {} out of {} override files failed verification",
            tally.failed(),
            tally.total()
        )
    } else {
        writeln!(out, "PASS: All {} override files verified", tally.total())
    }
}
