//! End-to-end integration test for an override tree
//!
//! Exercises the complete flow: tree collection -> exclusion -> digest
//! comparison -> report, against a layout shaped like a real image build.

use std::path::PathBuf;

use imgcheck_core::{ArtifactVerifier, ComparisonOutcome, FailReason};
use imgcheck_fs::{ReferenceRoot, collect};
use imgcheck_test_utils::TestTree;

/// Stage a reference tree shaped like `artifacts/overrides`
fn setup_overrides() -> TestTree {
    let tree = TestTree::new();

    // Files baked into the image unchanged
    tree.add_both("/etc/immutablue/settings.yaml", "immutablue:\n  profile: default\n");
    tree.add_both(
        "/usr/libexec/immutablue/setup/immutablue_setup_tui.py",
        "#!/usr/bin/env python3\n",
    );
    tree.add_both("/usr/lib/systemd/system/immutablue-first-boot.service", "[Unit]\n");

    // Build-time only files that never reach the image
    tree.add_reference("/usr/libexec/immutablue/Justfile", "build:\n");
    tree.add_reference("/etc/systemd/system.conf", "[Manager]\n");
    tree.add_reference(
        "/usr/libexec/immutablue/setup/__pycache__/immutablue_setup_tui.cpython-312.pyc",
        b"\x00\x01",
    );
    tree.add_reference("/usr/libexec/immutablue/test/fixtures.txt", "fixture");

    tree
}

#[test]
fn test_clean_image_passes() {
    let tree = setup_overrides();

    let verifier = ArtifactVerifier::new(tree.reference_root()).with_live_root(tree.live_root());
    let mut out = Vec::new();
    let report = verifier.run(&mut out).unwrap();
    let output = String::from_utf8(out).unwrap();

    assert_eq!(report.tally.total(), 3);
    assert_eq!(report.tally.skipped(), 4);
    assert_eq!(report.tally.failed(), 0);
    assert_eq!(report.exit_code(), 0);
    assert!(output.ends_with("PASS: All 3 override files verified\n"));

    // Every discovered file is accounted for exactly once
    let discovered = collect(&ReferenceRoot::new(tree.reference_root())).len();
    assert_eq!(report.tally.total() + report.tally.skipped(), discovered);
}

#[test]
fn test_drifted_image_reports_each_failure() {
    let tree = setup_overrides();
    tree.add_live("/etc/immutablue/settings.yaml", "immutablue:\n  profile: changed\n");
    std::fs::remove_file(tree.live_path("/usr/lib/systemd/system/immutablue-first-boot.service"))
        .unwrap();

    let verifier = ArtifactVerifier::new(tree.reference_root()).with_live_root(tree.live_root());
    let mut out = Vec::new();
    let report = verifier.run(&mut out).unwrap();

    let failures: Vec<_> = report
        .outcomes
        .iter()
        .filter(|(_, outcome)| matches!(outcome, ComparisonOutcome::Fail(_)))
        .collect();

    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].0, PathBuf::from("/etc/immutablue/settings.yaml"));
    assert!(matches!(
        failures[0].1,
        ComparisonOutcome::Fail(FailReason::DigestMismatch { .. })
    ));
    assert_eq!(
        failures[1],
        &(
            PathBuf::from("/usr/lib/systemd/system/immutablue-first-boot.service"),
            ComparisonOutcome::Fail(FailReason::TargetMissing)
        )
    );
    assert_eq!(report.exit_code(), 1);
}
