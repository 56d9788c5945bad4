//! End-to-end tests that invoke the compiled binaries.

use assert_cmd::Command;
use imgcheck_test_utils::TestTree;
use predicates::prelude::*;
use std::fs;

fn artifacts_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_validate-artifacts"))
}

fn container_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_validate-container"));
    cmd.env_remove("IMGCHECK_CHECKLIST");
    cmd
}

// ============================================================================
// validate-artifacts
// ============================================================================

#[test]
fn test_artifacts_missing_argument_exits_two() {
    artifacts_cmd()
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("<EXPECTED_DIR>"));
}

#[test]
fn test_artifacts_help() {
    artifacts_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("override files"));
}

#[test]
fn test_artifacts_skip_and_pass() {
    let tree = TestTree::new();
    let app = tree.add_rooted_reference("/etc/app.conf", "A");
    let dbg = tree.add_rooted_reference("/etc/test/dbg.txt", "B");
    tree.add_live("/etc/app.conf", "A");

    let expected = format!(
        "PASS: {app}\nSKIP: {dbg}\n\nSummary:\n- Files checked: 1\n- Files skipped: 1\n- Files failed:  0\nPASS: All 1 override files verified\n"
    );

    artifacts_cmd()
        .arg(tree.reference_root())
        .assert()
        .code(0)
        .stdout(expected);
}

#[test]
fn test_artifacts_mismatch_exits_one() {
    let tree = TestTree::new();
    let app = tree.add_rooted_reference("/etc/app.conf", "A");
    tree.add_live("/etc/app.conf", "Z");

    artifacts_cmd()
        .arg(tree.reference_root())
        .assert()
        .code(1)
        .stdout(predicate::str::contains(format!("FAIL: {app}\n  expected: ")))
        .stdout(predicate::str::contains(
            "FAIL: 1 out of 1 override files failed verification",
        ));
}

#[test]
fn test_artifacts_missing_live_file() {
    let tree = TestTree::new();
    let gone = tree.add_rooted_reference("/etc/gone.conf", "A");

    artifacts_cmd()
        .arg(format!("{}/", tree.reference_root().display()))
        .assert()
        .code(1)
        .stdout(predicate::str::contains(format!(
            "FAIL: {gone} (not found on filesystem)"
        )));
}

#[test]
fn test_artifacts_empty_directory() {
    let tree = TestTree::new();
    let root = tree.reference_root();

    artifacts_cmd()
        .arg(&root)
        .assert()
        .success()
        .stdout(format!("INFO: No files found in {}\n", root.display()));
}

#[test]
fn test_artifacts_nonexistent_directory_warns_and_succeeds() {
    let tree = TestTree::new();
    let missing = tree.root().join("nope");

    artifacts_cmd()
        .arg(&missing)
        .assert()
        .success()
        .stdout(predicate::str::contains("INFO: No files found in"))
        .stderr(predicate::str::contains("cannot open"));
}

#[cfg(unix)]
#[test]
fn test_artifacts_non_utf8_names_are_verified() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let tree = TestTree::new();
    let live_dir = tree.live_path("/etc");
    let live_file = live_dir.join(OsStr::from_bytes(b"caf\xe9.conf"));
    fs::create_dir_all(&live_dir).unwrap();
    fs::write(&live_file, "A").unwrap();

    let root = tree.root().join(OsStr::from_bytes(b"ref\xff"));
    let reference = root.join(live_file.strip_prefix("/").unwrap());
    fs::create_dir_all(reference.parent().unwrap()).unwrap();
    fs::write(&reference, "A").unwrap();

    artifacts_cmd()
        .arg(&root)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("INFO:").not())
        .stdout(predicate::str::contains("PASS: All 1 override files verified\n"));
}

// ============================================================================
// validate-container
// ============================================================================

#[test]
fn test_container_help() {
    container_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--checklist"));
}

#[test]
fn test_container_directory_checklist_passes() {
    let tree = TestTree::new();
    let etc = tree.live_path("/etc/immutablue");
    fs::create_dir_all(&etc).unwrap();

    let checklist = tree.root().join("checks.toml");
    fs::write(
        &checklist,
        format!(
            "title = \"Test\"\n[[sections]]\nkind = \"directory\"\nheading = \"Directory Checks\"\nitems = [\"{}\"]\n",
            etc.display()
        ),
    )
    .unwrap();

    container_cmd()
        .arg("--checklist")
        .arg(&checklist)
        .assert()
        .success()
        .stdout(format!(
            "=== Test ===\n\n--- Directory Checks ---\nPASS: {} exists\n\n=== Summary ===\nPASS: All container checks passed\n",
            etc.display()
        ));
}

#[test]
fn test_container_missing_items_exit_one() {
    let tree = TestTree::new();
    let checklist = tree.root().join("checks.json");
    let missing_dir = tree.live_path("/etc/absent");
    let missing_lib = tree.live_path("/usr/lib64/libabsent.so");
    fs::write(
        &checklist,
        format!(
            r#"{{"title": "Test", "sections": [
                {{"kind": "directory", "heading": "Directory Checks", "items": ["{}"]}},
                {{"kind": "library", "heading": "Custom Library Checks", "items": ["{}"]}}
            ]}}"#,
            missing_dir.display(),
            missing_lib.display()
        ),
    )
    .unwrap();

    container_cmd()
        .env("IMGCHECK_CHECKLIST", &checklist)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(format!("FAIL: {} missing", missing_dir.display())))
        .stdout(predicate::str::contains(format!(
            "FAIL: {} (missing)",
            missing_lib.display()
        )))
        .stdout(predicate::str::ends_with("FAIL: 2 check(s) failed\n"));
}

#[test]
fn test_container_bad_checklist_exits_two() {
    let tree = TestTree::new();
    let checklist = tree.root().join("checks.toml");
    fs::write(&checklist, "title = ").unwrap();

    container_cmd()
        .arg("--checklist")
        .arg(&checklist)
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error"));
}

#[cfg(unix)]
#[test]
fn test_container_host_commands_from_checklist() {
    let tree = TestTree::new();
    let checklist = tree.root().join("checks.toml");
    fs::write(
        &checklist,
        r#"
title = "Host"

[commands]
package_query = ["echo"]
unit_listing = ["echo", "immutablue-first-boot.service enabled"]

[[sections]]
kind = "package"
heading = "RPM Package Checks"
items = ["git"]

[[sections]]
kind = "service_unit"
heading = "Systemd Service Checks"
items = ["immutablue"]
"#,
    )
    .unwrap();

    container_cmd()
        .arg("--checklist")
        .arg(&checklist)
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS: git (git)\n"))
        .stdout(predicate::str::contains(
            "FOUND: immutablue-first-boot.service enabled\nPASS: 1 immutablue service(s) found\n",
        ));
}

#[cfg(unix)]
#[test]
fn test_container_unspawnable_command_counts_as_failure() {
    let tree = TestTree::new();
    let checklist = tree.root().join("checks.toml");
    fs::write(
        &checklist,
        r#"
title = "Host"

[commands]
package_query = ["/nonexistent/imgcheck-rpm", "-q"]

[[sections]]
kind = "package"
heading = "RPM Package Checks"
items = ["git", "tmux"]
"#,
    )
    .unwrap();

    container_cmd()
        .arg("--checklist")
        .arg(&checklist)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("FAIL: git (command error)\n"))
        .stdout(predicate::str::contains("FAIL: tmux (command error)\n"))
        .stderr(predicate::str::contains("failed to run"));
}
