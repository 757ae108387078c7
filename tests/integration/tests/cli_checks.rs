//! Integration tests for the `plint` binary.
//!
//! Drives the built binary against text fixtures and asserts on output
//! and exit codes. Exit code 0 means clean, 1 means issues were found,
//! 2 means the run itself failed.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn plint_cmd() -> Command {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("Failed to find workspace root");
    let bin_path = workspace_root.join("target/debug/plint");
    Command::new(bin_path)
}

mod help_command {
    use super::*;

    #[test]
    fn help_shows_usage() {
        plint_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"))
            .stdout(predicate::str::contains("check"));
    }

    #[test]
    fn version_shows_binary_name() {
        plint_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("plint"));
    }
}

mod check_command {
    use super::*;

    #[test]
    fn clean_file_exits_zero() {
        let fixture = fixtures_dir().join("clean.txt");

        plint_cmd()
            .arg("check")
            .arg(&fixture)
            .assert()
            .success()
            .stdout(predicate::str::contains("found 0 issues"));
    }

    #[test]
    fn flagged_file_exits_one() {
        let fixture = fixtures_dir().join("draft.txt");

        plint_cmd()
            .arg("check")
            .arg(&fixture)
            .assert()
            .code(1)
            .stdout(predicate::str::contains("[grammar]"))
            .stdout(predicate::str::contains("[spelling]"))
            .stdout(predicate::str::contains("could have"))
            .stdout(predicate::str::contains("receive"))
            .stdout(predicate::str::contains("found 4 issues"));
    }

    #[test]
    fn missing_file_is_reported_as_failure() {
        let fixture = fixtures_dir().join("does_not_exist.txt");

        plint_cmd()
            .arg("check")
            .arg(&fixture)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("file(s) failed to check"));
    }

    #[test]
    fn json_format_emits_machine_readable_report() {
        let fixture = fixtures_dir().join("draft.txt");

        let assert = plint_cmd()
            .arg("check")
            .arg(&fixture)
            .args(["--format", "json"])
            .assert()
            .code(1);

        let reports: serde_json::Value =
            serde_json::from_slice(&assert.get_output().stdout).expect("stdout is not JSON");
        let issues = reports[0]["issues"].as_array().expect("issues array");
        assert_eq!(issues.len(), 4);
        let lines: Vec<u64> = issues
            .iter()
            .map(|i| i["line_number"].as_u64().unwrap())
            .collect();
        assert_eq!(lines, vec![1, 2, 4, 4]);
        assert_eq!(issues[0]["category"], "grammar");
        assert_eq!(reports[0]["summary"]["total_issues"], 4);
    }

    #[test]
    fn category_flag_narrows_the_run() {
        let fixture = fixtures_dir().join("draft.txt");

        plint_cmd()
            .arg("check")
            .arg(&fixture)
            .args(["--category", "spelling"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("found 1 issues"))
            .stdout(predicate::str::contains("[grammar]").not());
    }

    #[test]
    fn unknown_category_fails_the_run() {
        let fixture = fixtures_dir().join("draft.txt");

        plint_cmd()
            .arg("check")
            .arg(&fixture)
            .args(["--category", "typography"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("unknown category"));
    }

    #[test]
    fn threshold_flag_lowers_the_filter() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("review.txt");
        std::fs::write(&file, "That movie was alright.\n").expect("write fixture");

        plint_cmd()
            .arg("check")
            .arg(&file)
            .assert()
            .success()
            .stdout(predicate::str::contains("found 0 issues"));

        plint_cmd()
            .arg("check")
            .arg(&file)
            .args(["--threshold", "0.7"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("all right"));
    }

    #[test]
    fn wrapped_sentence_reports_a_line_span() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("notes.txt");
        std::fs::write(
            &file,
            "The meeting went long.\nWe agreed that he could\nof won the argument.\n",
        )
        .expect("write fixture");

        plint_cmd()
            .arg("check")
            .arg(&file)
            .assert()
            .code(1)
            .stdout(predicate::str::contains("line 2-3"));
    }
}

mod categories_command {
    use super::*;

    #[test]
    fn lists_every_category_with_notes() {
        plint_cmd()
            .arg("categories")
            .assert()
            .success()
            .stdout(predicate::str::contains("grammar"))
            .stdout(predicate::str::contains("awkward_phrasing"))
            .stdout(predicate::str::contains("baseline"))
            .stdout(predicate::str::contains("llm-assisted"));
    }
}

mod init_command {
    use super::*;

    #[test]
    fn creates_a_config_file() {
        let dir = tempfile::tempdir().expect("tempdir");

        plint_cmd()
            .arg("init")
            .current_dir(dir.path())
            .assert()
            .success();

        let written = std::fs::read_to_string(dir.path().join(".prooflint.jsonc"))
            .expect("config file was not created");
        assert!(written.contains("categories"));
        assert!(written.contains("confidence_threshold"));
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(".prooflint.jsonc"), "{}\n").expect("seed config");

        plint_cmd()
            .arg("init")
            .current_dir(dir.path())
            .assert()
            .code(2)
            .stderr(predicate::str::contains("already exists"));
    }

    #[test]
    fn force_overwrites_an_existing_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(".prooflint.jsonc"), "{}\n").expect("seed config");

        plint_cmd()
            .arg("init")
            .arg("--force")
            .current_dir(dir.path())
            .assert()
            .success();

        let written = std::fs::read_to_string(dir.path().join(".prooflint.jsonc"))
            .expect("config file missing after overwrite");
        assert!(written.contains("confidence_threshold"));
    }
}
