//! Integration tests for global CLI behavior
//!
//! Help output, project discovery and the global flags.

mod common;

use common::{run_in, stderr, stdout, TestProject};

/// Test: no subcommand prints help and succeeds
#[test]
fn test_no_subcommand_prints_help() {
    let project = TestProject::empty();
    let output = project.run(&[]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Usage"), "unexpected help: {out}");
    for command in ["init", "clean", "configure", "build", "program", "debug", "console"] {
        assert!(out.contains(command), "help is missing '{command}'");
    }
}

/// Test: unknown subcommands are rejected by the parser
#[test]
fn test_unknown_subcommand_fails() {
    let project = TestProject::empty();
    let output = project.run(&["flash"]);
    assert!(!output.status.success());
}

/// Test: commands needing a project fail outside one
#[test]
fn test_no_project_found() {
    let project = TestProject::empty();
    let output = project.run(&["build"]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("No fwtask.yaml found"), "unexpected stderr: {err}");
}

/// Test: the project root is found from a subdirectory
#[test]
fn test_project_found_from_subdirectory() {
    let project = TestProject::new();
    project.create_dir("src/drivers");

    let output = run_in(
        project.path().join("src/drivers"),
        &["configure", "--list-boards"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("\tdisco\n"));
}

/// Test: --project-dir selects the project explicitly
#[test]
fn test_project_dir_flag() {
    let project = TestProject::new();
    let elsewhere = TestProject::empty();
    let dir = project.path().display().to_string();

    let output = elsewhere.run(&["-C", &dir, "configure", "--list-options"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Supported options:\n\tUSE_LOG\n\tUSE_TRACE\n\tUSE_USB\n"
    );
}

/// Test: malformed configuration is reported with the file path
#[test]
fn test_invalid_config_reported() {
    let project = TestProject::with_config("proj: [not, a, mapping]\n");
    let output = project.run(&["build"]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("Failed to parse config file"), "unexpected stderr: {err}");
    assert!(err.contains("fwtask.yaml"));
}

/// Test: user.yaml is echoed to stderr when present
#[test]
fn test_user_config_echoed() {
    let project = TestProject::new();
    project.set_user_config("proj:\n  board: hosted\n");

    let output = project.run(&["configure", "--list-boards"]);

    assert!(output.status.success());
    let err = stderr(&output);
    assert!(err.contains("user.yaml:"), "unexpected stderr: {err}");
    assert!(err.contains("board: hosted"));
}

/// Test: --quiet suppresses informational output
#[test]
fn test_quiet_suppresses_listing() {
    let project = TestProject::new();
    project.set_user_config("proj:\n  board: hosted\n");

    let output = project.run(&["-q", "configure", "--list-boards"]);

    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(!stderr(&output).contains("user.yaml:"));
}

/// Test: doctor runs outside a project and emits valid JSON
#[test]
fn test_doctor_json_outside_project() {
    let project = TestProject::empty();
    let output = project.run(&["--json", "doctor"]);

    let json: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("doctor --json must print JSON");
    let checks = json["checks"].as_array().expect("checks array");
    assert_eq!(checks.len(), 6);
    assert_eq!(json["total_count"], 6);
    assert!(checks.iter().any(|c| c["program"] == "cmake"));
}

/// Test: doctor reports configured tool names
#[test]
fn test_doctor_uses_project_tools() {
    let project = TestProject::new();
    project.set_user_config("tools:\n  openocd: fwtask-test-missing-openocd\n");

    let output = project.run(&["--json", "doctor"]);

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let openocd = json["checks"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["program"] == "fwtask-test-missing-openocd")
        .expect("configured openocd is checked");
    assert_eq!(openocd["passed"], false);
    assert_eq!(openocd["required"], false);
}
