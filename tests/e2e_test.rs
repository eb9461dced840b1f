/// End-to-end tests for the CLI
///
/// Each test lays out a throwaway project with a graph manifest and runs the
/// binary against it, using `assert_cmd` and `tempfile`.
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

const GRAPH: &str = r#"
[project]
group = "com.example"
name = "app"
version = "1.0.0"
dependencies = [
    { coordinate = "org.apache:commons-lang:3.12" },
    { coordinate = "org.slf4j:slf4j-api:2.0" },
    { coordinate = "junit:junit:4.13", scope = "test" },
]

[[artifact]]
coordinate = "org.apache:commons-lang:3.12"
licenses = [{ name = "Apache-2.0", url = "https://www.apache.org/licenses/LICENSE-2.0" }]
dependencies = [{ coordinate = "org.example:helper:0.1", optional = true }]

[[artifact]]
coordinate = "org.example:helper:0.1"
licenses = [{ name = "MIT" }]

[[artifact]]
coordinate = "org.slf4j:slf4j-api:2.0"
licenses = [{ name = "MIT" }]

[[artifact]]
coordinate = "junit:junit:4.13"
licenses = [{ name = "EPL-1.0" }]
"#;

/// Create a project directory holding the default graph manifest.
fn create_test_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("license-audit.graph.toml"), GRAPH).unwrap();
    dir
}

fn path_arg(dir: &Path) -> String {
    dir.to_string_lossy().into_owned()
}

fn validate(dir: &Path, extra: &[&str]) -> assert_cmd::assert::Assert {
    cargo_bin_cmd!("license-audit")
        .arg("validate")
        .args(["-p", &path_arg(dir)])
        .args(extra)
        .assert()
}

fn report(dir: &Path, extra: &[&str]) -> assert_cmd::assert::Assert {
    cargo_bin_cmd!("license-audit")
        .arg("report")
        .args(["-p", &path_arg(dir)])
        .args(extra)
        .assert()
}

// ============================================================================
// Exit codes
// ============================================================================

mod exit_code_tests {
    use super::*;

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("license-audit")
            .arg("--help")
            .assert()
            .code(0);
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("license-audit")
            .arg("--version")
            .assert()
            .code(0);
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("license-audit")
            .args(["validate", "--invalid-option"])
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid format value
    #[test]
    fn test_exit_code_invalid_format() {
        cargo_bin_cmd!("license-audit")
            .args(["report", "-f", "invalid_format"])
            .assert()
            .code(2);
    }

    /// Exit code 3: non-existent project path
    #[test]
    fn test_exit_code_nonexistent_path() {
        cargo_bin_cmd!("license-audit")
            .args(["validate", "-l", "MIT", "-p", "/nonexistent/path/that/does/not/exist"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Directory does not exist"));
    }

    /// Exit code 3: path is a file, not a directory
    #[test]
    fn test_exit_code_file_not_directory() {
        cargo_bin_cmd!("license-audit")
            .args(["validate", "-l", "MIT", "-p", "Cargo.toml"])
            .assert()
            .code(3);
    }

    /// Exit code 3: no graph manifest
    #[test]
    fn test_exit_code_missing_graph_manifest() {
        let dir = TempDir::new().unwrap();
        validate(dir.path(), &["-l", "MIT"])
            .code(3)
            .stderr(predicate::str::contains("graph manifest"));
    }

    /// Exit code 3: empty allow-list
    #[test]
    fn test_exit_code_empty_allow_list() {
        let project = create_test_project();
        validate(project.path(), &[])
            .code(3)
            .stderr(predicate::str::contains("Invalid configuration"));
        assert!(!project.path().join("target/licenses").exists());
    }
}

// ============================================================================
// Validate pass
// ============================================================================

#[test]
fn test_validate_all_approved() {
    let project = create_test_project();
    validate(
        project.path(),
        &["-l", "Apache-2.0", "-l", "MIT", "--skip-test-scope"],
    )
    .code(0)
    .stderr(predicate::str::contains("All licenses"));

    let results_dir = project.path().join("target/licenses");
    let settings = fs::read_to_string(results_dir.join("settings.properties")).unwrap();
    assert!(settings.contains("skipTestScope=true"));
    let results = fs::read_to_string(results_dir.join("validation-results.tsv")).unwrap();
    assert!(results.starts_with("#license-audit-results"));
    assert!(results.contains("test scope"));
}

#[test]
fn test_validate_invalid_license_found() {
    let project = create_test_project();
    validate(project.path(), &["-l", "Apache-2.0", "-l", "MIT"])
        .code(1)
        .stderr(predicate::str::contains("Invalid license(s) was/were found!"));

    // every outcome is still persisted for the report pass
    let results = fs::read_to_string(
        project
            .path()
            .join("target/licenses/validation-results.tsv"),
    )
    .unwrap();
    assert!(results.contains("EPL-1.0"));
}

#[test]
fn test_validate_fail_fast() {
    let project = create_test_project();
    validate(project.path(), &["-l", "Apache-2.0", "--fail-fast"])
        .code(1)
        .stderr(predicate::str::contains("First finding"));
    assert!(!project
        .path()
        .join("target/licenses/validation-results.tsv")
        .exists());
}

#[test]
fn test_validate_custom_results_dir() {
    let project = create_test_project();
    let results = TempDir::new().unwrap();
    validate(
        project.path(),
        &[
            "-l",
            "Apache-2.0",
            "-l",
            "MIT",
            "-l",
            "EPL-1.0",
            "--results-dir",
            &path_arg(results.path()),
        ],
    )
    .code(0);
    assert!(results.path().join("validation-results.tsv").exists());
}

// ============================================================================
// Report pass
// ============================================================================

#[test]
fn test_report_without_validate_pass() {
    let project = create_test_project();
    report(project.path(), &[])
        .code(3)
        .stderr(predicate::str::contains("validate pass"));
}

#[test]
fn test_validate_then_markdown_report() {
    let project = create_test_project();
    validate(project.path(), &["-l", "Apache-2.0", "-l", "MIT"]).code(1);
    report(project.path(), &[]).code(0);

    let markdown = fs::read_to_string(
        project
            .path()
            .join("target/licenses/dependency-licenses-report.md"),
    )
    .unwrap();
    assert!(markdown.contains("# Licenses Report"));
    assert!(markdown.contains("## Directly Used Licenses"));
    assert!(markdown.contains("## Transitively Used Licenses"));
    assert!(markdown.contains("**org.apache:commons-lang:3.12** (compile)"));
    assert!(markdown.contains("**org.example:helper:0.1** (compile, optional)"));
}

#[test]
fn test_json_report_to_stdout() {
    let project = create_test_project();
    validate(project.path(), &["-l", "Apache-2.0", "-l", "MIT", "--skip-optionals"]).code(0);

    let output = cargo_bin_cmd!("license-audit")
        .args(["report", "-p", &path_arg(project.path())])
        .args(["-f", "json", "-o", "-"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["reportFormat"], "license-audit-report");
    assert_eq!(json["project"], "com.example:app:1.0.0");
    assert_eq!(json["settings"]["skipOptionals"], true);
    assert_eq!(json["transitiveLicenses"].as_array().unwrap().len(), 0);
}

#[test]
fn test_report_settings_mismatch() {
    let project = create_test_project();
    validate(project.path(), &["-l", "Apache-2.0", "-l", "MIT", "-l", "EPL-1.0"]).code(0);
    report(project.path(), &["--skip-optionals"])
        .code(3)
        .stderr(predicate::str::contains("Report generation failed"));
}

// ============================================================================
// Config file
// ============================================================================

#[test]
fn test_config_file_supplies_allow_list_and_format() {
    let project = create_test_project();
    fs::write(
        project.path().join("license-audit.config.yml"),
        r#"
valid_licenses:
  - Apache-2.0
  - MIT
skip_test_scope: true
results_dir: build/audit
output_dir: build/report
format: json
"#,
    )
    .unwrap();

    validate(project.path(), &[]).code(0);
    assert!(project
        .path()
        .join("build/audit/settings.properties")
        .exists());

    report(project.path(), &[]).code(0);
    let json = fs::read_to_string(
        project
            .path()
            .join("build/report/dependency-licenses-report.json"),
    )
    .unwrap();
    assert!(json.contains("\"reportFormat\": \"license-audit-report\""));
}

#[test]
fn test_cli_overrides_config_file() {
    let project = create_test_project();
    fs::write(
        project.path().join("license-audit.config.yml"),
        "valid_licenses:\n  - GPL-3.0\n",
    )
    .unwrap();

    validate(project.path(), &["-l", "Apache-2.0", "-l", "MIT", "--skip-test-scope"]).code(0);
}

#[test]
fn test_explicit_config_path() {
    let project = create_test_project();
    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("audit.yml");
    fs::write(&config_path, "valid_licenses: [GPL-3.0]\n").unwrap();

    validate(
        project.path(),
        &["-c", &path_arg(&config_path)],
    )
    .code(1);
}

#[test]
fn test_invalid_config_file() {
    let project = create_test_project();
    fs::write(
        project.path().join("license-audit.config.yml"),
        "valid_licenses: [[[broken",
    )
    .unwrap();

    validate(project.path(), &["-l", "MIT"])
        .code(3)
        .stderr(predicate::str::contains("Failed to parse config file"));
}
