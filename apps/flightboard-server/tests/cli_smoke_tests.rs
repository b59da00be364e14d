//! CLI smoke tests for the flightboard-server binary
//!
//! These tests verify that the CLI commands work correctly, including
//! configuration validation, catalog policy, help output, and basic
//! command functionality.

use std::process::{Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::timeout;

/// Helper to run the flightboard-server binary with given arguments
fn run_flightboard_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_flightboard-server"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute flightboard-server")
}

/// Helper to run the flightboard-server binary with timeout
async fn run_flightboard_server_with_timeout(
    args: &[&str],
    timeout_duration: Duration,
) -> Result<std::process::Output, Box<dyn std::error::Error>> {
    let mut cmd = tokio::process::Command::new(env!("CARGO_BIN_EXE_flightboard-server"));
    cmd.args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    match timeout(timeout_duration, cmd.output()).await {
        Ok(result) => result.map_err(|e| e.into()),
        Err(elapsed) => Err(elapsed.into()),
    }
}

/// Write a config whose data dir lives inside `dir`.
fn write_config(dir: &TempDir, port: u16) -> std::path::PathBuf {
    let config_path = dir.path().join("config.yaml");
    let data_dir = dir.path().join("data").to_string_lossy().replace('\\', "/");

    let config_content = format!(
        r#"
server:
  host: "127.0.0.1"
  port: {}

storage:
  data_dir: "{}"

logging:
  console_level: error
"#,
        port, data_dir
    );

    std::fs::write(&config_path, config_content).expect("Failed to write config file");
    config_path
}

const SAMPLE_CATALOG: &str = r#"[
  {
    "id": "7a4b2c1d-0e5f-4a6b-8c7d-9e0f1a2b3c4d",
    "number": "FL900",
    "origin": "BOS",
    "destination": "MIA",
    "departureUtc": "2025-09-05T08:15:00Z",
    "arrivalUtc": "2025-09-05T11:10:00Z",
    "status": "On Time"
  }
]"#;

#[test]
fn test_cli_help_command() {
    let output = run_flightboard_server(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("flightboard-server") || stdout.contains("Flightboard"),
        "Should contain binary name"
    );
    assert!(
        stdout.contains("Usage:") || stdout.contains("USAGE:"),
        "Should contain usage information"
    );
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(
        stdout.contains("check"),
        "Should contain 'check' subcommand"
    );
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(
        stdout.contains("--strict-catalog"),
        "Should mention the catalog policy flag"
    );
}

#[test]
fn test_cli_version_command() {
    let output = run_flightboard_server(&["--version"]);

    assert!(output.status.success(), "Version command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("flightboard-server"),
        "Should contain binary name"
    );
    assert!(
        stdout.chars().any(|c| c.is_ascii_digit()),
        "Should contain version numbers"
    );
}

#[test]
fn test_cli_invalid_command() {
    let output = run_flightboard_server(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("invalid") || stderr.contains("unexpected"),
        "Should contain error message about invalid command"
    );
}

#[test]
fn test_cli_config_validation_missing_file() {
    let output = run_flightboard_server(&["--config", "/nonexistent/config.yaml", "check"]);

    assert!(!output.status.success(), "Should fail with missing config");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("config") || stderr.contains("Config") || stderr.contains("not found"),
        "Should mention config file issue: {}",
        stderr
    );
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("invalid.yaml");

    // Write invalid YAML
    std::fs::write(&config_path, "invalid: yaml: content: [unclosed")
        .expect("Failed to write file");

    let output = run_flightboard_server(&["--config", config_path.to_str().unwrap(), "check"]);

    assert!(!output.status.success(), "Should fail with invalid YAML");
}

#[test]
fn test_cli_check_with_valid_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(&temp_dir, 0);

    let output = run_flightboard_server(&["--config", config_path.to_str().unwrap(), "check"]);

    if !output.status.success() {
        eprintln!("STDERR: {}", String::from_utf8_lossy(&output.stderr));
        eprintln!("STDOUT: {}", String::from_utf8_lossy(&output.stdout));
    }
    assert!(output.status.success(), "Should succeed with valid config");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Configuration check passed"),
        "Should indicate successful validation: {}",
        stdout
    );
    // No flights file on disk: the lenient default substitutes the
    // built-in sample catalog.
    assert!(
        stdout.contains("3 flight(s)"),
        "Should fall back to the sample catalog: {}",
        stdout
    );
}

#[test]
fn test_cli_check_reads_catalog_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(&temp_dir, 0);

    let data_dir = temp_dir.path().join("data");
    std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");
    std::fs::write(data_dir.join("flights.json"), SAMPLE_CATALOG)
        .expect("Failed to write catalog");

    let output = run_flightboard_server(&["--config", config_path.to_str().unwrap(), "check"]);

    assert!(output.status.success(), "Should succeed with a catalog file");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("1 flight(s)"),
        "Should load the provided catalog: {}",
        stdout
    );
}

#[test]
fn test_cli_strict_catalog_fails_without_catalog_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(&temp_dir, 0);

    let output = run_flightboard_server(&[
        "--config",
        config_path.to_str().unwrap(),
        "--strict-catalog",
        "check",
    ]);

    assert!(
        !output.status.success(),
        "Strict mode should fail when the catalog file is missing"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("catalog"),
        "Should mention the catalog: {}",
        stderr
    );
}

#[test]
fn test_cli_print_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(&temp_dir, 9191);

    let output = run_flightboard_server(&[
        "--config",
        config_path.to_str().unwrap(),
        "--print-config",
    ]);

    assert!(output.status.success(), "Print-config should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("server:"), "Should print the server section");
    assert!(
        stdout.contains("9191"),
        "Should reflect the configured port: {}",
        stdout
    );
}

#[tokio::test]
async fn test_cli_run_command_starts_server() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    // Port 0 => ephemeral port, so parallel test runs never collide.
    let config_path = write_config(&temp_dir, 0);

    let result = run_flightboard_server_with_timeout(
        &["--config", config_path.to_str().unwrap(), "run"],
        Duration::from_secs(5),
    )
    .await;

    // Timing out means the server was up and serving.
    match result {
        Err(err) => {
            assert!(
                err.to_string().contains("elapsed"),
                "Server should still be running after startup: {}",
                err
            );
        }
        Ok(output) => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!(
                "Server exited early.\nSTDOUT: {}\nSTDERR: {}",
                stdout, stderr
            );
        }
    }
}

#[test]
fn test_cli_config_flag_short_form() {
    let output = run_flightboard_server(&["-c", "/nonexistent/config.yaml", "check"]);

    assert!(
        !output.status.success(),
        "Should fail with missing config file"
    );
}

#[test]
fn test_cli_subcommand_help() {
    let output = run_flightboard_server(&["run", "--help"]);
    assert!(
        output.status.success(),
        "Run subcommand help should succeed"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("run") || stdout.contains("server"),
        "Should contain information about run command"
    );

    let output = run_flightboard_server(&["check", "--help"]);
    assert!(
        output.status.success(),
        "Check subcommand help should succeed"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("check") || stdout.contains("configuration"),
        "Should contain information about check command"
    );
}
