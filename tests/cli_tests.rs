// End-to-end tests for the lintbench binary
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const FAKE_TOOLS: &str = r#"
[reference_tool]
name = "Ref"
program = "sh"
args = ["-c", "echo '[{\"messages\":[{\"severity\":2},{\"severity\":1}]}]'; exit 1", "{corpus}"]
format = "eslint-json"

[fast_tool]
name = "Fast"
program = "sh"
args = ["-c", "echo '{\"diagnostics\":[{\"severity\":\"warning\"}]}'"]
format = "oxlint-json"
"#;

fn write_config(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("lintbench.toml");
    fs::write(&path, content).unwrap();
    path
}

fn lintbench() -> Command {
    Command::cargo_bin("lintbench").unwrap()
}

// ============================================================================
// setup
// ============================================================================

#[test]
fn test_setup_generates_configured_corpus() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("corpus");
    let config = write_config(
        tmp.path(),
        r#"
[[profile]]
name = "small"
file_count = 2
lines_per_file = 50
"#,
    );

    lintbench()
        .arg("setup")
        .arg("--config")
        .arg(&config)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generating test files for benchmark"))
        .stdout(predicate::str::contains("Generating 2 small files (50 lines each)"))
        .stdout(predicate::str::contains("Generating pattern-specific files"))
        .stdout(predicate::str::contains("generated successfully! (6 files"));

    assert!(out.join("small").join("small-file-1.js").is_file());
    assert!(out.join("small").join("small-file-2.js").is_file());
    assert!(out.join("patterns").join("legacy-js.js").is_file());
}

#[test]
fn test_setup_output_dir_from_config() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("from-config");
    let config = write_config(
        tmp.path(),
        &format!(
            "output_dir = {:?}\n\n[[profile]]\nname = \"tiny\"\nfile_count = 1\nlines_per_file = 5\n",
            out.to_string_lossy()
        ),
    );

    lintbench()
        .args(["setup", "--config"])
        .arg(&config)
        .assert()
        .success();
    assert!(out.join("tiny").join("tiny-file-1.js").is_file());
}

#[test]
fn test_setup_digest_is_reproducible() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(
        tmp.path(),
        "[[profile]]\nname = \"small\"\nfile_count = 3\nlines_per_file = 30\n",
    );
    let run = || {
        let output = lintbench()
            .args(["setup", "--config"])
            .arg(&config)
            .arg("--output-dir")
            .arg(tmp.path().join("corpus"))
            .output()
            .unwrap();
        assert!(output.status.success());
        String::from_utf8(output.stdout)
            .unwrap()
            .lines()
            .last()
            .unwrap()
            .to_string()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_setup_rejects_invalid_config() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(
        tmp.path(),
        "[[profile]]\nname = \"patterns\"\nfile_count = 1\nlines_per_file = 5\n",
    );

    lintbench()
        .args(["setup", "--config"])
        .arg(&config)
        .arg("--output-dir")
        .arg(tmp.path().join("corpus"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid profile name 'patterns'"));
}

#[test]
fn test_setup_missing_config_fails() {
    lintbench()
        .args(["setup", "--config", "/nonexistent/lintbench.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/lintbench.toml"));
}

// ============================================================================
// bench
// ============================================================================

#[test]
fn test_bench_with_fake_tools_text_report() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(tmp.path(), FAKE_TOOLS);

    lintbench()
        .args(["bench", "--single-core-cpus", "1024", "--config"])
        .arg(&config)
        .arg("--corpus-dir")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("CI/CD Performance Benchmark: Fast vs Ref"))
        .stdout(predicate::str::contains("=== SINGLE CORE (CI Environment) ==="))
        .stdout(predicate::str::contains("Running Ref (1024 cores)..."))
        .stdout(predicate::str::contains("Ref completed with warnings in"))
        .stdout(predicate::str::contains("Fast completed in"))
        .stdout(predicate::str::contains("=== MULTI-CORE (Local Development) ==="))
        .stdout(predicate::str::contains("BENCHMARK RESULTS"))
        .stdout(predicate::str::contains("Speedup:"))
        .stdout(predicate::str::contains("CI Time Saving:"))
        .stdout(predicate::str::contains("Ref found: 1 errors, 1 warnings"))
        .stdout(predicate::str::contains("Fast found: 0 errors, 1 warnings"));
}

#[test]
fn test_bench_json_format_is_single_document() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(tmp.path(), FAKE_TOOLS);

    let output = lintbench()
        .args(["bench", "--format", "json", "--single-core-cpus", "1024", "--config"])
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["single_core"]["reference"]["tool"], "Ref");
    assert_eq!(value["single_core"]["reference"]["report"]["errors"], 1);
    assert_eq!(value["multi_core"]["fast"]["report"]["warnings"], 1);
    assert_eq!(value["multi_core"]["fast"]["outcome"]["status"], "success");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Running Ref"));
}

#[test]
fn test_bench_missing_tools_still_exits_zero() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(
        tmp.path(),
        r#"
[reference_tool]
name = "Ref"
program = "lintbench-missing-reference"
format = "eslint-json"

[fast_tool]
name = "Fast"
program = "lintbench-missing-fast"
format = "oxlint-json"
"#,
    );

    lintbench()
        .args(["bench", "--single-core-cpus", "1024", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("failed to launch"))
        .stdout(predicate::str::contains("Ref found: 0 errors, 0 warnings"));
}

#[test]
fn test_bench_bad_config_logs_and_exits_zero() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(tmp.path(), "not_a_key = 1\n");

    lintbench()
        .args(["bench", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_bench_zero_cores_logs_and_exits_zero() {
    lintbench()
        .args(["bench", "--single-core-cpus", "0"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid benchmark configuration"));
}

#[test]
fn test_bench_timeout_flag() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(
        tmp.path(),
        r#"
[reference_tool]
name = "Slow"
program = "sh"
args = ["-c", "sleep 30"]
format = "eslint-json"

[fast_tool]
name = "Quick"
program = "sh"
args = ["-c", "echo '[]'"]
format = "eslint-json"
"#,
    );

    lintbench()
        .args(["bench", "--timeout-secs", "1", "--single-core-cpus", "1024", "--config"])
        .arg(&config)
        .timeout(std::time::Duration::from_secs(20))
        .assert()
        .success()
        .stdout(predicate::str::contains("timed out"));
}

#[test]
fn test_debug_flag_emits_tracing_to_stderr() {
    let tmp = TempDir::new().unwrap();
    lintbench()
        .args(["--debug", "setup", "--output-dir"])
        .arg(tmp.path().join("corpus"))
        .arg("--config")
        .arg(write_config(
            tmp.path(),
            "[[profile]]\nname = \"s\"\nfile_count = 1\nlines_per_file = 5\n",
        ))
        .assert()
        .success()
        .stderr(predicate::str::contains("corpus built"));
}
