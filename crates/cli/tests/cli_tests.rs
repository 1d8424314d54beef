// End-to-end tests for the `strm` binary.
// Run with: cargo test -p strmarket-cli --test cli_tests

use std::path::PathBuf;
use std::process::{Command, Output};

fn strm() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_strm"));
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

// -------------------------------------------------------------------------
// run
// -------------------------------------------------------------------------

#[test]
fn run_prints_annual_csv() {
    let out = strm().arg("run").arg(fixture("sd.market.toml")).output().unwrap();
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));

    let text = stdout(&out);
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], "Submarket,STR Revenue,Median Rent,Revenue Multiple");
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("Mission Beach,"));
    assert!(lines[2].starts_with("Gaslamp,"));
    assert!(stderr(&out).contains("sd: 2 of 3 submarkets"));
}

#[test]
fn run_json_report() {
    let out = strm()
        .args(["run", "--json"])
        .arg(fixture("sd.market.toml"))
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));

    let json: serde_json::Value = serde_json::from_str(stdout(&out).trim()).unwrap();
    assert_eq!(json["meta"]["config_name"], "sd");
    assert_eq!(json["meta"]["join_strategy"], "fuzzy");
    assert_eq!(json["summary"]["fuzzy_joins"], 1);
    assert_eq!(json["summary"]["below_threshold"], 1);
    assert_eq!(json["markets"].as_array().unwrap().len(), 2);
    assert!(json["markets"][0]["multiple"].as_f64().unwrap() >= 2.0);
    assert!(json.get("monthly").is_none());
}

#[test]
fn run_is_reproducible_with_seed() {
    let a = strm().arg("run").arg(fixture("sd.market.toml")).output().unwrap();
    let b = strm().arg("run").arg(fixture("sd.market.toml")).output().unwrap();
    assert_eq!(stdout(&a), stdout(&b));
}

#[test]
fn run_monthly_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("monthly.csv");
    let out = strm()
        .args(["run", "--monthly", "--quiet", "--output"])
        .arg(&path)
        .arg(fixture("sd.market.toml"))
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    assert!(stdout(&out).is_empty());
    assert!(stderr(&out).is_empty());

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 25);
    assert_eq!(lines[0], "Year,Submarket,Month,STR Revenue,Median Rent,Revenue-to-Rent Multiple");
    assert!(lines[1].starts_with("2026,Mission Beach,January,"));
    assert!(lines[12].starts_with("2026,Mission Beach,December,"));
    assert!(lines[13].starts_with("2026,Gaslamp,January,"));
}

#[test]
fn run_rejects_invalid_config() {
    let out = strm().arg("run").arg(fixture("bad.market.toml")).output().unwrap();
    assert_eq!(out.status.code(), Some(3));
    assert!(stderr(&out).contains("min_multiple"));
}

#[test]
fn run_without_inputs_section() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.market.toml");
    std::fs::write(&path, "name = \"x\"\n").unwrap();
    let out = strm().arg("run").arg(&path).output().unwrap();
    assert_eq!(out.status.code(), Some(3));
    assert!(stderr(&out).contains("hint:"));
}

// -------------------------------------------------------------------------
// reconcile
// -------------------------------------------------------------------------

#[test]
fn reconcile_exact_by_default() {
    let out = strm()
        .args(["reconcile", "--seed", "1", "--revenue"])
        .arg(fixture("revenue.csv"))
        .arg("--rent")
        .arg(fixture("rent.csv"))
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    assert_eq!(text.lines().count(), 2);
    assert!(text.lines().nth(1).unwrap().starts_with("Gaslamp,"));
}

#[test]
fn reconcile_fuzzy_json() {
    let out = strm()
        .args(["reconcile", "--join", "fuzzy", "--format", "json", "--revenue"])
        .arg(fixture("revenue.csv"))
        .arg("--rent")
        .arg(fixture("rent.csv"))
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    let json: serde_json::Value = serde_json::from_str(stdout(&out).trim()).unwrap();
    assert_eq!(json["meta"]["config_name"], "revenue");
    assert_eq!(json["markets"][0]["submarket"], "Mission Beach");
}

#[test]
fn reconcile_fail_on_empty_suggests_fuzzy() {
    let out = strm()
        .args(["reconcile", "--fail-on-empty", "--min-multiple", "10", "--revenue"])
        .arg(fixture("revenue.csv"))
        .arg("--rent")
        .arg(fixture("rent.csv"))
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(5));
    let err = stderr(&out);
    assert!(err.contains("no submarket reached 10.00x"));
    assert!(err.contains("--join fuzzy"));
    // header is still written
    assert_eq!(stdout(&out), "Submarket,STR Revenue,Median Rent,Revenue Multiple\n");
}

#[test]
fn reconcile_bad_threshold_is_usage_error() {
    let out = strm()
        .args(["reconcile", "--threshold", "1.5", "--revenue"])
        .arg(fixture("revenue.csv"))
        .arg("--rent")
        .arg(fixture("rent.csv"))
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn reconcile_missing_file_is_input_error() {
    let out = strm()
        .args(["reconcile", "--revenue", "nope.csv", "--rent"])
        .arg(fixture("rent.csv"))
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(4));
    assert!(stderr(&out).contains("nope.csv"));
}

#[test]
fn reconcile_missing_column_is_input_error() {
    let out = strm()
        .args(["reconcile", "--rent-value", "median", "--revenue"])
        .arg(fixture("revenue.csv"))
        .arg("--rent")
        .arg(fixture("rent.csv"))
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(4));
    assert!(stderr(&out).contains("missing column 'median'"));
}

#[test]
fn year_requires_monthly() {
    let out = strm()
        .args(["reconcile", "--year", "2026", "--revenue"])
        .arg(fixture("revenue.csv"))
        .arg("--rent")
        .arg(fixture("rent.csv"))
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
}

// -------------------------------------------------------------------------
// match / similarity / validate
// -------------------------------------------------------------------------

#[test]
fn match_prefers_exact() {
    let out = strm()
        .args(["match", "Hillcrest", "Hillcrest", "Hillcrest Heights", "La Jolla"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "Hillcrest\t1.0000\n");
}

#[test]
fn match_below_threshold_exits_5() {
    let out = strm().args(["match", "Qwxyz", "Hillcrest", "La Jolla"]).output().unwrap();
    assert_eq!(out.status.code(), Some(5));
    assert!(stdout(&out).is_empty());

    let out = strm()
        .args(["match", "--json", "Qwxyz", "Hillcrest", "La Jolla"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(5));
    assert_eq!(stdout(&out).trim(), "null");
}

#[test]
fn match_json() {
    let out = strm()
        .args(["match", "--json", "Mission Beach", "Mission Beach, San Diego", "Ocean Beach"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    let json: serde_json::Value = serde_json::from_str(stdout(&out).trim()).unwrap();
    assert_eq!(json["match"], "Mission Beach, San Diego");
    assert_eq!(json["similarity"], 0.8);
}

#[test]
fn similarity_prints_score() {
    let out = strm().args(["similarity", "San Diego", "san diego!!"]).output().unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "1.0000\n");
}

#[test]
fn validate_config() {
    let out = strm().arg("validate").arg(fixture("sd.market.toml")).output().unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert!(stderr(&out).contains("valid: 'sd' (fuzzy join"));

    let out = strm().arg("validate").arg(fixture("bad.market.toml")).output().unwrap();
    assert_eq!(out.status.code(), Some(3));
}
