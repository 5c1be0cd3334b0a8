//! Fixture-based tests for wash-sale.
//!
//! Each `tests/fixtures/NAME.csv` is washed and compared with
//! `tests/fixtures/NAME_out.csv`. The CLI tests run the built binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;
use washsale_core::wash_all_lots;
use washsale_csv::{read_ledger_file, CsvConfig};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn binary() -> &'static str {
    env!("CARGO_BIN_EXE_wash-sale")
}

/// Input fixtures paired with their expected output.
fn fixture_pairs() -> Vec<(PathBuf, PathBuf)> {
    let mut pairs: Vec<(PathBuf, PathBuf)> = fs::read_dir(fixtures_dir())
        .expect("fixtures directory should exist")
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "csv"))
        .filter_map(|path| {
            let stem = path.file_stem()?.to_str()?.to_string();
            if stem.ends_with("_out") {
                return None;
            }
            let expected = path.with_file_name(format!("{stem}_out.csv"));
            expected.exists().then_some((path, expected))
        })
        .collect();
    pairs.sort();
    pairs
}

fn wash_fixture(input: &Path, expected: &Path) -> Result<(), String> {
    let config = CsvConfig::default();
    let mut ledger = read_ledger_file(input, &config).map_err(|e| e.to_string())?;
    wash_all_lots(&mut ledger).map_err(|e| e.to_string())?;
    let expected_ledger = read_ledger_file(expected, &config).map_err(|e| e.to_string())?;
    if ledger == expected_ledger {
        Ok(())
    } else {
        Err(format!("washed lots differ from {}", expected.display()))
    }
}

// ============================================================================
// Library fixtures
// ============================================================================

#[test]
fn test_all_fixtures() {
    let pairs = fixture_pairs();
    assert!(pairs.len() >= 5, "expected at least 5 fixture pairs");

    let failures: Vec<String> = pairs
        .iter()
        .filter_map(|(input, expected)| {
            wash_fixture(input, expected)
                .err()
                .map(|e| format!("{}: {e}", input.display()))
        })
        .collect();

    assert!(failures.is_empty(), "fixture failures:\n{}", failures.join("\n"));
}

#[test]
fn test_fixture_rewash_is_stable() {
    for (_, expected) in fixture_pairs() {
        let config = CsvConfig::default();
        let washed = read_ledger_file(&expected, &config).unwrap();
        let mut again = washed.clone();
        let summary = wash_all_lots(&mut again).unwrap();
        assert_eq!(summary.washes, 0, "{} washed again", expected.display());
        assert_eq!(again, washed);
    }
}

// ============================================================================
// Command line
// ============================================================================

#[test]
fn test_cli_expect_matches() {
    for (input, expected) in fixture_pairs() {
        let output = Command::new(binary())
            .arg(&input)
            .arg("--expect")
            .arg(&expected)
            .arg("--quiet")
            .output()
            .expect("failed to run wash-sale");
        assert!(
            output.status.success(),
            "{}: {}",
            input.display(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

#[test]
fn test_cli_expect_mismatch_exits_one() {
    let dir = fixtures_dir();
    let output = Command::new(binary())
        .arg(dir.join("simple.csv"))
        .arg("--expect")
        .arg(dir.join("simple.csv"))
        .arg("--quiet")
        .output()
        .expect("failed to run wash-sale");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("differs"));
}

#[test]
fn test_cli_bad_headers_exit_two() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bad.csv");
    fs::write(&path, "Date,Amount\n2014-01-01,5\n").unwrap();

    let output = Command::new(binary())
        .arg(&path)
        .output()
        .expect("failed to run wash-sale");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("error:"), "stderr: {stderr}");
    assert!(stderr.contains("unexpected CSV headers"));
}

#[test]
fn test_cli_missing_file_exit_two() {
    let output = Command::new(binary())
        .arg(fixtures_dir().join("does_not_exist.csv"))
        .output()
        .expect("failed to run wash-sale");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("file not found"));
}

#[test]
fn test_cli_writes_output_file() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("washed.csv");
    let dir = fixtures_dir();

    let status = Command::new(binary())
        .arg(dir.join("split_replacement.csv"))
        .arg("-o")
        .arg(&out)
        .arg("--quiet")
        .status()
        .expect("failed to run wash-sale");
    assert!(status.success());

    let config = CsvConfig::default();
    let written = read_ledger_file(&out, &config).unwrap();
    let expected = read_ledger_file(&dir.join("split_replacement_out.csv"), &config).unwrap();
    assert_eq!(written, expected);
}

#[test]
fn test_cli_legacy_headers_output() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("washed.csv");

    let status = Command::new(binary())
        .arg(fixtures_dir().join("simple.csv"))
        .arg("-o")
        .arg(&out)
        .arg("--legacy-headers")
        .arg("--quiet")
        .status()
        .expect("failed to run wash-sale");
    assert!(status.success());

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("Cnt,Sym,Desc,BuyDate,"));
}

#[test]
fn test_cli_json_output() {
    let output = Command::new(binary())
        .arg(fixtures_dir().join("split_loss.csv"))
        .arg("--format")
        .arg("json")
        .output()
        .expect("failed to run wash-sale");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["summary"]["washes"], 1);
    assert_eq!(json["summary"]["splits"], 1);
    assert_eq!(json["lots"].as_array().map(Vec::len), Some(3));
}

#[test]
fn test_cli_table_output() {
    let output = Command::new(binary())
        .arg(fixtures_dir().join("simple.csv"))
        .arg("--color")
        .arg("never")
        .output()
        .expect("failed to run wash-sale");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Start lots:"));
    assert!(stdout.contains("Final lots:"));
    assert!(!stdout.contains('\x1b'));
}

#[test]
fn test_cli_generate_completions() {
    let output = Command::new(binary())
        .arg("--generate-completions")
        .arg("bash")
        .output()
        .expect("failed to run wash-sale");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("wash-sale"));
}
