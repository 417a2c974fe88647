//! E2E tests for the payec command surface

use std::process::Command;

fn payec(args: &[&str]) -> std::process::Output {
    Command::new("cargo")
        .args(["run", "--quiet", "--"])
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// The worked example: 1,000,000 basic salary, no deductions
#[test]
fn compute_sample_filing() {
    let output = payec(&[
        "compute",
        "-f",
        "tests/data/sample_filing.json",
        "-y",
        "2024",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("PAYE ASSESSMENT (2024)"));
    assert!(stdout.contains("Ada Obi"));
    assert!(stdout.contains("₦54,000.00"));
    assert!(stdout.contains("₦4,500.00"));
    assert!(stdout.contains("₦946,000.00"));
    assert!(stdout.contains("5.40%"));
}

/// JSON output carries the full (input, assessment) pair
#[test]
fn compute_json_output() {
    let output = payec(&[
        "compute",
        "--set",
        "basic_salary=1000000",
        "-y",
        "2024",
        "--json",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("\"reference\""));
    assert!(stdout.contains("\"assessment\""));
    assert!(stdout.contains("\"annual_tax\": \"54000"));
}

/// Batch CSV in, table out
#[test]
fn batch_table_output() {
    let output = payec(&["batch", "tests/data/filings.csv", "-y", "2024"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("BATCH PAYE ASSESSMENT (2024)"));
    assert!(stdout.contains("Ada Obi"));
    assert!(stdout.contains("Chidi Okoro"));
    assert!(stdout.contains("Filings: 3"));
}

/// Batch CSV output is machine readable
#[test]
fn batch_csv_output() {
    let output = payec(&["batch", "tests/data/filings.csv", "-y", "2024", "--csv"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("taxpayer,tin,reference"));
    assert!(stdout.contains("Ada Obi"));
    assert!(stdout.contains("54000"));
}

/// Strict validation flags what the lenient path would coerce
#[test]
fn validate_flags_bad_filing() {
    let output = payec(&["validate", "-f", "tests/data/bad_filing.json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(!output.status.success());
    assert!(stdout.contains("basic_salary"));
    assert!(stdout.contains("housing_allowance"));
    assert!(stdout.contains("number_of_dependents"));
    assert!(stdout.contains("is_disabled"));
}

/// Clean filings validate silently
#[test]
fn validate_accepts_clean_filing() {
    let output = payec(&["validate", "-f", "tests/data/sample_filing.json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("No issues found"));
}

/// Band reference table reproduces the statutory rates
#[test]
fn bands_reference_table() {
    let output = payec(&["bands", "-y", "2024"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("PROGRESSIVE TAX BANDS (2024)"));
    assert!(stdout.contains("7%"));
    assert!(stdout.contains("21%"));
    assert!(stdout.contains("₦224,000.00"));
}

/// CSV header lists every filing column
#[test]
fn schema_csv_header() {
    let output = payec(&["schema", "csv-header"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("first_name"));
    assert!(stdout.contains("basic_salary"));
    assert!(stdout.contains("is_disabled"));
}

/// Detailed report shows the band-by-band breakdown
#[test]
fn report_band_breakdown() {
    let output = payec(&[
        "report",
        "--set",
        "basic_salary=1000000",
        "-y",
        "2024",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("TAX BANDS"));
    assert!(stdout.contains("CONSOLIDATED RELIEF ALLOWANCE"));
    assert!(stdout.contains("₦21,000.00"));
    assert!(stdout.contains("₦33,000.00"));
}
