//! E2E tests for the zhtax command line

use std::process::{Command, Output};

fn zhtax(args: &[&str]) -> Output {
    Command::new("cargo")
        .args(["run", "--quiet", "--"])
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Test the built-in baseline scenario
#[test]
fn baseline_table() {
    let output = zhtax(&["baseline"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("TAXABLE INCOME (baseline, tax year 2025)"));
    assert!(stdout.contains("97404.60"));
    assert!(stdout.contains("Job expenses (lump_sum)"));
    assert!(stdout.contains("119111.86"));
    assert!(stdout.contains("113111.86"));
    assert!(stdout.contains("Rates fingerprint:"));
}

/// Test a scenario file matching the baseline gives the same bases
#[test]
fn bases_json_from_file() {
    let output = zhtax(&["bases", "tests/data/baseline.json", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("\"scenario\": \"baseline-file\""));
    assert!(stdout.contains("\"taxable_income_federal\": \"119111.862"));
    assert!(stdout.contains("\"taxable_income_zh\": \"113111.862"));
    assert!(stdout.contains("\"job_expense_method\": \"lump_sum\""));
    assert!(stdout.contains("\"warnings\": []"));
}

/// Test CSV breakdown output
#[test]
fn bases_csv() {
    let output = zhtax(&["bases", "tests/data/baseline.json", "--csv"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.starts_with("item,federal,zh"));
    assert!(stdout.contains("Gross salary,108000,108000"));
    assert!(stdout.contains("Taxable dividend,21000"));
}

/// Test rate overrides change the insurance deduction per scope
#[test]
fn bases_with_rate_overrides() {
    let output = zhtax(&[
        "bases",
        "tests/data/baseline.json",
        "--rates",
        "tests/data/insurance_caps.json",
        "--json",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("\"insurance_federal\": \"1800\""));
    assert!(stdout.contains("\"insurance_zh\": \"2900\""));
    assert!(stdout.contains("\"taxable_income_federal\": \"121703.862"));
    assert!(stdout.contains("\"taxable_income_zh\": \"114603.862"));
}

/// Test manual job expenses without an amount are rejected
#[test]
fn manual_method_without_amount_fails() {
    let output = zhtax(&["bases", "tests/data/manual_missing.json"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("manual job expense method selected without an amount"));
}

/// Test unknown job expense methods are rejected when reading the scenario
#[test]
fn unknown_method_fails() {
    let output = zhtax(&["bases", "tests/data/unknown_method.json"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("unknown job expense method 'flat_rate'"));
}

/// Test the rate registry listing
#[test]
fn rates_listing() {
    let output = zhtax(&["rates", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("\"tax_year\": \"2025\""));
    assert!(stdout.contains("\"fingerprint\""));
    assert!(stdout.contains("\"key\": \"zh_job_expense_lump_sum_percent\""));
    assert!(stdout.contains("\"key\": \"pillar_3a_max_with_bvg\""));
    assert!(stdout.contains("\"last_verified\": \"2025-01-15\""));
}

/// Test overrides show up with their provenance in the listing
#[test]
fn rates_listing_with_overrides() {
    let output = zhtax(&["rates", "--rates", "tests/data/insurance_caps.json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("RATES (2025)"));
    assert!(stdout.contains("2025-09-01"));
    assert!(stdout.contains("1800"));
}

/// Test the tax engine fails loudly instead of reporting zero tax
#[test]
fn tax_engine_not_implemented() {
    let output = zhtax(&["tax", "tests/data/baseline.json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("not implemented yet"));
    assert!(!stdout.contains("Total tax"));
}

/// Test the tax engine capability probe
#[test]
fn tax_engine_probe() {
    let output = zhtax(&["tax", "--probe"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("not yet implemented"));
}

/// Test schema output
#[test]
fn schema_outputs() {
    let output = zhtax(&["schema"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("\"title\": \"Scenario\""));
    assert!(stdout.contains("lohnausweis_net_salary"));

    let output = zhtax(&["schema", "fields"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("payroll:"));
    assert!(stdout.contains("Gross annual salary"));
}
