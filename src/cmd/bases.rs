//! Bases command - taxable income bases with a full deduction breakdown

use super::{format_chf, load_rates, read_scenario, write_csv};
use crate::core::{calculate, Calculation, Scenario, Scope};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct BasesCommand {
    /// Scenario JSON file. Reads from stdin if not specified.
    #[arg(default_value = "-")]
    file: PathBuf,

    #[command(flatten)]
    output: OutputArgs,
}

/// Options shared by commands that print a calculation
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// JSON file with rate overrides applied on top of the 2025 rates
    #[arg(short, long)]
    pub rates: Option<PathBuf>,

    /// Output as JSON instead of formatted text
    #[arg(long, conflicts_with = "csv")]
    pub json: bool,

    /// Output breakdown rows as CSV
    #[arg(long)]
    pub csv: bool,
}

impl BasesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let scenario = read_scenario(&self.file)?;
        run(&scenario, &self.output)
    }
}

/// Calculate a scenario and print it in the requested format
pub fn run(scenario: &Scenario, output: &OutputArgs) -> anyhow::Result<()> {
    let rates = load_rates(output.rates.as_deref())?;
    let calc = calculate(scenario, &rates)?;

    if output.json {
        println!("{}", serde_json::to_string_pretty(&calc)?);
    } else if output.csv {
        write_csv(breakdown_rows(scenario, &calc), io::stdout())?;
    } else {
        print_breakdown(scenario, &calc);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
struct BreakdownRecord {
    item: String,
    federal: Decimal,
    zh: Decimal,
}

#[derive(Debug, Clone, Tabled)]
struct BreakdownRow {
    #[tabled(rename = "")]
    item: String,
    #[tabled(rename = "Federal")]
    federal: String,
    #[tabled(rename = "Zurich")]
    zh: String,
}

fn breakdown_rows(scenario: &Scenario, calc: &Calculation) -> Vec<BreakdownRecord> {
    let both = |item: &str, amount: Decimal| BreakdownRecord {
        item: item.to_string(),
        federal: amount,
        zh: amount,
    };
    let per_scope = |item: &str, amount: &dyn Fn(Scope) -> Decimal| BreakdownRecord {
        item: item.to_string(),
        federal: amount(Scope::Federal),
        zh: amount(Scope::Zh),
    };

    vec![
        both("Gross salary", scenario.payroll.gross_salary_annual),
        both(
            &format!("Job expenses ({})", calc.job_expense_method),
            deducted(calc.job_expense),
        ),
        per_scope("Health insurance premiums", &|s: Scope| deducted(calc.insurance(s))),
        both(
            "BVG employee contribution",
            deducted(scenario.payroll.bvg_employee),
        ),
        both(
            "Pillar 3a contribution",
            deducted(scenario.deductions.pillar_3a_contribution),
        ),
        per_scope("Taxable dividend", &|s: Scope| calc.dividend_taxable(s)),
        per_scope("Taxable income", &|s: Scope| calc.bases.for_scope(s)),
    ]
}

// avoids printing "-0.00"
fn deducted(amount: Decimal) -> Decimal {
    if amount.is_zero() {
        Decimal::ZERO
    } else {
        -amount
    }
}

fn print_breakdown(scenario: &Scenario, calc: &Calculation) {
    println!();
    println!(
        "TAXABLE INCOME ({}, tax year {})",
        scenario.name, scenario.person.tax_year
    );
    println!();
    println!(
        "Net salary (job expense basis): {}",
        format_chf(calc.net_salary)
    );
    println!();

    let rows: Vec<BreakdownRow> = breakdown_rows(scenario, calc)
        .into_iter()
        .map(|r| BreakdownRow {
            item: r.item,
            federal: format_chf(r.federal),
            zh: format_chf(r.zh),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
    println!();

    if calc.has_warnings() {
        println!("\u{26A0} {} warning(s):", calc.warnings.len());
        for warning in &calc.warnings {
            println!("  - {}", warning);
        }
        println!();
    }

    println!("Rates fingerprint: {}", calc.rates_fingerprint);
}
