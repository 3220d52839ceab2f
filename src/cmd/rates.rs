//! Rates command - list the rate registry with provenance

use super::load_rates;
use crate::core::{RateEntry, Rates};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct RatesCommand {
    /// JSON file with rate overrides applied on top of the 2025 rates
    #[arg(short, long)]
    rates: Option<PathBuf>,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Tabled)]
struct RateRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Year")]
    year: String,
    #[tabled(rename = "Verified")]
    verified: String,
    #[tabled(rename = "Source")]
    source: String,
}

#[derive(Debug, Serialize)]
struct RatesOutput<'a> {
    tax_year: String,
    fingerprint: String,
    rates: Vec<RateView<'a>>,
}

#[derive(Debug, Serialize)]
struct RateView<'a> {
    key: &'a str,
    #[serde(flatten)]
    entry: &'a RateEntry,
}

impl RatesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let rates = load_rates(self.rates.as_deref())?;
        if self.json {
            self.print_json(&rates)
        } else {
            self.print_table(&rates);
            Ok(())
        }
    }

    fn print_table(&self, rates: &Rates) {
        let rows: Vec<RateRow> = rates
            .iter()
            .map(|(key, entry)| RateRow {
                key: key.to_string(),
                value: entry.value.normalize().to_string(),
                year: entry.year.to_string(),
                verified: entry.last_verified.format("%Y-%m-%d").to_string(),
                source: entry.source.clone(),
            })
            .collect();

        println!();
        println!("RATES ({})", rates.year());
        println!();

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(1..2)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        println!();
        println!("Fingerprint: {}", rates.fingerprint());
    }

    fn print_json(&self, rates: &Rates) -> anyhow::Result<()> {
        let output = RatesOutput {
            tax_year: rates.year().to_string(),
            fingerprint: rates.fingerprint(),
            rates: rates
                .iter()
                .map(|(key, entry)| RateView { key, entry })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}
