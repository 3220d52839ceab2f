//! Tax command - hand taxable income bases to the tariff engine

use super::{format_chf, load_rates, read_scenario};
use crate::core::{build_tax_bases, EngineCapability, PendingTariffs, TaxEngine};
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct TaxCommand {
    /// Scenario JSON file. Reads from stdin if not specified.
    #[arg(default_value = "-")]
    file: PathBuf,

    /// JSON file with rate overrides applied on top of the 2025 rates
    #[arg(short, long)]
    rates: Option<PathBuf>,

    /// Only report whether tax tariffs are available
    #[arg(long)]
    probe: bool,
}

impl TaxCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let engine = PendingTariffs;
        if self.probe {
            match engine.capability() {
                EngineCapability::Implemented => println!("Tax tariffs: available"),
                EngineCapability::NotYetImplemented => println!("Tax tariffs: not yet implemented"),
            }
            return Ok(());
        }

        let scenario = read_scenario(&self.file)?;
        let rates = load_rates(self.rates.as_deref())?;
        let bases = build_tax_bases(
            &scenario.payroll,
            &scenario.dividends,
            &scenario.deductions,
            &rates,
        )?;

        let result = engine
            .compute(&bases, &scenario.wealth)
            .with_context(|| {
                format!(
                    "cannot compute tax for taxable income {} (federal) / {} (zh)",
                    format_chf(bases.taxable_income_federal),
                    format_chf(bases.taxable_income_zh)
                )
            })?;

        println!("Federal income tax: {}", format_chf(result.federal_income_tax));
        println!("Zurich state tax: {}", format_chf(result.zh_state_tax));
        println!("Zurich municipal tax: {}", format_chf(result.zh_municipal_tax));
        println!("Zurich wealth tax: {}", format_chf(result.zh_wealth_tax));
        println!("Total income tax: {}", format_chf(result.total_income_tax()));
        println!("Total tax: {}", format_chf(result.total_tax()));
        Ok(())
    }
}
