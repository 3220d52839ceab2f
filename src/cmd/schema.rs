//! Schema command - print expected input formats

use crate::core::{
    Calculation, DeductionInputs, DividendInputs, InputField, PayrollInputs, PersonProfile,
    RateOverrides, Scenario, WealthInputs,
};
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Which schema to print
    #[arg(value_enum, default_value = "scenario")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for scenario files
    Scenario,
    /// JSON Schema for rate override files
    Rates,
    /// JSON Schema for `bases --json` output
    Calculation,
    /// Scenario field descriptions
    Fields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let schema = match self.format {
            SchemaFormat::Scenario => schema_for!(Scenario),
            SchemaFormat::Rates => schema_for!(RateOverrides),
            SchemaFormat::Calculation => schema_for!(Calculation),
            SchemaFormat::Fields => {
                self.print_fields();
                return Ok(());
            }
        };
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_fields(&self) {
        let sections: [(&str, &[InputField]); 5] = [
            ("person", PersonProfile::input_fields()),
            ("payroll", PayrollInputs::input_fields()),
            ("dividends", DividendInputs::input_fields()),
            ("deductions", DeductionInputs::input_fields()),
            ("wealth", WealthInputs::input_fields()),
        ];

        println!("Scenario Input Format");
        println!("=====================");
        for (section, fields) in sections {
            println!();
            println!("{}:", section);
            for field in fields {
                let req = if field.required { "required" } else { "optional" };
                println!("  {:28} ({:8})  {}", field.name, req, field.description);
            }
        }
        println!();
        println!("Amounts are CHF as JSON numbers or strings; dates are YYYY-MM-DD.");
    }
}
