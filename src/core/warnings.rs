use super::calc::Scope;
use super::year::TaxYear;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Observations made during calculation. Warnings never change a figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type")]
pub enum Warning {
    /// Deductions exceeded income; the base was reported as zero.
    NegativeBaseClamped {
        scope: Scope,
        #[schemars(with = "f64")]
        raw: Decimal,
    },
    /// Negative manual job expense amount was treated as zero.
    NegativeManualAmount {
        #[schemars(with = "f64")]
        amount: Decimal,
    },
    /// Pillar 3a contribution is above the registered ceiling.
    Pillar3aAboveCeiling {
        #[schemars(with = "f64")]
        contribution: Decimal,
        #[schemars(with = "f64")]
        ceiling: Decimal,
    },
    /// Dividend withholding tax differs from the statutory rate applied to the gross dividend.
    DividendWithholdingMismatch {
        #[schemars(with = "f64")]
        expected: Decimal,
        #[schemars(with = "f64")]
        actual: Decimal,
    },
    /// Dividend was paid outside the taxpayer's tax year.
    DividendOutsideTaxYear {
        payment_date: NaiveDate,
        tax_year: TaxYear,
    },
    /// Scenario and rate registry belong to different tax years.
    TaxYearMismatch { scenario: TaxYear, rates: TaxYear },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::NegativeBaseClamped { scope, raw } => {
                write!(f, "{} taxable income was {:.2}, reported as 0.00", scope, raw)
            }
            Warning::NegativeManualAmount { amount } => {
                write!(f, "manual job expense amount {:.2} treated as 0.00", amount)
            }
            Warning::Pillar3aAboveCeiling {
                contribution,
                ceiling,
            } => write!(
                f,
                "pillar 3a contribution {:.2} exceeds ceiling {:.2}",
                contribution, ceiling
            ),
            Warning::DividendWithholdingMismatch { expected, actual } => write!(
                f,
                "dividend withholding tax {:.2} differs from expected {:.2}",
                actual, expected
            ),
            Warning::DividendOutsideTaxYear {
                payment_date,
                tax_year,
            } => write!(f, "dividend paid {} is outside tax year {}", payment_date, tax_year),
            Warning::TaxYearMismatch { scenario, rates } => {
                write!(f, "scenario is for {} but rates are for {}", scenario, rates)
            }
        }
    }
}
