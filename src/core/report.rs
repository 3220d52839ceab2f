use super::calc::{
    checked_mul, dividend_taxable, insurance_premium_deduction, job_expense_deduction,
    net_salary_for_job_lump_sum, raw_taxable_income, Scope, TaxBases,
};
use super::error::Result;
use super::model::{JobExpenseMethod, Scenario};
use super::rates::{keys, Cap, Rates};
use super::warnings::Warning;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::Serialize;

/// Every intermediate figure behind a pair of tax bases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Calculation {
    pub scenario: String,
    /// Registry fingerprint of the rates used
    pub rates_fingerprint: String,
    #[schemars(with = "f64")]
    pub net_salary: Decimal,
    pub job_expense_method: JobExpenseMethod,
    #[schemars(with = "f64")]
    pub job_expense: Decimal,
    #[schemars(with = "f64")]
    pub insurance_federal: Decimal,
    #[schemars(with = "f64")]
    pub insurance_zh: Decimal,
    #[schemars(with = "f64")]
    pub dividend_taxable_federal: Decimal,
    #[schemars(with = "f64")]
    pub dividend_taxable_zh: Decimal,
    pub bases: TaxBases,
    pub warnings: Vec<Warning>,
}

impl Calculation {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn insurance(&self, scope: Scope) -> Decimal {
        match scope {
            Scope::Federal => self.insurance_federal,
            Scope::Zh => self.insurance_zh,
        }
    }

    pub fn dividend_taxable(&self, scope: Scope) -> Decimal {
        match scope {
            Scope::Federal => self.dividend_taxable_federal,
            Scope::Zh => self.dividend_taxable_zh,
        }
    }
}

/// Compute the tax bases of a scenario together with their breakdown
pub fn calculate(scenario: &Scenario, rates: &Rates) -> Result<Calculation> {
    let Scenario {
        name,
        person,
        payroll,
        dividends,
        deductions,
        ..
    } = scenario;

    let mut warnings = Vec::new();

    if person.tax_year != rates.year() {
        warnings.push(Warning::TaxYearMismatch {
            scenario: person.tax_year,
            rates: rates.year(),
        });
    }

    let net_salary = net_salary_for_job_lump_sum(payroll)?;
    let job_expense = job_expense_deduction(payroll, deductions, rates)?;
    if deductions.job_expense_method == JobExpenseMethod::Manual {
        if let Some(amount) = deductions.job_expense_manual_amount {
            if amount < Decimal::ZERO {
                warnings.push(Warning::NegativeManualAmount { amount });
            }
        }
    }

    let insurance_federal = insurance_premium_deduction(deductions, rates, Scope::Federal)?;
    let insurance_zh = insurance_premium_deduction(deductions, rates, Scope::Zh)?;
    let dividend_taxable_federal = dividend_taxable(dividends, rates, Scope::Federal)?;
    let dividend_taxable_zh = dividend_taxable(dividends, rates, Scope::Zh)?;

    let raw_federal = raw_taxable_income(
        payroll,
        deductions,
        job_expense,
        insurance_federal,
        dividend_taxable_federal,
    )?;
    let raw_zh = raw_taxable_income(
        payroll,
        deductions,
        job_expense,
        insurance_zh,
        dividend_taxable_zh,
    )?;
    for (scope, raw) in [(Scope::Federal, raw_federal), (Scope::Zh, raw_zh)] {
        if raw < Decimal::ZERO {
            warnings.push(Warning::NegativeBaseClamped { scope, raw });
        }
    }

    if let Cap::Capped(ceiling) = rates.cap(keys::PILLAR_3A_MAX_WITH_BVG)? {
        if deductions.pillar_3a_contribution > ceiling {
            warnings.push(Warning::Pillar3aAboveCeiling {
                contribution: deductions.pillar_3a_contribution,
                ceiling,
            });
        }
    }

    let expected_withholding = checked_mul(
        "expected withholding",
        dividends.gross_dividend,
        rates.value(keys::WITHHOLDING_TAX_DIVIDEND_RATE)?,
    )?
    .round_dp(2);
    if expected_withholding != dividends.withholding_tax {
        warnings.push(Warning::DividendWithholdingMismatch {
            expected: expected_withholding,
            actual: dividends.withholding_tax,
        });
    }

    if !person.tax_year.contains(dividends.payment_date) {
        warnings.push(Warning::DividendOutsideTaxYear {
            payment_date: dividends.payment_date,
            tax_year: person.tax_year,
        });
    }

    for warning in &warnings {
        log::warn!("{}: {}", name, warning);
    }

    let bases = TaxBases {
        taxable_income_federal: raw_federal.max(Decimal::ZERO),
        taxable_income_zh: raw_zh.max(Decimal::ZERO),
    };
    log::debug!(
        "{}: taxable income federal={}, zh={}",
        name,
        bases.taxable_income_federal,
        bases.taxable_income_zh
    );

    Ok(Calculation {
        scenario: name.clone(),
        rates_fingerprint: rates.fingerprint(),
        net_salary,
        job_expense_method: deductions.job_expense_method,
        job_expense,
        insurance_federal,
        insurance_zh,
        dividend_taxable_federal,
        dividend_taxable_zh,
        bases,
        warnings,
    })
}
