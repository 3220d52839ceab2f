use super::error::{Error, Result};
use super::model::{DeductionInputs, DividendInputs, JobExpenseMethod, PayrollInputs};
use super::rates::{keys, Rates};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Jurisdiction a deduction or dividend share is computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Federal,
    Zh,
}

impl Scope {
    pub const ALL: [Scope; 2] = [Scope::Federal, Scope::Zh];

    fn health_insurance_cap_key(self) -> &'static str {
        match self {
            Scope::Federal => keys::FEDERAL_HEALTH_INSURANCE_CAP,
            Scope::Zh => keys::ZH_HEALTH_INSURANCE_CAP,
        }
    }

    fn dividend_share_key(self) -> &'static str {
        match self {
            Scope::Federal => keys::FEDERAL_DIVIDEND_QUALIFIED_SHARE,
            Scope::Zh => keys::ZH_DIVIDEND_QUALIFIED_SHARE,
        }
    }
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "federal" => Ok(Scope::Federal),
            "zh" => Ok(Scope::Zh),
            other => Err(Error::InvalidScope(other.to_string())),
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Federal => write!(f, "federal"),
            Scope::Zh => write!(f, "zh"),
        }
    }
}

/// Taxable income before tariffs are applied. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaxBases {
    #[schemars(with = "f64")]
    pub taxable_income_federal: Decimal,
    #[schemars(with = "f64")]
    pub taxable_income_zh: Decimal,
}

impl TaxBases {
    pub fn for_scope(&self, scope: Scope) -> Decimal {
        match scope {
            Scope::Federal => self.taxable_income_federal,
            Scope::Zh => self.taxable_income_zh,
        }
    }
}

/// Sum of signed amounts, failing instead of overflowing
pub(crate) fn checked_sum<I>(what: &'static str, amounts: I) -> Result<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().try_fold(Decimal::ZERO, |total, amount| {
        total
            .checked_add(amount)
            .ok_or(Error::AmountOverflow(what))
    })
}

pub(crate) fn checked_mul(what: &'static str, amount: Decimal, rate: Decimal) -> Result<Decimal> {
    amount.checked_mul(rate).ok_or(Error::AmountOverflow(what))
}

/// Net salary used as the basis of the job expense lump sum.
///
/// The Lohnausweis figure, when present, is authoritative.
pub fn net_salary_for_job_lump_sum(payroll: &PayrollInputs) -> Result<Decimal> {
    if let Some(net) = payroll.lohnausweis_net_salary {
        return Ok(net);
    }
    checked_sum(
        "net salary",
        [
            payroll.gross_salary_annual,
            -payroll.ahv_iv_eo_employee,
            -payroll.alv_employee,
            -payroll.uvg_nbu_employee,
            -payroll.bvg_employee,
        ],
    )
}

pub fn job_expense_deduction(
    payroll: &PayrollInputs,
    deductions: &DeductionInputs,
    rates: &Rates,
) -> Result<Decimal> {
    match deductions.job_expense_method {
        JobExpenseMethod::Manual => {
            let amount = deductions
                .job_expense_manual_amount
                .ok_or(Error::MissingManualAmount)?;
            Ok(amount.max(Decimal::ZERO))
        }
        JobExpenseMethod::Actual => {
            let total = checked_sum(
                "actual job expenses",
                [
                    deductions.commuting_actual,
                    deductions.meals_actual,
                    deductions.other_actual,
                ],
            )?;
            Ok(total.max(Decimal::ZERO))
        }
        JobExpenseMethod::LumpSum => {
            let net_salary = net_salary_for_job_lump_sum(payroll)?;
            let lump_sum = checked_mul(
                "job expense lump sum",
                net_salary,
                rates.value(keys::JOB_EXPENSE_LUMP_SUM_PERCENT)?,
            )?;
            // floor first, then ceiling
            let floored = lump_sum.max(rates.value(keys::JOB_EXPENSE_LUMP_SUM_MIN)?);
            let clamped = floored.min(rates.value(keys::JOB_EXPENSE_LUMP_SUM_MAX)?);
            log::debug!(
                "Job expense lump sum: net={}, raw={}, clamped={}",
                net_salary,
                lump_sum,
                clamped
            );
            Ok(clamped)
        }
    }
}

pub fn insurance_premium_deduction(
    deductions: &DeductionInputs,
    rates: &Rates,
    scope: Scope,
) -> Result<Decimal> {
    let cap = rates.cap(scope.health_insurance_cap_key())?;
    Ok(cap.apply(deductions.health_insurance_premiums))
}

/// Taxable part of the gross dividend for a scope
pub fn dividend_taxable(
    dividends: &DividendInputs,
    rates: &Rates,
    scope: Scope,
) -> Result<Decimal> {
    if !dividends.qualified_participation {
        return Ok(dividends.gross_dividend);
    }
    checked_mul(
        "taxable dividend",
        dividends.gross_dividend,
        rates.value(scope.dividend_share_key())?,
    )
}

pub fn dividend_taxable_federal(dividends: &DividendInputs, rates: &Rates) -> Result<Decimal> {
    dividend_taxable(dividends, rates, Scope::Federal)
}

pub fn dividend_taxable_zh(dividends: &DividendInputs, rates: &Rates) -> Result<Decimal> {
    dividend_taxable(dividends, rates, Scope::Zh)
}

/// Taxable income for one scope before clamping
pub(crate) fn raw_taxable_income(
    payroll: &PayrollInputs,
    deductions: &DeductionInputs,
    job_expense: Decimal,
    insurance: Decimal,
    taxable_dividend: Decimal,
) -> Result<Decimal> {
    checked_sum(
        "taxable income",
        [
            payroll.gross_salary_annual,
            -job_expense,
            -insurance,
            -payroll.bvg_employee,
            -deductions.pillar_3a_contribution,
            taxable_dividend,
        ],
    )
}

pub fn build_tax_bases(
    payroll: &PayrollInputs,
    dividends: &DividendInputs,
    deductions: &DeductionInputs,
    rates: &Rates,
) -> Result<TaxBases> {
    let job_expense = job_expense_deduction(payroll, deductions, rates)?;

    let federal = raw_taxable_income(
        payroll,
        deductions,
        job_expense,
        insurance_premium_deduction(deductions, rates, Scope::Federal)?,
        dividend_taxable_federal(dividends, rates)?,
    )?;
    let zh = raw_taxable_income(
        payroll,
        deductions,
        job_expense,
        insurance_premium_deduction(deductions, rates, Scope::Zh)?,
        dividend_taxable_zh(dividends, rates)?,
    )?;

    Ok(TaxBases {
        taxable_income_federal: federal.max(Decimal::ZERO),
        taxable_income_zh: zh.max(Decimal::ZERO),
    })
}
