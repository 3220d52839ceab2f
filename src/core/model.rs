use super::error::Error;
use super::year::TaxYear;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::io::Read;
use std::str::FromStr;
use zhtax_derive::InputFields;

/// Description of one input field, generated by `#[derive(InputFields)]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputField {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CivilStatus {
    #[default]
    Single,
    Married,
    RegisteredPartnership,
    Divorced,
    Widowed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, InputFields)]
pub struct PersonProfile {
    /// Age at the end of the tax year
    pub age: u32,
    /// single, married, registered_partnership, divorced or widowed
    #[serde(default)]
    pub civil_status: CivilStatus,
    /// Municipality of residence (e.g. "Zurich (Seebach)")
    pub residence_municipality: String,
    /// Canton code (e.g. "ZH")
    pub canton: String,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub pays_church_tax: bool,
    /// Residence permit (e.g. "B", "C")
    #[serde(default)]
    pub permit_type: String,
    /// Salary is subject to withholding tax (Quellensteuer)
    #[serde(default)]
    pub taxed_at_source: bool,
    /// Tax year the figures belong to
    pub tax_year: TaxYear,
}

/// Salary and employee-side social insurance for one year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, InputFields)]
pub struct PayrollInputs {
    /// Gross annual salary
    #[schemars(with = "f64")]
    pub gross_salary_annual: Decimal,
    /// AHV/IV/EO employee contribution
    #[schemars(with = "f64")]
    pub ahv_iv_eo_employee: Decimal,
    /// ALV (unemployment) employee contribution
    #[schemars(with = "f64")]
    pub alv_employee: Decimal,
    /// UVG-NBU (non-occupational accident) employee contribution
    #[schemars(with = "f64")]
    pub uvg_nbu_employee: Decimal,
    /// BVG (pension fund) employee contribution
    #[schemars(with = "f64")]
    pub bvg_employee: Decimal,
    /// Quellensteuer withheld over the year
    #[serde(default)]
    #[schemars(with = "f64")]
    pub withholding_tax_annual: Decimal,
    /// Net salary from the Lohnausweis; replaces the computed net salary
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub lohnausweis_net_salary: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, InputFields)]
pub struct DividendInputs {
    /// Gross dividend before withholding tax
    #[schemars(with = "f64")]
    pub gross_dividend: Decimal,
    /// Verrechnungssteuer retained on the dividend
    #[serde(default)]
    #[schemars(with = "f64")]
    pub withholding_tax: Decimal,
    /// Payment date (YYYY-MM-DD)
    pub payment_date: NaiveDate,
    /// Shareholding qualifies for partial taxation
    #[serde(default)]
    pub qualified_participation: bool,
}

/// How the job expense deduction is determined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum JobExpenseMethod {
    /// Percentage of net salary within a floor and ceiling
    #[default]
    LumpSum,
    /// Sum of itemised commuting, meals and other expenses
    Actual,
    /// Amount entered directly
    Manual,
}

impl JobExpenseMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobExpenseMethod::LumpSum => "lump_sum",
            JobExpenseMethod::Actual => "actual",
            JobExpenseMethod::Manual => "manual",
        }
    }
}

impl FromStr for JobExpenseMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lump_sum" => Ok(JobExpenseMethod::LumpSum),
            "actual" => Ok(JobExpenseMethod::Actual),
            "manual" => Ok(JobExpenseMethod::Manual),
            other => Err(Error::UnknownMethod(other.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for JobExpenseMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for JobExpenseMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, InputFields)]
pub struct DeductionInputs {
    /// Health insurance premiums paid
    #[schemars(with = "f64")]
    pub health_insurance_premiums: Decimal,
    /// lump_sum, actual or manual
    #[serde(default)]
    pub job_expense_method: JobExpenseMethod,
    /// Job expenses when the method is manual
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub job_expense_manual_amount: Option<Decimal>,
    /// Commuting costs when the method is actual
    #[serde(default)]
    #[schemars(with = "f64")]
    pub commuting_actual: Decimal,
    /// Meal costs when the method is actual
    #[serde(default)]
    #[schemars(with = "f64")]
    pub meals_actual: Decimal,
    /// Other job expenses when the method is actual
    #[serde(default)]
    #[schemars(with = "f64")]
    pub other_actual: Decimal,
    /// Voluntary pillar 3a contribution
    #[serde(default)]
    #[schemars(with = "f64")]
    pub pillar_3a_contribution: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, InputFields)]
pub struct WealthInputs {
    /// Taxable net wealth at year end
    #[serde(default)]
    #[schemars(with = "f64")]
    pub taxable_wealth: Decimal,
}

/// A complete set of inputs for one taxpayer and year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Scenario {
    pub name: String,
    pub person: PersonProfile,
    pub payroll: PayrollInputs,
    pub dividends: DividendInputs,
    pub deductions: DeductionInputs,
    #[serde(default)]
    pub wealth: WealthInputs,
}

/// Read a scenario from JSON
pub fn read_scenario_json<R: Read>(reader: R) -> anyhow::Result<Scenario> {
    let scenario: Scenario = serde_json::from_reader(reader)?;
    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const MINIMAL: &str = r#"{
        "name": "minimal",
        "person": { "age": 41, "residence_municipality": "Winterthur", "canton": "ZH", "tax_year": 2025 },
        "payroll": {
            "gross_salary_annual": 90000,
            "ahv_iv_eo_employee": 4770,
            "alv_employee": 990,
            "uvg_nbu_employee": "924.5",
            "bvg_employee": 3100
        },
        "dividends": { "gross_dividend": 0, "payment_date": "2025-05-15" },
        "deductions": { "health_insurance_premiums": 3900 }
    }"#;

    #[test]
    fn method_from_str() {
        assert_eq!("lump_sum".parse(), Ok(JobExpenseMethod::LumpSum));
        assert_eq!("actual".parse(), Ok(JobExpenseMethod::Actual));
        assert_eq!("manual".parse(), Ok(JobExpenseMethod::Manual));
        assert_eq!(
            "flat".parse::<JobExpenseMethod>(),
            Err(Error::UnknownMethod("flat".to_string()))
        );
    }

    #[test]
    fn minimal_scenario_uses_defaults() {
        let scenario = read_scenario_json(MINIMAL.as_bytes()).unwrap();
        assert_eq!(scenario.person.civil_status, CivilStatus::Single);
        assert_eq!(scenario.person.tax_year, TaxYear(2025));
        assert_eq!(scenario.payroll.uvg_nbu_employee, dec!(924.5));
        assert_eq!(scenario.payroll.lohnausweis_net_salary, None);
        assert_eq!(scenario.deductions.job_expense_method, JobExpenseMethod::LumpSum);
        assert_eq!(scenario.deductions.pillar_3a_contribution, Decimal::ZERO);
        assert!(!scenario.dividends.qualified_participation);
        assert_eq!(scenario.wealth, WealthInputs::default());
    }

    #[test]
    fn unknown_method_rejected_on_read() {
        let json = MINIMAL.replace(
            r#""health_insurance_premiums": 3900"#,
            r#""health_insurance_premiums": 3900, "job_expense_method": "flat_rate""#,
        );
        let err = read_scenario_json(json.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("unknown job expense method 'flat_rate'"));
    }

    #[test]
    fn input_fields_from_doc_comments() {
        let fields = PayrollInputs::input_fields();
        assert_eq!(fields.len(), 7);
        assert_eq!(fields[0].name, "gross_salary_annual");
        assert!(fields[0].required);
        assert_eq!(fields[0].description, "Gross annual salary");

        let net = fields
            .iter()
            .find(|f| f.name == "lohnausweis_net_salary")
            .unwrap();
        assert!(!net.required);

        let withholding = fields
            .iter()
            .find(|f| f.name == "withholding_tax_annual")
            .unwrap();
        assert!(!withholding.required);
    }
}
