use super::model::{
    CivilStatus, DeductionInputs, DividendInputs, JobExpenseMethod, PayrollInputs, PersonProfile,
    Scenario, WealthInputs,
};
use super::year::TaxYear;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Single employee in Zurich with a CHF 108,000 salary and a CHF 30,000 qualified dividend
pub fn baseline() -> Scenario {
    Scenario {
        name: "baseline".to_string(),
        person: PersonProfile {
            age: 30,
            civil_status: CivilStatus::Single,
            residence_municipality: "Zurich (Seebach)".to_string(),
            canton: "ZH".to_string(),
            has_children: false,
            pays_church_tax: false,
            permit_type: "B".to_string(),
            taxed_at_source: true,
            tax_year: TaxYear(2025),
        },
        payroll: PayrollInputs {
            gross_salary_annual: dec!(108000),
            ahv_iv_eo_employee: dec!(5724),
            alv_employee: dec!(1188),
            uvg_nbu_employee: dec!(1109.40),
            bvg_employee: dec!(2574),
            withholding_tax_annual: dec!(10767.60),
            lohnausweis_net_salary: None,
        },
        dividends: DividendInputs {
            gross_dividend: dec!(30000),
            withholding_tax: dec!(10500),
            payment_date: NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date"),
            qualified_participation: true,
        },
        deductions: DeductionInputs {
            health_insurance_premiums: dec!(4392),
            job_expense_method: JobExpenseMethod::LumpSum,
            job_expense_manual_amount: None,
            commuting_actual: Decimal::ZERO,
            meals_actual: Decimal::ZERO,
            other_actual: Decimal::ZERO,
            pillar_3a_contribution: Decimal::ZERO,
        },
        wealth: WealthInputs {
            taxable_wealth: dec!(75000),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::read_scenario_json;

    #[test]
    fn baseline_matches_json_fixture() {
        let json = include_str!("../../tests/data/baseline.json");
        let mut scenario = read_scenario_json(json.as_bytes()).unwrap();
        assert_eq!(scenario.wealth.taxable_wealth, dec!(75000));

        scenario.name = "baseline".to_string();
        assert_eq!(scenario, baseline());
    }
}
