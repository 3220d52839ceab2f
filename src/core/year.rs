use chrono::{Datelike, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Swiss tax year (runs 1 January to 31 December)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct TaxYear(pub i32);

impl TaxYear {
    /// Create a tax year from a date
    pub fn from_date(date: NaiveDate) -> Self {
        TaxYear(date.year())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::from_date(date) == *self
    }
}

impl std::fmt::Display for TaxYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn tax_year_is_calendar_year() {
        assert_eq!(TaxYear::from_date(date(2025, 1, 1)), TaxYear(2025));
        assert_eq!(TaxYear::from_date(date(2025, 12, 31)), TaxYear(2025));
        assert_eq!(TaxYear::from_date(date(2024, 12, 31)), TaxYear(2024));
    }

    #[test]
    fn contains_only_dates_in_year() {
        let ty = TaxYear(2025);
        assert!(ty.contains(date(2025, 6, 30)));
        assert!(!ty.contains(date(2026, 1, 1)));
        assert!(!ty.contains(date(2024, 12, 31)));
    }

    #[test]
    fn tax_year_display() {
        assert_eq!(TaxYear(2025).to_string(), "2025");
    }
}
