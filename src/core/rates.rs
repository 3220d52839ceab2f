use super::error::{Error, Result};
use super::year::TaxYear;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::io::Read;

/// Registry keys read by the calculation pipeline
pub mod keys {
    pub const JOB_EXPENSE_LUMP_SUM_PERCENT: &str = "zh_job_expense_lump_sum_percent";
    pub const JOB_EXPENSE_LUMP_SUM_MIN: &str = "zh_job_expense_lump_sum_min";
    pub const JOB_EXPENSE_LUMP_SUM_MAX: &str = "zh_job_expense_lump_sum_max";
    pub const FEDERAL_DIVIDEND_QUALIFIED_SHARE: &str = "federal_dividend_qualified_share";
    pub const ZH_DIVIDEND_QUALIFIED_SHARE: &str = "zh_dividend_qualified_share";
    pub const WITHHOLDING_TAX_DIVIDEND_RATE: &str = "withholding_tax_dividend_rate";
    pub const ZH_HEALTH_INSURANCE_CAP: &str = "zh_health_insurance_cap";
    pub const FEDERAL_HEALTH_INSURANCE_CAP: &str = "federal_health_insurance_cap";
    pub const PILLAR_3A_MAX_WITH_BVG: &str = "pillar_3a_max_with_bvg";
}

const ZH_JOB_EXPENSES_URL: &str =
    "https://www.zh.ch/de/steuern-finanzen/steuern/steuernatuerliche-personen/abzuege-berufsauslagen.html";
const ZH_PARTIAL_TAXATION_URL: &str =
    "https://www.zh.ch/de/steuern-finanzen/steuern/steuernatuerliche-personen/teilbesteuerung.html";
const ZH_INSURANCE_URL: &str =
    "https://www.zh.ch/de/steuern-finanzen/steuern/steuernatuerliche-personen/abzuege-versicherungspraemien.html";
const ESTV_DBST_URL: &str =
    "https://www.estv.admin.ch/estv/de/home/estv/steuerrecht/steuerrecht-direkte-bundessteuer.html";
const ESTV_VST_URL: &str =
    "https://www.estv.admin.ch/estv/de/home/verrechnungssteuer/verrechnungssteuer.html";
const ESTV_DEDUCTIONS_URL: &str =
    "https://www.estv.admin.ch/estv/de/home/direkte-bundessteuer/steuerabzuege.html";
const BSV_PILLAR_3A_URL: &str =
    "https://www.bsv.admin.ch/bsv/de/home/sozialversicherungen/bv/grundlagen-und-gesetze/gebundene-selbstvorsorge.html";

/// A single rate with its provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RateEntry {
    pub year: TaxYear,
    #[schemars(with = "f64")]
    pub value: Decimal,
    /// Where the value was published
    pub source: String,
    pub last_verified: NaiveDate,
}

/// Deduction cap read from the registry.
///
/// The registry stores a zero (or negative) cap to mean "no cap applied".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cap {
    Uncapped,
    Capped(Decimal),
}

impl Cap {
    pub fn from_value(value: Decimal) -> Self {
        if value <= Decimal::ZERO {
            Cap::Uncapped
        } else {
            Cap::Capped(value)
        }
    }

    pub fn apply(self, amount: Decimal) -> Decimal {
        match self {
            Cap::Uncapped => amount,
            Cap::Capped(cap) => amount.min(cap),
        }
    }
}

/// Rate registry for one tax year.
///
/// Overrides return a new registry; figures already computed from the old one
/// are unaffected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rates {
    year: TaxYear,
    entries: BTreeMap<String, RateEntry>,
}

impl Rates {
    /// Empty registry for a tax year
    pub fn new(year: TaxYear) -> Self {
        Rates {
            year,
            entries: BTreeMap::new(),
        }
    }

    /// Zurich rates for tax year 2025
    pub fn zurich_2025() -> Self {
        let year = TaxYear(2025);
        let verified = NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid date");
        let table = [
            (keys::JOB_EXPENSE_LUMP_SUM_PERCENT, dec!(0.03), ZH_JOB_EXPENSES_URL),
            (keys::JOB_EXPENSE_LUMP_SUM_MIN, dec!(2000), ZH_JOB_EXPENSES_URL),
            (keys::JOB_EXPENSE_LUMP_SUM_MAX, dec!(4000), ZH_JOB_EXPENSES_URL),
            (keys::FEDERAL_DIVIDEND_QUALIFIED_SHARE, dec!(0.70), ESTV_DBST_URL),
            (keys::ZH_DIVIDEND_QUALIFIED_SHARE, dec!(0.50), ZH_PARTIAL_TAXATION_URL),
            (keys::WITHHOLDING_TAX_DIVIDEND_RATE, dec!(0.35), ESTV_VST_URL),
            (keys::ZH_HEALTH_INSURANCE_CAP, dec!(0), ZH_INSURANCE_URL),
            (keys::FEDERAL_HEALTH_INSURANCE_CAP, dec!(0), ESTV_DEDUCTIONS_URL),
            (keys::PILLAR_3A_MAX_WITH_BVG, dec!(0), BSV_PILLAR_3A_URL),
        ];

        let mut rates = Rates::new(year);
        for (key, value, source) in table {
            rates.entries.insert(
                key.to_string(),
                RateEntry {
                    year,
                    value,
                    source: source.to_string(),
                    last_verified: verified,
                },
            );
        }
        rates
    }

    pub fn year(&self) -> TaxYear {
        self.year
    }

    pub fn get(&self, key: &str) -> Result<&RateEntry> {
        self.entries
            .get(key)
            .ok_or_else(|| Error::RateNotFound(key.to_string()))
    }

    pub fn value(&self, key: &str) -> Result<Decimal> {
        self.get(key).map(|entry| entry.value)
    }

    pub fn cap(&self, key: &str) -> Result<Cap> {
        self.value(key).map(Cap::from_value)
    }

    /// New registry with `key` inserted or replaced
    pub fn with_override(
        &self,
        key: &str,
        value: Decimal,
        source: &str,
        verified: NaiveDate,
    ) -> Rates {
        let mut rates = self.clone();
        let previous = rates.entries.insert(
            key.to_string(),
            RateEntry {
                year: self.year,
                value,
                source: source.to_string(),
                last_verified: verified,
            },
        );
        match previous {
            Some(old) => log::info!("Rate {} overridden: {} -> {}", key, old.value, value),
            None => log::info!("Rate {} added: {}", key, value),
        }
        rates
    }

    pub fn apply_overrides(&self, overrides: &RateOverrides) -> Rates {
        overrides.overrides.iter().fold(self.clone(), |rates, o| {
            rates.with_override(&o.key, o.value, &o.source, o.verified)
        })
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RateEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Hex SHA-256 digest over every entry, identifying this exact rate set
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.year.to_string().as_bytes());
        for (key, entry) in &self.entries {
            let line = format!(
                "\n{}={}|{}|{}|{}",
                key,
                entry.value.normalize(),
                entry.year,
                entry.source,
                entry.last_verified
            );
            hasher.update(line.as_bytes());
        }
        hex::encode(hasher.finalize())
    }
}

/// Rate override file
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct RateOverrides {
    pub overrides: Vec<RateOverride>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RateOverride {
    /// Registry key to insert or replace
    pub key: String,
    #[schemars(with = "f64")]
    pub value: Decimal,
    /// Where the new value was published
    pub source: String,
    /// Date the value was last checked against its source (YYYY-MM-DD)
    pub verified: NaiveDate,
}

/// Read rate overrides from JSON
pub fn read_rate_overrides<R: Read>(reader: R) -> anyhow::Result<RateOverrides> {
    let overrides: RateOverrides = serde_json::from_reader(reader)?;
    Ok(overrides)
}
