pub mod calc;
pub mod engine;
pub mod error;
pub mod model;
pub mod rates;
pub mod report;
pub mod scenario;
pub mod warnings;
pub mod year;

pub use calc::{build_tax_bases, Scope};
pub use engine::{EngineCapability, PendingTariffs, TaxEngine};
pub use model::{
    read_scenario_json, DeductionInputs, DividendInputs, InputField, PayrollInputs,
    PersonProfile, Scenario, WealthInputs,
};
pub use rates::{read_rate_overrides, RateEntry, RateOverrides, Rates};
pub use report::{calculate, Calculation};
