//! Boundary to the tariff engine that turns taxable income into tax owed.
//!
//! No tariff tables are modelled yet. The only engine, [`PendingTariffs`],
//! reports [`EngineCapability::NotYetImplemented`] and fails every computation
//! rather than returning zero tax.

use super::calc::TaxBases;
use super::model::WealthInputs;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("{0} tax engine is not implemented yet")]
    NotImplemented(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCapability {
    Implemented,
    NotYetImplemented,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxResult {
    pub federal_income_tax: Decimal,
    pub zh_state_tax: Decimal,
    pub zh_municipal_tax: Decimal,
    pub zh_wealth_tax: Decimal,
}

impl TaxResult {
    pub fn total_income_tax(&self) -> Decimal {
        self.federal_income_tax + self.zh_state_tax + self.zh_municipal_tax
    }

    pub fn total_tax(&self) -> Decimal {
        self.total_income_tax() + self.zh_wealth_tax
    }
}

pub trait TaxEngine {
    fn capability(&self) -> EngineCapability;

    fn compute_federal_tax(&self, bases: &TaxBases) -> Result<Decimal, EngineError>;

    /// Cantonal (state) and municipal income tax
    fn compute_state_and_municipal_tax(
        &self,
        bases: &TaxBases,
    ) -> Result<(Decimal, Decimal), EngineError>;

    fn compute_wealth_tax(&self, wealth: &WealthInputs) -> Result<Decimal, EngineError>;

    fn compute(&self, bases: &TaxBases, wealth: &WealthInputs) -> Result<TaxResult, EngineError> {
        let federal_income_tax = self.compute_federal_tax(bases)?;
        let (zh_state_tax, zh_municipal_tax) = self.compute_state_and_municipal_tax(bases)?;
        let zh_wealth_tax = self.compute_wealth_tax(wealth)?;
        Ok(TaxResult {
            federal_income_tax,
            zh_state_tax,
            zh_municipal_tax,
            zh_wealth_tax,
        })
    }
}

/// Placeholder until federal and Zurich tariffs are modelled
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingTariffs;

impl TaxEngine for PendingTariffs {
    fn capability(&self) -> EngineCapability {
        EngineCapability::NotYetImplemented
    }

    fn compute_federal_tax(&self, _bases: &TaxBases) -> Result<Decimal, EngineError> {
        Err(EngineError::NotImplemented("federal"))
    }

    fn compute_state_and_municipal_tax(
        &self,
        _bases: &TaxBases,
    ) -> Result<(Decimal, Decimal), EngineError> {
        Err(EngineError::NotImplemented("Zurich"))
    }

    fn compute_wealth_tax(&self, _wealth: &WealthInputs) -> Result<Decimal, EngineError> {
        Err(EngineError::NotImplemented("Zurich wealth"))
    }
}
