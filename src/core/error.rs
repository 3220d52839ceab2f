/// Errors raised while deriving taxable income bases.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("rate '{0}' not found in registry")]
    RateNotFound(String),
    #[error("manual job expense method selected without an amount")]
    MissingManualAmount,
    #[error("unknown job expense method '{0}' (expected lump_sum, actual or manual)")]
    UnknownMethod(String),
    #[error("invalid insurance scope '{0}' (expected zh or federal)")]
    InvalidScope(String),
    #[error("amount out of range while computing {0}")]
    AmountOverflow(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
