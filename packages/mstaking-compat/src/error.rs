use cosmwasm_std::{
    CheckedFromRatioError, DecimalRangeExceeded, DivideByZeroError, OverflowError, StdError,
};

#[derive(thiserror::Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),
    #[error(transparent)]
    Overflow(#[from] OverflowError),
    #[error(transparent)]
    DivideByZero(#[from] DivideByZeroError),
    #[error(transparent)]
    CheckedFromRatio(#[from] CheckedFromRatioError),
    #[error(transparent)]
    DecimalRangeExceeded(#[from] DecimalRangeExceeded),
    #[error(transparent)]
    TryFrom(#[from] std::num::TryFromIntError),
    #[error(transparent)]
    Prost(#[from] prost::DecodeError),
    #[error("Address Error: {0}")]
    Address(String),
    #[error("validator does not exist: {0}")]
    ValidatorNotFound(String),
    #[error("commission cannot be more than 100%")]
    CommissionHuge {},
    #[error("commission cannot be more than the max rate")]
    CommissionGtMaxRate {},
    #[error("commission change rate cannot be more than the max rate")]
    CommissionChangeRateGtMaxRate {},
    #[error("insufficient delegation shares")]
    InsufficientShares {},
    #[error("unknown query path: {0}")]
    UnknownQueryPath(String),
    /// The bonded set walk failed partway, e.g. a corrupt entry. Keepers
    /// report walk failures through this variant.
    #[error("Iteration Error: {0}")]
    Iteration(String),
}

impl From<ContractError> for StdError {
    fn from(source: ContractError) -> Self {
        Self::generic_err(source.to_string())
    }
}

pub type ContractResult<T> = std::result::Result<T, ContractError>;
