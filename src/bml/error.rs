use crate::ids::AccountId;
use crate::money::MoneyError;
use crate::Money;

use thiserror::Error;

/// Plain tag for callers that branch on the kind of failure rather than its details
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    InsufficientFunds,
    NotFound,
    InvalidArgument,
    Domain,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Insufficient funds in {account}: requested {requested}, balance {available}")]
    InsufficientFunds {
        account: AccountId,
        requested: Money,
        available: Money,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Domain rule violated: {0}")]
    Domain(String),

    #[error(transparent)]
    Money(#[from] MoneyError),
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::Money(_) => ErrorKind::Validation,
            Self::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Domain(_) => ErrorKind::Domain,
        }
    }
}
