//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use rust_decimal::Decimal;
use thiserror::Error;

/// Business rule violations reported to the caller.
///
/// Every kind is a caller-input error; none is fatal to the process and none
/// is retried by the core.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Account key is not known to the ledger
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Primary balance cannot cover the operation
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        required: Decimal,
        available: Decimal,
    },

    /// No loan matches the fund/repay criteria
    #[error("Loan not found: {0}")]
    LoanNotFound(String),

    /// Invalid amount (zero, negative, malformed, or out of range)
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

impl DomainError {
    /// Create an insufficient funds error
    pub fn insufficient_funds(required: Decimal, available: Decimal) -> Self {
        Self::InsufficientFunds {
            required,
            available,
        }
    }
}

impl From<super::AmountError> for DomainError {
    fn from(err: super::AmountError) -> Self {
        Self::InvalidAmount(err.to_string())
    }
}
