//! Domain module
//!
//! Core domain types and business logic.

pub mod amount;
pub mod error;
pub mod fees;
pub mod loan;

pub use amount::{Amount, AmountError, Balance};
pub use error::DomainError;
pub use loan::{LoanRecord, LoanStatus};
