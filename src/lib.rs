//! finnoLedger Library
//!
//! Re-exports modules for integration testing and external use.

pub mod api;
pub mod audit;
pub mod config;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod store;

pub use config::Config;
pub use domain::{Amount, AmountError, Balance, DomainError, LoanRecord, LoanStatus};
pub use error::AppError;
pub use ledger::Ledger;
