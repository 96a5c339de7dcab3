//! State stores
//!
//! In-memory ownership of accounts and active loans. Both stores are plain
//! data structures; atomicity comes from the ledger service's lock.

pub mod accounts;
pub mod loans;

pub use accounts::{Account, AccountStore};
pub use loans::LoanRegistry;
