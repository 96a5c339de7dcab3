//! Loan registry
//!
//! Insertion-ordered registry of active loans. Lookups are a linear scan
//! taking the first match, so when duplicate requests exist the oldest one
//! wins. That scan order is load-bearing for correctness and must not be
//! replaced with an index.

use rust_decimal::Decimal;

use crate::domain::{DomainError, LoanRecord};

/// Holds every active (not yet repaid) loan.
#[derive(Debug, Default)]
pub struct LoanRegistry {
    loans: Vec<LoanRecord>,
}

impl LoanRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new loan request, preserving insertion order.
    pub fn insert(&mut self, loan: LoanRecord) {
        self.loans.push(loan);
    }

    /// First `Requested` loan by `borrower` for exactly `amount`.
    pub fn find_requested(
        &mut self,
        borrower: &str,
        amount: Decimal,
    ) -> Result<&mut LoanRecord, DomainError> {
        self.loans
            .iter_mut()
            .find(|loan| loan.matches_offer(borrower, amount))
            .ok_or_else(|| {
                DomainError::LoanNotFound(format!(
                    "no open loan request by {} for {}",
                    borrower, amount
                ))
            })
    }

    /// First `Funded` loan belonging to `borrower`.
    pub fn find_funded(&self, borrower: &str) -> Result<&LoanRecord, DomainError> {
        self.loans
            .iter()
            .find(|loan| loan.is_repayable_by(borrower))
            .ok_or_else(|| {
                DomainError::LoanNotFound(format!("no active funded loan for {}", borrower))
            })
    }

    /// Remove the first `Funded` loan belonging to `borrower` and return it.
    pub fn evict_funded(&mut self, borrower: &str) -> Result<LoanRecord, DomainError> {
        let position = self
            .loans
            .iter()
            .position(|loan| loan.is_repayable_by(borrower))
            .ok_or_else(|| {
                DomainError::LoanNotFound(format!("no active funded loan for {}", borrower))
            })?;
        Ok(self.loans.remove(position))
    }

    /// All active loans in insertion order.
    pub fn all(&self) -> &[LoanRecord] {
        &self.loans
    }

    pub fn len(&self) -> usize {
        self.loans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loans.is_empty()
    }
}
