//! Loan records
//!
//! A loan starts life as a request, is funded by exactly one lender, and is
//! evicted from the live registry the moment it is repaid. The only record of
//! a repaid loan is its audit log entry.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{fees, DomainError};

/// Longest accepted loan duration (100 years). Keeps the due date well
/// inside chrono's representable range; `Duration::days` panics far past it.
pub const MAX_DURATION_DAYS: i64 = 36_500;

/// Lifecycle status of a loan.
///
/// Legal transitions: `Requested --fund--> Funded --repay--> Repaid`.
/// `Repaid` is terminal and only ever observed in archived audit payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    Requested,
    Funded,
    Repaid,
}

/// A peer-to-peer loan.
///
/// The lender is set exactly once, at funding, and never changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanRecord {
    pub id: Uuid,
    pub borrower: String,
    pub amount: Decimal,
    /// Interest accrued at request time (3.5% of the principal)
    pub interest: Decimal,
    pub due: DateTime<Utc>,
    pub status: LoanStatus,
    pub lender: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LoanRecord {
    /// Create a new loan request due `duration_days` from now.
    ///
    /// The duration must be between 1 and [`MAX_DURATION_DAYS`]; anything
    /// outside that range is rejected rather than folded into a due date.
    pub fn request(
        borrower: impl Into<String>,
        amount: Decimal,
        duration_days: i64,
    ) -> Result<Self, DomainError> {
        if !(1..=MAX_DURATION_DAYS).contains(&duration_days) {
            return Err(DomainError::InvalidAmount(format!(
                "loan duration must be between 1 and {} days, got {}",
                MAX_DURATION_DAYS, duration_days
            )));
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            borrower: borrower.into(),
            amount,
            interest: fees::loan_interest(amount),
            due: now + Duration::days(duration_days),
            status: LoanStatus::Requested,
            lender: None,
            created_at: now,
        })
    }

    /// Transition `Requested -> Funded`, binding the lender.
    ///
    /// Callers must only invoke this on a `Requested` loan; the registry
    /// guarantees that by searching within the matching status.
    pub fn fund(&mut self, lender: impl Into<String>) {
        debug_assert_eq!(self.status, LoanStatus::Requested);
        self.status = LoanStatus::Funded;
        self.lender = Some(lender.into());
    }

    /// Mark the loan repaid. Used on the evicted record before archiving.
    pub fn settle(&mut self) {
        debug_assert_eq!(self.status, LoanStatus::Funded);
        self.status = LoanStatus::Repaid;
    }

    /// Whether this loan matches a funding offer.
    pub fn matches_offer(&self, borrower: &str, amount: Decimal) -> bool {
        self.status == LoanStatus::Requested && self.borrower == borrower && self.amount == amount
    }

    /// Whether this loan is awaiting repayment by `borrower`.
    pub fn is_repayable_by(&self, borrower: &str) -> bool {
        self.status == LoanStatus::Funded && self.borrower == borrower
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_request_starts_unfunded() {
        let loan = LoanRecord::request("user2", dec!(2000), 30).unwrap();
        assert_eq!(loan.status, LoanStatus::Requested);
        assert!(loan.lender.is_none());
        assert_eq!(loan.interest, dec!(70));
    }

    #[test]
    fn test_due_date_from_duration() {
        let loan = LoanRecord::request("user2", dec!(500), 30).unwrap();
        let days = (loan.due - loan.created_at).num_days();
        assert_eq!(days, 30);
    }

    #[test]
    fn test_request_rejects_non_positive_duration() {
        for duration in [0, -1, i64::MIN] {
            let result = LoanRecord::request("user2", dec!(2000), duration);
            assert!(matches!(result, Err(DomainError::InvalidAmount(_))));
        }
    }

    #[test]
    fn test_request_rejects_absurd_duration() {
        // the larger two would overflow the due-date arithmetic
        for duration in [MAX_DURATION_DAYS + 1, 100_000_000, i64::MAX] {
            let result = LoanRecord::request("user2", dec!(2000), duration);
            assert!(matches!(result, Err(DomainError::InvalidAmount(_))));
        }
    }

    #[test]
    fn test_request_accepts_max_duration() {
        let loan = LoanRecord::request("user2", dec!(2000), MAX_DURATION_DAYS).unwrap();
        let days = (loan.due - loan.created_at).num_days();
        assert_eq!(days, MAX_DURATION_DAYS);
    }

    #[test]
    fn test_fund_binds_lender() {
        let mut loan = LoanRecord::request("user2", dec!(2000), 30).unwrap();
        loan.fund("user1");
        assert_eq!(loan.status, LoanStatus::Funded);
        assert_eq!(loan.lender.as_deref(), Some("user1"));
    }

    #[test]
    fn test_matches_offer_requires_exact_amount() {
        let loan = LoanRecord::request("user2", dec!(2000), 30).unwrap();
        assert!(loan.matches_offer("user2", dec!(2000)));
        assert!(!loan.matches_offer("user2", dec!(1999)));
        assert!(!loan.matches_offer("user1", dec!(2000)));
    }

    #[test]
    fn test_funded_loan_no_longer_matches_offers() {
        let mut loan = LoanRecord::request("user2", dec!(2000), 30).unwrap();
        loan.fund("user1");
        assert!(!loan.matches_offer("user2", dec!(2000)));
        assert!(loan.is_repayable_by("user2"));
        assert!(!loan.is_repayable_by("user1"));
    }
}
