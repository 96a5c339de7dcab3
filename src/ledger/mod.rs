//! Ledger service
//!
//! Orchestrates the account store, loan registry, fee policy and audit log.
//! Every operation validates its preconditions first, then commits its
//! mutations inside one critical section. Only settled loan events (fund,
//! repay) reach the audit log; deposits and withdrawals do not.
//!
//! A single global mutex guards accounts and loans together. Audit appends
//! for fund/repay happen before the lock is released, so audit sequence
//! indices always reflect commit order.

use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde_json::json;

use crate::audit::{AuditLog, AuditRecord};
use crate::domain::{fees, Amount, DomainError, LoanRecord};
use crate::store::{Account, AccountStore, LoanRegistry};

struct LedgerState {
    accounts: AccountStore,
    loans: LoanRegistry,
}

/// The ledger service. Cheap to share behind an `Arc`; all methods take
/// `&self`.
pub struct Ledger {
    state: Mutex<LedgerState>,
    audit: AuditLog,
}

impl Ledger {
    /// An empty ledger with no accounts.
    pub fn new() -> Self {
        Self::with_accounts(AccountStore::new())
    }

    /// A ledger seeded with the traditional demo accounts
    /// (user1: 10000, user2: 5000).
    pub fn with_demo_accounts() -> Self {
        Self::with_accounts(AccountStore::with_demo_accounts())
    }

    fn with_accounts(accounts: AccountStore) -> Self {
        Self {
            state: Mutex::new(LedgerState {
                accounts,
                loans: LoanRegistry::new(),
            }),
            audit: AuditLog::new(),
        }
    }

    /// Open an account with an initial balance (no-op for an existing key).
    pub fn open_account(&self, user: &str, initial: Decimal) {
        self.state.lock().accounts.open(user, initial);
    }

    /// Credit a deposit, net of the 2% fee. Returns the net amount credited.
    /// The fee is withheld, not credited anywhere.
    pub fn deposit(&self, user: &str, amount: Amount) -> Result<Decimal, DomainError> {
        let mut state = self.state.lock();
        if !state.accounts.exists(user) {
            return Err(DomainError::UserNotFound(user.to_string()));
        }

        let net = amount.value() - fees::deposit_fee(amount.value());
        state.accounts.credit(user, net)?;

        tracing::info!(user, %amount, %net, "deposit credited");
        Ok(net)
    }

    /// Withdraw funds. The account is debited the full gross amount; the
    /// returned figure is the net paid out after the 2% fee.
    pub fn withdraw(&self, user: &str, amount: Amount) -> Result<Decimal, DomainError> {
        let mut state = self.state.lock();
        if !state.accounts.exists(user) {
            return Err(DomainError::UserNotFound(user.to_string()));
        }

        let gross = amount.value();
        state.accounts.debit(user, gross)?;
        let net = gross - fees::withdrawal_fee(gross);

        tracing::info!(user, %gross, %net, "withdrawal debited");
        Ok(net)
    }

    /// Register a loan request for `borrower`, due `duration_days` from now.
    pub fn request_loan(
        &self,
        borrower: &str,
        amount: Amount,
        duration_days: i64,
    ) -> Result<LoanRecord, DomainError> {
        let mut state = self.state.lock();
        if !state.accounts.exists(borrower) {
            return Err(DomainError::UserNotFound(borrower.to_string()));
        }

        let loan = LoanRecord::request(borrower, amount.value(), duration_days)?;
        state.loans.insert(loan.clone());

        tracing::info!(borrower, %amount, loan_id = %loan.id, "loan requested");
        Ok(loan)
    }

    /// Fund the first open loan request by `borrower` for exactly `amount`.
    ///
    /// All-or-nothing: the lender debit, borrower credit and status
    /// transition commit together, then the funded loan is archived to the
    /// audit log before the lock is released.
    pub fn fund_loan(
        &self,
        lender: &str,
        borrower: &str,
        amount: Amount,
    ) -> Result<LoanRecord, DomainError> {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        if !state.accounts.exists(lender) {
            return Err(DomainError::UserNotFound(lender.to_string()));
        }

        let loan = state.loans.find_requested(borrower, amount.value())?;

        let available = state.accounts.balance(lender)?;
        if available < amount.value() {
            return Err(DomainError::insufficient_funds(amount.value(), available));
        }

        state.accounts.debit(lender, amount.value())?;
        state.accounts.credit(borrower, amount.value())?;
        loan.fund(lender);
        let funded = loan.clone();

        let record = self.archive(&funded);
        tracing::info!(
            lender,
            borrower,
            %amount,
            loan_id = %funded.id,
            audit_index = record.index,
            "loan funded"
        );
        Ok(funded)
    }

    /// Repay the borrower's oldest funded loan.
    ///
    /// The borrower pays principal, 3.5% interest and the 1.5% settlement
    /// fee; the lender receives principal plus interest and 5 Finnopoints.
    /// The loan leaves the active registry and survives only in the audit
    /// log.
    pub fn repay_loan(&self, borrower: &str) -> Result<LoanRecord, DomainError> {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        if !state.accounts.exists(borrower) {
            return Err(DomainError::UserNotFound(borrower.to_string()));
        }

        let loan = state.loans.find_funded(borrower)?;
        let principal = loan.amount;
        let total = fees::repayment_total(principal);
        let final_payment = fees::final_repayment(principal);
        // Invariant: a Funded loan always has its lender set
        let lender = loan
            .lender
            .clone()
            .expect("funded loan has a lender");

        let available = state.accounts.balance(borrower)?;
        if available < final_payment {
            return Err(DomainError::insufficient_funds(final_payment, available));
        }

        state.accounts.debit(borrower, final_payment)?;
        state.accounts.credit(&lender, total)?;
        state
            .accounts
            .credit_reward(&lender, fees::LENDER_REWARD_POINTS)?;

        let mut settled = state.loans.evict_funded(borrower)?;
        settled.settle();

        let record = self.audit.append(json!({ "loan_repaid": settled }));
        tracing::info!(
            borrower,
            lender = %lender,
            %principal,
            %final_payment,
            loan_id = %settled.id,
            audit_index = record.index,
            "loan repaid"
        );
        Ok(settled)
    }

    /// Read a user's account (balances snapshot).
    pub fn account(&self, user: &str) -> Result<Account, DomainError> {
        self.state
            .lock()
            .accounts
            .get(user)
            .cloned()
            .ok_or_else(|| DomainError::UserNotFound(user.to_string()))
    }

    /// Snapshot of all active loans, insertion order.
    pub fn active_loans(&self) -> Vec<LoanRecord> {
        self.state.lock().loans.all().to_vec()
    }

    /// The full audit log, oldest first.
    pub fn audit_records(&self) -> Vec<AuditRecord> {
        self.audit.all()
    }

    /// The audit log itself (for verification).
    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    fn archive(&self, loan: &LoanRecord) -> AuditRecord {
        let payload = serde_json::to_value(loan).expect("loan serializes to JSON");
        self.audit.append(payload)
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
