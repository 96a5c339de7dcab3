//! API Routes
//!
//! HTTP endpoint definitions: fee-bearing deposits/withdrawals, the loan
//! lifecycle, and the audit ledger view at `/blockchain`.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::audit::AuditRecord;
use crate::domain::{Amount, DomainError, LoanRecord};
use crate::error::AppError;
use crate::ledger::Ledger;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Deserialize)]
pub struct FundsRequest {
    pub user: String,
    pub amount: String,
}

#[derive(Debug, Serialize)]
pub struct FundsResponse {
    pub message: String,
    pub net_amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct RequestLoanRequest {
    pub borrower: String,
    pub amount: String,
    /// Loan duration in days
    pub duration: i64,
}

#[derive(Debug, Deserialize)]
pub struct FundLoanRequest {
    pub lender: String,
    pub borrower: String,
    pub amount: String,
}

#[derive(Debug, Deserialize)]
pub struct RepayLoanRequest {
    pub borrower: String,
    /// Accepted for wire compatibility; the repayment figure always comes
    /// from the loan record, never from the request.
    #[serde(default)]
    pub amount: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoanResponse {
    pub message: String,
    pub loan: LoanRecord,
}

#[derive(Debug, Serialize)]
pub struct RepayResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub user: String,
    pub finnocoins: Decimal,
    pub finnopoints: u64,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<Arc<Ledger>> {
    Router::new()
        .route("/add-funds", post(add_funds))
        .route("/withdraw-funds", post(withdraw_funds))
        .route("/request-loan", post(request_loan))
        .route("/fund-loan", post(fund_loan))
        .route("/repay-loan", post(repay_loan))
        .route("/blockchain", get(view_ledger))
        .route("/balance/:user", get(get_balance))
}

fn parse_amount(raw: &str) -> Result<Amount, AppError> {
    raw.parse::<Amount>()
        .map_err(DomainError::from)
        .map_err(AppError::from)
}

// =========================================================================
// POST /add-funds
// =========================================================================

/// Deposit Finnocoins (2% fee withheld)
async fn add_funds(
    State(ledger): State<Arc<Ledger>>,
    Json(request): Json<FundsRequest>,
) -> Result<Json<FundsResponse>, AppError> {
    let amount = parse_amount(&request.amount)?;
    let net = ledger.deposit(&request.user, amount)?;

    Ok(Json(FundsResponse {
        message: format!("Added {} Finnocoins after fee deduction", net),
        net_amount: net,
    }))
}

// =========================================================================
// POST /withdraw-funds
// =========================================================================

/// Withdraw Finnocoins (gross debited, net of 2% fee reported)
async fn withdraw_funds(
    State(ledger): State<Arc<Ledger>>,
    Json(request): Json<FundsRequest>,
) -> Result<Json<FundsResponse>, AppError> {
    let amount = parse_amount(&request.amount)?;
    let net = ledger.withdraw(&request.user, amount)?;

    Ok(Json(FundsResponse {
        message: format!("Withdrawn {} Finnocoins after fee deduction", net),
        net_amount: net,
    }))
}

// =========================================================================
// POST /request-loan
// =========================================================================

/// Submit a loan request
async fn request_loan(
    State(ledger): State<Arc<Ledger>>,
    Json(request): Json<RequestLoanRequest>,
) -> Result<Json<LoanResponse>, AppError> {
    let amount = parse_amount(&request.amount)?;
    let loan = ledger.request_loan(&request.borrower, amount, request.duration)?;

    Ok(Json(LoanResponse {
        message: "Loan request submitted".to_string(),
        loan,
    }))
}

// =========================================================================
// POST /fund-loan
// =========================================================================

/// Fund an open loan request
async fn fund_loan(
    State(ledger): State<Arc<Ledger>>,
    Json(request): Json<FundLoanRequest>,
) -> Result<Json<LoanResponse>, AppError> {
    let amount = parse_amount(&request.amount)?;
    let loan = ledger.fund_loan(&request.lender, &request.borrower, amount)?;

    Ok(Json(LoanResponse {
        message: "Loan funded".to_string(),
        loan,
    }))
}

// =========================================================================
// POST /repay-loan
// =========================================================================

/// Repay the borrower's oldest funded loan
async fn repay_loan(
    State(ledger): State<Arc<Ledger>>,
    Json(request): Json<RepayLoanRequest>,
) -> Result<Json<RepayResponse>, AppError> {
    ledger.repay_loan(&request.borrower)?;

    Ok(Json(RepayResponse {
        message: "Loan repaid successfully".to_string(),
    }))
}

// =========================================================================
// GET /blockchain
// =========================================================================

/// View the full audit ledger, oldest first
async fn view_ledger(State(ledger): State<Arc<Ledger>>) -> Json<Vec<AuditRecord>> {
    Json(ledger.audit_records())
}

// =========================================================================
// GET /balance/:user
// =========================================================================

/// Read a user's balances
async fn get_balance(
    State(ledger): State<Arc<Ledger>>,
    Path(user): Path<String>,
) -> Result<Json<BalanceResponse>, AppError> {
    let account = ledger.account(&user)?;

    Ok(Json(BalanceResponse {
        user,
        finnocoins: account.finnocoins.value(),
        finnopoints: account.finnopoints,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_funds_request_deserialize() {
        let json = r#"{ "user": "user1", "amount": "1000" }"#;
        let request: FundsRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.user, "user1");
        assert_eq!(request.amount, "1000");
    }

    #[test]
    fn test_request_loan_deserialize() {
        let json = r#"{ "borrower": "user2", "amount": "2000", "duration": 30 }"#;
        let request: RequestLoanRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.borrower, "user2");
        assert_eq!(request.duration, 30);
    }

    #[test]
    fn test_repay_loan_amount_is_optional() {
        let request: RepayLoanRequest =
            serde_json::from_str(r#"{ "borrower": "user2" }"#).unwrap();
        assert!(request.amount.is_none());

        let request: RepayLoanRequest =
            serde_json::from_str(r#"{ "borrower": "user2", "amount": "999" }"#).unwrap();
        assert_eq!(request.amount.as_deref(), Some("999"));
    }
}
