//! Fee policy
//!
//! Pure, stateless fee arithmetic. All rates are fixed by business policy:
//! 2% on deposits and withdrawals, 3.5% loan interest, 1.5% settlement fee
//! on top of the interest-bearing total, and a flat 5 Finnopoint reward for
//! the lender on every successful repayment.

use rust_decimal::Decimal;

/// Deposit/withdrawal fee rate (2%)
const TRANSFER_FEE_RATE: Decimal = Decimal::from_parts(2, 0, 0, false, 2);

/// Loan interest rate (3.5%)
const INTEREST_RATE: Decimal = Decimal::from_parts(35, 0, 0, false, 3);

/// Settlement fee rate charged on the interest-bearing total (1.5%)
const SETTLEMENT_FEE_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 3);

/// Finnopoints credited to the lender per successful repayment
pub const LENDER_REWARD_POINTS: u64 = 5;

/// Fee withheld from a deposit of `amount`.
pub fn deposit_fee(amount: Decimal) -> Decimal {
    amount * TRANSFER_FEE_RATE
}

/// Fee reported on a withdrawal of `amount`.
///
/// The account is debited the full gross amount; the fee only reduces the
/// figure reported to the caller. This asymmetry is deliberate policy.
pub fn withdrawal_fee(amount: Decimal) -> Decimal {
    amount * TRANSFER_FEE_RATE
}

/// Interest accrued on a loan principal (3.5%).
pub fn loan_interest(principal: Decimal) -> Decimal {
    principal * INTEREST_RATE
}

/// Principal plus interest: what the lender receives back.
pub fn repayment_total(principal: Decimal) -> Decimal {
    principal + loan_interest(principal)
}

/// Settlement fee charged on an interest-bearing total.
pub fn installment_fee(total: Decimal) -> Decimal {
    total * SETTLEMENT_FEE_RATE
}

/// Everything the borrower pays: principal, interest and settlement fee.
pub fn final_repayment(principal: Decimal) -> Decimal {
    let total = repayment_total(principal);
    total + installment_fee(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deposit_fee_two_percent() {
        assert_eq!(deposit_fee(dec!(1000)), dec!(20));
        assert_eq!(deposit_fee(dec!(50)), dec!(1));
    }

    #[test]
    fn test_withdrawal_fee_matches_deposit_fee() {
        assert_eq!(withdrawal_fee(dec!(1000)), deposit_fee(dec!(1000)));
    }

    #[test]
    fn test_loan_interest() {
        assert_eq!(loan_interest(dec!(2000)), dec!(70));
    }

    #[test]
    fn test_repayment_total() {
        assert_eq!(repayment_total(dec!(2000)), dec!(2070));
    }

    #[test]
    fn test_installment_fee() {
        assert_eq!(installment_fee(dec!(2070)), dec!(31.05));
    }

    #[test]
    fn test_final_repayment_exact() {
        // 2000 * 1.035 * 1.015 with no float drift
        assert_eq!(final_repayment(dec!(2000)), dec!(2101.05));
    }

    #[test]
    fn test_final_repayment_small_principal() {
        assert_eq!(final_repayment(dec!(100)), dec!(105.0525));
    }
}
