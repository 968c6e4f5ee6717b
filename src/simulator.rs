//! Single-period what-if simulation of the next payment

use crate::loan::Loan;
use crate::payment::monthly_interest;
use serde::{Deserialize, Serialize};

/// Split of one simulated payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextPayment {
    /// Regular payment plus extra
    pub total_payment: f64,

    /// Interest accrued on the current balance for one month
    pub interest_portion: f64,

    /// Regular principal (never negative) plus the extra amount
    pub principal_portion: f64,

    /// Balance after the payment, floored at zero
    pub new_balance: f64,

    pub extra_applied: f64,
}

impl NextPayment {
    /// Principal retired beyond what the regular payment alone would retire
    pub fn additional_principal(&self, regular_payment: f64) -> f64 {
        self.principal_portion - (regular_payment - self.interest_portion)
    }
}

/// Split the next payment into interest and principal.
///
/// A regular payment that does not cover interest contributes no principal;
/// the uncovered interest is not added to the balance.
pub fn simulate_next_payment(
    current_balance: f64,
    regular_payment: f64,
    extra_amount: f64,
    annual_rate_percent: f64,
) -> NextPayment {
    let interest_portion = monthly_interest(current_balance, annual_rate_percent);
    let regular_principal = (regular_payment - interest_portion).max(0.0);
    let principal_portion = regular_principal + extra_amount;

    NextPayment {
        total_payment: regular_payment + extra_amount,
        interest_portion,
        principal_portion,
        new_balance: (current_balance - principal_portion).max(0.0),
        extra_applied: extra_amount,
    }
}

/// Simulate the next payment of a loan with an extra amount on top
pub fn simulate_loan_next_payment(loan: &Loan, extra_amount: f64) -> NextPayment {
    simulate_next_payment(
        loan.balance,
        loan.monthly_payment(),
        extra_amount,
        loan.annual_rate_percent,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::PaymentFrequency;
    use approx::assert_relative_eq;

    #[test]
    fn test_regular_payment_with_extra() {
        let result = simulate_next_payment(12_000.0, 500.0, 100.0, 12.0);

        assert_relative_eq!(result.interest_portion, 120.0, epsilon = 1e-9);
        assert_relative_eq!(result.total_payment, 600.0);
        assert_relative_eq!(result.principal_portion, 480.0, epsilon = 1e-9);
        assert_relative_eq!(result.new_balance, 11_520.0, epsilon = 1e-9);
        assert_eq!(result.extra_applied, 100.0);
        assert_relative_eq!(result.additional_principal(500.0), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_payment_below_interest_contributes_no_principal() {
        let result = simulate_next_payment(12_000.0, 50.0, 0.0, 12.0);

        assert_eq!(result.principal_portion, 0.0);
        assert_eq!(result.new_balance, 12_000.0);
        assert_relative_eq!(result.additional_principal(50.0), 70.0, epsilon = 1e-9);
    }

    #[test]
    fn test_extra_only_reduces_balance_when_regular_short() {
        let result = simulate_next_payment(12_000.0, 50.0, 200.0, 12.0);

        assert_eq!(result.principal_portion, 200.0);
        assert_eq!(result.new_balance, 11_800.0);
        assert_eq!(result.total_payment, 250.0);
    }

    #[test]
    fn test_balance_floors_at_zero() {
        let result = simulate_next_payment(100.0, 500.0, 0.0, 6.0);
        assert_eq!(result.new_balance, 0.0);
        assert!(result.principal_portion > 100.0);
    }

    #[test]
    fn test_loan_next_payment_uses_monthly_equivalent() {
        let loan = Loan::new(40_000.0, 9.99, 418.0, PaymentFrequency::Biweekly);
        let result = simulate_loan_next_payment(&loan, 0.0);

        assert_relative_eq!(result.total_payment, 418.0 * 26.0 / 12.0, epsilon = 1e-9);
        assert_relative_eq!(result.interest_portion, 333.0, epsilon = 1e-9);
        assert_relative_eq!(result.new_balance, 40_000.0 - (905.666_666_666_666_6 - 333.0), epsilon = 1e-6);
    }
}
