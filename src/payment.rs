//! Payment normalization and simple interest accrual estimates
//!
//! Everything here is a pure function of its arguments. Callers format for
//! display; no rounding is applied.

use crate::loan::{Loan, PaymentFrequency};

/// Bi-weekly installments made in a year
pub const PAYMENTS_PER_YEAR_BIWEEKLY: f64 = 26.0;

pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Day count used by the daily interest estimate
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Payment normalized to a monthly cadence.
///
/// A bi-weekly plan makes 26 payments a year, slightly more than two per month.
pub fn monthly_equivalent_payment(loan: &Loan) -> f64 {
    match loan.payment_frequency {
        PaymentFrequency::Monthly => loan.payment_amount,
        PaymentFrequency::Biweekly => {
            loan.payment_amount * PAYMENTS_PER_YEAR_BIWEEKLY / MONTHS_PER_YEAR
        }
    }
}

/// Simple monthly interest: `balance * APR / 12`
pub fn monthly_interest(balance: f64, annual_rate_percent: f64) -> f64 {
    balance * (annual_rate_percent / 100.0) / MONTHS_PER_YEAR
}

/// Simple daily interest: `balance * APR / 365`
pub fn daily_interest(balance: f64, annual_rate_percent: f64) -> f64 {
    balance * (annual_rate_percent / 100.0) / DAYS_PER_YEAR
}

impl Loan {
    pub fn monthly_payment(&self) -> f64 {
        monthly_equivalent_payment(self)
    }

    /// Interest the current balance accrues over one month
    pub fn monthly_interest(&self) -> f64 {
        monthly_interest(self.balance, self.annual_rate_percent)
    }

    pub fn daily_interest(&self) -> f64 {
        daily_interest(self.balance, self.annual_rate_percent)
    }
}
