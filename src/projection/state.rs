//! Running state of a single payoff simulation

use serde::{Deserialize, Serialize};

/// Where a simulation stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoffStatus {
    /// Balance above the payoff threshold and months remain under the cap
    Accumulating,
    /// Balance reached (effectively) zero
    Paid,
    /// Month cap reached with a balance still owing
    Capped,
}

impl PayoffStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PayoffStatus::Accumulating)
    }
}

/// State of the loan at the end of the latest simulated month
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Months simulated so far (0 before the first period)
    pub month: u32,

    /// Outstanding balance after the latest period
    pub balance: f64,

    /// Interest accrued across all simulated months
    pub total_interest: f64,

    /// Cash applied across all simulated months
    pub total_paid: f64,
}

impl ProjectionState {
    pub fn new(opening_balance: f64) -> Self {
        Self {
            month: 0,
            balance: opening_balance,
            total_interest: 0.0,
            total_paid: 0.0,
        }
    }

    /// Classify the state against the payoff threshold and month cap
    pub fn status(&self, payoff_epsilon: f64, max_months: u32) -> PayoffStatus {
        if self.balance <= payoff_epsilon {
            PayoffStatus::Paid
        } else if self.month >= max_months {
            PayoffStatus::Capped
        } else {
            PayoffStatus::Accumulating
        }
    }

    /// Record one simulated period
    pub fn apply(&mut self, payment: f64, interest: f64, closing_balance: f64) {
        self.month += 1;
        self.total_interest += interest;
        self.total_paid += payment;
        self.balance = closing_balance;
    }
}
