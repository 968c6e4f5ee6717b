//! Negative equity check against the collateral's estimated market value

use crate::loan::Loan;

/// Amount owed beyond the collateral's value.
///
/// A market value of zero or less means "unknown" and yields `None`, as does a
/// balance at or below the market value.
pub fn negative_equity(balance: f64, market_value: f64) -> Option<f64> {
    if market_value <= 0.0 || balance <= market_value {
        None
    } else {
        Some(balance - market_value)
    }
}

impl Loan {
    pub fn negative_equity(&self) -> Option<f64> {
        self.estimated_market_value
            .and_then(|value| negative_equity(self.balance, value))
    }
}
