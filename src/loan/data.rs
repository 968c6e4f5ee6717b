//! Loan data structures consumed by the payoff calculations

use crate::error::PlannerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Native payment cadence of a loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentFrequency {
    /// One payment per calendar month
    Monthly,
    /// One payment every two weeks (26 per year)
    Biweekly,
}

impl PaymentFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::Biweekly => "biweekly",
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentFrequency {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(PaymentFrequency::Monthly),
            "biweekly" => Ok(PaymentFrequency::Biweekly),
            other => Err(PlannerError::UnknownFrequency(other.to_string())),
        }
    }
}

/// A single amortizing loan as entered by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    /// Current principal owed
    pub balance: f64,

    /// Nominal annual percentage rate (9.99 means 9.99%)
    pub annual_rate_percent: f64,

    /// Payment made on the loan's own cadence
    pub payment_amount: f64,

    /// Cadence of `payment_amount`
    pub payment_frequency: PaymentFrequency,

    /// Fixed extra amount applied every simulated month
    #[serde(default)]
    pub extra_payment_monthly: f64,

    /// Estimated collateral value, if known
    #[serde(default)]
    pub estimated_market_value: Option<f64>,
}

impl Loan {
    pub fn new(
        balance: f64,
        annual_rate_percent: f64,
        payment_amount: f64,
        payment_frequency: PaymentFrequency,
    ) -> Self {
        Self {
            balance,
            annual_rate_percent,
            payment_amount,
            payment_frequency,
            extra_payment_monthly: 0.0,
            estimated_market_value: None,
        }
    }

    pub fn with_extra_payment(mut self, extra_payment_monthly: f64) -> Self {
        self.extra_payment_monthly = extra_payment_monthly;
        self
    }

    pub fn with_market_value(mut self, market_value: f64) -> Self {
        self.estimated_market_value = Some(market_value);
        self
    }

    /// Copy of the loan with negative or non-finite amounts replaced by zero.
    ///
    /// The calculations assume sanitized input; form and file layers call this
    /// before handing a loan to the engine.
    pub fn clamped(&self) -> Self {
        Self {
            balance: non_negative(self.balance),
            annual_rate_percent: non_negative(self.annual_rate_percent),
            payment_amount: non_negative(self.payment_amount),
            payment_frequency: self.payment_frequency,
            extra_payment_monthly: non_negative(self.extra_payment_monthly),
            estimated_market_value: self.estimated_market_value.map(non_negative),
        }
    }
}

impl Default for Loan {
    /// The vehicle loan a fresh tracker starts with
    fn default() -> Self {
        Loan::new(40_000.0, 9.99, 418.0, PaymentFrequency::Biweekly)
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// A loan tagged with a display name, as read from a batch file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedLoan {
    pub name: String,
    pub loan: Loan,
}
