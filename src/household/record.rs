//! Vehicle-related household record and the combined monthly summary

use crate::loan::Loan;
use serde::{Deserialize, Serialize};

/// Insurance premium paid monthly on the vehicle
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InsuranceCost {
    pub monthly_amount: f64,
}

/// Credit line with a fixed, user-entered monthly interest cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditLine {
    pub balance: f64,

    /// Fixed monthly interest as quoted by the lender, not derived from an APR
    pub monthly_interest_cost: f64,

    /// Optional monthly payment; zero means none planned
    #[serde(default)]
    pub monthly_payment: f64,
}

impl CreditLine {
    /// Months to clear the balance paying straight into principal.
    ///
    /// Ignores interest entirely; `None` when no payment is planned.
    pub fn estimated_months_to_payoff(&self) -> Option<u32> {
        if self.monthly_payment > 0.0 {
            Some((self.balance / self.monthly_payment).ceil() as u32)
        } else {
            None
        }
    }
}

impl Default for CreditLine {
    fn default() -> Self {
        Self {
            balance: 7_000.0,
            monthly_interest_cost: 63.73,
            monthly_payment: 0.0,
        }
    }
}

/// Everything the vehicle page tracks. Missing sections load as defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleRecord {
    pub car_loan: Loan,
    pub insurance: InsuranceCost,
    pub credit_line: CreditLine,
}

/// Monthly cash impact of the vehicle record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdSummary {
    /// Car loan payment normalized to monthly
    pub car_monthly_payment: f64,
    pub insurance_monthly: f64,
    pub credit_line_interest: f64,
    pub total_monthly_impact: f64,
    pub credit_line_months_to_payoff: Option<u32>,
    pub car_negative_equity: Option<f64>,
}

impl HouseholdSummary {
    pub fn from_record(record: &VehicleRecord) -> Self {
        let car_monthly_payment = record.car_loan.monthly_payment();
        let insurance_monthly = record.insurance.monthly_amount;
        let credit_line_interest = record.credit_line.monthly_interest_cost;

        Self {
            car_monthly_payment,
            insurance_monthly,
            credit_line_interest,
            total_monthly_impact: car_monthly_payment + insurance_monthly + credit_line_interest,
            credit_line_months_to_payoff: record.credit_line.estimated_months_to_payoff(),
            car_negative_equity: record.car_loan.negative_equity(),
        }
    }
}
