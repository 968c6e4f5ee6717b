//! Amortization schedule and payoff projection output structures

use super::state::PayoffStatus;
use crate::error::PlannerResult;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// One simulated month of the amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    /// 1-based month number
    pub month: u32,

    /// Total cash applied this month (regular + extra, clamped on the final month)
    pub payment: f64,

    /// Portion of the payment that reduced the balance
    pub principal: f64,

    /// Interest accrued this month
    pub interest: f64,

    /// Balance remaining after this month
    pub balance: f64,

    /// Extra amount applied this month
    pub extra_payment: f64,
}

/// Complete payoff projection for one loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffProjection {
    /// Number of simulated months (equals `schedule.len()`)
    pub months_remaining: u32,

    pub total_interest: f64,

    pub total_paid: f64,

    /// Terminal state of the simulation
    pub status: PayoffStatus,

    pub schedule: Vec<AmortizationEntry>,
}

impl PayoffProjection {
    /// Projection for a loan that is already paid off
    pub fn empty() -> Self {
        Self {
            months_remaining: 0,
            total_interest: 0.0,
            total_paid: 0.0,
            status: PayoffStatus::Paid,
            schedule: Vec::new(),
        }
    }

    /// True when the month cap stopped the simulation before payoff
    pub fn is_capped(&self) -> bool {
        self.status == PayoffStatus::Capped
    }

    /// Balance left after the last simulated month
    pub fn final_balance(&self) -> f64 {
        self.schedule.last().map(|e| e.balance).unwrap_or(0.0)
    }

    /// Months remaining split into whole years and leftover months
    pub fn years_and_months(&self) -> (u32, u32) {
        (self.months_remaining / 12, self.months_remaining % 12)
    }

    pub fn summary(&self) -> ProjectionSummary {
        let total_principal: f64 = self.schedule.iter().map(|e| e.principal).sum();
        let total_extra: f64 = self.schedule.iter().map(|e| e.extra_payment).sum();

        ProjectionSummary {
            months_remaining: self.months_remaining,
            total_interest: self.total_interest,
            total_paid: self.total_paid,
            total_principal,
            total_extra,
            final_balance: self.final_balance(),
            status: self.status,
        }
    }

    /// Write the schedule as CSV, two decimals per amount
    pub fn write_schedule_csv<W: Write>(&self, writer: W) -> PlannerResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["Month", "Payment", "Principal", "Interest", "Balance", "ExtraPayment"])?;

        for entry in &self.schedule {
            wtr.write_record([
                entry.month.to_string(),
                format!("{:.2}", entry.payment),
                format!("{:.2}", entry.principal),
                format!("{:.2}", entry.interest),
                format!("{:.2}", entry.balance),
                format!("{:.2}", entry.extra_payment),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }
}

/// Aggregate figures of a projection, without the schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub months_remaining: u32,
    pub total_interest: f64,
    pub total_paid: f64,
    pub total_principal: f64,
    pub total_extra: f64,
    pub final_balance: f64,
    pub status: PayoffStatus,
}
