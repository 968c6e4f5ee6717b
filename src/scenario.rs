//! Scenario runner for what-if comparisons and batch projections
//!
//! Holds one projection configuration and runs many loans or extra-payment
//! variants through it.

use crate::loan::{Loan, NamedLoan};
use crate::projection::{PayoffEngine, PayoffProjection, PayoffStatus, ProjectionConfig};
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Outcome of one extra-payment variant relative to the loan as entered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraPaymentScenario {
    /// Extra monthly payment used in this variant
    pub extra_payment_monthly: f64,
    pub months_remaining: u32,
    pub total_interest: f64,
    pub total_paid: f64,
    pub status: PayoffStatus,
    /// Months saved against the loan's own extra payment (negative if longer)
    pub months_saved: i64,
    /// Interest saved against the loan's own extra payment
    pub interest_saved: f64,
}

/// Projection result for a named loan in a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    pub name: String,
    pub projection: PayoffProjection,
}

/// Runs projections that share one configuration
///
/// # Example
/// ```
/// use payoff_planner::{Loan, PaymentFrequency, ScenarioRunner};
///
/// let runner = ScenarioRunner::new();
/// let loan = Loan::new(10_000.0, 7.0, 250.0, PaymentFrequency::Monthly);
/// let scenarios = runner.compare_extra_payments(&loan, &[0.0, 50.0, 100.0]);
/// assert!(scenarios[2].interest_saved > scenarios[1].interest_saved);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: PayoffEngine,
}

impl ScenarioRunner {
    /// Create runner with the default 360-month configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProjectionConfig) -> Self {
        Self {
            engine: PayoffEngine::new(config),
        }
    }

    pub fn config(&self) -> &ProjectionConfig {
        self.engine.config()
    }

    /// Run a single projection
    pub fn run(&self, loan: &Loan) -> PayoffProjection {
        self.engine.project(loan)
    }

    /// Run projections for many loans in parallel; output order matches input
    pub fn run_batch(&self, loans: &[NamedLoan]) -> Vec<BatchResult> {
        let results: Vec<BatchResult> = loans
            .par_iter()
            .map(|named| BatchResult {
                name: named.name.clone(),
                projection: self.engine.project(&named.loan),
            })
            .collect();

        info!("Projected {} loans", results.len());
        results
    }

    /// Project the loan once per extra amount and compare each against the
    /// loan's current extra payment. Negative or non-finite extras count as 0.
    pub fn compare_extra_payments(&self, loan: &Loan, extras: &[f64]) -> Vec<ExtraPaymentScenario> {
        let baseline = self.engine.project(loan);

        extras
            .iter()
            .map(|&extra| if extra.is_finite() { extra.max(0.0) } else { 0.0 })
            .map(|extra| {
                let variant = loan.clone().with_extra_payment(extra);
                let projection = self.engine.project(&variant);

                ExtraPaymentScenario {
                    extra_payment_monthly: extra,
                    months_remaining: projection.months_remaining,
                    total_interest: projection.total_interest,
                    total_paid: projection.total_paid,
                    status: projection.status,
                    months_saved: baseline.months_remaining as i64 - projection.months_remaining as i64,
                    interest_saved: baseline.total_interest - projection.total_interest,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::PaymentFrequency;

    fn car_loan() -> Loan {
        Loan::new(40_000.0, 9.99, 418.0, PaymentFrequency::Biweekly)
    }

    #[test]
    fn test_compare_extra_payments() {
        let runner = ScenarioRunner::new();
        let scenarios = runner.compare_extra_payments(&car_loan(), &[0.0, 100.0, 250.0]);
        assert_eq!(scenarios.len(), 3);

        // Zero extra is the baseline itself
        assert_eq!(scenarios[0].months_saved, 0);
        assert_eq!(scenarios[0].interest_saved, 0.0);

        // Larger extra payments finish sooner and cost less interest
        assert!(scenarios[1].months_saved > 0);
        assert!(scenarios[2].months_saved > scenarios[1].months_saved);
        assert!(scenarios[2].interest_saved > scenarios[1].interest_saved);
        assert!(scenarios.iter().all(|s| s.status == PayoffStatus::Paid));
    }

    #[test]
    fn test_compare_against_loan_extra() {
        let runner = ScenarioRunner::new();
        let loan = car_loan().with_extra_payment(100.0);
        let scenarios = runner.compare_extra_payments(&loan, &[0.0]);

        assert!(scenarios[0].months_saved < 0);
        assert!(scenarios[0].interest_saved < 0.0);
    }

    #[test]
    fn test_invalid_extras_compare_as_zero() {
        let runner = ScenarioRunner::new();
        let scenarios = runner.compare_extra_payments(&car_loan(), &[-500.0, f64::NAN, f64::INFINITY]);

        assert_eq!(scenarios.len(), 3);
        for s in &scenarios {
            assert_eq!(s.extra_payment_monthly, 0.0);
            assert_eq!(s.months_saved, 0);
            assert_eq!(s.status, PayoffStatus::Paid);
        }
    }

    #[test]
    fn test_run_batch_preserves_order() {
        let runner = ScenarioRunner::with_config(ProjectionConfig {
            max_months: 120,
            ..Default::default()
        });

        let loans: Vec<NamedLoan> = [5_000.0, 10_000.0, 0.0, 20_000.0]
            .iter()
            .enumerate()
            .map(|(i, &balance)| NamedLoan {
                name: format!("loan-{}", i),
                loan: Loan::new(balance, 6.0, 300.0, PaymentFrequency::Monthly),
            })
            .collect();

        let results = runner.run_batch(&loans);
        assert_eq!(results.len(), 4);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.name, format!("loan-{}", i));
            assert_eq!(result.projection, runner.run(&loans[i].loan));
        }

        assert_eq!(results[2].projection.months_remaining, 0);
        assert!(results[3].projection.months_remaining > results[1].projection.months_remaining);
    }
}
