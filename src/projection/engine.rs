//! Core payoff engine: month-by-month amortization simulation

use super::schedule::{AmortizationEntry, PayoffProjection};
use super::state::{PayoffStatus, ProjectionState};
use crate::loan::Loan;
use crate::payment::{monthly_equivalent_payment, MONTHS_PER_YEAR};
use log::{debug, warn};

/// Safety cap on simulated months (30 years)
pub const DEFAULT_MAX_MONTHS: u32 = 360;

/// Balance at or below this is treated as paid off, absorbing floating point residue
pub const DEFAULT_PAYOFF_EPSILON: f64 = 0.01;

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Maximum number of months to simulate
    pub max_months: u32,

    /// Balance threshold that ends the simulation as paid
    pub payoff_epsilon: f64,
}

impl ProjectionConfig {
    /// Default config with a caller-supplied month cap, never above
    /// [`DEFAULT_MAX_MONTHS`]
    pub fn with_max_months(max_months: u32) -> Self {
        Self {
            max_months: max_months.min(DEFAULT_MAX_MONTHS),
            ..Default::default()
        }
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            max_months: DEFAULT_MAX_MONTHS,
            payoff_epsilon: DEFAULT_PAYOFF_EPSILON,
        }
    }
}

/// Main payoff engine
#[derive(Debug, Clone, Default)]
pub struct PayoffEngine {
    config: ProjectionConfig,
}

impl PayoffEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Simulate the loan until it is paid off or the month cap is reached.
    ///
    /// Each month accrues `balance * APR / 12` interest and applies the
    /// monthly-equivalent payment plus the fixed extra payment. The final
    /// month pays only what is owed. A payment that does not cover interest
    /// produces negative principal, so the balance grows until the cap.
    pub fn project(&self, loan: &Loan) -> PayoffProjection {
        let monthly_rate = loan.annual_rate_percent / 100.0 / MONTHS_PER_YEAR;
        let regular_payment = monthly_equivalent_payment(loan);
        let extra = loan.extra_payment_monthly;

        let mut state = ProjectionState::new(loan.balance);
        let mut schedule = Vec::new();

        while state.status(self.config.payoff_epsilon, self.config.max_months)
            == PayoffStatus::Accumulating
        {
            let entry = self.simulate_month(&state, monthly_rate, regular_payment, extra);
            state.apply(entry.payment, entry.interest, entry.balance);
            schedule.push(entry);
        }

        let status = state.status(self.config.payoff_epsilon, self.config.max_months);
        if status == PayoffStatus::Capped {
            warn!(
                "Loan not paid off within {} months (balance {:.2} remaining)",
                self.config.max_months, state.balance
            );
        }
        debug!(
            "Projection finished after {} months: interest {:.2}, paid {:.2}, status {:?}",
            state.month, state.total_interest, state.total_paid, status
        );

        PayoffProjection {
            months_remaining: state.month,
            total_interest: state.total_interest,
            total_paid: state.total_paid,
            status,
            schedule,
        }
    }

    /// Calculate one month from the state at the end of the previous month
    fn simulate_month(
        &self,
        state: &ProjectionState,
        monthly_rate: f64,
        regular_payment: f64,
        extra: f64,
    ) -> AmortizationEntry {
        let opening = state.balance;
        let interest = opening * monthly_rate;
        let mut payment = regular_payment + extra;

        // Final partial payment retires the balance exactly
        let final_payment = payment > opening + interest;
        if final_payment {
            payment = opening + interest;
        }

        let principal = payment - interest;
        let balance = if final_payment {
            0.0
        } else {
            (opening - principal).max(0.0)
        };

        AmortizationEntry {
            month: state.month + 1,
            payment,
            principal,
            interest,
            balance,
            extra_payment: extra,
        }
    }
}

/// Project a loan with the default 360-month cap and 0.01 payoff threshold
pub fn calculate_payoff_projection(loan: &Loan) -> PayoffProjection {
    PayoffEngine::default().project(loan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::PaymentFrequency;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn worked_example() -> Loan {
        Loan::new(1_000.0, 9.0, 200.0, PaymentFrequency::Monthly).with_extra_payment(50.0)
    }

    #[test]
    fn test_worked_example_pays_off_in_five_months() {
        let projection = calculate_payoff_projection(&worked_example());

        assert_eq!(projection.months_remaining, 5);
        assert_eq!(projection.schedule.len(), 5);
        assert_eq!(projection.status, PayoffStatus::Paid);
        assert_eq!(projection.schedule.last().unwrap().balance, 0.0);

        let first = &projection.schedule[0];
        assert_eq!(first.month, 1);
        assert_relative_eq!(first.interest, 7.5, epsilon = 1e-9);
        assert_relative_eq!(first.principal, 242.5, epsilon = 1e-9);
        assert_relative_eq!(first.balance, 757.5, epsilon = 1e-9);
        assert_eq!(first.extra_payment, 50.0);

        let fourth = &projection.schedule[3];
        assert_eq!(fourth.payment, 250.0);
        assert_relative_eq!(fourth.interest, 2.002_725_820_312_5, epsilon = 1e-6);
        assert_relative_eq!(fourth.balance, 19.032_835_195_312, epsilon = 1e-6);

        // Final month pays only what is owed
        let last = &projection.schedule[4];
        assert_relative_eq!(last.interest, 0.142_746_263_964_843, epsilon = 1e-6);
        assert_relative_eq!(last.payment, 19.175_581_459_277, epsilon = 1e-6);

        assert_relative_eq!(projection.total_interest, 19.175_581_459_277, epsilon = 1e-6);
        assert_relative_eq!(projection.total_paid, 1_019.175_581_459_277, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_balance_produces_empty_projection() {
        let loan = Loan::new(0.0, 9.0, 200.0, PaymentFrequency::Monthly);
        let projection = calculate_payoff_projection(&loan);

        assert_eq!(projection.months_remaining, 0);
        assert_eq!(projection.total_interest, 0.0);
        assert_eq!(projection.total_paid, 0.0);
        assert!(projection.schedule.is_empty());
        assert_eq!(projection, PayoffProjection::empty());
    }

    #[test]
    fn test_payment_below_interest_hits_cap() {
        // Interest is $100/month, payment only $80
        let loan = Loan::new(10_000.0, 12.0, 80.0, PaymentFrequency::Monthly);
        let projection = calculate_payoff_projection(&loan);

        assert_eq!(projection.months_remaining, DEFAULT_MAX_MONTHS);
        assert_eq!(projection.schedule.len(), DEFAULT_MAX_MONTHS as usize);
        assert!(projection.is_capped());
        assert!(projection.final_balance() > 10_000.0);
        assert!(projection.schedule.iter().all(|e| e.interest >= 0.0));
        assert!(projection.schedule[0].principal < 0.0);
    }

    #[test]
    fn test_payment_equal_to_interest_hits_cap() {
        let loan = Loan::new(12_000.0, 12.0, 120.0, PaymentFrequency::Monthly);
        let projection = calculate_payoff_projection(&loan);

        assert_eq!(projection.months_remaining, 360);
        assert!(projection.final_balance() > 0.0);
        assert!(projection.is_capped());
    }

    #[test]
    fn test_zero_payment_terminates_at_cap() {
        let loan = Loan::new(5_000.0, 0.0, 0.0, PaymentFrequency::Monthly);
        let projection = calculate_payoff_projection(&loan);

        assert_eq!(projection.months_remaining, 360);
        assert_eq!(projection.final_balance(), 5_000.0);
        assert_eq!(projection.total_paid, 0.0);
    }

    #[test]
    fn test_zero_rate_is_pure_principal() {
        let loan = Loan::new(1_200.0, 0.0, 100.0, PaymentFrequency::Monthly);
        let projection = calculate_payoff_projection(&loan);

        assert_eq!(projection.months_remaining, 12);
        assert_eq!(projection.total_interest, 0.0);
        assert_eq!(projection.total_paid, 1_200.0);
        assert!(projection.schedule.iter().all(|e| e.principal == 100.0));
    }

    #[test]
    fn test_biweekly_pays_off_faster_than_half_monthly() {
        let biweekly = Loan::new(40_000.0, 9.99, 418.0, PaymentFrequency::Biweekly);
        let monthly = Loan::new(40_000.0, 9.99, 836.0, PaymentFrequency::Monthly);

        let bw = calculate_payoff_projection(&biweekly);
        let m = calculate_payoff_projection(&monthly);

        assert_eq!(bw.status, PayoffStatus::Paid);
        assert_eq!(m.status, PayoffStatus::Paid);
        assert!(bw.months_remaining < m.months_remaining);
        assert!(bw.total_interest < m.total_interest);
    }

    #[test]
    fn test_idempotent() {
        let loan = Loan::new(40_000.0, 9.99, 418.0, PaymentFrequency::Biweekly).with_extra_payment(75.0);
        assert_eq!(calculate_payoff_projection(&loan), calculate_payoff_projection(&loan));
    }

    #[test]
    fn test_termination_and_conservation() {
        let loans = [
            worked_example(),
            Loan::new(40_000.0, 9.99, 418.0, PaymentFrequency::Biweekly),
            Loan::new(25_000.0, 4.5, 466.07, PaymentFrequency::Monthly),
            Loan::new(7_000.0, 19.99, 150.0, PaymentFrequency::Monthly).with_extra_payment(25.0),
            Loan::new(300_000.0, 6.5, 1_896.20, PaymentFrequency::Monthly),
            Loan::new(999.99, 3.0, 1_000_000.0, PaymentFrequency::Biweekly),
            Loan::new(500.0, 0.0, 0.0, PaymentFrequency::Monthly).with_extra_payment(0.5),
        ];

        for loan in &loans {
            let projection = calculate_payoff_projection(loan);
            assert!(projection.months_remaining <= DEFAULT_MAX_MONTHS);
            assert_eq!(projection.months_remaining as usize, projection.schedule.len());

            for (i, entry) in projection.schedule.iter().enumerate() {
                assert_eq!(entry.month, i as u32 + 1);
                assert!(entry.balance >= 0.0);
                assert_abs_diff_eq!(entry.principal, entry.payment - entry.interest, epsilon = 1e-9);
            }

            if projection.is_capped() {
                assert_eq!(projection.months_remaining, DEFAULT_MAX_MONTHS);
            } else {
                assert!(projection.final_balance() <= DEFAULT_PAYOFF_EPSILON);
                assert_abs_diff_eq!(
                    projection.total_paid,
                    loan.balance + projection.total_interest,
                    epsilon = DEFAULT_PAYOFF_EPSILON + 1e-6
                );
            }

            let interest_sum: f64 = projection.schedule.iter().map(|e| e.interest).sum();
            let paid_sum: f64 = projection.schedule.iter().map(|e| e.payment).sum();
            assert_relative_eq!(projection.total_interest, interest_sum, epsilon = 1e-9);
            assert_relative_eq!(projection.total_paid, paid_sum, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_custom_cap() {
        let engine = PayoffEngine::new(ProjectionConfig {
            max_months: 12,
            ..Default::default()
        });
        let loan = Loan::new(40_000.0, 9.99, 418.0, PaymentFrequency::Biweekly);
        let projection = engine.project(&loan);

        assert_eq!(projection.months_remaining, 12);
        assert!(projection.is_capped());
        assert!(projection.final_balance() < loan.balance);
    }

    #[test]
    fn test_requested_cap_never_exceeds_default() {
        assert_eq!(ProjectionConfig::with_max_months(2_000_000).max_months, DEFAULT_MAX_MONTHS);
        assert_eq!(ProjectionConfig::with_max_months(24).max_months, 24);

        let engine = PayoffEngine::new(ProjectionConfig::with_max_months(u32::MAX));
        let loan = Loan::new(5_000.0, 6.0, 0.0, PaymentFrequency::Monthly);
        let projection = engine.project(&loan);
        assert_eq!(projection.months_remaining, DEFAULT_MAX_MONTHS);
        assert_eq!(projection.schedule.len(), DEFAULT_MAX_MONTHS as usize);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let loan = worked_example();
        let before = loan.clone();
        let _ = calculate_payoff_projection(&loan);
        assert_eq!(loan, before);
    }
}
