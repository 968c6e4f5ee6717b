//! Payoff Planner - Loan payoff projections for a personal-finance tracker
//!
//! This library provides:
//! - Payment normalization (bi-weekly to monthly) and simple interest estimates
//! - Month-by-month amortization projections with payoff totals
//! - Single-payment what-if simulation and negative equity checks
//! - Extra-payment scenario comparison and parallel batch projections
//! - Household records (vehicle costs, credit-line and recurring-payment ledgers) behind a store

pub mod error;
pub mod loan;
pub mod payment;
pub mod projection;
pub mod simulator;
pub mod equity;
pub mod scenario;
pub mod household;

// Re-export commonly used types
pub use error::{PlannerError, PlannerResult};
pub use loan::{Loan, NamedLoan, PaymentFrequency};
pub use payment::{daily_interest, monthly_equivalent_payment, monthly_interest};
pub use projection::{
    calculate_payoff_projection, AmortizationEntry, PayoffEngine, PayoffProjection, PayoffStatus,
    ProjectionConfig,
};
pub use simulator::{simulate_loan_next_payment, simulate_next_payment, NextPayment};
pub use equity::negative_equity;
pub use scenario::{ExtraPaymentScenario, ScenarioRunner};
