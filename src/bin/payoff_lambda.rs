//! AWS Lambda handler for loan payoff projections
//!
//! Accepts a loan plus optional what-if settings as JSON and returns the payoff
//! summary, interest estimates, next-payment simulation and extra-payment
//! comparisons.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::info;
use payoff_planner::projection::{AmortizationEntry, ProjectionSummary, DEFAULT_MAX_MONTHS};
use payoff_planner::{
    simulate_loan_next_payment, ExtraPaymentScenario, Loan, NextPayment, ProjectionConfig,
    ScenarioRunner,
};
use serde::{Deserialize, Serialize};

/// Input for one payoff calculation
#[derive(Debug, Deserialize)]
pub struct PayoffRequest {
    pub loan: Loan,

    /// Extra monthly amounts to compare against the loan as entered
    #[serde(default)]
    pub extra_scenarios: Vec<f64>,

    /// Safety cap on simulated months (default and ceiling: 360)
    #[serde(default = "default_max_months")]
    pub max_months: u32,

    /// Whether to return the month-by-month schedule (default: true)
    #[serde(default = "default_true")]
    pub include_schedule: bool,

    /// Extra amount for the next-payment simulation
    #[serde(default)]
    pub next_extra_amount: f64,
}

fn default_max_months() -> u32 { DEFAULT_MAX_MONTHS }
fn default_true() -> bool { true }

/// Output of one payoff calculation
#[derive(Debug, Serialize)]
pub struct PayoffResponse {
    pub summary: ProjectionSummary,
    pub negative_equity: Option<f64>,
    pub monthly_payment: f64,
    pub monthly_interest: f64,
    pub daily_interest: f64,
    pub next_payment: NextPayment,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scenarios: Vec<ExtraPaymentScenario>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<AmortizationEntry>>,
    pub execution_time_ms: u64,
}

fn calculate(request: PayoffRequest) -> PayoffResponse {
    let start = std::time::Instant::now();
    let loan = request.loan.clamped();

    let runner = ScenarioRunner::with_config(ProjectionConfig::with_max_months(request.max_months));
    let projection = runner.run(&loan);
    let scenarios = runner.compare_extra_payments(&loan, &request.extra_scenarios);
    let next_payment = simulate_loan_next_payment(&loan, request.next_extra_amount.max(0.0));

    info!(
        "Projected balance {:.2}: {} months, {} scenarios",
        loan.balance,
        projection.months_remaining,
        scenarios.len()
    );

    PayoffResponse {
        summary: projection.summary(),
        negative_equity: loan.negative_equity(),
        monthly_payment: loan.monthly_payment(),
        monthly_interest: loan.monthly_interest(),
        daily_interest: loan.daily_interest(),
        next_payment,
        scenarios,
        schedule: request.include_schedule.then_some(projection.schedule),
        execution_time_ms: start.elapsed().as_millis() as u64,
    }
}

/// Lambda handler function
async fn handler(event: LambdaEvent<PayoffRequest>) -> Result<PayoffResponse, Error> {
    Ok(calculate(event.payload))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
