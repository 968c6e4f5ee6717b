//! Payoff projection engine for amortizing loans

mod state;
mod engine;
mod schedule;

pub use state::{PayoffStatus, ProjectionState};
pub use engine::{
    calculate_payoff_projection, PayoffEngine, ProjectionConfig, DEFAULT_MAX_MONTHS,
    DEFAULT_PAYOFF_EPSILON,
};
pub use schedule::{AmortizationEntry, PayoffProjection, ProjectionSummary};
