//! Loan records and batch loading

mod data;
pub mod loader;

pub use data::{Loan, NamedLoan, PaymentFrequency};
pub use loader::{load_loan_json, load_loans, load_loans_from_reader};
