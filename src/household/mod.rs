//! Household records tracked alongside the loan: vehicle costs, ledgers, storage

mod record;
pub mod ledger;
pub mod store;

pub use record::{CreditLine, HouseholdSummary, InsuranceCost, VehicleRecord};
pub use ledger::{
    CreditItem, CreditLedger, FixedPayment, FixedPaymentLedger, Ledger, LedgerEntry, PaymentCadence,
};
pub use store::{JsonFileStore, MemoryStore, RecordStore, DEFAULT_STORE_DIR};
