//! Persistence of household records behind a store abstraction
//!
//! The calculation modules never touch a store; callers load a record, run
//! calculations on it, and save it back.

use super::ledger::{CreditLedger, FixedPaymentLedger};
use super::record::VehicleRecord;
use crate::error::PlannerResult;
use log::{debug, warn};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default directory for JSON record files
pub const DEFAULT_STORE_DIR: &str = "data/records";

const VEHICLE_KEY: &str = "vehicle-data";
const CREDIT_LEDGER_KEY: &str = "credit-line-items";
const FIXED_PAYMENTS_KEY: &str = "fixed-payments";

/// Load/save access to the tracker's records
pub trait RecordStore {
    fn load_vehicle(&self) -> PlannerResult<VehicleRecord>;
    fn save_vehicle(&self, record: &VehicleRecord) -> PlannerResult<()>;

    fn load_credit_ledger(&self) -> PlannerResult<CreditLedger>;
    fn save_credit_ledger(&self, ledger: &CreditLedger) -> PlannerResult<()>;

    fn load_fixed_payments(&self) -> PlannerResult<FixedPaymentLedger>;
    fn save_fixed_payments(&self, ledger: &FixedPaymentLedger) -> PlannerResult<()>;
}

/// One JSON file per record key inside a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    /// Read a record; a missing or unparsable file yields the default
    fn read_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> PlannerResult<T> {
        let path = self.path_for(key);
        if !path.exists() {
            debug!("No record at {}, using defaults", path.display());
            return Ok(T::default());
        }

        let contents = fs::read_to_string(&path)?;
        match serde_json::from_str(&contents) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!("Unreadable record {} ({}), using defaults", path.display(), e);
                Ok(T::default())
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> PlannerResult<()> {
        fs::create_dir_all(&self.root)?;
        let json = serde_json::to_string_pretty(value)?;
        fs::write(self.path_for(key), json)?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn load_vehicle(&self) -> PlannerResult<VehicleRecord> {
        self.read_or_default(VEHICLE_KEY)
    }

    fn save_vehicle(&self, record: &VehicleRecord) -> PlannerResult<()> {
        self.write(VEHICLE_KEY, record)
    }

    fn load_credit_ledger(&self) -> PlannerResult<CreditLedger> {
        self.read_or_default(CREDIT_LEDGER_KEY)
    }

    fn save_credit_ledger(&self, ledger: &CreditLedger) -> PlannerResult<()> {
        self.write(CREDIT_LEDGER_KEY, ledger)
    }

    fn load_fixed_payments(&self) -> PlannerResult<FixedPaymentLedger> {
        self.read_or_default(FIXED_PAYMENTS_KEY)
    }

    fn save_fixed_payments(&self, ledger: &FixedPaymentLedger) -> PlannerResult<()> {
        self.write(FIXED_PAYMENTS_KEY, ledger)
    }
}

/// In-process store, for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    vehicle: Mutex<Option<VehicleRecord>>,
    credit: Mutex<Option<CreditLedger>>,
    fixed: Mutex<Option<FixedPaymentLedger>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn load_slot<T: Clone + Default>(slot: &Mutex<Option<T>>) -> T {
    slot.lock().as_ref().cloned().unwrap_or_default()
}

fn save_slot<T: Clone>(slot: &Mutex<Option<T>>, value: &T) {
    *slot.lock() = Some(value.clone());
}

impl RecordStore for MemoryStore {
    fn load_vehicle(&self) -> PlannerResult<VehicleRecord> {
        Ok(load_slot(&self.vehicle))
    }

    fn save_vehicle(&self, record: &VehicleRecord) -> PlannerResult<()> {
        save_slot(&self.vehicle, record);
        Ok(())
    }

    fn load_credit_ledger(&self) -> PlannerResult<CreditLedger> {
        Ok(load_slot(&self.credit))
    }

    fn save_credit_ledger(&self, ledger: &CreditLedger) -> PlannerResult<()> {
        save_slot(&self.credit, ledger);
        Ok(())
    }

    fn load_fixed_payments(&self) -> PlannerResult<FixedPaymentLedger> {
        Ok(load_slot(&self.fixed))
    }

    fn save_fixed_payments(&self, ledger: &FixedPaymentLedger) -> PlannerResult<()> {
        save_slot(&self.fixed, ledger);
        Ok(())
    }
}
