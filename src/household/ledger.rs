//! Credit-line purchases and recurring payments ledgers

use crate::error::{PlannerError, PlannerResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An item that can live in a [`Ledger`]
pub trait LedgerEntry {
    fn id(&self) -> u64;
    fn set_id(&mut self, id: u64);
    /// Reject records the ledger should never hold
    fn validate(&self) -> PlannerResult<()>;
}

/// Ordered list of entries with ledger-assigned ids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: serde::de::DeserializeOwned"))]
pub struct Ledger<T> {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    items: Vec<T>,
}

impl<T> Default for Ledger<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            items: Vec::new(),
        }
    }
}

impl<T: LedgerEntry> Ledger<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Validate and append an entry, returning its new id
    pub fn add(&mut self, mut item: T) -> PlannerResult<u64> {
        item.validate()?;

        let highest = self.items.iter().map(|i| i.id()).max().unwrap_or(0);
        let id = self.next_id.max(highest + 1);
        item.set_id(id);
        self.next_id = id + 1;
        self.items.push(item);

        Ok(id)
    }

    /// Replace the entry with `id`, keeping its id and position
    pub fn update(&mut self, id: u64, mut item: T) -> PlannerResult<()> {
        item.validate()?;

        let slot = self
            .items
            .iter_mut()
            .find(|existing| existing.id() == id)
            .ok_or(PlannerError::RecordNotFound(id))?;
        item.set_id(id);
        *slot = item;

        Ok(())
    }

    pub fn remove(&mut self, id: u64) -> PlannerResult<T> {
        let index = self
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or(PlannerError::RecordNotFound(id))?;
        Ok(self.items.remove(index))
    }
}

fn validate_description(description: &str) -> PlannerResult<()> {
    if description.trim().is_empty() {
        return Err(PlannerError::invalid("description", "must not be empty"));
    }
    Ok(())
}

fn validate_amount(description: &str, value: f64) -> PlannerResult<()> {
    validate_description(description)?;
    if !value.is_finite() || value < 0.0 {
        return Err(PlannerError::invalid("value", format!("{} is not a valid amount", value)));
    }
    Ok(())
}

/// A purchase charged to the credit line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditItem {
    #[serde(default)]
    pub id: u64,
    pub description: String,
    pub value: f64,
    pub date: NaiveDate,
}

impl CreditItem {
    pub fn new(description: impl Into<String>, value: f64, date: NaiveDate) -> Self {
        Self {
            id: 0,
            description: description.into(),
            value,
            date,
        }
    }
}

impl LedgerEntry for CreditItem {
    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    /// Negative values are refunds or credits against the line
    fn validate(&self) -> PlannerResult<()> {
        validate_description(&self.description)?;
        if !self.value.is_finite() {
            return Err(PlannerError::invalid("value", format!("{} is not a valid amount", self.value)));
        }
        Ok(())
    }
}

pub type CreditLedger = Ledger<CreditItem>;

impl Ledger<CreditItem> {
    /// Sum of all charged items
    pub fn total(&self) -> f64 {
        self.items.iter().map(|i| i.value).sum()
    }

    /// Items dated within `[from, to]`, inclusive
    pub fn between(&self, from: NaiveDate, to: NaiveDate) -> Vec<&CreditItem> {
        self.items
            .iter()
            .filter(|i| i.date >= from && i.date <= to)
            .collect()
    }
}

/// How often a recurring payment falls due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentCadence {
    Monthly,
    Fortnightly,
    Weekly,
}

impl PaymentCadence {
    /// Occurrences counted per month when totalling
    pub fn monthly_factor(&self) -> f64 {
        match self {
            PaymentCadence::Monthly => 1.0,
            PaymentCadence::Fortnightly => 2.0,
            PaymentCadence::Weekly => 4.0,
        }
    }
}

impl FromStr for PaymentCadence {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(PaymentCadence::Monthly),
            "fortnightly" => Ok(PaymentCadence::Fortnightly),
            "weekly" => Ok(PaymentCadence::Weekly),
            other => Err(PlannerError::UnknownFrequency(other.to_string())),
        }
    }
}

/// A bill that repeats on a fixed cadence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedPayment {
    #[serde(default)]
    pub id: u64,
    pub description: String,
    pub value: f64,
    pub cadence: PaymentCadence,
    /// Day of month the payment is due (1-31)
    pub due_day: u8,
}

impl FixedPayment {
    pub fn new(description: impl Into<String>, value: f64, cadence: PaymentCadence, due_day: u8) -> Self {
        Self {
            id: 0,
            description: description.into(),
            value,
            cadence,
            due_day,
        }
    }

    pub fn monthly_amount(&self) -> f64 {
        self.value * self.cadence.monthly_factor()
    }
}

impl LedgerEntry for FixedPayment {
    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn validate(&self) -> PlannerResult<()> {
        validate_amount(&self.description, self.value)?;
        if !(1..=31).contains(&self.due_day) {
            return Err(PlannerError::invalid(
                "due_day",
                format!("{} is not a day of the month", self.due_day),
            ));
        }
        Ok(())
    }
}

pub type FixedPaymentLedger = Ledger<FixedPayment>;

impl Ledger<FixedPayment> {
    /// Total of all recurring payments normalized to a month
    pub fn monthly_total(&self) -> f64 {
        self.items.iter().map(|p| p.monthly_amount()).sum()
    }
}
