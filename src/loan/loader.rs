//! Load loans from CSV batch files and single-loan JSON files

use super::{Loan, NamedLoan, PaymentFrequency};
use crate::error::{PlannerError, PlannerResult};
use csv::Reader;
use log::info;
use std::fs;
use std::path::Path;

/// Raw CSV row of a loan batch file
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Balance")]
    balance: f64,
    #[serde(rename = "AprPercent")]
    apr_percent: f64,
    #[serde(rename = "PaymentAmount")]
    payment_amount: f64,
    #[serde(rename = "PaymentFrequency")]
    payment_frequency: String,
    #[serde(rename = "ExtraPaymentMonthly", default)]
    extra_payment_monthly: Option<f64>,
    #[serde(rename = "EstimatedMarketValue", default)]
    estimated_market_value: Option<f64>,
}

impl CsvRow {
    fn into_named_loan(self) -> PlannerResult<NamedLoan> {
        let payment_frequency: PaymentFrequency = self.payment_frequency.parse()?;

        if self.balance < 0.0 {
            return Err(PlannerError::invalid(
                "Balance",
                format!("{} has a negative balance {}", self.name, self.balance),
            ));
        }

        let loan = Loan {
            balance: self.balance,
            annual_rate_percent: self.apr_percent,
            payment_amount: self.payment_amount,
            payment_frequency,
            extra_payment_monthly: self.extra_payment_monthly.unwrap_or(0.0),
            estimated_market_value: self.estimated_market_value,
        };

        Ok(NamedLoan { name: self.name, loan })
    }
}

/// Load all loans from a CSV file
pub fn load_loans<P: AsRef<Path>>(path: P) -> PlannerResult<Vec<NamedLoan>> {
    let path = path.as_ref();
    let loans = read_rows(Reader::from_path(path)?)?;
    info!("Loaded {} loans from {}", loans.len(), path.display());
    Ok(loans)
}

/// Load loans from any reader (e.g., string buffer, stdin)
pub fn load_loans_from_reader<R: std::io::Read>(reader: R) -> PlannerResult<Vec<NamedLoan>> {
    read_rows(Reader::from_reader(reader))
}

fn read_rows<R: std::io::Read>(mut reader: Reader<R>) -> PlannerResult<Vec<NamedLoan>> {
    let mut loans = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        loans.push(row.into_named_loan()?);
    }

    Ok(loans)
}

/// Load a single loan from a JSON file
pub fn load_loan_json<P: AsRef<Path>>(path: P) -> PlannerResult<Loan> {
    let contents = fs::read_to_string(path)?;
    let loan: Loan = serde_json::from_str(&contents)?;
    Ok(loan)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BATCH: &str = "\
Name,Balance,AprPercent,PaymentAmount,PaymentFrequency,ExtraPaymentMonthly,EstimatedMarketValue
Car,40000,9.99,418,biweekly,,17000
Student,12000,5.5,250,monthly,50,
";

    #[test]
    fn test_load_loans_from_reader() {
        let loans = load_loans_from_reader(BATCH.as_bytes()).expect("Failed to load loans");
        assert_eq!(loans.len(), 2);

        let car = &loans[0];
        assert_eq!(car.name, "Car");
        assert_eq!(car.loan.payment_frequency, PaymentFrequency::Biweekly);
        assert_eq!(car.loan.extra_payment_monthly, 0.0);
        assert_eq!(car.loan.estimated_market_value, Some(17000.0));

        let student = &loans[1];
        assert_eq!(student.loan.extra_payment_monthly, 50.0);
        assert_eq!(student.loan.estimated_market_value, None);
    }

    #[test]
    fn test_unknown_frequency_is_rejected() {
        let data = "Name,Balance,AprPercent,PaymentAmount,PaymentFrequency\nBoat,5000,7,100,weekly\n";
        let err = load_loans_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, PlannerError::UnknownFrequency(_)));
    }

    #[test]
    fn test_negative_balance_is_rejected() {
        let data = "Name,Balance,AprPercent,PaymentAmount,PaymentFrequency\nBad,-1,7,100,monthly\n";
        let err = load_loans_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidRecord { .. }));
    }

    #[test]
    fn test_load_loan_json() {
        let dir = std::env::temp_dir().join(format!("payoff_loader_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("loan.json");
        fs::write(
            &path,
            r#"{"balance":1000,"annual_rate_percent":9,"payment_amount":200,"payment_frequency":"monthly","extra_payment_monthly":50}"#,
        )
        .unwrap();

        let loan = load_loan_json(&path).unwrap();
        assert_eq!(loan.extra_payment_monthly, 50.0);

        fs::remove_dir_all(&dir).ok();
    }
}
