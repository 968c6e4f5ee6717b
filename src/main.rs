//! Payoff Planner CLI
//!
//! Command-line interface for loan payoff projections and household summaries

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use payoff_planner::household::{HouseholdSummary, JsonFileStore, RecordStore, DEFAULT_STORE_DIR};
use payoff_planner::loan::{load_loan_json, load_loans};
use payoff_planner::projection::{PayoffProjection, DEFAULT_MAX_MONTHS};
use payoff_planner::{
    negative_equity, simulate_loan_next_payment, Loan, PaymentFrequency, PayoffStatus,
    ProjectionConfig, ScenarioRunner,
};
use std::fs::File;
use std::path::PathBuf;

/// Loan payoff projections for a personal-finance tracker
#[derive(Parser)]
#[command(name = "payoff", version, about = "Loan payoff projections and household summaries")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Safety cap on simulated months
    #[arg(long, default_value_t = DEFAULT_MAX_MONTHS, global = true)]
    max_months: u32,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a loan month by month until payoff
    Project {
        #[command(flatten)]
        loan: LoanArgs,

        /// Schedule rows to print
        #[arg(long, default_value_t = 24)]
        rows: usize,

        /// Write the full schedule to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Simulate the next payment with an extra amount on top
    Simulate {
        #[command(flatten)]
        loan: LoanArgs,

        #[arg(long, default_value_t = 0.0)]
        extra_amount: f64,
    },
    /// Check whether a balance exceeds the collateral's market value
    Equity {
        #[arg(long)]
        balance: f64,

        #[arg(long)]
        market_value: f64,
    },
    /// Compare payoff under different extra monthly payments
    Compare {
        #[command(flatten)]
        loan: LoanArgs,

        /// Comma-separated extra monthly amounts
        #[arg(long, value_delimiter = ',', default_values_t = [0.0, 50.0, 100.0, 250.0])]
        extras: Vec<f64>,
    },
    /// Project every loan in a CSV file
    Batch {
        /// CSV with Name,Balance,AprPercent,PaymentAmount,PaymentFrequency[,ExtraPaymentMonthly,EstimatedMarketValue]
        #[arg(long)]
        file: PathBuf,
    },
    /// Summarize the stored vehicle record and ledgers
    Household {
        #[arg(long, default_value = DEFAULT_STORE_DIR)]
        store_dir: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FrequencyArg {
    Monthly,
    Biweekly,
}

impl From<FrequencyArg> for PaymentFrequency {
    fn from(arg: FrequencyArg) -> Self {
        match arg {
            FrequencyArg::Monthly => PaymentFrequency::Monthly,
            FrequencyArg::Biweekly => PaymentFrequency::Biweekly,
        }
    }
}

/// Loan given either as flags or as a JSON file
#[derive(Args)]
struct LoanArgs {
    /// JSON file holding the loan
    #[arg(long, conflicts_with = "balance")]
    loan_file: Option<PathBuf>,

    /// Current balance owed
    #[arg(long, required_unless_present = "loan_file")]
    balance: Option<f64>,

    /// Annual percentage rate (9.99 for 9.99%)
    #[arg(long, default_value_t = 0.0)]
    apr: f64,

    /// Payment amount on the loan's own cadence
    #[arg(long, default_value_t = 0.0)]
    payment: f64,

    #[arg(long, value_enum, default_value_t = FrequencyArg::Monthly)]
    frequency: FrequencyArg,

    /// Extra amount paid every month
    #[arg(long, default_value_t = 0.0)]
    extra: f64,

    /// Estimated market value of the collateral
    #[arg(long)]
    market_value: Option<f64>,
}

impl LoanArgs {
    fn to_loan(&self) -> Result<Loan> {
        let loan = match &self.loan_file {
            Some(path) => load_loan_json(path)
                .with_context(|| format!("Failed to load loan from {}", path.display()))?,
            None => Loan {
                balance: self.balance.unwrap_or(0.0),
                annual_rate_percent: self.apr,
                payment_amount: self.payment,
                payment_frequency: self.frequency.into(),
                extra_payment_monthly: self.extra,
                estimated_market_value: self.market_value,
            },
        };
        Ok(loan.clamped())
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let runner = ScenarioRunner::with_config(ProjectionConfig::with_max_months(cli.max_months));

    match cli.command {
        Commands::Project { loan, rows, csv } => {
            let loan = loan.to_loan()?;
            let projection = runner.run(&loan);

            if let Some(path) = csv {
                let file = File::create(&path)
                    .with_context(|| format!("Unable to create {}", path.display()))?;
                projection.write_schedule_csv(file)?;
                println!("Full schedule written to: {}", path.display());
            }

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&projection)?);
            } else {
                print_projection(&loan, &projection, rows);
            }
        }
        Commands::Simulate { loan, extra_amount } => {
            let loan = loan.to_loan()?;
            let extra_amount = extra_amount.max(0.0);
            let result = simulate_loan_next_payment(&loan, extra_amount);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("Next Payment Simulation:");
                println!("  Total Payment:  ${:.2}", result.total_payment);
                println!("  Interest:       ${:.2}", result.interest_portion);
                println!("  Principal:      ${:.2}", result.principal_portion);
                println!("  New Balance:    ${:.2}", result.new_balance);
                if extra_amount > 0.0 {
                    println!(
                        "  With ${:.2} extra, ${:.2} more goes to principal",
                        extra_amount,
                        result.additional_principal(loan.monthly_payment())
                    );
                }
            }
        }
        Commands::Equity { balance, market_value } => {
            let shortfall = negative_equity(balance.max(0.0), market_value);
            if cli.json {
                println!("{}", serde_json::json!({ "negative_equity": shortfall }));
            } else {
                match shortfall {
                    Some(amount) => println!("Negative equity: owes ${:.2} more than the collateral is worth", amount),
                    None => println!("No negative equity"),
                }
            }
        }
        Commands::Compare { loan, extras } => {
            let loan = loan.to_loan()?;
            let scenarios = runner.compare_extra_payments(&loan, &extras);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&scenarios)?);
            } else {
                println!("{:>10} {:>7} {:>14} {:>14} {:>8} {:>14}",
                    "Extra", "Months", "Interest", "TotalPaid", "Saved", "InterestSaved");
                println!("{}", "-".repeat(72));
                for s in &scenarios {
                    println!("{:>10.2} {:>7} {:>14.2} {:>14.2} {:>8} {:>14.2}{}",
                        s.extra_payment_monthly,
                        s.months_remaining,
                        s.total_interest,
                        s.total_paid,
                        s.months_saved,
                        s.interest_saved,
                        if s.status == PayoffStatus::Capped { "  (not paid off)" } else { "" },
                    );
                }
            }
        }
        Commands::Batch { file } => {
            let loans = load_loans(&file)
                .with_context(|| format!("Failed to load loans from {}", file.display()))?;
            let loans: Vec<_> = loans
                .into_iter()
                .map(|mut named| {
                    named.loan = named.loan.clamped();
                    named
                })
                .collect();
            let results = runner.run_batch(&loans);

            if cli.json {
                let summaries: Vec<_> = results
                    .iter()
                    .map(|r| serde_json::json!({ "name": r.name, "summary": r.projection.summary() }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                println!("{:<20} {:>7} {:>14} {:>14} {:>10}",
                    "Loan", "Months", "Interest", "TotalPaid", "Status");
                println!("{}", "-".repeat(69));
                for r in &results {
                    println!("{:<20} {:>7} {:>14.2} {:>14.2} {:>10}",
                        r.name,
                        r.projection.months_remaining,
                        r.projection.total_interest,
                        r.projection.total_paid,
                        format!("{:?}", r.projection.status),
                    );
                }
            }
        }
        Commands::Household { store_dir } => {
            let store = JsonFileStore::new(&store_dir);
            let vehicle = store.load_vehicle()?;
            let credit = store.load_credit_ledger()?;
            let fixed = store.load_fixed_payments()?;
            let summary = HouseholdSummary::from_record(&vehicle);
            let car_projection = runner.run(&vehicle.car_loan.clamped());

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&serde_json::json!({
                    "vehicle": summary,
                    "car_loan": car_projection.summary(),
                    "credit_line_items_total": credit.total(),
                    "fixed_payments_monthly_total": fixed.monthly_total(),
                }))?);
            } else {
                println!("Household Summary ({}):", store_dir.display());
                println!("  Car payment (monthly):      ${:.2}", summary.car_monthly_payment);
                println!("  Insurance (monthly):        ${:.2}", summary.insurance_monthly);
                println!("  Credit line interest:       ${:.2}", summary.credit_line_interest);
                println!("  Total monthly impact:       ${:.2}", summary.total_monthly_impact);
                if let Some(months) = summary.credit_line_months_to_payoff {
                    println!("  Credit line payoff:         {} months (ignores interest)", months);
                }
                if let Some(amount) = summary.car_negative_equity {
                    println!("  Car negative equity:        ${:.2}", amount);
                }
                println!("  Car loan payoff:            {}", format_duration(&car_projection));
                println!("  Credit line items ({}):     ${:.2}", credit.len(), credit.total());
                println!("  Fixed payments ({}/month):  ${:.2}", fixed.len(), fixed.monthly_total());
            }
        }
    }

    Ok(())
}

fn format_duration(projection: &PayoffProjection) -> String {
    let (years, months) = projection.years_and_months();
    let text = match (years, months) {
        (0, m) => format!("{} months", m),
        (y, 0) => format!("{} years", y),
        (y, m) => format!("{} years and {} months", y, m),
    };
    if projection.is_capped() {
        format!("{} (not paid off at the cap)", text)
    } else {
        text
    }
}

fn print_projection(loan: &Loan, projection: &PayoffProjection, rows: usize) {
    println!("Loan:");
    println!("  Balance:          ${:.2}", loan.balance);
    println!("  APR:              {:.2}%", loan.annual_rate_percent);
    println!("  Monthly payment:  ${:.2} ({} {:.2})",
        loan.monthly_payment(), loan.payment_frequency, loan.payment_amount);
    println!("  Extra monthly:    ${:.2}", loan.extra_payment_monthly);
    println!("  Monthly interest: ${:.2}", loan.monthly_interest());
    println!("  Daily interest:   ${:.2}", loan.daily_interest());
    if let Some(amount) = loan.negative_equity() {
        println!("  WARNING: owes ${:.2} more than the collateral is worth", amount);
    }
    println!();

    println!("Schedule ({} months):", projection.months_remaining);
    println!("{:>5} {:>12} {:>12} {:>10} {:>14} {:>10}",
        "Month", "Payment", "Principal", "Interest", "Balance", "Extra");
    println!("{}", "-".repeat(68));

    for entry in projection.schedule.iter().take(rows) {
        println!("{:>5} {:>12.2} {:>12.2} {:>10.2} {:>14.2} {:>10.2}",
            entry.month,
            entry.payment,
            entry.principal,
            entry.interest,
            entry.balance,
            entry.extra_payment,
        );
    }

    if projection.schedule.len() > rows {
        println!("... ({} more months)", projection.schedule.len() - rows);
    }

    let summary = projection.summary();
    println!("\nSummary:");
    println!("  Payoff in:        {}", format_duration(projection));
    println!("  Total interest:   ${:.2}", summary.total_interest);
    println!("  Total paid:       ${:.2}", summary.total_paid);
    println!("  Final balance:    ${:.2}", summary.final_balance);
    println!("\nEstimates are approximations and depend on the lender's rules.");
}
