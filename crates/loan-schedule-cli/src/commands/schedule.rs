use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_schedule_core::calendar::period_dates;
use loan_schedule_core::installments::to_installments;
use loan_schedule_core::rate::periodic_rate;
use loan_schedule_core::schedule::{build_schedule, LoanParameters};
use loan_schedule_core::types::{InterestTiming, TermFrequency};

use crate::input;

/// Arguments for schedule computation
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Original principal
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Number of repayment periods
    #[arg(long)]
    pub total_term: Option<u32>,

    /// Repayment frequency: yearly, quarterly, or monthly
    #[arg(long)]
    pub frequency: Option<String>,

    /// Nominal annual rate as a percentage (6.3 = 6.3%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Fixed principal portion repaid each period
    #[arg(long)]
    pub principal_repayment: Option<Decimal>,

    /// Interest timing: before or after the repayment
    #[arg(long, default_value = "before")]
    pub timing: String,

    /// Attach period due dates from this start date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Emit repayments-table installment rows instead of raw periods
    #[arg(long)]
    pub installments: bool,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params: LoanParameters = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let loan_amount = args
            .loan_amount
            .ok_or("--loan-amount is required (or provide --input)")?;
        let total_term = args
            .total_term
            .ok_or("--total-term is required (or provide --input)")?;
        let frequency: TermFrequency = args
            .frequency
            .as_deref()
            .ok_or("--frequency is required (or provide --input)")?
            .parse()?;
        let rate = args.rate.ok_or("--rate is required (or provide --input)")?;
        let principal_repayment = args
            .principal_repayment
            .ok_or("--principal-repayment is required (or provide --input)")?;
        let timing: InterestTiming = args.timing.parse()?;

        LoanParameters {
            loan_amount,
            total_term,
            term_frequency: frequency,
            nominal_annual_rate: rate,
            principal_repayment,
            interest_timing: timing,
        }
    };

    let result = build_schedule(&params)?;

    let mut value = serde_json::to_value(&result)?;

    if args.installments {
        let rows = to_installments(&result.result.periods);
        if let Some(res) = value.get_mut("result").and_then(Value::as_object_mut) {
            res.remove("periods");
            res.insert("installments".into(), serde_json::to_value(rows)?);
        }
    }

    if let Some(start) = args.start_date {
        let dates = period_dates(start, params.term_frequency, params.total_term)?;
        if let Some(res) = value.get_mut("result").and_then(Value::as_object_mut) {
            res.insert("due_dates".into(), serde_json::to_value(dates)?);
        }
    }

    Ok(value)
}

/// Arguments for rate normalization
#[derive(Args)]
pub struct RateArgs {
    /// Nominal annual rate as a percentage (6.3 = 6.3%)
    #[arg(long)]
    pub rate: Decimal,

    /// Repayment frequency: yearly, quarterly, or monthly
    #[arg(long)]
    pub frequency: String,
}

pub fn run_rate(args: RateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let frequency: TermFrequency = args.frequency.parse()?;
    let rate = periodic_rate(args.rate, frequency);

    Ok(serde_json::json!({
        "result": {
            "periodic_rate": rate,
            "periods_per_year": frequency.periods_per_year(),
        }
    }))
}
