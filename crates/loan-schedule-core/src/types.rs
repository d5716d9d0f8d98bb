use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%) once normalized. The nominal
/// annual rate on `LoanParameters` is the one percentage-valued input.
pub type Rate = Decimal;

/// How many repayment periods fall in a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermFrequency {
    Yearly,
    Quarterly,
    Monthly,
}

impl TermFrequency {
    pub fn periods_per_year(&self) -> u32 {
        match self {
            TermFrequency::Yearly => 1,
            TermFrequency::Quarterly => 4,
            TermFrequency::Monthly => 12,
        }
    }

    /// Calendar months between consecutive repayments.
    pub fn months_per_period(&self) -> u32 {
        match self {
            TermFrequency::Yearly => 12,
            TermFrequency::Quarterly => 3,
            TermFrequency::Monthly => 1,
        }
    }
}

impl FromStr for TermFrequency {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yearly" => Ok(TermFrequency::Yearly),
            "quarterly" => Ok(TermFrequency::Quarterly),
            "monthly" => Ok(TermFrequency::Monthly),
            other => Err(ScheduleError::invalid(
                "term_frequency",
                &format!("Unrecognized frequency '{other}' (expected yearly, quarterly, or monthly)"),
            )),
        }
    }
}

/// Whether a period's interest accrues on the balance before or after
/// that period's principal repayment is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestTiming {
    Before,
    After,
}

impl FromStr for InterestTiming {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "before" => Ok(InterestTiming::Before),
            "after" => Ok(InterestTiming::After),
            other => Err(ScheduleError::invalid(
                "interest_timing",
                &format!("Unrecognized timing '{other}' (expected before or after)"),
            )),
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
