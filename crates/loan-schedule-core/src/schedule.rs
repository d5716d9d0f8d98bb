use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::ScheduleError;
use crate::rate::periodic_rate;
use crate::types::*;
use crate::ScheduleResult;

/// Upper bound on schedule length. Guards the recurrence against
/// unbounded iteration on malformed input; real terms are far shorter.
pub const MAX_TOTAL_TERM: u32 = 10_000;

/// Static parameters of one loan, immutable for the life of a
/// calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Original principal. Must be positive.
    pub loan_amount: Money,
    /// Number of repayment periods. Must be at least 1.
    pub total_term: u32,
    pub term_frequency: TermFrequency,
    /// Nominal annual rate as a percentage (6.3 = 6.3%).
    pub nominal_annual_rate: Rate,
    /// Fixed principal portion subtracted from the balance each period.
    /// This is a fixed-principal schedule, not a fixed-installment one.
    pub principal_repayment: Money,
    pub interest_timing: InterestTiming,
}

/// One row of the amortization schedule. Period 0 is the opening
/// record: zero movements, balance equal to the loan amount.
///
/// Signed convention: `principal_paid` and `interest_paid` are
/// negative (they reduce the balance); `interest_applied` is the
/// positive accrual for the period. All four are rounded to 2 dp for
/// reporting; the recurrence itself carries full precision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepaymentPeriod {
    pub repayment_number: u32,
    pub interest_applied: Money,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub current_balance: Money,
}

/// Full schedule for one loan: `total_term + 1` rows, strictly ordered
/// by repayment number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub periods: Vec<RepaymentPeriod>,
    /// The normalized per-period rate actually used.
    pub periodic_rate: Rate,
    /// Balance after the final period. Surfaced separately because the
    /// unconditional balloon repayment can drive it negative; callers
    /// needing a paid-off-at-term guarantee must check it.
    pub terminal_balance: Money,
    pub total_interest_accrued: Money,
    pub total_principal_repaid: Money,
}

/// Build the schedule with the default interest-paid scale: the paid
/// rate equals the accrual rate. Under `Before` timing the accrued and
/// paid interest then cancel exactly and the balance walks down by the
/// fixed principal alone. That cancellation is deliberate, kept for
/// compatibility with the behavior this calculator replaces; substitute
/// a different scale via [`build_schedule_with_scale`] to charge
/// interest at a rate other than the accrual rate.
pub fn build_schedule(
    params: &LoanParameters,
) -> ScheduleResult<ComputationOutput<ScheduleOutput>> {
    build_schedule_with_scale(params, |rate| rate)
}

/// Build the period-by-period schedule, with the interest-paid scale as
/// a replaceable policy.
///
/// `scale` maps the normalized periodic rate to the rate actually
/// charged against the balance each period. The recurrence skeleton is
/// independent of the policy:
///
/// 1. interest accrues on the opening balance at the periodic rate,
/// 2. the fixed principal repayment and the scaled interest charge are
///    deducted,
/// 3. the full original loan amount is deducted once more on the final
///    period (the balloon),
/// 4. `Before` timing compounds the opening balance, `After` timing
///    compounds the post-deduction balance.
pub fn build_schedule_with_scale(
    params: &LoanParameters,
    scale: impl Fn(Rate) -> Rate,
) -> ScheduleResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if params.loan_amount <= Decimal::ZERO {
        return Err(ScheduleError::invalid(
            "loan_amount",
            "Loan amount must be positive",
        ));
    }
    if params.total_term == 0 {
        return Err(ScheduleError::invalid(
            "total_term",
            "Total term must be at least 1 period",
        ));
    }
    if params.total_term > MAX_TOTAL_TERM {
        return Err(ScheduleError::invalid(
            "total_term",
            &format!("Total term exceeds the {MAX_TOTAL_TERM}-period cap"),
        ));
    }

    let rate = periodic_rate(params.nominal_annual_rate, params.term_frequency);
    let paid_rate = scale(rate);
    let one_plus_rate = Decimal::ONE + rate;

    let mut periods = Vec::with_capacity(params.total_term as usize + 1);
    periods.push(RepaymentPeriod {
        repayment_number: 0,
        interest_applied: Decimal::ZERO,
        principal_paid: Decimal::ZERO,
        interest_paid: Decimal::ZERO,
        current_balance: round_money(params.loan_amount),
    });

    let mut balance = params.loan_amount;
    let mut total_interest_accrued = Decimal::ZERO;
    let mut total_principal_repaid = Decimal::ZERO;
    let mut went_negative_early = false;

    for n in 1..=params.total_term {
        let opening = balance;

        let interest_applied = opening * rate;
        let interest_charge = opening * paid_rate;
        total_interest_accrued += interest_applied;

        // The full original principal is deducted once more on the
        // final period, regardless of the balance outstanding then.
        let balloon = if n == params.total_term {
            params.loan_amount
        } else {
            Decimal::ZERO
        };
        total_principal_repaid += params.principal_repayment + balloon;

        balance = match params.interest_timing {
            // Accrue on the opening balance, then deduct. With the
            // default scale the accrual and charge cancel; written in
            // full so a substituted scale behaves correctly.
            InterestTiming::Before => {
                opening * one_plus_rate
                    - params.principal_repayment
                    - interest_charge
                    - balloon
            }
            // Deduct first, then accrue on the residual. Does not
            // cancel; the residual compounds.
            InterestTiming::After => {
                (opening - params.principal_repayment - interest_charge - balloon)
                    * one_plus_rate
            }
        };

        if balance < Decimal::ZERO && n < params.total_term && !went_negative_early {
            warnings.push(format!(
                "Period {n}: balance went negative before the terminal period"
            ));
            went_negative_early = true;
        }

        periods.push(RepaymentPeriod {
            repayment_number: n,
            interest_applied: round_money(interest_applied),
            principal_paid: round_money(-params.principal_repayment),
            interest_paid: round_money(-interest_charge),
            current_balance: round_money(balance),
        });
    }

    let terminal_balance = round_money(balance);
    if terminal_balance < Decimal::ZERO {
        warnings.push(format!(
            "Terminal balance is negative ({terminal_balance}); the balloon repayment deducts the full original principal"
        ));
    }

    let output = ScheduleOutput {
        periods,
        periodic_rate: rate,
        terminal_balance,
        total_interest_accrued: round_money(total_interest_accrued),
        total_principal_repaid: round_money(total_principal_repaid),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed Principal Amortization Schedule",
        &serde_json::json!({
            "loan_amount": params.loan_amount.to_string(),
            "total_term": params.total_term,
            "term_frequency": params.term_frequency,
            "nominal_annual_rate": params.nominal_annual_rate.to_string(),
            "principal_repayment": params.principal_repayment.to_string(),
            "interest_timing": params.interest_timing,
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Number of periods a fixed principal repayment needs to clear the
/// principal on its own: `ceil(loan_amount / principal_repayment)`.
pub fn implied_term(loan_amount: Money, principal_repayment: Money) -> ScheduleResult<u32> {
    if loan_amount <= Decimal::ZERO {
        return Err(ScheduleError::invalid(
            "loan_amount",
            "Loan amount must be positive",
        ));
    }
    if principal_repayment <= Decimal::ZERO {
        return Err(ScheduleError::invalid(
            "principal_repayment",
            "Principal repayment must be positive",
        ));
    }

    let term = (loan_amount / principal_repayment).ceil();
    term.to_u32().ok_or_else(|| {
        ScheduleError::invalid(
            "principal_repayment",
            "Implied term does not fit in a period count",
        )
    })
}

/// Fixed principal repayment implied by spreading the loan amount
/// evenly over the term: `loan_amount / total_term`, full precision.
///
/// A caller may instead supply its own `custom` repayment, with the
/// shortfall landing on the terminal balloon; the custom value must not
/// exceed the even spread, otherwise the schedule would overpay before
/// the final period.
pub fn implied_principal_repayment(
    loan_amount: Money,
    total_term: u32,
    custom: Option<Money>,
) -> ScheduleResult<Money> {
    if loan_amount <= Decimal::ZERO {
        return Err(ScheduleError::invalid(
            "loan_amount",
            "Loan amount must be positive",
        ));
    }
    if total_term == 0 {
        return Err(ScheduleError::invalid(
            "total_term",
            "Total term must be at least 1 period",
        ));
    }

    let calculated = loan_amount / Decimal::from(total_term);
    match custom {
        None => Ok(calculated),
        Some(value) if value > calculated => Err(ScheduleError::invalid(
            "principal_repayment",
            &format!(
                "Custom repayment {value} exceeds the {calculated} allowed by the loan amount and term"
            ),
        )),
        Some(value) => Ok(value),
    }
}

/// Loan amount implied by a fixed principal repayment over the term:
/// `principal_repayment * total_term`.
///
/// A caller may instead supply its own `custom` amount, leaving the
/// difference for the terminal balloon; the custom value must not
/// exceed what the repayments cover.
pub fn implied_loan_amount(
    principal_repayment: Money,
    total_term: u32,
    custom: Option<Money>,
) -> ScheduleResult<Money> {
    if principal_repayment <= Decimal::ZERO {
        return Err(ScheduleError::invalid(
            "principal_repayment",
            "Principal repayment must be positive",
        ));
    }
    if total_term == 0 {
        return Err(ScheduleError::invalid(
            "total_term",
            "Total term must be at least 1 period",
        ));
    }

    let calculated = principal_repayment * Decimal::from(total_term);
    match custom {
        None => Ok(calculated),
        Some(value) if value > calculated => Err(ScheduleError::invalid(
            "loan_amount",
            &format!(
                "Custom loan amount {value} exceeds the {calculated} covered by the repayments and term"
            ),
        )),
        Some(value) => Ok(value),
    }
}

/// 2 dp, midpoint away from zero. Reporting only; never fed back into
/// the recurrence.
fn round_money(value: Money) -> Money {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
