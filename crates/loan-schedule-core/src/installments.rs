use serde::{Deserialize, Serialize};

use crate::schedule::RepaymentPeriod;
use crate::types::Money;

/// The shape the external repayments table stores per period. Tax and
/// charge columns are supplied by the loading layer, not here; sign
/// reconciliation is also the loader's job, so the signed convention of
/// [`RepaymentPeriod`] carries through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallmentRow {
    pub repayment_number: u32,
    pub total_installment: Money,
    pub principal_installment: Money,
    pub interest_installment: Money,
}

/// Map schedule periods onto repayments-table rows. The period 0
/// opening record is not an installment and is skipped; the result is
/// gap-free in `repayment_number`, so downstream joins stay
/// well-defined.
pub fn to_installments(periods: &[RepaymentPeriod]) -> Vec<InstallmentRow> {
    periods
        .iter()
        .filter(|p| p.repayment_number > 0)
        .map(|p| InstallmentRow {
            repayment_number: p.repayment_number,
            total_installment: p.principal_paid + p.interest_paid,
            principal_installment: p.principal_paid,
            interest_installment: p.interest_paid,
        })
        .collect()
}
