use chrono::NaiveDate;
use loan_schedule_core::calendar::period_dates;
use loan_schedule_core::installments::to_installments;
use loan_schedule_core::schedule::{
    build_schedule, build_schedule_with_scale, implied_loan_amount,
    implied_principal_repayment, implied_term, LoanParameters,
};
use loan_schedule_core::types::{InterestTiming, TermFrequency};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn scenario_params() -> LoanParameters {
    LoanParameters {
        loan_amount: dec!(2351923.14),
        total_term: 4,
        term_frequency: TermFrequency::Quarterly,
        nominal_annual_rate: dec!(6.3),
        principal_repayment: dec!(33750),
        interest_timing: InterestTiming::Before,
    }
}

// ===========================================================================
// Schedule shape — record count, ordering, opening record
// ===========================================================================

#[test]
fn test_sequence_has_term_plus_one_records() {
    for term in [1u32, 4, 12, 60] {
        let mut params = scenario_params();
        params.total_term = term;
        let sched = build_schedule(&params).unwrap().result;
        assert_eq!(sched.periods.len(), term as usize + 1);
        let numbers: Vec<u32> = sched.periods.iter().map(|p| p.repayment_number).collect();
        let expected: Vec<u32> = (0..=term).collect();
        assert_eq!(numbers, expected);
    }
}

#[test]
fn test_period_zero_is_pure_opening_record() {
    let sched = build_schedule(&scenario_params()).unwrap().result;
    let opening = &sched.periods[0];
    assert_eq!(opening.current_balance, dec!(2351923.14));
    assert_eq!(opening.interest_applied, Decimal::ZERO);
    assert_eq!(opening.principal_paid, Decimal::ZERO);
    assert_eq!(opening.interest_paid, Decimal::ZERO);
}

// ===========================================================================
// Worked scenario — literal known answers
// ===========================================================================

#[test]
fn test_scenario_periodic_rate() {
    let sched = build_schedule(&scenario_params()).unwrap().result;
    assert_eq!(sched.periodic_rate, dec!(0.01575));
}

#[test]
fn test_scenario_full_balance_path() {
    let sched = build_schedule(&scenario_params()).unwrap().result;
    let balances: Vec<Decimal> = sched
        .periods
        .iter()
        .map(|p| p.current_balance)
        .collect();
    assert_eq!(
        balances,
        vec![
            dec!(2351923.14),
            dec!(2318173.14),
            dec!(2284423.14),
            dec!(2250673.14),
            dec!(-135000.00),
        ]
    );
    assert_eq!(sched.terminal_balance, dec!(-135000.00));
}

#[test]
fn test_scenario_interest_figures() {
    let sched = build_schedule(&scenario_params()).unwrap().result;

    let p1 = &sched.periods[1];
    assert_eq!(p1.interest_applied, dec!(37042.79));
    assert_eq!(p1.interest_paid, dec!(-37042.79));
    assert_eq!(p1.principal_paid, dec!(-33750.00));

    let p4 = &sched.periods[4];
    assert_eq!(p4.interest_applied, dec!(35448.10));
    assert_eq!(p4.interest_paid, dec!(-35448.10));
}

#[test]
fn test_negative_terminal_balance_is_warned_not_fatal() {
    let result = build_schedule(&scenario_params()).unwrap();
    assert!(result
        .warnings
        .iter()
        .any(|w| w.contains("Terminal balance is negative")));
}

// ===========================================================================
// Timing policies — cancellation under Before, divergence under After
// ===========================================================================

#[test]
fn test_before_timing_reduces_to_fixed_principal_paydown() {
    let params = scenario_params();
    let sched = build_schedule(&params).unwrap().result;
    for n in 1..4usize {
        assert_eq!(
            sched.periods[n].current_balance,
            sched.periods[n - 1].current_balance - params.principal_repayment
        );
    }
}

#[test]
fn test_timing_variants_are_not_algebraic_duplicates() {
    let before = build_schedule(&scenario_params()).unwrap().result;
    let mut params = scenario_params();
    params.interest_timing = InterestTiming::After;
    let after = build_schedule(&params).unwrap().result;

    for n in 1..=4usize {
        assert_ne!(
            before.periods[n].current_balance,
            after.periods[n].current_balance
        );
    }
}

#[test]
fn test_replaceable_scale_leaves_accrual_untouched() {
    let params = scenario_params();
    let halved = build_schedule_with_scale(&params, |r| r / dec!(2))
        .unwrap()
        .result;
    let default = build_schedule(&params).unwrap().result;

    for n in 1..=4usize {
        assert_eq!(
            halved.periods[n].interest_applied,
            default.periods[n].interest_applied
        );
        assert_ne!(
            halved.periods[n].interest_paid,
            default.periods[n].interest_paid
        );
    }
}

// ===========================================================================
// Configuration errors — fatal before any period is computed
// ===========================================================================

#[test]
fn test_invalid_parameters_produce_no_output() {
    let mut params = scenario_params();
    params.total_term = 0;
    assert!(build_schedule(&params).is_err());

    let mut params = scenario_params();
    params.loan_amount = dec!(-1);
    assert!(build_schedule(&params).is_err());
}

#[test]
fn test_unrecognized_frequency_rejected_at_parse_boundary() {
    assert!("weekly".parse::<TermFrequency>().is_err());

    let raw = r#"{
        "loan_amount": "1000",
        "total_term": 4,
        "term_frequency": "weekly",
        "nominal_annual_rate": "5",
        "principal_repayment": "250",
        "interest_timing": "before"
    }"#;
    assert!(serde_json::from_str::<LoanParameters>(raw).is_err());
}

#[test]
fn test_parameters_deserialize_from_json() {
    let raw = r#"{
        "loan_amount": "2351923.14",
        "total_term": 4,
        "term_frequency": "quarterly",
        "nominal_annual_rate": "6.3",
        "principal_repayment": "33750",
        "interest_timing": "before"
    }"#;
    let params: LoanParameters = serde_json::from_str(raw).unwrap();
    let sched = build_schedule(&params).unwrap().result;
    assert_eq!(sched.terminal_balance, dec!(-135000.00));
}

// ===========================================================================
// Supplements — installment mapping, due dates, implied term
// ===========================================================================

#[test]
fn test_installment_mapping_is_gap_free() {
    let sched = build_schedule(&scenario_params()).unwrap().result;
    let rows = to_installments(&sched.periods);
    assert_eq!(rows.len(), 4);
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row.repayment_number, i as u32 + 1);
        assert_eq!(
            row.total_installment,
            row.principal_installment + row.interest_installment
        );
    }
}

#[test]
fn test_due_dates_for_scenario() {
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let dates = period_dates(start, TermFrequency::Quarterly, 4).unwrap();
    assert_eq!(dates.len(), 4);
    assert_eq!(
        *dates.last().unwrap(),
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    );
}

#[test]
fn test_implied_term_for_scenario() {
    // 2351923.14 / 33750 = 69.68…, so 70 periods clear the principal.
    assert_eq!(implied_term(dec!(2351923.14), dec!(33750)).unwrap(), 70);
}

#[test]
fn test_parameter_derivations_are_mutually_consistent() {
    // Each missing parameter derives from the other two and round-trips.
    let repayment = implied_principal_repayment(dec!(1000), 6, None).unwrap();
    assert_eq!(
        repayment.round_dp_with_strategy(
            2,
            rust_decimal::RoundingStrategy::MidpointAwayFromZero
        ),
        dec!(166.67)
    );

    let amount = implied_loan_amount(dec!(250), 4, None).unwrap();
    assert_eq!(amount, dec!(1000));
    assert_eq!(implied_term(amount, dec!(250)).unwrap(), 4);

    // A custom repayment below the even spread is honoured; the
    // shortfall becomes the terminal balloon.
    assert_eq!(
        implied_principal_repayment(dec!(1000), 4, Some(dec!(100))).unwrap(),
        dec!(100)
    );
    assert!(implied_principal_repayment(dec!(1000), 4, Some(dec!(500))).is_err());
    assert!(implied_loan_amount(dec!(250), 4, Some(dec!(1100))).is_err());
}
