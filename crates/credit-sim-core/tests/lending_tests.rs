use credit_sim_core::lending::amortization::{self, ScheduleInput};
use credit_sim_core::lending::policy::{self, Decision, Gate};
use credit_sim_core::lending::pricing;
use credit_sim_core::CreditSimError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Amortization tests
// ===========================================================================

const TOLERANCE: Decimal = dec!(0.000001);

#[test]
fn test_schedule_completeness_across_grid() {
    let principals = [dec!(1000), dec!(50000), dec!(275000.50), dec!(500000)];
    let rates = [dec!(12), dec!(14.5), dec!(22)];
    let terms = [6u32, 12, 24, 36];

    for &principal in &principals {
        for &rate in &rates {
            for &term in &terms {
                let entries = amortization::schedule(principal, rate, term).unwrap();
                assert_eq!(entries.len(), term as usize);

                let payment = entries[0].payment;
                assert!(entries.iter().all(|e| e.payment == payment));

                let repaid: Decimal = entries.iter().map(|e| e.principal_portion).sum();
                assert!(
                    (repaid - principal).abs() < TOLERANCE,
                    "principal {principal} rate {rate} term {term}: repaid {repaid}"
                );
            }
        }
    }
}

#[test]
fn test_balance_strictly_decreasing_to_zero() {
    let entries = amortization::schedule(dec!(120000), dec!(18.3), 30).unwrap();
    let mut previous = dec!(120000);
    for e in &entries {
        assert!(e.remaining_balance < previous, "month {}", e.month);
        assert!(e.remaining_balance >= Decimal::ZERO);
        previous = e.remaining_balance;
    }
    assert!(entries.last().unwrap().remaining_balance < TOLERANCE);
}

#[test]
fn test_reference_loan_50k_14pct_12m() {
    // r = 0.14 / 12; payment = 50000 * r * (1+r)^12 / ((1+r)^12 - 1)
    let entries = amortization::schedule(dec!(50000), dec!(14), 12).unwrap();
    assert!((entries[0].payment - dec!(4489.36)).abs() < dec!(0.01));
    // First month interest = 50000 * 0.14 / 12
    assert!((entries[0].interest - dec!(583.33)).abs() < dec!(0.01));
    assert!(entries[11].remaining_balance < dec!(0.01));
}

#[test]
fn test_build_schedule_envelope() {
    let input = ScheduleInput {
        principal: dec!(50000),
        annual_rate_pct: dec!(14),
        term_months: 12,
    };
    let out = amortization::build_schedule(&input).unwrap();
    assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    assert_eq!(out.result.entries.len(), 12);
    assert_eq!(out.result.monthly_rate, dec!(14) / dec!(12) / dec!(100));
}

// ===========================================================================
// Policy tests
// ===========================================================================

#[test]
fn test_policy_boundaries() {
    assert!(!policy::decide(dec!(0.30), dec!(10000), 700).is_approved());
    assert_eq!(policy::decide(dec!(0.29), dec!(10000), 700), Decision::Approved);
    assert!(!policy::decide(dec!(0.10), dec!(5000), 700).is_approved());
    assert!(!policy::decide(dec!(0.10), dec!(6000), 600).is_approved());
}

#[test]
fn test_policy_gates_are_and_not_weighted() {
    // Excellent probability and score do not compensate for low income.
    match policy::decide(dec!(0.0), dec!(4999.99), 850) {
        Decision::Rejected { failed_gates } => assert_eq!(failed_gates, vec![Gate::MonthlyIncome]),
        Decision::Approved => panic!("income gate must hold"),
    }
}

// ===========================================================================
// Pricing tests
// ===========================================================================

#[test]
fn test_rate_formula() {
    assert_eq!(pricing::annual_rate(dec!(0.0)), dec!(12.0));
    assert_eq!(pricing::annual_rate(dec!(1.0)), dec!(22.0));
    assert_eq!(pricing::annual_rate(dec!(0.25)), dec!(14.5));
}

#[test]
fn test_priced_schedule_for_probability() {
    let rate = pricing::annual_rate(dec!(0.2));
    assert_eq!(rate, dec!(14));
    let entries = amortization::schedule(dec!(50000), rate, 12).unwrap();
    assert!((entries[0].payment - dec!(4489.36)).abs() < dec!(0.01));
}

// ===========================================================================
// Overflow guards
// ===========================================================================

#[test]
fn test_very_long_term_returns_error() {
    let input = ScheduleInput {
        principal: dec!(50000),
        annual_rate_pct: dec!(14),
        term_months: 10000,
    };
    let result = std::panic::catch_unwind(|| amortization::build_schedule(&input));
    let outcome = result.expect("schedule must not panic on a long term");
    assert!(matches!(outcome, Err(CreditSimError::InvalidInput { .. })));
}

#[test]
fn test_extreme_rate_returns_error() {
    let result =
        std::panic::catch_unwind(|| amortization::schedule(dec!(50000), dec!(10000), 36));
    let outcome = result.expect("schedule must not panic on an extreme rate");
    assert!(matches!(outcome, Err(CreditSimError::InvalidInput { .. })));
}
