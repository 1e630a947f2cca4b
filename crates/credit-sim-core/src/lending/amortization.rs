use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CreditSimError;
use crate::time_value::{annuity_payment, monthly_rate};
use crate::types::*;
use crate::CreditSimResult;

pub const MIN_PRINCIPAL: Decimal = dec!(1000);
pub const MAX_PRINCIPAL: Decimal = dec!(500000);
pub const MIN_TERM_MONTHS: u32 = 6;
pub const MAX_TERM_MONTHS: u32 = 36;

/// Amount and term requested by the applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub principal: Money,
    pub term_months: u32,
}

impl LoanRequest {
    /// Range checks applied at the input boundary.
    pub fn validate(&self) -> CreditSimResult<()> {
        if self.principal < MIN_PRINCIPAL || self.principal > MAX_PRINCIPAL {
            return Err(CreditSimError::invalid(
                "principal",
                format!("Principal must be between {MIN_PRINCIPAL} and {MAX_PRINCIPAL}"),
            ));
        }
        if !(MIN_TERM_MONTHS..=MAX_TERM_MONTHS).contains(&self.term_months) {
            return Err(CreditSimError::invalid(
                "term_months",
                format!("Term must be between {MIN_TERM_MONTHS} and {MAX_TERM_MONTHS} months"),
            ));
        }
        Ok(())
    }
}

/// A single month of a fixed-installment schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    pub month: u32,
    pub payment: Money,
    pub interest: Money,
    pub principal_portion: Money,
    pub remaining_balance: Money,
}

/// Input for a standalone schedule calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    pub principal: Money,
    /// Annual rate in percent (14.0 = 14%).
    pub annual_rate_pct: Percent,
    pub term_months: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub payment: Money,
    pub monthly_rate: Rate,
    pub entries: Vec<AmortizationEntry>,
    pub total_paid: Money,
    pub total_interest: Money,
}

/// Month-by-month schedule for a level-payment loan.
///
/// The running balance is clamped at zero, so rounding residue on the last
/// month never shows as a negative balance.
pub fn schedule(
    principal: Money,
    annual_rate_pct: Percent,
    term_months: u32,
) -> CreditSimResult<Vec<AmortizationEntry>> {
    if principal <= Decimal::ZERO {
        return Err(CreditSimError::invalid(
            "principal",
            "Principal must be positive",
        ));
    }
    if annual_rate_pct <= Decimal::ZERO {
        return Err(CreditSimError::invalid(
            "annual_rate_pct",
            "Annual rate must be positive",
        ));
    }

    let r = monthly_rate(annual_rate_pct);
    let payment = annuity_payment(principal, r, term_months)?;

    let mut entries = Vec::with_capacity(term_months as usize);
    let mut balance = principal;
    for month in 1..=term_months {
        let interest = balance * r;
        let principal_portion = payment - interest;
        balance -= principal_portion;
        if balance < Decimal::ZERO {
            balance = Decimal::ZERO;
        }
        entries.push(AmortizationEntry {
            month,
            payment,
            interest,
            principal_portion,
            remaining_balance: balance,
        });
    }

    Ok(entries)
}

/// Schedule plus totals, wrapped in the standard envelope.
pub fn build_schedule(
    input: &ScheduleInput,
) -> CreditSimResult<ComputationOutput<AmortizationSchedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.principal < MIN_PRINCIPAL || input.principal > MAX_PRINCIPAL {
        warnings.push(format!(
            "Principal {} is outside the offered range {MIN_PRINCIPAL}-{MAX_PRINCIPAL}",
            input.principal
        ));
    }
    if input.term_months < MIN_TERM_MONTHS {
        warnings.push(format!(
            "Term of {} months is below the offered minimum of {MIN_TERM_MONTHS}",
            input.term_months
        ));
    } else if input.term_months > MAX_TERM_MONTHS {
        warnings.push(format!(
            "Term of {} months exceeds the offered maximum of {MAX_TERM_MONTHS}",
            input.term_months
        ));
    }

    let entries = schedule(input.principal, input.annual_rate_pct, input.term_months)?;
    let payment = entries.first().map(|e| e.payment).unwrap_or_default();
    let total_paid = payment
        .checked_mul(Decimal::from(input.term_months))
        .ok_or_else(|| CreditSimError::invalid("principal", "Total repayment overflows decimal range"))?;
    let total_interest: Money = entries.iter().map(|e| e.interest).sum();

    let output = AmortizationSchedule {
        payment,
        monthly_rate: monthly_rate(input.annual_rate_pct),
        entries,
        total_paid,
        total_interest,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-installment (annuity) amortization",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate_pct": input.annual_rate_pct.to_string(),
            "term_months": input.term_months,
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reference_loan() {
        let entries = schedule(dec!(50000), dec!(14), 12).unwrap();
        assert_eq!(entries.len(), 12);
        assert!((entries[0].payment - dec!(4489.36)).abs() < dec!(0.01));
        assert!((entries[0].interest - dec!(583.33)).abs() < dec!(0.01));
        assert!(entries[11].remaining_balance < dec!(0.01));
    }

    #[test]
    fn test_interest_plus_principal_equals_payment() {
        for e in schedule(dec!(250000), dec!(17.5), 36).unwrap() {
            assert!((e.interest + e.principal_portion - e.payment).abs() < dec!(0.000000000001));
        }
    }

    #[test]
    fn test_interest_declines_principal_grows() {
        let entries = schedule(dec!(80000), dec!(20), 24).unwrap();
        for w in entries.windows(2) {
            assert!(w[1].interest < w[0].interest);
            assert!(w[1].principal_portion > w[0].principal_portion);
        }
    }

    #[test]
    fn test_months_numbered_from_one() {
        let entries = schedule(dec!(1000), dec!(12), 6).unwrap();
        let months: Vec<u32> = entries.iter().map(|e| e.month).collect();
        assert_eq!(months, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_zero_rate_rejected() {
        assert!(schedule(dec!(1000), Decimal::ZERO, 12).is_err());
    }

    #[test]
    fn test_zero_term_rejected() {
        assert!(schedule(dec!(1000), dec!(12), 0).is_err());
    }

    #[test]
    fn test_build_schedule_totals() {
        let input = ScheduleInput {
            principal: dec!(50000),
            annual_rate_pct: dec!(14),
            term_months: 12,
        };
        let result = build_schedule(&input).unwrap();
        let s = &result.result;
        assert!(result.warnings.is_empty());
        assert!((s.total_paid - s.total_interest - dec!(50000)).abs() < dec!(0.0001));
        assert!((s.total_paid - dec!(53872.27)).abs() < dec!(0.01));
    }

    #[test]
    fn test_out_of_range_principal_warns() {
        let input = ScheduleInput {
            principal: dec!(600000),
            annual_rate_pct: dec!(14),
            term_months: 12,
        };
        let result = build_schedule(&input).unwrap();
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_short_term_warns() {
        let input = ScheduleInput {
            principal: dec!(50000),
            annual_rate_pct: dec!(14),
            term_months: 3,
        };
        let result = build_schedule(&input).unwrap();
        assert_eq!(result.result.entries.len(), 3);
        assert_eq!(
            result.warnings,
            vec!["Term of 3 months is below the offered minimum of 6".to_string()]
        );
    }

    #[test]
    fn test_overflowing_term_is_error_not_panic() {
        let input = ScheduleInput {
            principal: dec!(50000),
            annual_rate_pct: dec!(14),
            term_months: 10000,
        };
        assert!(matches!(
            build_schedule(&input),
            Err(CreditSimError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_loan_request_bounds() {
        let ok = LoanRequest {
            principal: dec!(1000),
            term_months: 36,
        };
        assert!(ok.validate().is_ok());
        let low = LoanRequest {
            principal: dec!(999.99),
            term_months: 12,
        };
        assert!(low.validate().is_err());
        let short = LoanRequest {
            principal: dec!(5000),
            term_months: 5,
        };
        assert!(short.validate().is_err());
    }
}
