use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::CreditSimError;
use crate::types::{Money, Percent, Rate};
use crate::CreditSimResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Convert a quoted annual percentage (14.0 = 14%) into a decimal monthly rate.
pub fn monthly_rate(annual_rate_pct: Percent) -> Rate {
    annual_rate_pct / MONTHS_PER_YEAR / dec!(100)
}

/// Level installment that fully amortises `principal` over `nper` periods.
///
/// payment = P * r * (1+r)^n / ((1+r)^n - 1)
///
/// Unlike a spreadsheet PMT, the result is positive and a zero rate is
/// rejected rather than treated as straight-line repayment.
pub fn annuity_payment(principal: Money, rate: Rate, nper: u32) -> CreditSimResult<Money> {
    if nper == 0 {
        return Err(CreditSimError::invalid(
            "nper",
            "Number of periods must be > 0",
        ));
    }
    if rate <= Decimal::ZERO {
        return Err(CreditSimError::invalid(
            "rate",
            "Periodic rate must be > 0 for an annuity payment",
        ));
    }

    let factor = (Decimal::ONE + rate)
        .checked_powu(nper as u64)
        .ok_or_else(|| {
            CreditSimError::invalid(
                "nper",
                format!("Compounding factor overflows at rate {rate} over {nper} periods"),
            )
        })?;
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return Err(CreditSimError::DivisionByZero {
            context: "annuity factor".into(),
        });
    }

    principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(factor))
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(|| {
            CreditSimError::invalid(
                "principal",
                format!("Annuity payment on {principal} overflows decimal range"),
            )
        })
}
