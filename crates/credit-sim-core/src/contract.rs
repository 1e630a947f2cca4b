//! Plain-text mock loan agreement.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CreditSimError;
use crate::types::{Currency, Money, Percent, Rate};

pub const DEFAULT_LENDER: &str = "FINANCIARED AB, S.A.P.I. de C.V.";

/// Late-payment surcharge applied to an overdue installment.
pub const LATE_PAYMENT_SURCHARGE: Rate = dec!(0.05);

/// Sector of the applicant's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    Services,
    Commerce,
    Manufacturing,
    Technology,
    Agribusiness,
}

impl std::fmt::Display for BusinessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BusinessType::Services => write!(f, "Services"),
            BusinessType::Commerce => write!(f, "Commerce"),
            BusinessType::Manufacturing => write!(f, "Manufacturing"),
            BusinessType::Technology => write!(f, "Technology"),
            BusinessType::Agribusiness => write!(f, "Agribusiness"),
        }
    }
}

impl std::str::FromStr for BusinessType {
    type Err = CreditSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "services" => Ok(BusinessType::Services),
            "commerce" => Ok(BusinessType::Commerce),
            "manufacturing" => Ok(BusinessType::Manufacturing),
            "technology" => Ok(BusinessType::Technology),
            "agribusiness" => Ok(BusinessType::Agribusiness),
            "" => Err(CreditSimError::MissingField("business_type".into())),
            other => Err(CreditSimError::invalid(
                "business_type",
                format!("Unknown business type '{other}'"),
            )),
        }
    }
}

/// Everything printed on the agreement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractInput {
    pub applicant_name: String,
    pub business_type: BusinessType,
    pub principal: Money,
    pub term_months: u32,
    pub annual_rate_pct: Percent,
    pub payment: Money,
    #[serde(default)]
    pub currency: Currency,
    pub date: NaiveDate,
}

/// `$1,234,567.89`, rounded half away from zero to cents.
pub fn format_money(amount: Money) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{frac_part}")
}

pub fn render_contract(input: &ContractInput) -> String {
    let surcharge_pct = LATE_PAYMENT_SURCHARGE * dec!(100);
    format!(
        "LOAN AGREEMENT - FINANCIARED AB\n\
         \n\
         Between: {lender} (Lender)\n\
         And: {name} (Applicant)\n\
         \n\
         LOAN DETAILS:\n\
         - Amount: {principal} {ccy}\n\
         - Term: {term} months\n\
         - Annual interest rate: {rate:.2}%\n\
         - Monthly payment: {payment} {ccy}\n\
         - Purpose: Working capital for a {business} business\n\
         \n\
         CONDITIONS:\n\
         1. The applicant agrees to make punctual payments every month.\n\
         2. Late payments incur a surcharge of {surcharge}% on the installment.\n\
         3. This loan is backed by the FINANCIARED AB risk model.\n\
         \n\
         Date: {date}\n",
        lender = DEFAULT_LENDER,
        name = input.applicant_name.trim(),
        principal = format_money(input.principal),
        ccy = input.currency,
        term = input.term_months,
        rate = input.annual_rate_pct,
        payment = format_money(input.payment),
        business = input.business_type.to_string().to_lowercase(),
        surcharge = surcharge_pct.normalize(),
        date = input.date.format("%d/%m/%Y"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn input() -> ContractInput {
        ContractInput {
            applicant_name: "Juan Pérez López".into(),
            business_type: BusinessType::Commerce,
            principal: dec!(50000),
            term_months: 12,
            annual_rate_pct: dec!(14.1234),
            payment: dec!(4489.355880570662),
            currency: Currency::MXN,
            date: NaiveDate::from_ymd_opt(2026, 3, 7).unwrap(),
        }
    }

    #[test]
    fn test_format_money_grouping() {
        assert_eq!(format_money(dec!(0)), "$0.00");
        assert_eq!(format_money(dec!(999.999)), "$1,000.00");
        assert_eq!(format_money(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_money(dec!(-50000)), "-$50,000.00");
    }

    #[test]
    fn test_contract_contains_terms() {
        let text = render_contract(&input());
        assert!(text.contains("And: Juan Pérez López (Applicant)"));
        assert!(text.contains("- Amount: $50,000.00 MXN"));
        assert!(text.contains("- Term: 12 months"));
        assert!(text.contains("- Annual interest rate: 14.12%"));
        assert!(text.contains("- Monthly payment: $4,489.36 MXN"));
        assert!(text.contains("Working capital for a commerce business"));
        assert!(text.contains("surcharge of 5% on the installment"));
        assert!(text.ends_with("Date: 07/03/2026\n"));
    }

    #[test]
    fn test_business_type_parsing() {
        assert_eq!("Technology".parse::<BusinessType>().unwrap(), BusinessType::Technology);
        assert!(matches!(
            "".parse::<BusinessType>(),
            Err(CreditSimError::MissingField(_))
        ));
        assert!("mining".parse::<BusinessType>().is_err());
    }
}
