//! Approval policy: a default-probability ceiling plus hard income and
//! bureau-score floors. All comparisons are strict.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CreditSimError;
use crate::types::{Money, Probability, Rate};
use crate::CreditSimResult;

/// Gate thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Approve only below this default probability.
    #[serde(default = "default_max_probability")]
    pub max_default_probability: Rate,
    /// Approve only above this monthly income.
    #[serde(default = "default_min_income")]
    pub min_monthly_income: Money,
    /// Approve only above this bureau score.
    #[serde(default = "default_min_score")]
    pub min_bureau_score: u32,
}

fn default_max_probability() -> Rate {
    dec!(0.30)
}

fn default_min_income() -> Money {
    dec!(5000)
}

fn default_min_score() -> u32 {
    600
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            max_default_probability: default_max_probability(),
            min_monthly_income: default_min_income(),
            min_bureau_score: default_min_score(),
        }
    }
}

/// One of the three approval conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gate {
    DefaultProbability,
    MonthlyIncome,
    BureauScore,
}

impl std::fmt::Display for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gate::DefaultProbability => write!(f, "default probability"),
            Gate::MonthlyIncome => write!(f, "monthly income"),
            Gate::BureauScore => write!(f, "bureau score"),
        }
    }
}

pub const APPROVED_LABEL: &str = "CREDIT APPROVED";
pub const REJECTED_LABEL: &str = "CREDIT REJECTED";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Decision {
    Approved,
    Rejected { failed_gates: Vec<Gate> },
}

impl Decision {
    pub fn is_approved(&self) -> bool {
        matches!(self, Decision::Approved)
    }

    /// Human label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Approved => APPROVED_LABEL,
            Decision::Rejected { .. } => REJECTED_LABEL,
        }
    }
}

impl PolicyConfig {
    pub fn decide(&self, probability: Rate, monthly_income: Money, bureau_score: u32) -> Decision {
        let mut failed_gates = Vec::new();
        if probability >= self.max_default_probability {
            failed_gates.push(Gate::DefaultProbability);
        }
        if monthly_income <= self.min_monthly_income {
            failed_gates.push(Gate::MonthlyIncome);
        }
        if bureau_score <= self.min_bureau_score {
            failed_gates.push(Gate::BureauScore);
        }

        if failed_gates.is_empty() {
            Decision::Approved
        } else {
            Decision::Rejected { failed_gates }
        }
    }
}

/// Decide with the standard thresholds: p < 0.30, income > 5000, score > 600.
pub fn decide(probability: Rate, monthly_income: Money, bureau_score: u32) -> Decision {
    PolicyConfig::default().decide(probability, monthly_income, bureau_score)
}

/// Bring a model probability into decimal arithmetic.
pub fn probability_to_decimal(p: Probability) -> CreditSimResult<Rate> {
    if !(0.0..=1.0).contains(&p) {
        return Err(CreditSimError::invalid(
            "probability",
            format!("Probability {p} is outside [0, 1]"),
        ));
    }
    Decimal::from_f64(p).ok_or_else(|| CreditSimError::invalid("probability", "Not representable"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_probability_boundary_is_rejected() {
        assert_eq!(
            decide(dec!(0.30), dec!(10000), 700),
            Decision::Rejected {
                failed_gates: vec![Gate::DefaultProbability]
            }
        );
    }

    #[test]
    fn test_just_below_probability_boundary_is_approved() {
        assert_eq!(decide(dec!(0.29), dec!(10000), 700), Decision::Approved);
    }

    #[test]
    fn test_income_boundary_is_rejected() {
        assert_eq!(
            decide(dec!(0.10), dec!(5000), 700),
            Decision::Rejected {
                failed_gates: vec![Gate::MonthlyIncome]
            }
        );
    }

    #[test]
    fn test_score_boundary_is_rejected() {
        assert_eq!(
            decide(dec!(0.10), dec!(6000), 600),
            Decision::Rejected {
                failed_gates: vec![Gate::BureauScore]
            }
        );
    }

    #[test]
    fn test_all_gates_reported() {
        match decide(dec!(0.9), dec!(100), 300) {
            Decision::Rejected { failed_gates } => assert_eq!(failed_gates.len(), 3),
            Decision::Approved => panic!("expected rejection"),
        }
    }

    #[test]
    fn test_custom_thresholds() {
        let config = PolicyConfig {
            max_default_probability: dec!(0.5),
            min_monthly_income: dec!(1000),
            min_bureau_score: 500,
        };
        assert!(config.decide(dec!(0.45), dec!(1500), 550).is_approved());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Decision::Approved.label(), "CREDIT APPROVED");
    }

    #[test]
    fn test_probability_conversion() {
        assert_eq!(probability_to_decimal(0.25).unwrap(), dec!(0.25));
        assert!(probability_to_decimal(f64::NAN).is_err());
        assert!(probability_to_decimal(1.5).is_err());
    }
}
