use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CreditSimError;
use crate::types::Money;
use crate::CreditSimResult;

/// Number of features the risk model consumes.
pub const FEATURE_COUNT: usize = 5;

/// Feature names, in the order produced by [`ApplicantProfile::features`].
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "monthly_income",
    "current_debt",
    "credit_history_years",
    "bureau_score",
];

pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 100;
pub const MAX_HISTORY_YEARS: u32 = 50;
pub const MIN_BUREAU_SCORE: u32 = 300;
pub const MAX_BUREAU_SCORE: u32 = 850;

/// Applicant attributes used for scoring. Immutable once submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    /// Age in years, 18..=100.
    pub age: u32,
    /// Monthly income, non-negative.
    pub monthly_income: Money,
    /// Outstanding debt, non-negative.
    pub current_debt: Money,
    /// Years of credit history, 0..=50.
    pub credit_history_years: u32,
    /// Bureau score, 300..=850.
    pub bureau_score: u32,
}

impl ApplicantProfile {
    /// Feature vector in model order.
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        [
            self.age as f64,
            self.monthly_income.to_f64().unwrap_or(0.0),
            self.current_debt.to_f64().unwrap_or(0.0),
            self.credit_history_years as f64,
            self.bureau_score as f64,
        ]
    }

    /// Range checks applied at the input boundary. The scorer itself
    /// assumes a profile that has passed this check.
    pub fn validate(&self) -> CreditSimResult<()> {
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(CreditSimError::invalid(
                "age",
                format!("Age must be between {MIN_AGE} and {MAX_AGE}"),
            ));
        }
        if self.monthly_income < Decimal::ZERO {
            return Err(CreditSimError::invalid(
                "monthly_income",
                "Monthly income cannot be negative",
            ));
        }
        if self.current_debt < Decimal::ZERO {
            return Err(CreditSimError::invalid(
                "current_debt",
                "Current debt cannot be negative",
            ));
        }
        if self.credit_history_years > MAX_HISTORY_YEARS {
            return Err(CreditSimError::invalid(
                "credit_history_years",
                format!("Credit history must be between 0 and {MAX_HISTORY_YEARS} years"),
            ));
        }
        if !(MIN_BUREAU_SCORE..=MAX_BUREAU_SCORE).contains(&self.bureau_score) {
            return Err(CreditSimError::invalid(
                "bureau_score",
                format!("Bureau score must be between {MIN_BUREAU_SCORE} and {MAX_BUREAU_SCORE}"),
            ));
        }
        Ok(())
    }
}
