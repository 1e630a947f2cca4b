//! Seeded synthetic applicant data used to fit the risk model.
//!
//! Every field is drawn independently, so the fitted tree captures noise
//! rather than real credit behaviour. Only reproducibility matters here.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use statrs::distribution::Uniform;

use crate::error::CreditSimError;
use crate::scoring::profile::FEATURE_COUNT;
use crate::CreditSimResult;

const AGE_RANGE: std::ops::Range<u32> = 18..70;
const INCOME_RANGE: (f64, f64) = (3_000.0, 30_000.0);
const DEBT_RANGE: (f64, f64) = (0.0, 50_000.0);
const HISTORY_RANGE: std::ops::Range<u32> = 0..20;
const SCORE_RANGE: std::ops::Range<u32> = 300..850;

/// One labelled synthetic applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRecord {
    pub age: u32,
    pub monthly_income: f64,
    pub current_debt: f64,
    pub credit_history_years: u32,
    pub bureau_score: u32,
    pub defaulted: bool,
}

impl TrainingRecord {
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        [
            self.age as f64,
            self.monthly_income,
            self.current_debt,
            self.credit_history_years as f64,
            self.bureau_score as f64,
        ]
    }
}

fn round_cents(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn uniform(min: f64, max: f64, field: &str) -> CreditSimResult<Uniform> {
    Uniform::new(min, max).map_err(|e| CreditSimError::InvalidInput {
        field: field.into(),
        reason: format!("Invalid Uniform parameters: {e}"),
    })
}

/// Draw `n` records. `default_rate` is the probability of the positive label.
pub fn generate_records(
    rng: &mut StdRng,
    n: usize,
    default_rate: f64,
) -> CreditSimResult<Vec<TrainingRecord>> {
    if !(0.0..=1.0).contains(&default_rate) {
        return Err(CreditSimError::invalid(
            "default_rate",
            "Default rate must be between 0 and 1",
        ));
    }

    let income = uniform(INCOME_RANGE.0, INCOME_RANGE.1, "monthly_income")?;
    let debt = uniform(DEBT_RANGE.0, DEBT_RANGE.1, "current_debt")?;

    let mut records = Vec::with_capacity(n);
    for _ in 0..n {
        records.push(TrainingRecord {
            age: rng.gen_range(AGE_RANGE),
            monthly_income: round_cents(rng.sample(&income)),
            current_debt: round_cents(rng.sample(&debt)),
            credit_history_years: rng.gen_range(HISTORY_RANGE),
            bureau_score: rng.gen_range(SCORE_RANGE),
            defaulted: rng.gen_bool(default_rate),
        });
    }
    Ok(records)
}

/// Shuffle and split into (train, holdout). The train share is rounded
/// down; the holdout receives the remainder.
pub fn train_test_split(
    rng: &mut StdRng,
    records: Vec<TrainingRecord>,
    train_fraction: f64,
) -> CreditSimResult<(Vec<TrainingRecord>, Vec<TrainingRecord>)> {
    if !(train_fraction > 0.0 && train_fraction <= 1.0) {
        return Err(CreditSimError::invalid(
            "train_fraction",
            "Train fraction must be in (0, 1]",
        ));
    }

    let mut shuffled = records;
    shuffled.shuffle(rng);

    let n_train = (shuffled.len() as f64 * train_fraction).floor() as usize;
    let holdout = shuffled.split_off(n_train);
    Ok((shuffled, holdout))
}
