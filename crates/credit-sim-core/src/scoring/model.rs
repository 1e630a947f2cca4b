use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CreditSimError;
use crate::scoring::profile::{ApplicantProfile, FEATURE_COUNT, FEATURE_NAMES};
use crate::scoring::synthetic::{self, TrainingRecord};
use crate::scoring::tree::{DecisionTree, NodeSummary, TreeParams};
use crate::types::{with_metadata_f64, ComputationOutput, Probability};
use crate::CreditSimResult;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Parameters for synthesising training data and fitting the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Seed shared by data generation and the train/holdout shuffle.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Number of synthetic records.
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
    /// Share of records used for fitting; the rest is holdout.
    #[serde(default = "default_train_fraction")]
    pub train_fraction: f64,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Probability that a synthetic record is labelled as defaulted.
    #[serde(default = "default_default_rate")]
    pub default_rate: f64,
}

fn default_seed() -> u64 {
    42
}

fn default_sample_size() -> usize {
    1000
}

fn default_train_fraction() -> f64 {
    0.7
}

fn default_max_depth() -> usize {
    4
}

fn default_default_rate() -> f64 {
    0.3
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            sample_size: default_sample_size(),
            train_fraction: default_train_fraction(),
            max_depth: default_max_depth(),
            default_rate: default_default_rate(),
        }
    }
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// Fitted default-risk model. Build once, then share by reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskModel {
    config: ScorerConfig,
    tree: DecisionTree,
    training_samples: usize,
    holdout_samples: usize,
    holdout_accuracy: Option<f64>,
}

/// Structural description of a fitted model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSummary {
    pub feature_names: Vec<String>,
    pub training_samples: usize,
    pub holdout_samples: usize,
    /// Share of holdout records whose majority-class prediction matches the label.
    pub holdout_accuracy: Option<f64>,
    pub depth: usize,
    pub leaf_count: usize,
    pub nodes: Vec<NodeSummary>,
}

/// Output of scoring one applicant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreOutput {
    pub default_probability: Probability,
    /// Majority-class call at 50%: `true` means the leaf is default-dominated.
    pub predicted_default: bool,
}

impl RiskModel {
    /// Synthesise data, split it and fit the tree.
    pub fn build(config: &ScorerConfig) -> CreditSimResult<Self> {
        if config.sample_size == 0 {
            return Err(CreditSimError::invalid(
                "sample_size",
                "At least one synthetic record is required",
            ));
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let records = synthetic::generate_records(&mut rng, config.sample_size, config.default_rate)?;

        let mut split_rng = StdRng::seed_from_u64(config.seed);
        let (train, holdout) =
            synthetic::train_test_split(&mut split_rng, records, config.train_fraction)?;
        tracing::debug!(
            seed = config.seed,
            train = train.len(),
            holdout = holdout.len(),
            "synthesised training data"
        );

        let (x, y) = to_matrix(&train);
        let params = TreeParams {
            max_depth: config.max_depth,
            ..TreeParams::default()
        };
        let tree = DecisionTree::fit(&x, &y, params)?;

        let holdout_accuracy = accuracy(&tree, &holdout);
        tracing::info!(
            depth = tree.depth(),
            leaves = tree.leaf_count(),
            holdout_accuracy = ?holdout_accuracy,
            "risk model fitted"
        );

        Ok(Self {
            config: config.clone(),
            tree,
            training_samples: train.len(),
            holdout_samples: holdout.len(),
            holdout_accuracy,
        })
    }

    /// Probability of default in [0, 1]. Assumes a validated profile.
    pub fn default_probability(&self, profile: &ApplicantProfile) -> Probability {
        self.tree.predict_proba(&profile.features())
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    pub fn tree(&self) -> &DecisionTree {
        &self.tree
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            training_samples: self.training_samples,
            holdout_samples: self.holdout_samples,
            holdout_accuracy: self.holdout_accuracy,
            depth: self.tree.depth(),
            leaf_count: self.tree.leaf_count(),
            nodes: self.tree.describe(),
        }
    }
}

fn to_matrix(records: &[TrainingRecord]) -> (Vec<[f64; FEATURE_COUNT]>, Vec<bool>) {
    records.iter().map(|r| (r.features(), r.defaulted)).unzip()
}

fn accuracy(tree: &DecisionTree, holdout: &[TrainingRecord]) -> Option<f64> {
    if holdout.is_empty() {
        return None;
    }
    let correct = holdout
        .iter()
        .filter(|r| (tree.predict_proba(&r.features()) > 0.5) == r.defaulted)
        .count();
    Some(correct as f64 / holdout.len() as f64)
}

// ---------------------------------------------------------------------------
// Enveloped entry points
// ---------------------------------------------------------------------------

/// Score a single applicant with a fitted model.
pub fn score_applicant(
    model: &RiskModel,
    profile: &ApplicantProfile,
) -> CreditSimResult<ComputationOutput<ScoreOutput>> {
    let start = Instant::now();
    profile.validate()?;

    let p = model.default_probability(profile);
    let output = ScoreOutput {
        default_probability: p,
        predicted_default: p > 0.5,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata_f64(
        "Decision tree (CART, Gini) default probability",
        &serde_json::json!({
            "seed": model.config.seed,
            "max_depth": model.config.max_depth,
            "features": FEATURE_NAMES,
        }),
        vec!["Model fitted on synthetic data; not validated against real outcomes".into()],
        elapsed,
        output,
    ))
}

/// Fit a model and describe it.
pub fn describe_model(config: &ScorerConfig) -> CreditSimResult<ComputationOutput<ModelSummary>> {
    let start = Instant::now();
    let model = RiskModel::build(config)?;
    let summary = model.summary();
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata_f64(
        "Decision tree (CART, Gini) fitted on seeded synthetic applicants",
        config,
        Vec::new(),
        elapsed,
        summary,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn profile() -> ApplicantProfile {
        ApplicantProfile {
            age: 35,
            monthly_income: dec!(15000),
            current_debt: dec!(5000),
            credit_history_years: 5,
            bureau_score: 650,
        }
    }

    #[test]
    fn test_default_build_shape() {
        let model = RiskModel::build(&ScorerConfig::default()).unwrap();
        let s = model.summary();
        assert_eq!(s.training_samples, 700);
        assert_eq!(s.holdout_samples, 300);
        assert!(s.depth <= 4);
        assert!(s.leaf_count <= 16);
        assert_eq!(s.feature_names.len(), 5);
    }

    #[test]
    fn test_probability_in_unit_interval() {
        let model = RiskModel::build(&ScorerConfig::default()).unwrap();
        let p = model.default_probability(&profile());
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn test_same_seed_bit_identical() {
        let a = RiskModel::build(&ScorerConfig::default()).unwrap();
        let b = RiskModel::build(&ScorerConfig::default()).unwrap();
        let pa = a.default_probability(&profile());
        let pb = b.default_probability(&profile());
        assert_eq!(pa.to_bits(), pb.to_bits());
        assert_eq!(a.tree(), b.tree());
    }

    #[test]
    fn test_zero_samples_rejected() {
        let config = ScorerConfig {
            sample_size: 0,
            ..ScorerConfig::default()
        };
        assert!(RiskModel::build(&config).is_err());
    }

    #[test]
    fn test_full_train_fraction_has_no_holdout() {
        let config = ScorerConfig {
            sample_size: 200,
            train_fraction: 1.0,
            ..ScorerConfig::default()
        };
        let model = RiskModel::build(&config).unwrap();
        assert!(model.summary().holdout_accuracy.is_none());
    }

    #[test]
    fn test_config_defaults_from_empty_json() {
        let config: ScorerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ScorerConfig::default());
    }

    #[test]
    fn test_score_applicant_validates() {
        let model = RiskModel::build(&ScorerConfig::default()).unwrap();
        let mut p = profile();
        p.age = 12;
        assert!(score_applicant(&model, &p).is_err());
    }
}
