use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use credit_sim_core::scoring::model::{self, RiskModel, ScorerConfig};
use credit_sim_core::scoring::ApplicantProfile;

use crate::input;

/// Overrides for how the risk model is fitted
#[derive(Args, Debug, Clone, Default)]
pub struct ScorerArgs {
    /// Seed for synthetic training data
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum tree depth
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Number of synthetic training records
    #[arg(long)]
    pub sample_size: Option<usize>,
}

impl ScorerArgs {
    pub fn config(&self) -> ScorerConfig {
        let mut config = ScorerConfig::default();
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(depth) = self.max_depth {
            config.max_depth = depth;
        }
        if let Some(n) = self.sample_size {
            config.sample_size = n;
        }
        config
    }

    pub fn build_model(&self) -> Result<RiskModel, Box<dyn std::error::Error>> {
        Ok(RiskModel::build(&self.config())?)
    }
}

/// Applicant features, shared by `score` and `simulate`
#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    /// Applicant age (18-100)
    #[arg(long)]
    pub age: Option<u32>,

    /// Monthly income
    #[arg(long, alias = "income")]
    pub monthly_income: Option<Decimal>,

    /// Current outstanding debt
    #[arg(long, alias = "debt")]
    pub current_debt: Option<Decimal>,

    /// Years of credit history (0-50)
    #[arg(long, alias = "history")]
    pub credit_history_years: Option<u32>,

    /// Bureau score (300-850)
    #[arg(long, alias = "score")]
    pub bureau_score: Option<u32>,
}

impl ProfileArgs {
    pub fn profile(&self) -> Result<ApplicantProfile, Box<dyn std::error::Error>> {
        Ok(ApplicantProfile {
            age: self.age.ok_or("--age is required (or provide --input)")?,
            monthly_income: self
                .monthly_income
                .ok_or("--monthly-income is required (or provide --input)")?,
            current_debt: self
                .current_debt
                .ok_or("--current-debt is required (or provide --input)")?,
            credit_history_years: self
                .credit_history_years
                .ok_or("--credit-history-years is required (or provide --input)")?,
            bureau_score: self
                .bureau_score
                .ok_or("--bureau-score is required (or provide --input)")?,
        })
    }
}

#[derive(Args)]
pub struct ScoreArgs {
    /// Path to JSON applicant profile (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub profile: ProfileArgs,

    #[command(flatten)]
    pub scorer: ScorerArgs,
}

#[derive(Args)]
pub struct ModelArgs {
    #[command(flatten)]
    pub scorer: ScorerArgs,
}

pub fn run_score(args: ScoreArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let profile: ApplicantProfile = match input::load(args.input.as_deref())? {
        Some(profile) => profile,
        None => args.profile.profile()?,
    };
    let model = args.scorer.build_model()?;
    let result = model::score_applicant(&model, &profile)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_model(args: ModelArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let result = model::describe_model(&args.scorer.config())?;
    Ok(serde_json::to_value(result)?)
}
