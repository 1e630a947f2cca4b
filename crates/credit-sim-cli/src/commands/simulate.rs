use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use credit_sim_core::contract::BusinessType;
use credit_sim_core::lending::amortization::LoanRequest;
use credit_sim_core::simulation::{self, LoanApplication, SimulationInput};

use super::scoring::{ProfileArgs, ScorerArgs};
use crate::input;

/// Arguments for a full credit simulation
#[derive(Args)]
pub struct SimulateArgs {
    /// Path to JSON simulation input (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Applicant full name
    #[arg(long)]
    pub name: Option<String>,

    /// Business type: services, commerce, manufacturing, technology, agribusiness
    #[arg(long)]
    pub business_type: Option<String>,

    #[command(flatten)]
    pub profile: ProfileArgs,

    /// Requested amount (1,000-500,000)
    #[arg(long, alias = "amount")]
    pub principal: Option<Decimal>,

    /// Term in months (6-36)
    #[arg(long, alias = "term")]
    pub term_months: Option<u32>,

    /// Contract date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[command(flatten)]
    pub scorer: ScorerArgs,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sim_input: SimulationInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => from_flags(&args)?,
    };

    let model = args.scorer.build_model()?;
    let result = simulation::run_simulation(&model, &sim_input)?;
    Ok(serde_json::to_value(result)?)
}

fn from_flags(args: &SimulateArgs) -> Result<SimulationInput, Box<dyn std::error::Error>> {
    // Blank name and business type are reported by the core validation.
    let business_type = match args.business_type.as_deref() {
        Some(s) if !s.trim().is_empty() => Some(s.parse::<BusinessType>()?),
        _ => None,
    };

    let application = LoanApplication {
        applicant_name: args.name.clone().unwrap_or_default(),
        business_type,
        profile: args.profile.profile()?,
        request: LoanRequest {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            term_months: args
                .term_months
                .ok_or("--term-months is required (or provide --input)")?,
        },
    };

    Ok(SimulationInput {
        application,
        policy: Default::default(),
        pricing: Default::default(),
        currency: Default::default(),
        date: args.date,
    })
}
