use std::sync::OnceLock;

use napi::Result as NapiResult;
use napi_derive::napi;

use credit_sim_core::scoring::{RiskModel, ScorerConfig};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

static MODEL: OnceLock<RiskModel> = OnceLock::new();

/// Process-wide model with the default seed, fitted on first use and
/// read-only afterwards.
fn model() -> NapiResult<&'static RiskModel> {
    if let Some(m) = MODEL.get() {
        return Ok(m);
    }
    let built = RiskModel::build(&ScorerConfig::default()).map_err(to_napi_error)?;
    Ok(MODEL.get_or_init(|| built))
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate_credit(input_json: String) -> NapiResult<String> {
    let input: credit_sim_core::simulation::SimulationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        credit_sim_core::simulation::run_simulation(model()?, &input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

#[napi]
pub fn score_applicant(input_json: String) -> NapiResult<String> {
    let profile: credit_sim_core::scoring::ApplicantProfile =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = credit_sim_core::scoring::model::score_applicant(model()?, &profile)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Fit a model from `config_json` (defaults when empty) and describe it.
#[napi]
pub fn model_summary(config_json: String) -> NapiResult<String> {
    let config: ScorerConfig = if config_json.trim().is_empty() {
        ScorerConfig::default()
    } else {
        serde_json::from_str(&config_json).map_err(to_napi_error)?
    };
    let output =
        credit_sim_core::scoring::model::describe_model(&config).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Lending
// ---------------------------------------------------------------------------

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: credit_sim_core::lending::amortization::ScheduleInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = credit_sim_core::lending::amortization::build_schedule(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn render_contract(input_json: String) -> NapiResult<String> {
    let input: credit_sim_core::contract::ContractInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    Ok(credit_sim_core::contract::render_contract(&input))
}
