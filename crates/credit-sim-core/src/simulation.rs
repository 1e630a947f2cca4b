//! End-to-end credit simulation: score, decide and, when approved, price
//! the loan, build its schedule and render the agreement.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::contract::{render_contract, BusinessType, ContractInput};
use crate::error::CreditSimError;
use crate::lending::amortization::{schedule, AmortizationEntry, LoanRequest};
use crate::lending::policy::{
    probability_to_decimal, Decision, Gate, PolicyConfig, APPROVED_LABEL, REJECTED_LABEL,
};
use crate::lending::pricing::PricingConfig;
use crate::scoring::{ApplicantProfile, RiskModel};
use crate::types::*;
use crate::CreditSimResult;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A submitted application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanApplication {
    pub applicant_name: String,
    /// Required; kept optional so a missing value surfaces as a validation
    /// error rather than a parse failure.
    #[serde(default)]
    pub business_type: Option<BusinessType>,
    pub profile: ApplicantProfile,
    pub request: LoanRequest,
}

impl LoanApplication {
    pub fn validate(&self) -> CreditSimResult<BusinessType> {
        if self.applicant_name.trim().is_empty() {
            return Err(CreditSimError::MissingField("applicant_name".into()));
        }
        let business_type = self
            .business_type
            .ok_or_else(|| CreditSimError::MissingField("business_type".into()))?;
        self.profile.validate()?;
        self.request.validate()?;
        Ok(business_type)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationInput {
    pub application: LoanApplication,
    #[serde(default)]
    pub policy: PolicyConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub currency: Currency,
    /// Contract date; today when absent.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SimulationOutcome {
    Approved(ApprovedLoan),
    Rejected(RejectedApplication),
}

impl SimulationOutcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, SimulationOutcome::Approved(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            SimulationOutcome::Approved(_) => APPROVED_LABEL,
            SimulationOutcome::Rejected(_) => REJECTED_LABEL,
        }
    }

    pub fn default_probability(&self) -> Probability {
        match self {
            SimulationOutcome::Approved(a) => a.default_probability,
            SimulationOutcome::Rejected(r) => r.default_probability,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovedLoan {
    pub applicant_name: String,
    pub default_probability: Probability,
    pub annual_rate_pct: Percent,
    pub investor_yield_pct: Percent,
    pub payment: Money,
    pub schedule: Vec<AmortizationEntry>,
    pub total_paid: Money,
    pub total_interest: Money,
    pub contract: String,
}

/// Gate values shown to a rejected applicant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateValues {
    pub default_probability: Rate,
    pub max_default_probability: Rate,
    pub monthly_income: Money,
    pub min_monthly_income: Money,
    pub bureau_score: u32,
    pub min_bureau_score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedApplication {
    pub applicant_name: String,
    pub default_probability: Probability,
    pub gates: GateValues,
    pub failed_gates: Vec<Gate>,
    pub recommendations: Vec<String>,
}

const RECOMMENDATIONS: [&str; 4] = [
    "Improve your credit score: pay your debts on time",
    "Reduce current debt: lower your debt-to-income ratio",
    "Build credit history: use financial products regularly",
    "Keep income stable: maintain consistent income for more than 6 months",
];

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run one application through the model and policy.
pub fn evaluate(
    model: &RiskModel,
    application: &LoanApplication,
    policy: &PolicyConfig,
    pricing: &PricingConfig,
    currency: &Currency,
    date: NaiveDate,
) -> CreditSimResult<SimulationOutcome> {
    let business_type = application.validate()?;
    let profile = &application.profile;
    let request = &application.request;

    let probability = model.default_probability(profile);
    let p = probability_to_decimal(probability)?;
    let decision = policy.decide(p, profile.monthly_income, profile.bureau_score);
    tracing::info!(
        applicant = %application.applicant_name.trim(),
        probability,
        approved = decision.is_approved(),
        "credit decision"
    );

    let failed_gates = match decision {
        Decision::Approved => Vec::new(),
        Decision::Rejected { failed_gates } => failed_gates,
    };
    if !failed_gates.is_empty() {
        return Ok(SimulationOutcome::Rejected(RejectedApplication {
            applicant_name: application.applicant_name.trim().to_string(),
            default_probability: probability,
            gates: GateValues {
                default_probability: p,
                max_default_probability: policy.max_default_probability,
                monthly_income: profile.monthly_income,
                min_monthly_income: policy.min_monthly_income,
                bureau_score: profile.bureau_score,
                min_bureau_score: policy.min_bureau_score,
            },
            failed_gates,
            recommendations: RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
        }));
    }

    let annual_rate_pct = pricing.annual_rate(p);
    let entries = schedule(request.principal, annual_rate_pct, request.term_months)?;
    let payment = entries.first().map(|e| e.payment).unwrap_or_default();
    let total_paid = payment * rust_decimal::Decimal::from(request.term_months);
    let total_interest: Money = entries.iter().map(|e| e.interest).sum();

    let contract = render_contract(&ContractInput {
        applicant_name: application.applicant_name.clone(),
        business_type,
        principal: request.principal,
        term_months: request.term_months,
        annual_rate_pct,
        payment,
        currency: currency.clone(),
        date,
    });

    Ok(SimulationOutcome::Approved(ApprovedLoan {
        applicant_name: application.applicant_name.trim().to_string(),
        default_probability: probability,
        annual_rate_pct,
        investor_yield_pct: pricing.investor_yield(annual_rate_pct),
        payment,
        schedule: entries,
        total_paid,
        total_interest,
        contract,
    }))
}

/// Enveloped simulation for the CLI and bindings.
pub fn run_simulation(
    model: &RiskModel,
    input: &SimulationInput,
) -> CreditSimResult<ComputationOutput<SimulationOutcome>> {
    let start = Instant::now();
    let date = input
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let outcome = evaluate(
        model,
        &input.application,
        &input.policy,
        &input.pricing,
        &input.currency,
        date,
    )?;

    let mut warnings = vec!["Risk model fitted on synthetic data; not a real credit assessment".to_string()];
    if let SimulationOutcome::Rejected(r) = &outcome {
        for gate in &r.failed_gates {
            warnings.push(format!("Rejected on {gate}"));
        }
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Decision-tree risk scoring, gated approval, risk-based pricing, annuity amortization",
        &serde_json::json!({
            "seed": model.config().seed,
            "policy": input.policy,
            "pricing": input.pricing,
            "date": date,
        }),
        warnings,
        elapsed,
        outcome,
    ))
}
