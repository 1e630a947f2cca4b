use credit_sim_core::scoring::model::{describe_model, score_applicant};
use credit_sim_core::scoring::{ApplicantProfile, RiskModel, ScorerConfig};
use rust_decimal_macros::dec;

fn sample_profiles() -> Vec<ApplicantProfile> {
    vec![
        ApplicantProfile {
            age: 35,
            monthly_income: dec!(15000),
            current_debt: dec!(5000),
            credit_history_years: 5,
            bureau_score: 650,
        },
        ApplicantProfile {
            age: 22,
            monthly_income: dec!(3500),
            current_debt: dec!(45000),
            credit_history_years: 0,
            bureau_score: 310,
        },
        ApplicantProfile {
            age: 100,
            monthly_income: dec!(250000),
            current_debt: dec!(0),
            credit_history_years: 50,
            bureau_score: 850,
        },
    ]
}

// ===========================================================================
// Determinism
// ===========================================================================

#[test]
fn test_two_builds_same_seed_bit_identical() {
    let config = ScorerConfig::default();
    let a = RiskModel::build(&config).unwrap();
    let b = RiskModel::build(&config).unwrap();

    for profile in sample_profiles() {
        let pa = a.default_probability(&profile);
        let pb = b.default_probability(&profile);
        assert_eq!(pa.to_bits(), pb.to_bits(), "profile {profile:?}");
    }
}

#[test]
fn test_repeated_queries_identical() {
    let model = RiskModel::build(&ScorerConfig::default()).unwrap();
    let profile = &sample_profiles()[0];
    let first = model.default_probability(profile);
    for _ in 0..10 {
        assert_eq!(model.default_probability(profile).to_bits(), first.to_bits());
    }
}

#[test]
fn test_probabilities_are_leaf_fractions() {
    let model = RiskModel::build(&ScorerConfig::default()).unwrap();
    for profile in sample_profiles() {
        let p = model.default_probability(&profile);
        assert!((0.0..=1.0).contains(&p));
    }
}

#[test]
fn test_model_shared_across_threads() {
    let model = std::sync::Arc::new(RiskModel::build(&ScorerConfig::default()).unwrap());
    let profile = sample_profiles()[1].clone();
    let expected = model.default_probability(&profile);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let model = model.clone();
            let profile = profile.clone();
            std::thread::spawn(move || model.default_probability(&profile))
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap().to_bits(), expected.to_bits());
    }
}

// ===========================================================================
// Enveloped entry points
// ===========================================================================

#[test]
fn test_score_applicant_envelope() {
    let model = RiskModel::build(&ScorerConfig::default()).unwrap();
    let out = score_applicant(&model, &sample_profiles()[0]).unwrap();
    assert_eq!(out.metadata.precision, "ieee754_f64");
    assert_eq!(
        out.result.predicted_default,
        out.result.default_probability > 0.5
    );
}

#[test]
fn test_describe_model_summary() {
    let out = describe_model(&ScorerConfig::default()).unwrap();
    let s = &out.result;
    assert_eq!(s.training_samples + s.holdout_samples, 1000);
    assert!(s.depth >= 1 && s.depth <= 4);
    assert_eq!(s.nodes.len(), 2 * s.leaf_count - 1);
    let acc = s.holdout_accuracy.unwrap();
    assert!((0.0..=1.0).contains(&acc));
}
