//! Integration tests for trial selection
//!
//! Covers the worked examples of the selection rule: validation-only
//! ranking, latest-wins ties, hyperparameter slices and missing data.

use trial_report::selection::{
    always, num_components_eq, select_best, select_best_test, select_best_test_any,
    test_score_history, MISSING_SCORE,
};
use trial_report::trial::{Hyperparameters, ModelFamily, TrialCollection, TrialRecord};

fn trial(family: ModelFamily, validation: f64, test: f64) -> TrialRecord {
    TrialRecord::new(Hyperparameters::new(family), validation, test)
}

fn mixture(components: u32, validation: f64, test: f64) -> TrialRecord {
    TrialRecord::new(
        Hyperparameters::builder(ModelFamily::Mixture)
            .num_components(components)
            .build(),
        validation,
        test,
    )
}

#[test]
fn test_selection_ignores_test_scores() {
    let trials = TrialCollection::new(vec![
        trial(ModelFamily::Mixture, 0.10, 0.50),
        trial(ModelFamily::Mixture, 0.30, 0.40),
        trial(ModelFamily::Mixture, 0.20, 0.90),
    ]);

    let score = select_best_test_any(&trials, ModelFamily::Mixture);
    assert!((score - 0.40).abs() < f64::EPSILON);
}

#[test]
fn test_selection_tie_goes_to_latest_trial() {
    let trials = TrialCollection::new(vec![
        trial(ModelFamily::Lstm, 0.30, 0.11),
        trial(ModelFamily::Lstm, 0.30, 0.22),
    ]);
    let score = select_best_test_any(&trials, ModelFamily::Lstm);
    assert!((score - 0.22).abs() < f64::EPSILON);

    let reversed = TrialCollection::new(vec![
        trial(ModelFamily::Lstm, 0.30, 0.22),
        trial(ModelFamily::Lstm, 0.30, 0.11),
    ]);
    let score = select_best_test_any(&reversed, ModelFamily::Lstm);
    assert!((score - 0.11).abs() < f64::EPSILON);
}

#[test]
fn test_selection_signed_zero_scores_tie() {
    let trials = TrialCollection::new(vec![
        trial(ModelFamily::Mixture, 0.0, 0.1),
        trial(ModelFamily::Mixture, -0.0, 0.9),
    ]);
    let score = select_best_test_any(&trials, ModelFamily::Mixture);
    assert!((score - 0.9).abs() < f64::EPSILON);

    let reversed = TrialCollection::new(vec![
        trial(ModelFamily::Mixture, -0.0, 0.9),
        trial(ModelFamily::Mixture, 0.0, 0.1),
    ]);
    let score = select_best_test_any(&reversed, ModelFamily::Mixture);
    assert!((score - 0.1).abs() < f64::EPSILON);
}

#[test]
fn test_selection_other_families_do_not_interfere() {
    let trials = TrialCollection::new(vec![
        trial(ModelFamily::Bilinear, 0.90, 0.90),
        trial(ModelFamily::Lstm, 0.10, 0.05),
    ]);
    let best = select_best(&trials, ModelFamily::Lstm, always).unwrap();
    assert_eq!(best.family(), ModelFamily::Lstm);
    assert!((best.test_score() - 0.05).abs() < f64::EPSILON);
}

#[test]
fn test_component_slice() {
    let trials = TrialCollection::new(vec![
        mixture(2, 0.40, 0.31),
        mixture(4, 0.20, 0.12),
        mixture(4, 0.25, 0.14),
        trial(ModelFamily::Mixture, 0.99, 0.99),
    ]);

    assert!((select_best_test(&trials, ModelFamily::Mixture, num_components_eq(4)) - 0.14).abs() < f64::EPSILON);
    assert!((select_best_test(&trials, ModelFamily::Mixture, num_components_eq(2)) - 0.31).abs() < f64::EPSILON);
    assert_eq!(
        select_best_test(&trials, ModelFamily::Mixture, num_components_eq(8)),
        MISSING_SCORE
    );
}

#[test]
fn test_missing_family_is_zero_not_error() {
    let trials = TrialCollection::new(vec![trial(ModelFamily::Lstm, 0.1, 0.1)]);
    assert_eq!(select_best_test_any(&trials, ModelFamily::Pooling), 0.0);
    assert_eq!(select_best_test_any(TrialCollection::empty(), ModelFamily::Lstm), 0.0);
    assert!(select_best(TrialCollection::empty(), ModelFamily::Lstm, always).is_none());
}

#[test]
fn test_history_keeps_collection_order() {
    let trials = TrialCollection::new(vec![
        trial(ModelFamily::Lstm, 0.1, 0.03),
        trial(ModelFamily::Mixture, 0.1, 0.50),
        trial(ModelFamily::Lstm, 0.1, 0.01),
        trial(ModelFamily::Lstm, 0.1, 0.02),
    ]);
    assert_eq!(test_score_history(&trials, ModelFamily::Lstm), vec![0.03, 0.01, 0.02]);
    assert!(test_score_history(&trials, ModelFamily::Bilinear).is_empty());
}
