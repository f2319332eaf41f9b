//! Trial selection and test-score history
//!
//! Model selection follows the train/validate/test discipline: the winner
//! of a family is chosen by validation score alone and only its test score
//! is reported.
//!
//! ## Tie-Break
//!
//! Matching trials are stable-sorted by ascending validation score and the
//! last one wins, so among equal validation scores the trial that appears
//! latest in the collection is selected. The tie-break is a function of a
//! single collection's order and nothing else.
//!
//! ## Missing Data
//!
//! A family (or hyperparameter slice) with no trials is "no data", not an
//! error: [`select_best_test`] returns [`MISSING_SCORE`] and
//! [`test_score_history`] an empty vector.

use std::cmp::Ordering;

use crate::trial::{Hyperparameters, ModelFamily, TrialCollection, TrialRecord};

/// Score reported for a family / slice without any trials.
pub const MISSING_SCORE: f64 = 0.0;

/// Predicate that accepts every hyperparameter record.
#[must_use]
pub fn always(_: &Hyperparameters) -> bool {
    true
}

/// Predicate matching trials with exactly `n` mixture components.
///
/// Trials without a component count never match.
pub fn num_components_eq(n: u32) -> impl Fn(&Hyperparameters) -> bool {
    move |hyper| hyper.num_components() == Some(n)
}

/// Select the winning trial of `family` among those satisfying `predicate`.
///
/// ## Returns
///
/// The trial with the highest validation score, the latest one on ties, or
/// `None` when no trial matches.
///
/// ## Example
///
/// ```rust
/// use trial_report::selection::{always, select_best};
/// use trial_report::trial::{Hyperparameters, ModelFamily, TrialCollection, TrialRecord};
///
/// let trials = TrialCollection::new(vec![
///     TrialRecord::new(Hyperparameters::new(ModelFamily::Mixture), 0.10, 0.50),
///     TrialRecord::new(Hyperparameters::new(ModelFamily::Mixture), 0.30, 0.40),
/// ]);
///
/// let best = select_best(&trials, ModelFamily::Mixture, always).unwrap();
/// assert!((best.test_score() - 0.40).abs() < f64::EPSILON);
/// ```
pub fn select_best<P>(
    collection: &TrialCollection,
    family: ModelFamily,
    predicate: P,
) -> Option<&TrialRecord>
where
    P: Fn(&Hyperparameters) -> bool,
{
    let mut matching: Vec<&TrialRecord> = collection
        .iter()
        .filter(|trial| trial.family() == family && predicate(trial.hyperparameters()))
        .collect();

    // Stable: equal validation scores (0.0 and -0.0 included) keep
    // collection order, last one wins
    matching.sort_by(|a, b| {
        a.validation_score()
            .partial_cmp(&b.validation_score())
            .unwrap_or(Ordering::Equal)
    });

    matching.last().copied()
}

/// Test score of the winning trial of `family` under `predicate`.
///
/// Returns [`MISSING_SCORE`] when no trial matches.
pub fn select_best_test<P>(collection: &TrialCollection, family: ModelFamily, predicate: P) -> f64
where
    P: Fn(&Hyperparameters) -> bool,
{
    select_best(collection, family, predicate).map_or(MISSING_SCORE, TrialRecord::test_score)
}

/// [`select_best_test`] without a hyperparameter filter.
#[must_use]
pub fn select_best_test_any(collection: &TrialCollection, family: ModelFamily) -> f64 {
    select_best_test(collection, family, always)
}

/// Test scores of every `family` trial, in collection order.
///
/// No sorting, deduplication, or truncation is applied; curve building
/// does its own truncation.
#[must_use]
pub fn test_score_history(collection: &TrialCollection, family: ModelFamily) -> Vec<f64> {
    collection
        .iter()
        .filter(|trial| trial.family() == family)
        .map(TrialRecord::test_score)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_select_best_by_validation() {
        let trials = TrialCollection::new(vec![
            trial(ModelFamily::Mixture, 0.10, 0.50),
            trial(ModelFamily::Mixture, 0.30, 0.40),
            trial(ModelFamily::Lstm, 0.90, 0.20),
        ]);

        assert!((select_best_test_any(&trials, ModelFamily::Mixture) - 0.40).abs() < f64::EPSILON);
        assert!((select_best_test_any(&trials, ModelFamily::Lstm) - 0.20).abs() < f64::EPSILON);
        assert_eq!(select_best_test_any(&trials, ModelFamily::Bilinear), MISSING_SCORE);
    }

    #[test]
    fn test_select_best_tie_prefers_latest() {
        let trials = TrialCollection::new(vec![
            trial(ModelFamily::Mixture, 0.5, 0.1),
            trial(ModelFamily::Mixture, 0.5, 0.9),
        ]);
        assert!((select_best_test_any(&trials, ModelFamily::Mixture) - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_select_best_tie_not_last_overall() {
        // The tied pair is followed by a lower-scoring trial
        let trials = TrialCollection::new(vec![
            trial(ModelFamily::Lstm, 0.7, 0.3),
            trial(ModelFamily::Lstm, 0.7, 0.6),
            trial(ModelFamily::Lstm, 0.2, 0.99),
        ]);
        assert!((select_best_test_any(&trials, ModelFamily::Lstm) - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_select_best_ignores_test_score() {
        let trials = TrialCollection::new(vec![
            trial(ModelFamily::Bilinear, 0.2, 0.95),
            trial(ModelFamily::Bilinear, 0.3, 0.05),
        ]);
        assert!((select_best_test_any(&trials, ModelFamily::Bilinear) - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn test_select_best_with_predicate() {
        let trials = TrialCollection::new(vec![
            mixture(2, 0.9, 0.11),
            mixture(4, 0.4, 0.22),
            mixture(4, 0.6, 0.33),
            trial(ModelFamily::Mixture, 0.99, 0.44),
        ]);

        let four = select_best_test(&trials, ModelFamily::Mixture, num_components_eq(4));
        assert!((four - 0.33).abs() < f64::EPSILON);

        let eight = select_best_test(&trials, ModelFamily::Mixture, num_components_eq(8));
        assert_eq!(eight, MISSING_SCORE);
    }

    #[test]
    fn test_select_best_returns_record() {
        let trials = TrialCollection::new(vec![mixture(6, 0.5, 0.25)]);
        let best = select_best(&trials, ModelFamily::Mixture, always).unwrap();
        assert_eq!(best.hyperparameters().num_components(), Some(6));
        assert!(select_best(&trials, ModelFamily::Lstm, always).is_none());
    }

    #[test]
    fn test_history_preserves_order() {
        let trials = TrialCollection::new(vec![
            trial(ModelFamily::Lstm, 0.0, 0.1),
            trial(ModelFamily::Mixture, 0.0, 0.2),
            trial(ModelFamily::Lstm, 0.0, 0.3),
        ]);
        assert_eq!(test_score_history(&trials, ModelFamily::Lstm), vec![0.1, 0.3]);
    }

    #[test]
    fn test_history_empty() {
        let trials = TrialCollection::default();
        assert!(test_score_history(&trials, ModelFamily::Pooling).is_empty());
    }
}
