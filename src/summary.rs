//! Per-family console summary of one trial collection.
//!
//! Besides the validation-selected winner this also reports the trial with
//! the best test score. That second trial is a diagnostic for how far
//! validation-based selection lands from the oracle; it never feeds a table.

use std::cmp::Ordering;
use std::fmt;

use crate::selection::{always, select_best};
use crate::trial::{ModelFamily, TrialCollection, TrialRecord};

/// Best trials of one family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FamilySummary<'a> {
    /// Model family.
    pub family: ModelFamily,
    /// Number of trials of the family.
    pub trials: usize,
    /// Winner by validation score (latest on ties).
    pub best_by_validation: &'a TrialRecord,
    /// Winner by test score (latest on ties).
    pub best_by_test: &'a TrialRecord,
}

impl FamilySummary<'_> {
    /// Test score lost by selecting on validation instead of test.
    #[must_use]
    pub fn selection_gap(&self) -> f64 {
        self.best_by_test.test_score() - self.best_by_validation.test_score()
    }
}

fn best_by_test(collection: &TrialCollection, family: ModelFamily) -> Option<&TrialRecord> {
    let mut matching: Vec<&TrialRecord> = collection
        .iter()
        .filter(|trial| trial.family() == family)
        .collect();
    matching.sort_by(|a, b| {
        a.test_score()
            .partial_cmp(&b.test_score())
            .unwrap_or(Ordering::Equal)
    });
    matching.last().copied()
}

/// Summarize every family that has at least one trial, in
/// [`ModelFamily::ALL`] order.
#[must_use]
pub fn summarize_trials(collection: &TrialCollection) -> Vec<FamilySummary<'_>> {
    ModelFamily::ALL
        .into_iter()
        .filter_map(|family| {
            Some(FamilySummary {
                family,
                trials: collection.iter().filter(|t| t.family() == family).count(),
                best_by_validation: select_best(collection, family, always)?,
                best_by_test: best_by_test(collection, family)?,
            })
        })
        .collect()
}

impl fmt::Display for FamilySummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let val = self.best_by_validation;
        let test = self.best_by_test;
        write!(
            f,
            "{:<18} trials={:<4} best-by-validation: val={:.4} test={:.4}  best-by-test: val={:.4} test={:.4}",
            self.family.as_str(),
            self.trials,
            val.validation_score(),
            val.test_score(),
            test.validation_score(),
            test.test_score(),
        )?;
        if let Some(n) = val.hyperparameters().num_components() {
            write!(f, "  components={n}")?;
        }
        Ok(())
    }
}
