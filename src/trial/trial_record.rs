//! Trial Record - one evaluated hyperparameter configuration

use chrono::{DateTime, Utc};

use super::{Hyperparameters, ModelFamily};

/// Trial Record represents one completed hyperparameter-search trial.
///
/// Both scores are MRR values where higher is better. The validation score
/// is the model-selection criterion; the test score is reported only for the
/// trial that wins selection.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialRecord {
    tid: Option<u64>,
    hyperparameters: Hyperparameters,
    validation_score: f64,
    test_score: f64,
    booked_at: Option<DateTime<Utc>>,
}

impl TrialRecord {
    /// Create a new trial record.
    ///
    /// # Arguments
    ///
    /// * `hyperparameters` - Configuration evaluated by the trial
    /// * `validation_score` - Validation MRR (selection criterion)
    /// * `test_score` - Held-out test MRR
    #[must_use]
    pub const fn new(hyperparameters: Hyperparameters, validation_score: f64, test_score: f64) -> Self {
        Self {
            tid: None,
            hyperparameters,
            validation_score,
            test_score,
            booked_at: None,
        }
    }

    /// Create a builder for constructing a trial record with optional fields.
    #[must_use]
    pub const fn builder(
        hyperparameters: Hyperparameters,
        validation_score: f64,
        test_score: f64,
    ) -> TrialRecordBuilder {
        TrialRecordBuilder::new(hyperparameters, validation_score, test_score)
    }

    /// Get the model family.
    #[must_use]
    pub const fn family(&self) -> ModelFamily {
        self.hyperparameters.family()
    }

    /// Get the trial ID assigned by the search driver, if recorded.
    #[must_use]
    pub const fn tid(&self) -> Option<u64> {
        self.tid
    }

    /// Get the hyperparameters.
    #[must_use]
    pub const fn hyperparameters(&self) -> &Hyperparameters {
        &self.hyperparameters
    }

    /// Get the validation score.
    #[must_use]
    pub const fn validation_score(&self) -> f64 {
        self.validation_score
    }

    /// Get the test score.
    #[must_use]
    pub const fn test_score(&self) -> f64 {
        self.test_score
    }

    /// Get the time the trial was scheduled, if recorded.
    #[must_use]
    pub const fn booked_at(&self) -> Option<DateTime<Utc>> {
        self.booked_at
    }
}

/// Builder for `TrialRecord`.
#[derive(Debug)]
pub struct TrialRecordBuilder {
    record: TrialRecord,
}

impl TrialRecordBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub const fn new(hyperparameters: Hyperparameters, validation_score: f64, test_score: f64) -> Self {
        Self {
            record: TrialRecord::new(hyperparameters, validation_score, test_score),
        }
    }

    /// Set the trial ID.
    #[must_use]
    pub const fn tid(mut self, tid: u64) -> Self {
        self.record.tid = Some(tid);
        self
    }

    /// Set the scheduling timestamp.
    #[must_use]
    pub const fn booked_at(mut self, booked_at: DateTime<Utc>) -> Self {
        self.record.booked_at = Some(booked_at);
        self
    }

    /// Build the `TrialRecord`.
    #[must_use]
    pub fn build(self) -> TrialRecord {
        self.record
    }
}
