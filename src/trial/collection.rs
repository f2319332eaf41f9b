//! Trial collections and dataset-keyed result sets

use rustc_hash::FxHashMap;

use super::TrialRecord;

static EMPTY: TrialCollection = TrialCollection { trials: Vec::new() };

/// Ordered trials of one search run.
///
/// Order is the creation order of the trials during the search; the history
/// extractor and the selector's tie-break both depend on it, so the
/// collection never reorders its records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrialCollection {
    trials: Vec<TrialRecord>,
}

impl TrialCollection {
    /// Create a collection from trials in creation order.
    #[must_use]
    pub const fn new(trials: Vec<TrialRecord>) -> Self {
        Self { trials }
    }

    /// Shared empty collection.
    #[must_use]
    pub fn empty() -> &'static Self {
        &EMPTY
    }

    /// Get the trials in creation order.
    #[must_use]
    pub fn trials(&self) -> &[TrialRecord] {
        &self.trials
    }

    /// Iterate over trials in creation order.
    pub fn iter(&self) -> std::slice::Iter<'_, TrialRecord> {
        self.trials.iter()
    }

    /// Number of trials.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trials.len()
    }

    /// Check if the collection holds no trials.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }
}

impl From<Vec<TrialRecord>> for TrialCollection {
    fn from(trials: Vec<TrialRecord>) -> Self {
        Self::new(trials)
    }
}

impl FromIterator<TrialRecord> for TrialCollection {
    fn from_iter<I: IntoIterator<Item = TrialRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TrialCollection {
    type Item = &'a TrialRecord;
    type IntoIter = std::slice::Iter<'a, TrialRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.trials.iter()
    }
}

/// Trial collections of one search variant, keyed by dataset name
/// (`"10M"`, `"amazon"`, `"goodbooks"`).
///
/// A dataset with no collection reads as the empty collection, so report
/// builders render zero cells for an incomplete sweep instead of failing.
#[derive(Debug, Clone, Default)]
pub struct DatasetResultSet {
    collections: FxHashMap<String, TrialCollection>,
}

impl DatasetResultSet {
    /// Create an empty result set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the collection for a dataset.
    pub fn insert(&mut self, dataset: impl Into<String>, collection: TrialCollection) {
        self.collections.insert(dataset.into(), collection);
    }

    /// Get the collection for a dataset, empty if the dataset was never loaded.
    #[must_use]
    pub fn collection(&self, dataset: &str) -> &TrialCollection {
        self.collections.get(dataset).unwrap_or(&EMPTY)
    }

    /// Check whether a dataset has a loaded collection.
    #[must_use]
    pub fn contains(&self, dataset: &str) -> bool {
        self.collections.contains_key(dataset)
    }

    /// Dataset names with a loaded collection, sorted.
    #[must_use]
    pub fn datasets(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.collections.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of loaded datasets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    /// Check if no dataset is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

impl FromIterator<(String, TrialCollection)> for DatasetResultSet {
    fn from_iter<I: IntoIterator<Item = (String, TrialCollection)>>(iter: I) -> Self {
        Self {
            collections: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trial::{Hyperparameters, ModelFamily};

    #[test]
    fn test_result_set_missing_dataset_is_empty() {
        let results = DatasetResultSet::new();
        assert!(results.collection("amazon").is_empty());
        assert!(!results.contains("amazon"));
    }

    #[test]
    fn test_result_set_datasets_sorted() {
        let mut results = DatasetResultSet::new();
        results.insert("goodbooks", TrialCollection::default());
        results.insert("10M", TrialCollection::default());
        results.insert("amazon", TrialCollection::default());
        assert_eq!(results.datasets(), ["10M", "amazon", "goodbooks"]);
    }

    #[test]
    fn test_collection_preserves_order() {
        let collection: TrialCollection = [0.3, 0.1, 0.2]
            .into_iter()
            .map(|v| TrialRecord::new(Hyperparameters::new(ModelFamily::Lstm), v, v))
            .collect();
        let scores: Vec<f64> = collection.iter().map(TrialRecord::validation_score).collect();
        assert_eq!(scores, [0.3, 0.1, 0.2]);
    }
}
