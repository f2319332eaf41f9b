//! Report configuration
//!
//! Defaults reproduce the published layout: three datasets (Movielens 10M,
//! Amazon, Goodbooks), component counts {2, 4, 6, 8}, 100-trial learning
//! curves and four-decimal MRR cells. A JSON file may override any subset
//! of the fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default number of trials shown on a learning curve.
pub const DEFAULT_MAX_ITER: usize = 100;

/// Default decimal digits for score cells.
pub const DEFAULT_FLOAT_PRECISION: usize = 4;

/// Default component counts compared in the sensitivity table.
pub const DEFAULT_COMPONENT_COUNTS: [u32; 4] = [2, 4, 6, 8];

/// A dataset column: result-set key plus display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSpec {
    key: String,
    label: String,
}

impl DatasetSpec {
    /// Create a dataset column.
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }

    /// Key into a `DatasetResultSet`.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Column header / panel title.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

fn default_datasets() -> Vec<DatasetSpec> {
    vec![
        DatasetSpec::new("10M", "Movielens 10M"),
        DatasetSpec::new("amazon", "Amazon"),
        DatasetSpec::new("goodbooks", "Goodbooks"),
    ]
}

fn default_component_counts() -> Vec<u32> {
    DEFAULT_COMPONENT_COUNTS.to_vec()
}

const fn default_max_iter() -> usize {
    DEFAULT_MAX_ITER
}

const fn default_float_precision() -> usize {
    DEFAULT_FLOAT_PRECISION
}

/// Layout and formatting knobs shared by all report builders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_datasets")]
    datasets: Vec<DatasetSpec>,
    #[serde(default = "default_component_counts")]
    component_counts: Vec<u32>,
    #[serde(default = "default_max_iter")]
    max_iter: usize,
    #[serde(default = "default_float_precision")]
    float_precision: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            datasets: default_datasets(),
            component_counts: default_component_counts(),
            max_iter: DEFAULT_MAX_ITER,
            float_precision: DEFAULT_FLOAT_PRECISION,
        }
    }
}

impl ReportConfig {
    /// Create a builder starting from the defaults.
    #[must_use]
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    /// Load a configuration from a JSON file; absent fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, does not parse, or fails
    /// validation.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            Error::InvalidConfig(format!("failed to parse {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration can drive every builder.
    ///
    /// # Errors
    ///
    /// Returns error if no datasets are configured, a dataset key repeats,
    /// or `max_iter` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.datasets.is_empty() {
            return Err(Error::InvalidConfig("at least one dataset is required".to_string()));
        }
        for (i, dataset) in self.datasets.iter().enumerate() {
            if self.datasets[..i].iter().any(|d| d.key == dataset.key) {
                return Err(Error::InvalidConfig(format!(
                    "duplicate dataset key: {}",
                    dataset.key
                )));
            }
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidConfig("max_iter must be greater than 0".to_string()));
        }
        Ok(())
    }

    /// Dataset columns in display order.
    #[must_use]
    pub fn datasets(&self) -> &[DatasetSpec] {
        &self.datasets
    }

    /// Component counts compared in the sensitivity table.
    #[must_use]
    pub fn component_counts(&self) -> &[u32] {
        &self.component_counts
    }

    /// Trials shown per learning curve.
    #[must_use]
    pub const fn max_iter(&self) -> usize {
        self.max_iter
    }

    /// Decimal digits of score cells.
    #[must_use]
    pub const fn float_precision(&self) -> usize {
        self.float_precision
    }
}

/// Builder for `ReportConfig`.
#[derive(Debug, Default)]
pub struct ReportConfigBuilder {
    config: ReportConfig,
}

impl ReportConfigBuilder {
    /// Replace the dataset columns.
    #[must_use]
    pub fn datasets(mut self, datasets: Vec<DatasetSpec>) -> Self {
        self.config.datasets = datasets;
        self
    }

    /// Replace the component counts.
    #[must_use]
    pub fn component_counts(mut self, counts: Vec<u32>) -> Self {
        self.config.component_counts = counts;
        self
    }

    /// Set the learning-curve length.
    #[must_use]
    pub const fn max_iter(mut self, max_iter: usize) -> Self {
        self.config.max_iter = max_iter;
        self
    }

    /// Set the score precision.
    #[must_use]
    pub const fn float_precision(mut self, precision: usize) -> Self {
        self.config.float_precision = precision;
        self
    }

    /// Build and validate the `ReportConfig`.
    ///
    /// # Errors
    ///
    /// Returns error if the resulting configuration fails validation.
    pub fn build(self) -> Result<ReportConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
