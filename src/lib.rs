//! # trial-report: Hyperparameter Search Reporting
//!
//! Turns the trial logs of a recommender-model hyperparameter search into
//! paper-ready results: best-model performance tables, a mixture-component
//! sensitivity table, learning curves and dataset statistics.
//!
//! ## Pipeline
//!
//! ```text
//! <variant>_trials_<dataset>.json ─> loader ─> DatasetResultSet
//!                                                │
//!                         selection (best by validation, latest on ties)
//!                                                │
//!            report::builders ─> Table ─> LatexBooktabs / PlainText
//!            curves::build_learning_curves ─> PanelGrid ─> sparkline / plot
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use trial_report::config::ReportConfig;
//! use trial_report::loader::read_results;
//! use trial_report::report::{performance_table, LatexBooktabs, TableRenderer};
//!
//! let sequence = read_results("results", "sequence")?;
//! let factorization = read_results("results", "factorization")?;
//! let config = ReportConfig::default();
//!
//! let table = performance_table(&sequence, &factorization, &config);
//! println!("{}", LatexBooktabs::new().render_composite(&table, config.float_precision()));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod config;
pub mod curves;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod report;
pub mod selection;
pub mod summary;
pub mod trial;

pub use error::{Error, Result};
