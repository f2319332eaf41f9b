//! Trial data model
//!
//! ## Schema Overview
//!
//! ```text
//! DatasetResultSet (1) ──< TrialCollection (per dataset, ordered)
//!                              │
//!                              └──< TrialRecord (N)
//!                                       └── Hyperparameters ── ModelFamily
//! ```
//!
//! Records are deserialized once from a search log and never mutated.
//!
//! ## Usage
//!
//! ```rust
//! use trial_report::trial::{Hyperparameters, ModelFamily, TrialCollection, TrialRecord};
//!
//! let hyper = Hyperparameters::builder(ModelFamily::Mixture).num_components(4).build();
//! let collection = TrialCollection::new(vec![TrialRecord::new(hyper, 0.10, 0.08)]);
//! assert_eq!(collection.len(), 1);
//! ```

mod collection;
mod family;
mod hyperparameters;
mod trial_record;

pub use collection::{DatasetResultSet, TrialCollection};
pub use family::{ModelClass, ModelEntry, ModelFamily};
pub use hyperparameters::{Hyperparameters, HyperparametersBuilder};
pub use trial_record::{TrialRecord, TrialRecordBuilder};
