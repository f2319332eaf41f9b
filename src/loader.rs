//! Trial store loader
//!
//! Search logs are stored one file per (variant, dataset) pair:
//!
//! ```text
//! <dir>/<variant>_trials_<dataset>.json
//! <dir>/<variant>_trials_<dataset>.json.zst   (feature = "compression")
//! ```
//!
//! Discovery is separated from loading: [`TrialManifest::discover`] maps the
//! naming convention to an explicit dataset -> path manifest, and
//! [`load_manifest`] only ever sees that manifest. Callers with their own
//! layout build a manifest by hand.
//!
//! ## Log Format
//!
//! ```json
//! {"trials": [
//!   {"tid": 0, "book_time": "2018-05-01T10:00:00Z",
//!    "result": {"status": "ok", "hyper": {"type": "lstm"},
//!               "validation_mrr": 0.071, "test_mrr": 0.065}}
//! ]}
//! ```
//!
//! Trials that did not finish (`status != "ok"`) or carry no finite scores
//! are dropped here, so every record handed to selection is complete.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::trial::{DatasetResultSet, Hyperparameters, TrialCollection, TrialRecord};
use crate::{Error, Result};

/// Plain JSON log extension.
pub const JSON_EXTENSION: &str = "json";

/// zstd-compressed JSON log extension.
#[cfg(feature = "compression")]
pub const ZSTD_EXTENSION: &str = "json.zst";

/// Extensions recognized by discovery, longest first.
#[cfg(feature = "compression")]
const EXTENSIONS: &[&str] = &[ZSTD_EXTENSION, JSON_EXTENSION];
#[cfg(not(feature = "compression"))]
const EXTENSIONS: &[&str] = &[JSON_EXTENSION];

#[derive(Debug, Deserialize)]
struct TrialLog {
    trials: Vec<LoggedTrial>,
}

/// `tid` and `book_time` are informational: a value of another shape reads
/// as absent rather than failing the file.
#[derive(Debug, Deserialize)]
struct LoggedTrial {
    #[serde(default)]
    tid: Option<Value>,
    #[serde(default)]
    book_time: Option<Value>,
    result: LoggedResult,
}

#[derive(Debug, Deserialize)]
struct LoggedResult {
    #[serde(default)]
    status: TrialStatus,
    hyper: Hyperparameters,
    #[serde(default)]
    validation_mrr: Option<f64>,
    #[serde(default)]
    test_mrr: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum TrialStatus {
    #[default]
    Ok,
    Fail,
    #[serde(other)]
    Unknown,
}

/// RFC 3339, or a naive `YYYY-MM-DD HH:MM:SS[.frac]` stamp taken as UTC.
fn parse_book_time(value: &Value) -> Option<DateTime<Utc>> {
    let text = value.as_str()?.trim();
    if let Ok(stamp) = DateTime::parse_from_rfc3339(text) {
        return Some(stamp.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| naive.and_utc())
}

impl LoggedTrial {
    fn into_record(self) -> Option<TrialRecord> {
        let tid = self.tid.as_ref().and_then(Value::as_u64);
        let booked_at = self.book_time.as_ref().and_then(parse_book_time);
        let LoggedResult {
            status,
            hyper,
            validation_mrr,
            test_mrr,
        } = self.result;

        if status != TrialStatus::Ok {
            debug!(tid = ?tid, ?status, "skipping unfinished trial");
            return None;
        }

        let (Some(validation), Some(test)) = (validation_mrr, test_mrr) else {
            debug!(tid = ?tid, "skipping trial without scores");
            return None;
        };

        if !validation.is_finite() || !test.is_finite() {
            debug!(tid = ?tid, validation, test, "skipping trial with non-finite scores");
            return None;
        }

        let mut builder = TrialRecord::builder(hyper, validation, test);
        if let Some(tid) = tid {
            builder = builder.tid(tid);
        }
        if let Some(booked_at) = booked_at {
            builder = builder.booked_at(booked_at);
        }
        Some(builder.build())
    }
}

/// Explicit dataset -> trial file mapping for one search variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrialManifest {
    entries: BTreeMap<String, PathBuf>,
}

impl TrialManifest {
    /// Create an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `dataset` to a trial file, replacing any previous mapping.
    #[must_use]
    pub fn with_entry(mut self, dataset: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.entries.insert(dataset.into(), path.into());
        self
    }

    /// Discover `<variant>_trials_<dataset>.<ext>` files directly under `dir`.
    ///
    /// A missing directory or a directory without matching files yields an
    /// empty manifest.
    ///
    /// # Errors
    ///
    /// Returns error if the directory exists but cannot be listed.
    pub fn discover<P: AsRef<Path>>(dir: P, variant: &str) -> Result<Self> {
        let dir = dir.as_ref();
        let mut manifest = Self::new();

        if !dir.is_dir() {
            warn!(dir = %dir.display(), variant, "trial directory does not exist");
            return Ok(manifest);
        }

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            if let Some(dataset) = parse_dataset_name(file_name, variant) {
                debug!(dataset, path = %path.display(), "discovered trial file");
                manifest.entries.insert(dataset.to_string(), path.clone());
            }
        }

        if manifest.is_empty() {
            warn!(dir = %dir.display(), variant, "no trial files matched");
        }

        Ok(manifest)
    }

    /// Get the trial file for a dataset.
    #[must_use]
    pub fn path(&self, dataset: &str) -> Option<&Path> {
        self.entries.get(dataset).map(PathBuf::as_path)
    }

    /// Iterate over (dataset, path) pairs in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries
            .iter()
            .map(|(dataset, path)| (dataset.as_str(), path.as_path()))
    }

    /// Number of datasets in the manifest.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the manifest is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse the dataset name out of `<variant>_trials_<dataset>.<ext>`.
///
/// Returns `None` for files of another variant, unknown extensions, or an
/// empty dataset name.
#[must_use]
pub fn parse_dataset_name<'a>(file_name: &'a str, variant: &str) -> Option<&'a str> {
    let rest = file_name.strip_prefix(variant)?.strip_prefix("_trials_")?;
    EXTENSIONS
        .iter()
        .find_map(|ext| rest.strip_suffix(ext)?.strip_suffix('.'))
        .filter(|dataset| !dataset.is_empty())
}

fn decode(path: &Path, reader: impl Read) -> Result<TrialLog> {
    serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            Error::Io(e.into())
        } else {
            Error::CorruptTrialFile {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        }
    })
}

fn read_log(path: &Path) -> Result<TrialLog> {
    let file = File::open(path)?;

    #[cfg(feature = "compression")]
    {
        if path.to_string_lossy().ends_with(ZSTD_EXTENSION) {
            let decoder =
                zstd::stream::read::Decoder::new(file).map_err(|e| Error::CorruptTrialFile {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
            return decode(path, BufReader::new(decoder));
        }
    }

    decode(path, BufReader::new(file))
}

/// Load one trial file into a collection, preserving stored order.
///
/// # Errors
///
/// Returns [`Error::CorruptTrialFile`] if the file does not decode, or
/// [`Error::Io`] if it cannot be read.
pub fn load_collection<P: AsRef<Path>>(path: P) -> Result<TrialCollection> {
    let path = path.as_ref();
    let log = read_log(path)?;
    let total = log.trials.len();

    let collection: TrialCollection = log
        .trials
        .into_iter()
        .filter_map(LoggedTrial::into_record)
        .collect();

    debug!(
        path = %path.display(),
        kept = collection.len(),
        skipped = total - collection.len(),
        "loaded trial file"
    );

    Ok(collection)
}

/// Load every file of a manifest into a dataset-keyed result set.
///
/// With the `rayon` feature files are decoded in parallel; each collection
/// keeps its own stored order either way.
///
/// # Errors
///
/// Propagates the first load error. No partial result set is returned.
pub fn load_manifest(manifest: &TrialManifest) -> Result<DatasetResultSet> {
    #[cfg(feature = "rayon")]
    let loaded: Vec<(String, TrialCollection)> = {
        use rayon::prelude::*;

        manifest
            .entries
            .par_iter()
            .map(|(dataset, path)| -> Result<(String, TrialCollection)> {
                Ok((dataset.clone(), load_collection(path)?))
            })
            .collect::<Result<_>>()?
    };

    #[cfg(not(feature = "rayon"))]
    let loaded: Vec<(String, TrialCollection)> = manifest
        .entries
        .iter()
        .map(|(dataset, path)| -> Result<(String, TrialCollection)> {
            Ok((dataset.clone(), load_collection(path)?))
        })
        .collect::<Result<_>>()?;

    for (dataset, collection) in &loaded {
        info!(dataset = dataset.as_str(), trials = collection.len(), "loaded trials");
    }

    Ok(loaded.into_iter().collect())
}

/// Discover and load all trial files of `variant` under `dir`.
///
/// ## Example
///
/// ```rust,no_run
/// use trial_report::loader::read_results;
///
/// let sequence = read_results("results", "sequence")?;
/// for dataset in sequence.datasets() {
///     println!("{dataset}: {} trials", sequence.collection(dataset).len());
/// }
/// # Ok::<(), trial_report::Error>(())
/// ```
///
/// # Errors
///
/// Returns error if the directory cannot be listed or a matched file is
/// corrupt.
pub fn read_results<P: AsRef<Path>>(dir: P, variant: &str) -> Result<DatasetResultSet> {
    let manifest = TrialManifest::discover(dir, variant)?;
    load_manifest(&manifest)
}
