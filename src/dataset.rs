//! Interaction datasets and their summary statistics
//!
//! The statistics table only needs four facts about a dataset: interaction
//! count, user count, item count and per-user interaction counts. Anything
//! that can report them implements [`InteractionStats`].

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{Error, Result};

/// The facts the dataset statistics table consumes.
pub trait InteractionStats {
    /// Total number of (user, item) interactions.
    fn num_interactions(&self) -> usize;

    /// Number of users (rows of the interaction matrix).
    fn num_users(&self) -> usize;

    /// Number of items (columns of the interaction matrix).
    fn num_items(&self) -> usize;

    /// Interaction count of every user, one entry per user.
    fn user_interaction_counts(&self) -> Vec<usize>;
}

/// Derived statistics of one dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetStats {
    /// Number of users.
    pub num_users: usize,
    /// Number of items.
    pub num_items: usize,
    /// `interactions / (users * items)`; 0.0 for an empty matrix.
    pub density: f64,
    /// 95th / 50th percentile of per-user interaction counts; 0.0 when the
    /// median is zero.
    pub skew_ratio: f64,
}

impl DatasetStats {
    /// Compute the statistics of a dataset.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute<D: InteractionStats + ?Sized>(dataset: &D) -> Self {
        let num_users = dataset.num_users();
        let num_items = dataset.num_items();
        let cells = num_users as f64 * num_items as f64;
        let density = if cells > 0.0 {
            dataset.num_interactions() as f64 / cells
        } else {
            0.0
        };

        let counts: Vec<f64> = dataset
            .user_interaction_counts()
            .into_iter()
            .map(|c| c as f64)
            .collect();
        let skew_ratio = match (percentile(&counts, 95.0), percentile(&counts, 50.0)) {
            (Some(p95), Some(p50)) if p50 > 0.0 => p95 / p50,
            _ => 0.0,
        };

        Self {
            num_users,
            num_items,
            density,
            skew_ratio,
        }
    }
}

/// Percentile `q` (0-100) with linear interpolation between closest ranks.
///
/// Returns `None` for empty input.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = (q.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

/// In-memory interaction matrix in coordinate form.
///
/// User and item IDs are dense indices; the matrix shape is one past the
/// largest ID seen unless given explicitly. A user with no interactions
/// still counts as a row.
#[derive(Debug, Clone, Default)]
pub struct Interactions {
    user_ids: Vec<u32>,
    item_ids: Vec<u32>,
    num_users: usize,
    num_items: usize,
}

impl Interactions {
    /// Build from parallel user / item ID vectors.
    ///
    /// # Errors
    ///
    /// Returns error if the vectors differ in length.
    pub fn new(user_ids: Vec<u32>, item_ids: Vec<u32>) -> Result<Self> {
        if user_ids.len() != item_ids.len() {
            return Err(Error::DatasetError(format!(
                "user_ids has {} entries but item_ids has {}",
                user_ids.len(),
                item_ids.len()
            )));
        }
        let num_users = user_ids.iter().max().map_or(0, |&id| id as usize + 1);
        let num_items = item_ids.iter().max().map_or(0, |&id| id as usize + 1);
        Ok(Self {
            user_ids,
            item_ids,
            num_users,
            num_items,
        })
    }

    /// Override the matrix shape.
    ///
    /// # Errors
    ///
    /// Returns error if an ID falls outside the new shape.
    pub fn with_shape(mut self, num_users: usize, num_items: usize) -> Result<Self> {
        if num_users < self.num_users || num_items < self.num_items {
            return Err(Error::DatasetError(format!(
                "shape ({num_users}, {num_items}) is smaller than observed ({}, {})",
                self.num_users, self.num_items
            )));
        }
        self.num_users = num_users;
        self.num_items = num_items;
        Ok(self)
    }

    /// Read a CSV with `user_id` and `item_id` columns (other columns ignored).
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be opened, lacks either column, or
    /// holds a non-integer ID.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut reader = csv::Reader::from_reader(BufReader::new(file));

        let headers = reader
            .headers()
            .map_err(|e| Error::DatasetError(e.to_string()))?
            .clone();
        let column = |name: &str| {
            headers.iter().position(|h| h.trim() == name).ok_or_else(|| {
                Error::DatasetError(format!("{} has no `{name}` column", path.display()))
            })
        };
        let user_col = column("user_id")?;
        let item_col = column("item_id")?;

        let mut user_ids = Vec::new();
        let mut item_ids = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record.map_err(|e| Error::DatasetError(e.to_string()))?;
            let parse = |col: usize| -> Result<u32> {
                let field = record.get(col).unwrap_or_default().trim();
                field.parse().map_err(|_| {
                    Error::DatasetError(format!(
                        "{} row {}: invalid id {field:?}",
                        path.display(),
                        line + 1
                    ))
                })
            };
            user_ids.push(parse(user_col)?);
            item_ids.push(parse(item_col)?);
        }

        debug!(path = %path.display(), interactions = user_ids.len(), "read interactions");
        Self::new(user_ids, item_ids)
    }
}

impl InteractionStats for Interactions {
    fn num_interactions(&self) -> usize {
        self.user_ids.len()
    }

    fn num_users(&self) -> usize {
        self.num_users
    }

    fn num_items(&self) -> usize {
        self.num_items
    }

    fn user_interaction_counts(&self) -> Vec<usize> {
        let mut per_user: FxHashMap<u32, usize> = FxHashMap::default();
        for &user in &self.user_ids {
            *per_user.entry(user).or_insert(0) += 1;
        }
        (0..self.num_users)
            .map(|user| {
                u32::try_from(user)
                    .ok()
                    .and_then(|user| per_user.get(&user).copied())
                    .unwrap_or(0)
            })
            .collect()
    }
}
