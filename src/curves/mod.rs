//! Learning-curve panels
//!
//! A learning curve shows the best test MRR found so far against the number
//! of search trials. [`build_learning_curves`] lays the curves out as a
//! 2 x 3 grid: one row per model class, one column per dataset.
//!
//! ```text
//!            Movielens 10M         Amazon             Goodbooks
//! Sequence   LSTM, Mixture-LSTM    ...                ... [legend]
//! Factoriz.  Bilinear, Proj., Emb. ...                ... [legend]
//! ```
//!
//! The grid is backend-independent; [`sparkline`] renders it in a terminal
//! and [`plot`] renders it to PNG / SVG when the `plotters` feature is on.

pub mod plot;
pub mod sparkline;

use crate::config::ReportConfig;
use crate::selection::test_score_history;
use crate::trial::{DatasetResultSet, ModelClass};

/// X axis label of the leftmost panel of each row.
pub const X_LABEL: &str = "Iterations";

/// Y axis label of the leftmost panel of each row.
pub const Y_LABEL: &str = "MRR";

/// Prefix maximum of `values`: element `i` is `max(values[..=i])`.
///
/// The output is non-decreasing and as long as the input.
#[must_use]
pub fn running_maximum(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(f64::NEG_INFINITY, |best, &value| {
            *best = best.max(value);
            Some(*best)
        })
        .collect()
}

/// One named line: y values plotted against their trial index.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    label: String,
    values: Vec<f64>,
}

impl Series {
    /// Create a series from y values.
    #[must_use]
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }

    /// Legend label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Y values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// (index, value) points.
    #[allow(clippy::cast_precision_loss)]
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values.iter().enumerate().map(|(i, &y)| (i as f64, y))
    }

    /// Check if the series has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One chart of the grid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Panel {
    /// Panel title (dataset label).
    pub title: String,
    /// Lines drawn in the panel.
    pub series: Vec<Series>,
    /// X axis label, if shown.
    pub x_label: Option<String>,
    /// Y axis label, if shown.
    pub y_label: Option<String>,
    /// Whether the panel draws a legend.
    pub legend: bool,
}

impl Panel {
    /// Longest series length (0 for an empty panel).
    #[must_use]
    pub fn max_len(&self) -> usize {
        self.series.iter().map(|s| s.values.len()).max().unwrap_or(0)
    }

    /// (min, max) over all series values, `None` for an empty panel.
    #[must_use]
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(None, |range, v| match range {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Row-major grid of panels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelGrid {
    rows: usize,
    cols: usize,
    panels: Vec<Panel>,
}

impl PanelGrid {
    /// Create a grid; `panels` is row-major and must hold `rows * cols` panels.
    ///
    /// # Errors
    ///
    /// Returns error if the panel count does not match the grid shape.
    pub fn new(rows: usize, cols: usize, panels: Vec<Panel>) -> crate::Result<Self> {
        if panels.len() != rows * cols {
            return Err(crate::Error::InvalidInput(format!(
                "{} panels do not fill a {rows}x{cols} grid",
                panels.len()
            )));
        }
        Ok(Self { rows, cols, panels })
    }

    /// Number of panel rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of panel columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Panels in row-major order.
    #[must_use]
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Panel at (`row`, `col`).
    #[must_use]
    pub fn panel(&self, row: usize, col: usize) -> Option<&Panel> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.panels.get(row * self.cols + col)
    }
}

/// Running-maximum curve of one family, truncated to `max_iter` trials.
#[must_use]
pub fn best_so_far(history: &[f64], max_iter: usize) -> Vec<f64> {
    running_maximum(&history[..history.len().min(max_iter)])
}

/// Build the learning-curve grid.
///
/// Row 0 holds the sequence models, row 1 the factorization models; one
/// column per configured dataset. The first panel of each row carries the
/// axis labels and the last one the legend. A family without trials yields
/// an empty series.
#[must_use]
pub fn build_learning_curves(
    sequence: &DatasetResultSet,
    factorization: &DatasetResultSet,
    config: &ReportConfig,
) -> PanelGrid {
    let datasets = config.datasets();
    let mut panels = Vec::with_capacity(ModelClass::ALL.len() * datasets.len());

    for class in ModelClass::ALL {
        let results = match class {
            ModelClass::Sequence => sequence,
            ModelClass::Factorization => factorization,
        };

        for (i, dataset) in datasets.iter().enumerate() {
            let collection = results.collection(dataset.key());
            let series = class
                .models()
                .iter()
                .map(|model| {
                    let history = test_score_history(collection, model.family);
                    Series::new(model.label, best_so_far(&history, config.max_iter()))
                })
                .collect();

            let first = i == 0;
            panels.push(Panel {
                title: dataset.label().to_string(),
                series,
                x_label: first.then(|| X_LABEL.to_string()),
                y_label: first.then(|| Y_LABEL.to_string()),
                legend: i + 1 == datasets.len(),
            });
        }
    }

    PanelGrid {
        rows: ModelClass::ALL.len(),
        cols: datasets.len(),
        panels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trial::{Hyperparameters, ModelFamily, TrialCollection, TrialRecord};

    #[test]
    fn test_running_maximum() {
        assert_eq!(
            running_maximum(&[0.1, 0.3, 0.2, 0.5, 0.4]),
            vec![0.1, 0.3, 0.3, 0.5, 0.5]
        );
        assert!(running_maximum(&[]).is_empty());
    }

    #[test]
    fn test_best_so_far_truncates() {
        let history = [0.2, 0.1, 0.4, 0.3];
        assert_eq!(best_so_far(&history, 2), vec![0.2, 0.2]);
        assert_eq!(best_so_far(&history, 100).len(), 4);
    }

    #[test]
    fn test_grid_shape_and_decorations() {
        let grid = build_learning_curves(
            &DatasetResultSet::new(),
            &DatasetResultSet::new(),
            &ReportConfig::default(),
        );
        assert_eq!((grid.rows(), grid.cols()), (2, 3));

        let top_left = grid.panel(0, 0).unwrap();
        assert_eq!(top_left.title, "Movielens 10M");
        assert_eq!(top_left.x_label.as_deref(), Some(X_LABEL));
        assert_eq!(top_left.y_label.as_deref(), Some(Y_LABEL));
        assert!(!top_left.legend);

        let bottom_right = grid.panel(1, 2).unwrap();
        assert!(bottom_right.legend);
        assert!(bottom_right.x_label.is_none());
        let labels: Vec<&str> = bottom_right.series.iter().map(Series::label).collect();
        assert_eq!(labels, ["Bilinear", "Projection Mixture", "Embedding Mixture"]);
        assert!(bottom_right.series.iter().all(Series::is_empty));
        assert!(grid.panel(2, 0).is_none());
    }

    #[test]
    fn test_grid_series_values() {
        let trials = TrialCollection::new(vec![
            TrialRecord::new(Hyperparameters::new(ModelFamily::Lstm), 0.0, 0.05),
            TrialRecord::new(Hyperparameters::new(ModelFamily::Mixture), 0.0, 0.09),
            TrialRecord::new(Hyperparameters::new(ModelFamily::Lstm), 0.0, 0.03),
            TrialRecord::new(Hyperparameters::new(ModelFamily::Lstm), 0.0, 0.07),
        ]);
        let mut sequence = DatasetResultSet::new();
        sequence.insert("amazon", trials);

        let grid = build_learning_curves(&sequence, &DatasetResultSet::new(), &ReportConfig::default());
        let panel = grid.panel(0, 1).unwrap();
        assert_eq!(panel.series[0].values(), &[0.05, 0.05, 0.07]);
        assert_eq!(panel.series[1].values(), &[0.09]);
        assert_eq!(panel.max_len(), 3);
        assert_eq!(panel.value_range(), Some((0.05, 0.09)));
    }

    #[test]
    fn test_panel_grid_shape_check() {
        assert!(PanelGrid::new(2, 3, vec![Panel::default(); 5]).is_err());
        assert!(PanelGrid::new(1, 2, vec![Panel::default(); 2]).is_ok());
    }
}
