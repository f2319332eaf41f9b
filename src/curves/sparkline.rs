//! Terminal rendering of learning curves as Unicode sparklines.

use std::fmt::Write;

use super::{Panel, PanelGrid};

const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Default sparkline width in characters.
pub const DEFAULT_WIDTH: usize = 40;

/// Render `values` as a sparkline exactly `width` characters wide.
///
/// Longer input is sampled down; shorter input is padded with spaces.
/// `range` fixes the (min, max) scale so series in one panel are comparable.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn sparkline(values: &[f64], width: usize, range: Option<(f64, f64)>) -> String {
    if values.is_empty() {
        return " ".repeat(width);
    }

    let (min, max) = range.unwrap_or_else(|| {
        values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    });
    let span = (max - min).max(1e-3);

    (0..width)
        .map(|i| {
            let idx = if values.len() <= width {
                (i < values.len()).then_some(i)
            } else {
                Some(i * values.len() / width)
            };
            idx.map_or(' ', |idx| {
                let normalized = ((values[idx] - min) / span).clamp(0.0, 1.0);
                BLOCKS[((normalized * 7.0).round() as usize).min(7)]
            })
        })
        .collect()
}

fn render_panel(out: &mut String, panel: &Panel, width: usize) {
    let label_width = panel
        .series
        .iter()
        .map(|s| s.label().chars().count())
        .max()
        .unwrap_or(0);
    let range = panel.value_range();

    let _ = writeln!(out, "  {}", panel.title);
    for series in &panel.series {
        let last = series.values().last().map_or_else(|| "-".to_string(), |v| format!("{v:.4}"));
        let _ = writeln!(
            out,
            "    {:<label_width$} [{}] {last}",
            series.label(),
            sparkline(series.values(), width, range),
        );
    }
}

/// Render a panel grid as text, one block per panel.
///
/// Row `r` of the grid is headed by `row_titles[r]` when given.
#[must_use]
pub fn render_grid(grid: &PanelGrid, row_titles: &[&str], width: usize) -> String {
    let mut out = String::new();
    for row in 0..grid.rows() {
        if let Some(title) = row_titles.get(row) {
            let _ = writeln!(out, "{title}");
        }
        for col in 0..grid.cols() {
            if let Some(panel) = grid.panel(row, col) {
                render_panel(&mut out, panel, width);
            }
        }
        if row + 1 < grid.rows() {
            out.push('\n');
        }
    }
    out
}
