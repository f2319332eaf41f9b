//! Chart export of learning curves (PNG or SVG, picked by file extension).

use std::path::Path;

#[cfg(feature = "plotters")]
use plotters::coord::Shift;
#[cfg(feature = "plotters")]
use plotters::prelude::*;

use super::PanelGrid;
#[cfg(feature = "plotters")]
use super::Panel;
use crate::{Error, Result};

/// Pixel size of the exported figure.
pub const FIGURE_SIZE: (u32, u32) = (1500, 900);

#[cfg(feature = "plotters")]
fn render_err<E: std::fmt::Display>(e: E) -> Error {
    Error::RenderError(e.to_string())
}

#[cfg(feature = "plotters")]
#[allow(clippy::cast_precision_loss)]
fn draw_panel<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, panel: &Panel) -> Result<()> {
    let x_max = panel.max_len().max(1) as f64;
    let (lo, hi) = panel.value_range().unwrap_or((0.0, 1.0));
    let pad = ((hi - lo) * 0.05).max(1e-3);

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..x_max, (lo - pad)..(hi + pad))
        .map_err(render_err)?;

    let mut mesh = chart.configure_mesh();
    if let Some(label) = &panel.x_label {
        mesh.x_desc(label.as_str());
    }
    if let Some(label) = &panel.y_label {
        mesh.y_desc(label.as_str());
    }
    mesh.draw().map_err(render_err)?;

    for (i, series) in panel.series.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        chart
            .draw_series(LineSeries::new(series.points(), color.stroke_width(2)))
            .map_err(render_err)?
            .label(series.label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    if panel.legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(render_err)?;
    }

    Ok(())
}

#[cfg(feature = "plotters")]
fn draw_grid<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, grid: &PanelGrid) -> Result<()> {
    root.fill(&WHITE).map_err(render_err)?;

    let areas = root.split_evenly((grid.rows(), grid.cols()));
    for (area, panel) in areas.iter().zip(grid.panels()) {
        draw_panel(area, panel)?;
    }

    root.present().map_err(render_err)
}

/// Draw the grid to `path`; `.svg` files get vector output, anything else PNG.
///
/// # Errors
///
/// Returns [`Error::RenderError`] if drawing or writing the file fails.
#[cfg(feature = "plotters")]
pub fn plot_learning_curves(grid: &PanelGrid, path: &Path) -> Result<()> {
    let is_svg = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

    if is_svg {
        let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
        draw_grid(&root, grid)?;
    } else {
        let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
        draw_grid(&root, grid)?;
    }

    tracing::info!(path = %path.display(), "wrote learning curves");
    Ok(())
}

/// Stub when the `plotters` feature is disabled.
///
/// # Errors
///
/// Always returns [`Error::RenderError`].
#[cfg(not(feature = "plotters"))]
pub fn plot_learning_curves(_grid: &PanelGrid, path: &Path) -> Result<()> {
    Err(Error::RenderError(format!(
        "cannot write {}: chart export requires the `plotters` feature",
        path.display()
    )))
}

#[cfg(all(test, not(feature = "plotters")))]
mod tests {
    use super::*;

    #[test]
    fn test_stub_reports_missing_feature() {
        let err = plot_learning_curves(&PanelGrid::default(), Path::new("curves.png")).unwrap_err();
        assert!(err.to_string().contains("plotters"));
    }
}
