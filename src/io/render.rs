//! SVG rendering of analysis figures

use crate::analysis::class_distribution::ClassCounts;
use crate::analysis::color_histogram::ClassHistograms;
use crate::analysis::mosaic::{MosaicCell, MosaicFigure};
use crate::analysis::size_distribution::SizeObservation;
use crate::features::histogram::{CHANNEL_ORDER, channel_bins};
use crate::io::configuration::{
    BINS_PER_CHANNEL, FIGURE_SIZE, HISTOGRAM_BAR_ALPHA, HISTOGRAM_PANEL_HEIGHT, MOSAIC_CELL_PX,
    MOSAIC_TITLE_PX, SIZE_PLOT_MARGIN, SIZE_POINT_SCALE,
};
use crate::io::error::{Result, render_error};
use image::RgbImage;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

// Colors for the B, G, R histogram channels
const CHANNEL_COLORS: [RGBColor; 3] = [BLUE, GREEN, RED];

/// Render a mosaic as a grid of titled cells
///
/// # Errors
///
/// Returns a render error if drawing or writing the SVG fails.
pub fn render_mosaic(mosaic: &MosaicFigure, path: &Path) -> Result<()> {
    draw_mosaic(mosaic, path).map_err(|e| render_error(path, &e))
}

/// Render class counts as a horizontal bar chart with a mean line
///
/// # Errors
///
/// Returns a render error if drawing or writing the SVG fails.
pub fn render_class_distribution(counts: &ClassCounts, path: &Path) -> Result<()> {
    draw_class_distribution(counts, path).map_err(|e| render_error(path, &e))
}

/// Render size observations as a scatter plot with a square-image diagonal
///
/// # Errors
///
/// Returns a render error if drawing or writing the SVG fails.
pub fn render_size_distribution(sizes: &SizeObservation, path: &Path) -> Result<()> {
    draw_size_distribution(sizes, path).map_err(|e| render_error(path, &e))
}

/// Render one overlapping B, G, R histogram panel per class
///
/// # Errors
///
/// Returns a render error if drawing or writing the SVG fails.
pub fn render_color_histogram(histograms: &ClassHistograms, path: &Path) -> Result<()> {
    draw_color_histogram(histograms, path).map_err(|e| render_error(path, &e))
}

/// Radius giving a point area proportional to `count`
pub fn point_radius(count: usize) -> u32 {
    ((count as f64).sqrt() * SIZE_POINT_SCALE).round().max(2.0) as u32
}

fn cells_to_px(cells: usize) -> u32 {
    u32::try_from(cells)
        .unwrap_or(u32::MAX)
        .saturating_mul(MOSAIC_CELL_PX)
}

fn draw_mosaic(mosaic: &MosaicFigure, path: &Path) -> DrawResult {
    let rows = mosaic.rows.max(1);
    let cols = mosaic.cols.max(1);
    let size = (cells_to_px(cols), cells_to_px(rows));

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    for (area, cell) in root.split_evenly((rows, cols)).iter().zip(&mosaic.cells) {
        draw_mosaic_cell(area, cell)?;
    }

    root.present()?;
    Ok(())
}

fn draw_mosaic_cell(area: &DrawingArea<SVGBackend<'_>, Shift>, cell: &MosaicCell) -> DrawResult {
    let inner = area.titled(&cell.class, ("sans-serif", MOSAIC_TITLE_PX).into_font())?;
    let (width, height) = inner.dim_in_pixel();
    let (width, height) = (width as i32, height as i32);

    if let Some(ref thumbnail) = cell.thumbnail {
        draw_thumbnail(&inner, thumbnail)?;
    }

    inner.draw(&Rectangle::new(
        [(0, 0), (width - 1, height - 1)],
        BLACK.stroke_width(1),
    ))?;
    Ok(())
}

// Pixels are emitted as runs of equal color to keep the SVG small
fn draw_thumbnail(area: &DrawingArea<SVGBackend<'_>, Shift>, thumbnail: &RgbImage) -> DrawResult {
    let (width, height) = area.dim_in_pixel();
    let (thumb_width, thumb_height) = thumbnail.dimensions();
    if thumb_width == 0 || thumb_height == 0 || width < 4 || height < 4 {
        return Ok(());
    }

    let scale = ((f64::from(width) - 4.0) / f64::from(thumb_width))
        .min((f64::from(height) - 4.0) / f64::from(thumb_height));
    let offset_x = (f64::from(width) - f64::from(thumb_width) * scale) / 2.0;
    let offset_y = (f64::from(height) - f64::from(thumb_height) * scale) / 2.0;
    let to_px = |offset: f64, index: u32| (offset + f64::from(index) * scale).round() as i32;

    for y in 0..thumb_height {
        let mut x = 0;
        while x < thumb_width {
            let start = x;
            let color = thumbnail.get_pixel(x, y).0;
            while x < thumb_width && thumbnail.get_pixel(x, y).0 == color {
                x += 1;
            }

            area.draw(&Rectangle::new(
                [
                    (to_px(offset_x, start), to_px(offset_y, y)),
                    (to_px(offset_x, x), to_px(offset_y, y + 1)),
                ],
                RGBColor(color[0], color[1], color[2]).filled(),
            ))?;
        }
    }
    Ok(())
}

fn draw_class_distribution(counts: &ClassCounts, path: &Path) -> DrawResult {
    let classes: Vec<&str> = counts.classes().collect();
    let class_count = classes.len();
    let height = FIGURE_SIZE.1.max(32 * class_count as u32 + 120);

    let root = SVGBackend::new(path, (FIGURE_SIZE.0, height)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_max = (counts.max().max(1) as f64) * 1.15;
    let y_max = class_count as f64 - 0.5;
    let mut chart = ChartBuilder::on(&root)
        .caption("Files per class", ("sans-serif", 24).into_font())
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(160)
        .build_cartesian_2d(0.0..x_max, -0.5..y_max)?;

    // Only integer ticks name a bar
    let class_label = |y: &f64| {
        let index = y.round();
        if (y - index).abs() > 1e-6 || index < 0.0 {
            return String::new();
        }
        classes
            .get(index as usize)
            .map(|class| (*class).to_string())
            .unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(class_count + 1)
        .y_label_formatter(&class_label)
        .x_desc("files")
        .draw()?;

    chart.draw_series(counts.entries().iter().enumerate().map(|(i, (_, count))| {
        let y = i as f64;
        Rectangle::new([(0.0, y - 0.4), (*count as f64, y + 0.4)], BLUE.mix(0.7).filled())
    }))?;

    chart.draw_series(counts.entries().iter().enumerate().map(|(i, (_, count))| {
        EmptyElement::at((*count as f64, i as f64))
            + Text::new(count.to_string(), (5, -7), ("sans-serif", 14).into_font())
    }))?;

    if let Some(mean) = counts.mean() {
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(mean, -0.5), (mean, y_max)],
                RED.stroke_width(2),
            )))?
            .label(format!("mean = {mean:.1}"))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

fn draw_size_distribution(sizes: &SizeObservation, path: &Path) -> DrawResult {
    let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let limit = (f64::from(sizes.max_dimension()) * SIZE_PLOT_MARGIN).max(1.0);
    let mut chart = ChartBuilder::on(&root)
        .caption("Image sizes", ("sans-serif", 24).into_font())
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..limit, 0.0..limit)?;

    chart
        .configure_mesh()
        .x_desc("width (px)")
        .y_desc("height (px)")
        .draw()?;

    chart.draw_series(LineSeries::new(vec![(0.0, 0.0), (limit, limit)], &BLACK))?;

    chart.draw_series(sizes.iter().map(|((width, height), count)| {
        Circle::new(
            (f64::from(width), f64::from(height)),
            point_radius(count),
            BLUE.mix(0.5).filled(),
        )
    }))?;

    chart.draw_series(sizes.iter().map(|((width, height), count)| {
        EmptyElement::at((f64::from(width), f64::from(height)))
            + Text::new(count.to_string(), (6, -6), ("sans-serif", 12).into_font())
    }))?;

    root.present()?;
    Ok(())
}

fn draw_color_histogram(histograms: &ClassHistograms, path: &Path) -> DrawResult {
    let panel_count = histograms.panels.len().max(1);
    let size = (FIGURE_SIZE.0, HISTOGRAM_PANEL_HEIGHT * panel_count as u32);

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let panels = root.split_evenly((panel_count, 1));
    for (area, (class, hist)) in panels.iter().zip(&histograms.panels) {
        let peak = hist.fold(0.0_f64, |acc, &v| acc.max(v));
        let y_max = if peak > 0.0 { peak * 1.05 } else { 1.0 };

        let mut chart = ChartBuilder::on(area)
            .caption(class, ("sans-serif", 18).into_font())
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(50)
            .build_cartesian_2d(0.0..BINS_PER_CHANNEL as f64, 0.0..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("intensity")
            .draw()?;

        for (channel, (color, name)) in CHANNEL_COLORS.iter().zip(CHANNEL_ORDER).enumerate() {
            let style = color.mix(HISTOGRAM_BAR_ALPHA).filled();
            chart
                .draw_series(channel_bins(hist, channel).iter().enumerate().map(|(bin, &v)| {
                    let x = bin as f64;
                    Rectangle::new([(x, 0.0), (x + 1.0, v)], style)
                }))?
                .label(name)
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], style));
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}
