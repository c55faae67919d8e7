//! Dataset analyses: each aggregates per-file features into one renderable figure

/// Per-class file counts
pub mod class_distribution;
/// Per-class color histogram aggregation
pub mod color_histogram;
/// Random sample mosaic with contour overlay
pub mod mosaic;
/// Image dimension distribution
pub mod size_distribution;

use crate::dataset::context::DatasetContext;
use crate::features::contour::ContourExtractor;
use crate::features::histogram::HistogramPolicy;
use crate::io::configuration::{DEFAULT_MOSAIC_COLS, DEFAULT_MOSAIC_ROWS};
use crate::io::error::Result;
use crate::io::progress::TaskProgress;
use crate::io::render;
use std::path::{Path, PathBuf};

use class_distribution::ClassCounts;
use color_histogram::ClassHistograms;
use mosaic::MosaicFigure;
use size_distribution::SizeObservation;

/// Signature shared by every registered analysis
pub type AnalysisFn = fn(&DatasetContext, &AnalysisOptions, &TaskProgress) -> AnalysisResult;

/// Knobs understood by the analyses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Mosaic grid rows
    pub mosaic_rows: usize,
    /// Mosaic grid columns
    pub mosaic_cols: usize,
    /// Seed for mosaic sampling, random when absent
    pub seed: Option<u64>,
    /// Draw the dominant contour over mosaic images
    pub overlay_contour: bool,
    /// Contour extraction settings for the overlay
    pub contour: ContourExtractor,
    /// Aggregation policy for class histograms
    pub histogram_policy: HistogramPolicy,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            mosaic_rows: DEFAULT_MOSAIC_ROWS,
            mosaic_cols: DEFAULT_MOSAIC_COLS,
            seed: None,
            overlay_contour: true,
            contour: ContourExtractor::default(),
            histogram_policy: HistogramPolicy::Sum,
        }
    }
}

/// Renderable summary produced by an analysis
#[derive(Debug, Clone)]
pub enum Figure {
    /// Grid of sampled images
    Mosaic(MosaicFigure),
    /// Files per class
    ClassDistribution(ClassCounts),
    /// Width/height observation counts
    SizeDistribution(SizeObservation),
    /// Aggregated color histograms per class
    ColorHistogram(ClassHistograms),
}

impl Figure {
    /// Draw the figure as an SVG file at `path`
    ///
    /// # Errors
    ///
    /// Returns a render error if drawing or writing the file fails.
    pub fn render(&self, path: &Path) -> Result<()> {
        match self {
            Self::Mosaic(mosaic) => render::render_mosaic(mosaic, path),
            Self::ClassDistribution(counts) => render::render_class_distribution(counts, path),
            Self::SizeDistribution(sizes) => render::render_size_distribution(sizes, path),
            Self::ColorHistogram(histograms) => render::render_color_histogram(histograms, path),
        }
    }
}

/// Outcome of running one analysis over the dataset
///
/// Per-image failures end up in `errors`; they never abort the analysis.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Files that failed to decode or process
    pub errors: Vec<PathBuf>,
    /// Whether a figure was produced
    pub ok: bool,
    /// Figure to render, if any
    pub figure: Option<Figure>,
}

impl AnalysisResult {
    /// Result carrying a figure
    pub const fn completed(figure: Figure, errors: Vec<PathBuf>) -> Self {
        Self {
            errors,
            ok: true,
            figure: Some(figure),
        }
    }

    /// Result without anything to render
    pub const fn empty(errors: Vec<PathBuf>) -> Self {
        Self {
            errors,
            ok: false,
            figure: None,
        }
    }

    /// Number of per-image failures
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
