//! Per-class color histograms built from per-image normalized contributions

use crate::analysis::{AnalysisOptions, AnalysisResult, Figure};
use crate::dataset::context::{DatasetContext, class_name};
use crate::features::histogram::{ClassHistogramAccumulator, HistogramPolicy, color_histogram};
use crate::io::error::{ExplorerError, Result};
use crate::io::progress::TaskProgress;
use ndarray::Array1;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Histograms ready for rendering, one panel per class
#[derive(Debug, Clone, PartialEq)]
pub struct ClassHistograms {
    /// Policy used to produce the panels
    pub policy: HistogramPolicy,
    /// `(class, histogram)` pairs in class declaration order
    pub panels: Vec<(String, Array1<f64>)>,
}

/// Feed every image's histogram into a per-class accumulator
///
/// Returns the accumulator and the files that could not be processed.
pub fn accumulate(
    dataset: &DatasetContext,
    progress: &TaskProgress,
) -> (ClassHistogramAccumulator, Vec<PathBuf>) {
    let mut accumulator = ClassHistogramAccumulator::new();
    let mut errors = Vec::new();

    for file in dataset.files() {
        if let Err(error) = contribute(dataset, file, &mut accumulator) {
            warn!(%error, "color histogram failed");
            errors.push(file.clone());
        }
        progress.advance();
    }

    (accumulator, errors)
}

fn contribute(
    dataset: &DatasetContext,
    file: &Path,
    accumulator: &mut ClassHistogramAccumulator,
) -> Result<()> {
    let class = class_name(file).ok_or_else(|| ExplorerError::InvalidParameter {
        parameter: "file",
        value: file.display().to_string(),
        reason: "file has no parent directory to use as class".to_string(),
    })?;
    let image = dataset.load(file)?;
    let hist = color_histogram(&image)?;
    accumulator.add(&class, &hist)
}

/// Order accumulated classes by declaration, skipping classes without contributions
pub fn panels(
    dataset: &DatasetContext,
    accumulator: &ClassHistogramAccumulator,
    policy: HistogramPolicy,
) -> ClassHistograms {
    let panels = dataset
        .classes()
        .iter()
        .filter_map(|class| {
            accumulator
                .histogram(class, policy)
                .map(|hist| (class.clone(), hist))
        })
        .collect();

    ClassHistograms { policy, panels }
}

/// Color histogram analysis
pub fn analyze(
    dataset: &DatasetContext,
    options: &AnalysisOptions,
    progress: &TaskProgress,
) -> AnalysisResult {
    let (accumulator, errors) = accumulate(dataset, progress);
    let histograms = panels(dataset, &accumulator, options.histogram_policy);

    if histograms.panels.is_empty() {
        return AnalysisResult::empty(errors);
    }
    AnalysisResult::completed(Figure::ColorHistogram(histograms), errors)
}
