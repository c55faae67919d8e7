//! Image dimension distribution

use crate::analysis::{AnalysisOptions, AnalysisResult, Figure};
use crate::dataset::context::DatasetContext;
use crate::io::progress::TaskProgress;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::warn;

/// Number of images observed at each `(width, height)`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SizeObservation {
    counts: BTreeMap<(u32, u32), usize>,
}

impl SizeObservation {
    /// Create an empty observation map
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one measured image
    pub fn record(&mut self, width: u32, height: u32) {
        *self.counts.entry((width, height)).or_insert(0) += 1;
    }

    /// Count for one size
    pub fn get(&self, width: u32, height: u32) -> usize {
        self.counts.get(&(width, height)).copied().unwrap_or(0)
    }

    /// `((width, height), count)` pairs ordered by size
    pub fn iter(&self) -> impl Iterator<Item = ((u32, u32), usize)> {
        self.counts.iter().map(|(size, count)| (*size, *count))
    }

    /// Number of distinct sizes
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing was measured
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of measured images
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Largest width or height seen
    pub fn max_dimension(&self) -> u32 {
        self.counts
            .keys()
            .map(|(width, height)| (*width).max(*height))
            .max()
            .unwrap_or(0)
    }
}

/// Measure every image, returning observations and the files that failed
pub fn measure_sizes(
    dataset: &DatasetContext,
    progress: &TaskProgress,
) -> (SizeObservation, Vec<PathBuf>) {
    let mut sizes = SizeObservation::new();
    let mut errors = Vec::new();

    for file in dataset.files() {
        match dataset.load(file) {
            Ok(image) => sizes.record(image.width(), image.height()),
            Err(error) => {
                warn!(%error, "size measurement failed");
                errors.push(file.clone());
            }
        }
        progress.advance();
    }

    (sizes, errors)
}

/// Size distribution analysis
pub fn analyze(
    dataset: &DatasetContext,
    _options: &AnalysisOptions,
    progress: &TaskProgress,
) -> AnalysisResult {
    let (sizes, errors) = measure_sizes(dataset, progress);
    if sizes.is_empty() {
        return AnalysisResult::empty(errors);
    }
    AnalysisResult::completed(Figure::SizeDistribution(sizes), errors)
}
