//! Files per class, counted from parent directory names without decoding

use crate::analysis::{AnalysisOptions, AnalysisResult, Figure};
use crate::dataset::context::{DatasetContext, class_name};
use crate::io::progress::TaskProgress;
use indexmap::IndexMap;

/// File count per class in class declaration order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassCounts {
    entries: Vec<(String, usize)>,
}

impl ClassCounts {
    /// Build from `(class, count)` pairs, keeping their order
    pub const fn new(entries: Vec<(String, usize)>) -> Self {
        Self { entries }
    }

    /// `(class, count)` pairs
    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    /// Class names in order
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(class, _)| class.as_str())
    }

    /// Counts in class order
    pub fn counts(&self) -> Vec<usize> {
        self.entries.iter().map(|(_, count)| *count).collect()
    }

    /// Count for one class
    pub fn get(&self, class: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(name, _)| name == class)
            .map(|(_, count)| *count)
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Largest single count
    pub fn max(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, count)| *count)
            .max()
            .unwrap_or(0)
    }

    /// Mean count across classes, `None` without classes
    pub fn mean(&self) -> Option<f64> {
        (!self.entries.is_empty()).then(|| self.total() as f64 / self.entries.len() as f64)
    }

    /// Whether there are no classes
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Count files per class
///
/// Reads only the context, so repeated calls give identical counts.
pub fn count_classes(dataset: &DatasetContext) -> ClassCounts {
    let mut counts: IndexMap<&str, usize> = dataset
        .classes()
        .iter()
        .map(|class| (class.as_str(), 0))
        .collect();

    for file in dataset.files() {
        if let Some(count) = class_name(file).and_then(|class| counts.get_mut(&*class)) {
            *count += 1;
        }
    }

    ClassCounts::new(
        counts
            .into_iter()
            .map(|(class, count)| (class.to_string(), count))
            .collect(),
    )
}

/// Class distribution analysis
pub fn analyze(
    dataset: &DatasetContext,
    _options: &AnalysisOptions,
    progress: &TaskProgress,
) -> AnalysisResult {
    let counts = count_classes(dataset);
    progress.advance_by(dataset.files().len());

    if counts.is_empty() {
        return AnalysisResult::empty(Vec::new());
    }
    AnalysisResult::completed(Figure::ClassDistribution(counts), Vec::new())
}
