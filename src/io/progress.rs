//! Progress tracking for analyses streaming over the dataset

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static TASK_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:>20} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static OVERALL_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Analyses: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Per-task progress handle passed into analyses
///
/// A hidden handle does nothing, so analyses can report progress
/// unconditionally.
#[derive(Debug, Clone, Default)]
pub struct TaskProgress {
    bar: Option<ProgressBar>,
}

impl TaskProgress {
    /// Handle that never draws anything
    pub const fn hidden() -> Self {
        Self { bar: None }
    }

    /// Record one processed item
    pub fn advance(&self) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    /// Record `count` processed items at once
    pub fn advance_by(&self, count: usize) {
        if let Some(ref bar) = self.bar {
            bar.inc(count as u64);
        }
    }

    /// Number of items recorded so far
    pub fn position(&self) -> u64 {
        self.bar.as_ref().map_or(0, ProgressBar::position)
    }

    /// Whether this handle draws to the terminal
    pub const fn is_visible(&self) -> bool {
        self.bar.is_some()
    }

    /// Mark the task finished with a short status message
    pub fn finish(&self, message: &str) {
        if let Some(ref bar) = self.bar {
            bar.finish_with_message(message.to_string());
        }
    }
}

/// Coordinates progress display for a run
///
/// Owns an overall bar counting analyses and spawns one bar per task.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    overall: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            overall: None,
        }
    }

    /// Initialize the overall bar for the given number of analyses
    pub fn initialize(&mut self, analysis_count: usize) {
        let overall = ProgressBar::new(analysis_count as u64);
        overall.set_style(OVERALL_STYLE.clone());
        self.overall = Some(self.multi_progress.add(overall));
    }

    /// Start a bar for a task processing `len` items
    pub fn start_task(&self, label: &str, len: usize) -> TaskProgress {
        let bar = ProgressBar::new(len as u64);
        bar.set_style(TASK_STYLE.clone());
        bar.set_prefix(label.to_string());
        TaskProgress {
            bar: Some(self.multi_progress.add(bar)),
        }
    }

    /// Mark one analysis as completed
    pub fn complete_analysis(&self) {
        if let Some(ref overall) = self.overall {
            overall.inc(1);
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref overall) = self.overall {
            overall.finish_with_message("All analyses completed");
        }
        let _ = self.multi_progress.clear();
    }
}
