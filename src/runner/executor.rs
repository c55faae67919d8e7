//! Runs every registered analysis with timing, error counting, saving and display

use crate::analysis::{AnalysisOptions, AnalysisResult};
use crate::dataset::context::DatasetContext;
use crate::io::error::Result;
use crate::io::output::{figure_path, open_in_viewer};
use crate::io::progress::{ProgressManager, TaskProgress};
use crate::runner::registry::{AnalysisRegistry, RegisteredAnalysis};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Lifecycle of one analysis within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisState {
    /// Not started yet
    Pending,
    /// Currently streaming over the dataset
    Running,
    /// Finished without per-image failures
    CompletedClean,
    /// Finished, some images failed and were skipped
    CompletedWithErrors,
}

/// Where figures go after an analysis completes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Directory receiving `<analysis>.svg`, nothing is saved when absent
    pub output_dir: Option<PathBuf>,
    /// Open each figure in the system viewer
    pub show: bool,
}

/// What happened to one analysis
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Registered analysis name
    pub name: &'static str,
    /// Final lifecycle state
    pub state: AnalysisState,
    /// Files that failed during this analysis
    pub errors: Vec<PathBuf>,
    /// Wall-clock time spent in the analysis itself
    pub elapsed: Duration,
    /// Whether the analysis produced a figure
    pub produced_figure: bool,
    /// Rendered figure location, when saved or shown
    pub figure_path: Option<PathBuf>,
}

impl AnalysisReport {
    fn pending(name: &'static str) -> Self {
        Self {
            name,
            state: AnalysisState::Pending,
            errors: Vec::new(),
            elapsed: Duration::ZERO,
            produced_figure: false,
            figure_path: None,
        }
    }

    /// Number of per-image failures
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

/// Reports for a whole run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// One report per analysis in registration order
    pub reports: Vec<AnalysisReport>,
    /// Total wall-clock time
    pub elapsed: Duration,
}

impl RunSummary {
    /// Per-image failures across all analyses
    pub fn total_errors(&self) -> usize {
        self.reports.iter().map(AnalysisReport::error_count).sum()
    }

    /// Report for one analysis
    pub fn report(&self, name: &str) -> Option<&AnalysisReport> {
        self.reports.iter().find(|report| report.name == name)
    }
}

/// Executes a registry over a dataset
///
/// Per-image failures are collected into reports and never stop the run;
/// only rendering and file system failures propagate.
pub struct AnalysisRunner<'a> {
    registry: &'a AnalysisRegistry,
    config: RunnerConfig,
    progress_manager: Option<ProgressManager>,
}

impl<'a> AnalysisRunner<'a> {
    /// Create a runner without progress display
    pub const fn new(registry: &'a AnalysisRegistry, config: RunnerConfig) -> Self {
        Self {
            registry,
            config,
            progress_manager: None,
        }
    }

    /// Display progress bars while running
    #[must_use]
    pub fn with_progress(mut self, progress_manager: ProgressManager) -> Self {
        self.progress_manager = Some(progress_manager);
        self
    }

    /// Run every registered analysis in order
    ///
    /// # Errors
    ///
    /// Returns an error if a figure cannot be rendered or written.
    pub fn run(
        &mut self,
        dataset: &DatasetContext,
        options: &AnalysisOptions,
    ) -> Result<RunSummary> {
        let start_time = Instant::now();
        let registry = self.registry;
        let mut reports: Vec<AnalysisReport> = registry
            .iter()
            .map(|analysis| AnalysisReport::pending(analysis.name))
            .collect();

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(reports.len());
        }

        for (analysis, report) in registry.iter().zip(reports.iter_mut()) {
            self.run_one(analysis, report, dataset, options)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        let summary = RunSummary {
            reports,
            elapsed: start_time.elapsed(),
        };
        info!(
            analyses = summary.reports.len(),
            errors = summary.total_errors(),
            elapsed_ms = summary.elapsed.as_millis(),
            "run finished"
        );
        Ok(summary)
    }

    fn run_one(
        &self,
        analysis: &RegisteredAnalysis,
        report: &mut AnalysisReport,
        dataset: &DatasetContext,
        options: &AnalysisOptions,
    ) -> Result<()> {
        report.state = AnalysisState::Running;
        debug!(analysis = analysis.name, "analysis running");

        let progress = self.progress_manager.as_ref().map_or_else(TaskProgress::hidden, |pm| {
            pm.start_task(analysis.name, dataset.files().len())
        });

        let started = Instant::now();
        let result = (analysis.run)(dataset, options, &progress);
        report.elapsed = started.elapsed();

        report.state = if result.errors.is_empty() {
            AnalysisState::CompletedClean
        } else {
            AnalysisState::CompletedWithErrors
        };
        progress.finish(&format!("{} errors", result.error_count()));

        info!(
            analysis = analysis.name,
            errors = result.error_count(),
            elapsed_ms = report.elapsed.as_millis(),
            state = ?report.state,
            "analysis completed"
        );

        report.produced_figure = result.ok;
        report.figure_path = self.publish(analysis.name, &result)?;
        report.errors = result.errors;

        if let Some(ref pm) = self.progress_manager {
            pm.complete_analysis();
        }
        Ok(())
    }

    // Renders to the output directory, or to the temp directory when only showing
    fn publish(&self, name: &str, result: &AnalysisResult) -> Result<Option<PathBuf>> {
        let Some(ref figure) = result.figure else {
            if self.config.output_dir.is_some() || self.config.show {
                warn!(analysis = name, "analysis produced no figure");
            }
            return Ok(None);
        };

        let dir = match (&self.config.output_dir, self.config.show) {
            (Some(dir), _) => dir.clone(),
            (None, true) => std::env::temp_dir(),
            (None, false) => return Ok(None),
        };

        let path = figure_path(&dir, name);
        figure.render(&path)?;
        debug!(analysis = name, path = %path.display(), "figure written");

        if self.config.show
            && let Err(error) = open_in_viewer(&path)
        {
            warn!(%error, "could not display figure");
        }
        Ok(Some(path))
    }
}
