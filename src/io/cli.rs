//! Command-line interface for exploring an image classification dataset

use crate::analysis::AnalysisOptions;
use crate::dataset::context::DatasetContext;
use crate::features::contour::{Background, ContourExtractor};
use crate::features::histogram::HistogramPolicy;
use crate::io::configuration::{
    DEFAULT_MOSAIC_COLS, DEFAULT_MOSAIC_ROWS, DEFAULT_PROJECT_DIR, DEFAULT_RUN_NAME,
    MAX_MOSAIC_CELLS,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::output::create_run_dir;
use crate::io::progress::{ProgressManager, TaskProgress};
use crate::runner::executor::{AnalysisRunner, RunSummary, RunnerConfig};
use crate::runner::registry::AnalysisRegistry;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{Level, info};

#[derive(Parser)]
#[command(name = "dataset-explorer")]
#[command(
    author,
    version,
    about = "Diagnostic visualizations for image classification datasets"
)]
/// Command-line arguments for the dataset explorer
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Dataset root laid out as <PATH>/<class>/<image>
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Preload every image into memory before running analyses
    #[arg(short, long)]
    pub cache: bool,

    /// Open each figure in the system viewer
    #[arg(short, long)]
    pub show: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Do not write figures to the run directory
    #[arg(long)]
    pub no_save: bool,

    /// Parent directory of run directories
    #[arg(long, default_value = DEFAULT_PROJECT_DIR)]
    pub project: PathBuf,

    /// Run directory name, suffixed with a number if it already exists
    #[arg(long, default_value = DEFAULT_RUN_NAME)]
    pub name: String,

    /// Random seed for reproducible mosaic sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Mosaic grid rows
    #[arg(long, default_value_t = DEFAULT_MOSAIC_ROWS)]
    pub rows: usize,

    /// Mosaic grid columns
    #[arg(long, default_value_t = DEFAULT_MOSAIC_COLS)]
    pub cols: usize,

    /// Background hypothesis for contour extraction
    #[arg(short, long, value_enum, default_value_t = Background::Mixed)]
    pub background: Background,

    /// Do not draw contours over mosaic images
    #[arg(long)]
    pub no_overlay: bool,

    /// Overlay the raw contour instead of its convex hull
    #[arg(long)]
    pub raw_contour: bool,

    /// How per-class histograms are aggregated
    #[arg(long, value_enum, default_value_t = HistogramPolicy::Sum)]
    pub histogram: HistogramPolicy,

    /// Comma-separated subset of analyses to run (default: all)
    #[arg(short, long, value_delimiter = ',')]
    pub analyses: Vec<String>,
}

impl Cli {
    /// Check if figures should be written to disk
    pub const fn should_save(&self) -> bool {
        !self.no_save
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log level selected by the verbosity flag
    pub const fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    }

    /// Analysis options derived from the arguments
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error for an empty mosaic grid or one
    /// with more than [`MAX_MOSAIC_CELLS`] cells.
    pub fn analysis_options(&self) -> Result<AnalysisOptions> {
        if self.rows == 0 {
            return Err(invalid_parameter("rows", &self.rows, &"must be at least 1"));
        }
        if self.cols == 0 {
            return Err(invalid_parameter("cols", &self.cols, &"must be at least 1"));
        }
        let cells = self.rows.checked_mul(self.cols);
        if cells.is_none_or(|cells| cells > MAX_MOSAIC_CELLS) {
            return Err(invalid_parameter(
                "rows x cols",
                &format!("{} x {}", self.rows, self.cols),
                &format!("mosaic grid is limited to {MAX_MOSAIC_CELLS} cells"),
            ));
        }

        Ok(AnalysisOptions {
            mosaic_rows: self.rows,
            mosaic_cols: self.cols,
            seed: self.seed,
            overlay_contour: !self.no_overlay,
            contour: ContourExtractor::new(self.background, !self.raw_contour),
            histogram_policy: self.histogram,
        })
    }
}

/// Orchestrates a full exploration run from parsed arguments
pub struct DatasetExplorer {
    cli: Cli,
}

impl DatasetExplorer {
    /// Create an explorer for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Scan the dataset, run every selected analysis and report
    ///
    /// # Errors
    ///
    /// Returns an error for an unreadable or empty dataset, invalid options,
    /// or figures that cannot be written. Per-image failures are reported
    /// in the summary instead.
    pub fn run(&self) -> Result<RunSummary> {
        let options = self.cli.analysis_options()?;

        let mut registry = AnalysisRegistry::with_default_analyses()?;
        if !self.cli.analyses.is_empty() {
            registry.retain(&self.cli.analyses)?;
        }

        let dataset = self.load_dataset()?;
        dataset.validate()?;
        self.print_dataset_summary(&dataset);

        let output_dir = if self.cli.should_save() {
            Some(create_run_dir(&self.cli.project, &self.cli.name)?)
        } else {
            None
        };

        let config = RunnerConfig {
            output_dir: output_dir.clone(),
            show: self.cli.show,
        };
        let mut runner = AnalysisRunner::new(&registry, config);
        if self.cli.should_show_progress() {
            runner = runner.with_progress(ProgressManager::new());
        }

        let summary = runner.run(&dataset, &options)?;
        Self::print_run_summary(&summary, output_dir.as_deref());
        Ok(summary)
    }

    fn load_dataset(&self) -> Result<DatasetContext> {
        let dataset = DatasetContext::from_directory(&self.cli.path)?;
        if !self.cli.cache {
            return Ok(dataset);
        }

        let progress_manager = ProgressManager::new();
        let progress = if self.cli.should_show_progress() {
            progress_manager.start_task("cache", dataset.files().len())
        } else {
            TaskProgress::hidden()
        };
        let dataset = dataset.with_cache(&progress);
        progress_manager.finish();

        info!(images = dataset.cached_images(), "image cache filled");
        Ok(dataset)
    }

    // Summary lines are the tool's primary output
    #[allow(clippy::print_stdout)]
    fn print_dataset_summary(&self, dataset: &DatasetContext) {
        let classes: Vec<&str> = dataset.classes().iter().map(String::as_str).collect();
        println!(
            " - {} classes in {}: {}",
            classes.len(),
            self.cli.path.display(),
            classes.join(", ")
        );
        println!(" - {} images in dataset", dataset.files().len());
    }

    #[allow(clippy::print_stdout)]
    fn print_run_summary(summary: &RunSummary, output_dir: Option<&Path>) {
        for report in &summary.reports {
            println!(
                " - {:<20} {:>8.2}s  {} errors",
                report.name,
                report.elapsed.as_secs_f64(),
                report.error_count()
            );
        }
        if let Some(dir) = output_dir {
            println!(" - figures saved to {}", dir.display());
        }
        println!(" - total time {:.2}s", summary.elapsed.as_secs_f64());
    }
}
