//! Diagnostic visualizations for image classification datasets
//!
//! A dataset is a directory of `<root>/<class>/<image>` files. Each analysis
//! streams over the files once, reduces every image to a small feature and
//! aggregates the features into one figure: a sample mosaic with contour
//! overlays, per-class file counts, image dimensions and per-class color
//! histograms.

#![forbid(unsafe_code)]

/// Analyses aggregating per-image features into figures
pub mod analysis;
/// Dataset discovery and image access
pub mod dataset;
/// Per-image feature extraction
pub mod features;
/// Input/output operations and error handling
pub mod io;
/// Analysis registry and execution
pub mod runner;

pub use io::error::{ExplorerError, Result};
