//! Random sample mosaic with class titles and optional contour overlay

use crate::analysis::{AnalysisOptions, AnalysisResult, Figure};
use crate::dataset::context::{DatasetContext, class_name};
use crate::features::contour::draw_contour;
use crate::io::configuration::{HULL_OVERLAY_RGB, MOSAIC_THUMBNAIL_PX};
use crate::io::error::Result;
use crate::io::progress::TaskProgress;
use image::imageops::{FilterType, resize};
use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::warn;

/// One mosaic cell
#[derive(Debug, Clone, PartialEq)]
pub struct MosaicCell {
    /// Class label shown as the cell title
    pub class: String,
    /// Sampled file
    pub path: PathBuf,
    /// Downscaled image, absent when decoding failed
    pub thumbnail: Option<RgbImage>,
}

/// Grid of sampled images in row-major order
#[derive(Debug, Clone, PartialEq)]
pub struct MosaicFigure {
    /// Grid rows
    pub rows: usize,
    /// Grid columns
    pub cols: usize,
    /// `rows * cols` cells
    pub cells: Vec<MosaicCell>,
}

/// Draw `count` files uniformly at random, with replacement
pub fn sample_paths<R: Rng>(files: &[PathBuf], count: usize, rng: &mut R) -> Vec<PathBuf> {
    if files.is_empty() {
        return Vec::new();
    }
    (0..count)
        .filter_map(|_| files.get(rng.random_range(0..files.len())).cloned())
        .collect()
}

/// Sample and prepare mosaic cells, returning the figure and failed files
pub fn build_mosaic<R: Rng>(
    dataset: &DatasetContext,
    options: &AnalysisOptions,
    rng: &mut R,
    progress: &TaskProgress,
) -> (MosaicFigure, Vec<PathBuf>) {
    let sampled = sample_paths(
        dataset.files(),
        options.mosaic_rows.saturating_mul(options.mosaic_cols),
        rng,
    );

    let mut errors = Vec::new();
    let cells = sampled
        .into_iter()
        .map(|path| {
            let thumbnail = match prepare_cell_image(dataset, &path, options) {
                Ok(thumbnail) => Some(thumbnail),
                Err(error) => {
                    warn!(%error, "mosaic cell left empty");
                    errors.push(path.clone());
                    None
                }
            };
            progress.advance();
            MosaicCell {
                class: class_name(&path).map(Cow::into_owned).unwrap_or_default(),
                path,
                thumbnail,
            }
        })
        .collect();

    let figure = MosaicFigure {
        rows: options.mosaic_rows,
        cols: options.mosaic_cols,
        cells,
    };
    (figure, errors)
}

fn prepare_cell_image(
    dataset: &DatasetContext,
    path: &Path,
    options: &AnalysisOptions,
) -> Result<RgbImage> {
    let image = dataset.load(path)?;

    if !options.overlay_contour {
        return Ok(thumbnail(&image));
    }

    let contour = options.contour.extract(&image);
    let mut canvas = image.into_owned();
    draw_contour(&mut canvas, &contour.hull, Rgb(HULL_OVERLAY_RGB));
    Ok(thumbnail(&canvas))
}

/// Downscale so the longest side is at most the mosaic thumbnail size
pub fn thumbnail(image: &RgbImage) -> RgbImage {
    let (width, height) = image.dimensions();
    let longest = width.max(height);
    if longest <= MOSAIC_THUMBNAIL_PX {
        return image.clone();
    }

    let scale = f64::from(MOSAIC_THUMBNAIL_PX) / f64::from(longest);
    let new_width = ((f64::from(width) * scale).round() as u32).max(1);
    let new_height = ((f64::from(height) * scale).round() as u32).max(1);
    resize(image, new_width, new_height, FilterType::Triangle)
}

/// Mosaic analysis
pub fn analyze(
    dataset: &DatasetContext,
    options: &AnalysisOptions,
    progress: &TaskProgress,
) -> AnalysisResult {
    let mut rng = options
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    let (figure, errors) = build_mosaic(dataset, options, &mut rng, progress);

    if figure.cells.is_empty() {
        return AnalysisResult::empty(errors);
    }
    AnalysisResult::completed(Figure::Mosaic(figure), errors)
}
