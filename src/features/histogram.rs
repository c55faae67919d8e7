//! Per-image normalized color histograms and their per-class accumulation

use crate::io::configuration::{BINS_PER_CHANNEL, HISTOGRAM_LEN};
use crate::io::error::{Result, computation_error};
use image::RgbImage;
use indexmap::IndexMap;
use ndarray::{Array1, ArrayView1, Axis, Slice};

/// Offsets of each channel inside the histogram vector, in B, G, R order
const CHANNEL_OFFSETS: [(usize, usize); 3] = [
    // (rgb index, offset)
    (2, 0),
    (1, BINS_PER_CHANNEL),
    (0, 2 * BINS_PER_CHANNEL),
];

/// Channel names matching the histogram vector layout
pub const CHANNEL_ORDER: [&str; 3] = ["b", "g", "r"];

/// Compute the normalized 768-bin B,G,R histogram of an image
///
/// Bin counts are divided by the pixel area, then by the largest bin across
/// all three channels, so the result always peaks at exactly 1.0.
///
/// # Errors
///
/// Returns a computation error for images without pixels.
pub fn color_histogram(image: &RgbImage) -> Result<Array1<f64>> {
    let area = f64::from(image.width()) * f64::from(image.height());
    if area <= 0.0 {
        return Err(computation_error(
            "color histogram",
            &format!("image has zero area ({}x{})", image.width(), image.height()),
        ));
    }

    let mut hist = Array1::<f64>::zeros(HISTOGRAM_LEN);
    for pixel in image.pixels() {
        for (channel, offset) in CHANNEL_OFFSETS {
            let value = pixel.0.get(channel).copied().unwrap_or(0);
            if let Some(bin) = hist.get_mut(offset + usize::from(value)) {
                *bin += 1.0;
            }
        }
    }

    hist /= area;

    let peak = hist.fold(0.0_f64, |acc, &v| acc.max(v));
    if peak <= 0.0 {
        return Err(computation_error("color histogram", &"histogram is empty"));
    }
    hist /= peak;

    Ok(hist)
}

/// View of one channel's 256 bins inside a histogram vector
pub fn channel_bins(hist: &Array1<f64>, channel: usize) -> ArrayView1<'_, f64> {
    let start = (channel * BINS_PER_CHANNEL).min(hist.len());
    let end = (start + BINS_PER_CHANNEL).min(hist.len());
    hist.slice_axis(Axis(0), Slice::from(start..end))
}

/// How per-class sums are turned into the rendered histogram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum HistogramPolicy {
    /// Sum of per-image normalized histograms
    #[default]
    Sum,
    /// Sum divided by the number of contributing images
    Mean,
}

/// Running sum of histograms for a single class
#[derive(Debug, Clone, PartialEq)]
pub struct ClassHistogram {
    /// Element-wise sum of contributions
    pub sum: Array1<f64>,
    /// Number of contributing images
    pub images: usize,
}

impl ClassHistogram {
    fn empty() -> Self {
        Self {
            sum: Array1::zeros(HISTOGRAM_LEN),
            images: 0,
        }
    }
}

/// Per-class histogram sums keyed by class name
///
/// Entries appear in the order classes first received a contribution.
/// Adding is a plain element-wise sum, so the order of contributions and
/// merges does not affect the result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassHistogramAccumulator {
    entries: IndexMap<String, ClassHistogram>,
}

impl ClassHistogramAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one image's histogram to its class entry
    ///
    /// # Errors
    ///
    /// Returns a computation error if the contribution has the wrong length.
    pub fn add(&mut self, class: &str, contribution: &Array1<f64>) -> Result<()> {
        if contribution.len() != HISTOGRAM_LEN {
            return Err(computation_error(
                "histogram accumulation",
                &format!(
                    "expected {HISTOGRAM_LEN} bins, got {}",
                    contribution.len()
                ),
            ));
        }

        let entry = self
            .entries
            .entry(class.to_string())
            .or_insert_with(ClassHistogram::empty);
        entry.sum += contribution;
        entry.images += 1;
        Ok(())
    }

    /// Fold another accumulator into this one
    pub fn merge(&mut self, other: &Self) {
        for (class, theirs) in &other.entries {
            let entry = self
                .entries
                .entry(class.clone())
                .or_insert_with(ClassHistogram::empty);
            entry.sum += &theirs.sum;
            entry.images += theirs.images;
        }
    }

    /// Entry for a class, if it received any contribution
    pub fn get(&self, class: &str) -> Option<&ClassHistogram> {
        self.entries.get(class)
    }

    /// Classes with at least one contribution, in insertion order
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of classes with at least one contribution
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no class has received a contribution
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Histogram for a class under the given policy
    pub fn histogram(&self, class: &str, policy: HistogramPolicy) -> Option<Array1<f64>> {
        self.entries.get(class).map(|entry| match policy {
            HistogramPolicy::Sum => entry.sum.clone(),
            HistogramPolicy::Mean => {
                if entry.images == 0 {
                    entry.sum.clone()
                } else {
                    &entry.sum / entry.images as f64
                }
            }
        })
    }
}
