//! Dominant foreground contour extraction via blur, Otsu threshold and border following

use crate::features::moments::Moments;
use crate::io::configuration::{BACKGROUND_MIDPOINT, GAUSSIAN_KERNEL_3};
use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::contours::find_contours;
use imageproc::contrast::otsu_level;
use imageproc::drawing::draw_line_segment_mut;
use imageproc::filter::separable_filter_equal;
use imageproc::geometry::convex_hull;
use imageproc::point::Point;

/// Background color hypothesis used to decide which side of the threshold is foreground
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Background {
    /// Bright objects on a dark background
    Black,
    /// Dark objects on a bright background
    White,
    /// Infer black or white from the median gray level
    #[default]
    Mixed,
}

impl Background {
    /// Resolve `Mixed` to a concrete background using the image's median gray level
    pub fn resolve(self, gray: &GrayImage) -> Self {
        match self {
            Self::Mixed => {
                if median_gray(gray) < BACKGROUND_MIDPOINT {
                    Self::Black
                } else {
                    Self::White
                }
            }
            concrete => concrete,
        }
    }
}

/// Largest foreground contour of an image
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContourResult {
    /// Convex hull (or raw simplified contour) points, empty if nothing was found
    pub hull: Vec<Point<i32>>,
    /// Zeroth moment of the selected contour, 0 if nothing was found
    pub area: f64,
    /// Centroid of the selected contour
    pub center: Option<Point<f64>>,
}

impl ContourResult {
    /// Whether a foreground contour was found
    pub const fn is_empty(&self) -> bool {
        self.center.is_none()
    }
}

/// Extracts the dominant contour of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContourExtractor {
    /// Background hypothesis
    pub background: Background,
    /// Return the convex hull instead of the raw contour
    pub convex_hull: bool,
}

impl Default for ContourExtractor {
    fn default() -> Self {
        Self {
            background: Background::Mixed,
            convex_hull: true,
        }
    }
}

impl ContourExtractor {
    /// Create an extractor for the given background and hull mode
    pub const fn new(background: Background, convex_hull: bool) -> Self {
        Self {
            background,
            convex_hull,
        }
    }

    /// Find the contour with the greatest area in `image`
    ///
    /// Ties keep the first contour encountered. Images without a separable
    /// foreground (e.g. a single uniform color) yield an empty result.
    pub fn extract(&self, image: &RgbImage) -> ContourResult {
        let mut binary = self.binarize(image);
        // Border following skips components touching the image edge
        clear_frame(&mut binary);

        let mut result = ContourResult::default();
        for contour in find_contours::<i32>(&binary) {
            let points = compress_chain(&contour.points);
            let moments = Moments::of_polygon(&points);
            if moments.m00 > result.area {
                result.center = moments.centroid();
                result.area = moments.m00;
                result.hull = if self.convex_hull {
                    convex_hull(points)
                } else {
                    points
                };
            }
        }

        result
    }

    /// Foreground mask: 255 for foreground, 0 for background
    pub fn binarize(&self, image: &RgbImage) -> GrayImage {
        let mut gray = image::imageops::grayscale(image);

        if self.background.resolve(&gray) == Background::White {
            image::imageops::invert(&mut gray);
        }

        let mut blurred: GrayImage = separable_filter_equal(&gray, GAUSSIAN_KERNEL_3.as_slice());

        // A single intensity leaves nothing to separate
        let first = blurred.pixels().next().map_or(0, |p| p.0[0]);
        if blurred.pixels().all(|p| p.0[0] == first) {
            blurred.pixels_mut().for_each(|p| *p = Luma([0]));
            return blurred;
        }

        let level = otsu_level(&blurred);
        for p in blurred.pixels_mut() {
            *p = if p.0[0] > level { Luma([255]) } else { Luma([0]) };
        }
        blurred
    }
}

/// Set the one pixel frame around a mask to background
fn clear_frame(mask: &mut GrayImage) {
    let (width, height) = mask.dimensions();
    for (x, y, pixel) in mask.enumerate_pixels_mut() {
        if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
            *pixel = Luma([0]);
        }
    }
}

/// Draw a closed polyline through `points` onto `canvas`
pub fn draw_contour(canvas: &mut RgbImage, points: &[Point<i32>], color: Rgb<u8>) {
    if points.len() < 2 {
        return;
    }
    for (i, start) in points.iter().enumerate() {
        let end = points.get((i + 1) % points.len()).unwrap_or(start);
        draw_line_segment_mut(
            canvas,
            (start.x as f32, start.y as f32),
            (end.x as f32, end.y as f32),
            color,
        );
    }
}

/// Drop points lying in the middle of straight horizontal, vertical or diagonal runs
pub fn compress_chain(points: &[Point<i32>]) -> Vec<Point<i32>> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let mut kept = Vec::with_capacity(n);
    for i in 0..n {
        let (Some(prev), Some(cur), Some(next)) = (
            points.get((i + n - 1) % n),
            points.get(i),
            points.get((i + 1) % n),
        ) else {
            continue;
        };
        let incoming = step(*prev, *cur);
        let outgoing = step(*cur, *next);
        if incoming != outgoing {
            kept.push(*cur);
        }
    }

    if kept.is_empty() {
        // Every step identical: degenerate closed loop, keep the full trace
        return points.to_vec();
    }
    kept
}

fn step(from: Point<i32>, to: Point<i32>) -> (i32, i32) {
    ((to.x - from.x).signum(), (to.y - from.y).signum())
}

/// Median gray level, averaging the two middle values for even pixel counts
pub fn median_gray(gray: &GrayImage) -> f64 {
    let mut counts = [0u64; 256];
    for p in gray.pixels() {
        if let Some(count) = counts.get_mut(usize::from(p.0[0])) {
            *count += 1;
        }
    }

    let total: u64 = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }

    let lower_rank = (total - 1) / 2;
    let upper_rank = total / 2;
    let lower = value_at_rank(&counts, lower_rank);
    let upper = value_at_rank(&counts, upper_rank);
    (f64::from(lower) + f64::from(upper)) / 2.0
}

fn value_at_rank(counts: &[u64; 256], rank: u64) -> u8 {
    let mut seen = 0;
    for (value, count) in counts.iter().enumerate() {
        seen += count;
        if seen > rank {
            return value as u8;
        }
    }
    u8::MAX
}
