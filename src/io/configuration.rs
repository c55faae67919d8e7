//! Analysis constants and runtime configuration defaults

// Histogram layout
/// Intensity bins per color channel
pub const BINS_PER_CHANNEL: usize = 256;
/// Number of color channels in a histogram (B, G, R)
pub const HISTOGRAM_CHANNELS: usize = 3;
/// Length of a full per-image histogram vector
pub const HISTOGRAM_LEN: usize = BINS_PER_CHANNEL * HISTOGRAM_CHANNELS;

// Contour extraction
/// Separable 3x3 Gaussian kernel (sigma 0.8)
pub const GAUSSIAN_KERNEL_3: [f32; 3] = [0.25, 0.5, 0.25];
/// Gray level splitting dark from bright backgrounds
pub const BACKGROUND_MIDPOINT: f64 = 255.0 / 2.0;

// Mosaic settings
/// Default number of mosaic rows
pub const DEFAULT_MOSAIC_ROWS: usize = 4;
/// Default number of mosaic columns
pub const DEFAULT_MOSAIC_COLS: usize = 4;
/// Upper bound on mosaic rows times columns
pub const MAX_MOSAIC_CELLS: usize = 1024;
/// Longest side of a mosaic thumbnail in pixels
pub const MOSAIC_THUMBNAIL_PX: u32 = 64;
/// Pixel size of one mosaic cell including title and border
pub const MOSAIC_CELL_PX: u32 = 220;
/// Height reserved for the class title above each cell
pub const MOSAIC_TITLE_PX: u32 = 14;
/// Color used to draw contour hulls over mosaic images
pub const HULL_OVERLAY_RGB: [u8; 3] = [0, 0, 255];

// Figure settings
/// Default figure dimensions in pixels
pub const FIGURE_SIZE: (u32, u32) = (1024, 768);
/// Height of a single class panel in the color histogram figure
pub const HISTOGRAM_PANEL_HEIGHT: u32 = 240;
/// Opacity of histogram bars so overlapping channels blend
pub const HISTOGRAM_BAR_ALPHA: f64 = 0.4;
/// Margin factor applied to the largest observed dimension
pub const SIZE_PLOT_MARGIN: f64 = 1.1;
/// Radius multiplier for size scatter points (area grows with count)
pub const SIZE_POINT_SCALE: f64 = 3.0;
/// File extension of rendered figures
pub const FIGURE_EXTENSION: &str = "svg";

// Output settings
/// Parent directory for run outputs
pub const DEFAULT_PROJECT_DIR: &str = "runs";
/// Base name of a run directory
pub const DEFAULT_RUN_NAME: &str = "exp";
