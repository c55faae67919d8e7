//! Tests for configuration constants and their relationships

#[cfg(test)]
mod tests {
    use dataset_explorer::io::configuration::{
        BACKGROUND_MIDPOINT, BINS_PER_CHANNEL, DEFAULT_MOSAIC_COLS, DEFAULT_MOSAIC_ROWS,
        FIGURE_EXTENSION, GAUSSIAN_KERNEL_3, HISTOGRAM_CHANNELS, HISTOGRAM_LEN,
        MAX_MOSAIC_CELLS, MOSAIC_CELL_PX, MOSAIC_THUMBNAIL_PX, SIZE_PLOT_MARGIN,
    };

    // Tests histogram layout covers three 256-bin channels
    // Verified by changing bin count
    #[test]
    fn test_histogram_layout() {
        assert_eq!(BINS_PER_CHANNEL, 256);
        assert_eq!(HISTOGRAM_CHANNELS, 3);
        assert_eq!(HISTOGRAM_LEN, 768);
    }

    // Tests blur kernel preserves overall intensity
    // Verified by changing kernel weights
    #[test]
    fn test_gaussian_kernel_normalized() {
        let total: f32 = GAUSSIAN_KERNEL_3.iter().sum();
        assert!((total - 1.0).abs() < f32::EPSILON);
        assert!((BACKGROUND_MIDPOINT - 127.5).abs() < f64::EPSILON);
    }

    // Tests mosaic defaults and thumbnails fit inside a cell
    // Verified by enlarging thumbnails past the cell size
    #[test]
    fn test_mosaic_defaults() {
        assert_eq!((DEFAULT_MOSAIC_ROWS, DEFAULT_MOSAIC_COLS), (4, 4));
        assert!(MOSAIC_THUMBNAIL_PX < MOSAIC_CELL_PX);
        assert!(DEFAULT_MOSAIC_ROWS * DEFAULT_MOSAIC_COLS <= MAX_MOSAIC_CELLS);
        assert!(u32::try_from(MAX_MOSAIC_CELLS).unwrap().checked_mul(MOSAIC_CELL_PX).is_some());
    }

    // Tests figures leave headroom past the largest image
    // Verified by setting the margin below one
    #[test]
    fn test_figure_settings() {
        assert!(SIZE_PLOT_MARGIN > 1.0);
        assert_eq!(FIGURE_EXTENSION, "svg");
    }
}
