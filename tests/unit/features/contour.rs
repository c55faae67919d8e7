//! Tests for contour extraction, background resolution and chain compression

#[cfg(test)]
mod tests {
    use dataset_explorer::features::contour::{
        Background, ContourExtractor, compress_chain, draw_contour, median_gray,
    };
    use image::{GrayImage, Luma, Rgb, RgbImage};
    use imageproc::point::Point;

    const LOW: u32 = 10;
    const HIGH: u32 = 29;

    fn rectangle_image(foreground: [u8; 3], background: [u8; 3]) -> RgbImage {
        RgbImage::from_fn(40, 40, |x, y| {
            if (LOW..=HIGH).contains(&x) && (LOW..=HIGH).contains(&y) {
                Rgb(foreground)
            } else {
                Rgb(background)
            }
        })
    }

    fn assert_matches_rectangle(extractor: ContourExtractor, image: &RgbImage) {
        let result = extractor.extract(image);
        assert!(!result.is_empty());

        let min_x = result.hull.iter().map(|p| p.x).min().unwrap();
        let max_x = result.hull.iter().map(|p| p.x).max().unwrap();
        let min_y = result.hull.iter().map(|p| p.y).min().unwrap();
        let max_y = result.hull.iter().map(|p| p.y).max().unwrap();
        assert!((min_x - LOW as i32).abs() <= 2, "min_x = {min_x}");
        assert!((max_x - HIGH as i32).abs() <= 2, "max_x = {max_x}");
        assert!((min_y - LOW as i32).abs() <= 2, "min_y = {min_y}");
        assert!((max_y - HIGH as i32).abs() <= 2, "max_y = {max_y}");

        let center = result.center.unwrap();
        assert!(center.x > f64::from(LOW) && center.x < f64::from(HIGH));
        assert!(center.y > f64::from(LOW) && center.y < f64::from(HIGH));
        assert!((center.x - 19.5).abs() < 1.5);
        assert!((center.y - 19.5).abs() < 1.5);
        assert!(result.area > 250.0 && result.area < 550.0);
    }

    // Tests uniform images have no contour
    // Verified by thresholding uniform images anyway
    #[test]
    fn test_uniform_image_is_empty() {
        let extractor = ContourExtractor::default();
        for value in [0, 128, 255] {
            let image = RgbImage::from_pixel(16, 16, Rgb([value, value, value]));
            let result = extractor.extract(&image);

            assert!(result.is_empty());
            assert!(result.area.abs() < f64::EPSILON);
            assert!(result.hull.is_empty());
            assert!(result.center.is_none());
        }
    }

    // Tests bright rectangle on black background
    // Verified by inverting black backgrounds
    #[test]
    fn test_bright_rectangle_on_black() {
        let image = rectangle_image([255, 255, 255], [0, 0, 0]);
        assert_matches_rectangle(ContourExtractor::new(Background::Black, true), &image);
    }

    // Tests dark rectangle on white background
    // Verified by skipping the inversion step
    #[test]
    fn test_dark_rectangle_on_white() {
        let image = rectangle_image([0, 0, 0], [255, 255, 255]);
        assert_matches_rectangle(ContourExtractor::new(Background::White, true), &image);
    }

    // Tests mixed background picks the right hypothesis for both polarities
    // Verified by flipping the median comparison
    #[test]
    fn test_mixed_background_both_polarities() {
        let extractor = ContourExtractor::new(Background::Mixed, true);
        assert_matches_rectangle(extractor, &rectangle_image([255, 255, 255], [0, 0, 0]));
        assert_matches_rectangle(extractor, &rectangle_image([0, 0, 0], [255, 255, 255]));
    }

    // Tests background resolution from the median gray level
    // Verified by using the mean instead of the median
    #[test]
    fn test_background_resolve() {
        let dark = GrayImage::from_pixel(4, 4, Luma([20]));
        let bright = GrayImage::from_pixel(4, 4, Luma([230]));

        assert_eq!(Background::Mixed.resolve(&dark), Background::Black);
        assert_eq!(Background::Mixed.resolve(&bright), Background::White);
        assert_eq!(Background::White.resolve(&dark), Background::White);
        assert_eq!(Background::Black.resolve(&bright), Background::Black);
    }

    // Tests binarized output holds only 0 and 255
    // Verified by writing the blurred intensity through
    #[test]
    fn test_binarize_is_binary() {
        let image = rectangle_image([180, 90, 30], [10, 10, 10]);
        let binary = ContourExtractor::default().binarize(&image);

        assert!(binary.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
        assert_eq!(binary.get_pixel(20, 20).0[0], 255);
        assert_eq!(binary.get_pixel(0, 0).0[0], 0);
    }

    // Tests the largest contour wins over a smaller one
    // Verified by keeping the first contour found
    #[test]
    fn test_largest_contour_selected() {
        let image = RgbImage::from_fn(60, 60, |x, y| {
            let small = (2..6).contains(&x) && (2..6).contains(&y);
            let large = (20..50).contains(&x) && (20..50).contains(&y);
            if small || large {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        });

        let result = ContourExtractor::new(Background::Black, true).extract(&image);
        let center = result.center.unwrap();
        assert!((center.x - 34.5).abs() < 2.0);
        assert!((center.y - 34.5).abs() < 2.0);
    }

    // Tests a foreground touching every image edge keeps its outer contour
    // Verified by tracing the mask without clearing its frame
    #[test]
    fn test_foreground_touching_edges() {
        let image = RgbImage::from_fn(30, 30, |x, y| {
            if (10..20).contains(&x) && (10..20).contains(&y) {
                Rgb([0, 0, 0])
            } else {
                Rgb([30, 30, 30])
            }
        });

        let result = ContourExtractor::new(Background::Black, true).extract(&image);
        let center = result.center.unwrap();
        assert!((center.x - 14.5).abs() < 0.5);
        assert!((center.y - 14.5).abs() < 0.5);
        assert!(result.area > 600.0, "area = {}", result.area);
        assert!(result.hull.iter().all(|p| (1..=28).contains(&p.x)));
        assert!(result.hull.iter().any(|p| p.x == 1));
        assert!(result.hull.iter().any(|p| p.x == 28));
    }

    // Tests raw contour mode keeps the same area and centroid as hull mode
    // Verified by computing area from the hull
    #[test]
    fn test_raw_contour_mode() {
        // L-shaped foreground has a concave corner the hull removes
        let image = RgbImage::from_fn(40, 40, |x, y| {
            let vertical = (5..15).contains(&x) && (5..35).contains(&y);
            let horizontal = (5..35).contains(&x) && (25..35).contains(&y);
            if vertical || horizontal {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        });

        let hull = ContourExtractor::new(Background::Black, true).extract(&image);
        let raw = ContourExtractor::new(Background::Black, false).extract(&image);

        assert!(!raw.is_empty());
        assert!((hull.area - raw.area).abs() < f64::EPSILON);
        assert_eq!(hull.center, raw.center);
        assert!(raw.hull.len() >= hull.hull.len());
    }

    // Tests straight runs collapse to their end points
    // Verified by comparing absolute steps instead of directions
    #[test]
    fn test_compress_chain_square() {
        let traced = vec![
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(2, 0),
            Point::new(2, 1),
            Point::new(2, 2),
            Point::new(1, 2),
            Point::new(0, 2),
            Point::new(0, 1),
        ];

        assert_eq!(
            compress_chain(&traced),
            vec![
                Point::new(0, 0),
                Point::new(2, 0),
                Point::new(2, 2),
                Point::new(0, 2)
            ]
        );
    }

    // Tests tiny chains pass through unchanged
    // Verified by compressing chains of two points
    #[test]
    fn test_compress_chain_short() {
        let pair = vec![Point::new(3, 3), Point::new(4, 4)];
        assert_eq!(compress_chain(&pair), pair);
        assert!(compress_chain(&[]).is_empty());
    }

    // Tests median averages the two middle values
    // Verified by returning the lower middle value
    #[test]
    fn test_median_gray() {
        let even = GrayImage::from_raw(2, 1, vec![10, 20]).unwrap();
        assert!((median_gray(&even) - 15.0).abs() < f64::EPSILON);

        let odd = GrayImage::from_raw(3, 1, vec![5, 200, 90]).unwrap();
        assert!((median_gray(&odd) - 90.0).abs() < f64::EPSILON);

        assert!(median_gray(&GrayImage::new(0, 0)).abs() < f64::EPSILON);
    }

    // Tests overlay drawing closes the polyline
    // Verified by skipping the closing segment
    #[test]
    fn test_draw_contour() {
        let mut canvas = RgbImage::new(10, 10);
        let square = vec![
            Point::new(0, 0),
            Point::new(9, 0),
            Point::new(9, 9),
            Point::new(0, 9),
        ];
        draw_contour(&mut canvas, &square, Rgb([0, 0, 255]));

        assert_eq!(canvas.get_pixel(5, 0), &Rgb([0, 0, 255]));
        assert_eq!(canvas.get_pixel(0, 5), &Rgb([0, 0, 255]));
        assert_eq!(canvas.get_pixel(5, 5), &Rgb([0, 0, 0]));

        let mut untouched = RgbImage::new(4, 4);
        draw_contour(&mut untouched, &[Point::new(1, 1)], Rgb([255, 0, 0]));
        assert!(untouched.pixels().all(|p| p.0 == [0, 0, 0]));
    }
}
