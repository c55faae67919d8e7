//! Per-image reducers extracting one feature from one decoded image

/// Dominant foreground contour, hull and centroid
pub mod contour;
/// Normalized color histograms and per-class accumulation
pub mod histogram;
/// Raw polygon moments used for contour area and centroid
pub mod moments;
