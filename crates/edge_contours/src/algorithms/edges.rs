use image::GrayImage;
use tracing::{debug, warn};
use crate::{
    error::{ContourError, Result},
    traits::EdgeDetector,
};

/// Canny edge detector (Gaussian smoothing, Sobel gradients,
/// non-maximum suppression, hysteresis)
#[derive(Debug, Clone)]
pub struct CannyEdgeDetector {
    pub low_threshold: f32,
    pub high_threshold: f32,
}

impl CannyEdgeDetector {
    pub fn new(low_threshold: f32, high_threshold: f32) -> Self {
        Self {
            low_threshold,
            high_threshold,
        }
    }

    /// Thresholds in `(weak, strong)` order.
    ///
    /// An inverted pair is swapped, which is what OpenCV's `Canny` does
    /// internally with the same arguments. Zero is raised to the smallest
    /// positive `f32`: hysteresis keeps magnitudes `>= low`, and a zero
    /// cutoff would let it walk onto the unsuppressed zero border.
    pub fn ordered_thresholds(&self) -> Result<(f32, f32)> {
        if !self.low_threshold.is_finite() || !self.high_threshold.is_finite() {
            return Err(ContourError::InvalidParameter(format!(
                "canny thresholds must be finite, got low={} high={}",
                self.low_threshold, self.high_threshold
            )));
        }

        if self.low_threshold < 0.0 || self.high_threshold < 0.0 {
            return Err(ContourError::InvalidParameter(format!(
                "canny thresholds must not be negative, got low={} high={}",
                self.low_threshold, self.high_threshold
            )));
        }

        let (low, high) = if self.low_threshold > self.high_threshold {
            warn!(
                low = self.low_threshold,
                high = self.high_threshold,
                "low threshold exceeds high threshold, swapping"
            );
            (self.high_threshold, self.low_threshold)
        } else {
            (self.low_threshold, self.high_threshold)
        };

        Ok((low.max(f32::MIN_POSITIVE), high.max(f32::MIN_POSITIVE)))
    }
}

impl Default for CannyEdgeDetector {
    fn default() -> Self {
        Self::new(100.0, 200.0)
    }
}

impl EdgeDetector for CannyEdgeDetector {
    fn detect(&self, image: &GrayImage) -> Result<GrayImage> {
        let (low, high) = self.ordered_thresholds()?;
        let edges = imageproc::edges::canny(image, low, high);
        debug!(
            edge_pixels = edges.pixels().filter(|p| p[0] > 0).count(),
            "canny edge map"
        );
        Ok(edges)
    }
}
