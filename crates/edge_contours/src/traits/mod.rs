use image::GrayImage;
use crate::{error::Result, types::Contour};

/// Trait for edge detection algorithms
pub trait EdgeDetector: Send + Sync {
    /// Produce a binary (0/255) edge map with the input's dimensions
    fn detect(&self, image: &GrayImage) -> Result<GrayImage>;
}

/// Trait for algorithms that bridge gaps in an edge map
pub trait EdgeCloser: Send + Sync {
    /// Close small gaps in a binary edge map
    fn close(&self, edges: &GrayImage) -> Result<GrayImage>;
}

/// Trait for contour extraction algorithms
pub trait ContourExtractor: Send + Sync {
    /// Extract contours from a binary image
    fn extract_contours(&self, image: &GrayImage) -> Result<Vec<Contour>>;
}

/// Trait for contour post-processing algorithms
pub trait ContourPostProcessor: Send + Sync {
    /// Post-process the extracted contours in place
    fn process(&self, contours: &mut Vec<Contour>) -> Result<()>;
}
