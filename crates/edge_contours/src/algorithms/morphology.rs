use image::GrayImage;
use imageproc::distance_transform::Norm;
use tracing::debug;
use crate::{
    error::{ContourError, Result},
    traits::EdgeCloser,
};

/// Largest side whose radius still fits imageproc's `u8` distance
const MAX_ELEMENT_SIDE: u32 = 2 * u8::MAX as u32 + 1;

/// Square all-ones structuring element with an odd side length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuringElement {
    side: u32,
}

impl StructuringElement {
    pub fn square(side: u32) -> Result<Self> {
        if side == 0 || side % 2 == 0 {
            return Err(ContourError::InvalidParameter(format!(
                "kernel size must be a positive odd integer, got {side}"
            )));
        }
        if side > MAX_ELEMENT_SIDE {
            return Err(ContourError::InvalidParameter(format!(
                "kernel size {side} exceeds the maximum of {MAX_ELEMENT_SIDE}"
            )));
        }
        Ok(Self { side })
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    /// Chebyshev reach from the anchor (the centre cell)
    pub fn radius(&self) -> u8 {
        // bounded by MAX_ELEMENT_SIDE
        (self.side / 2) as u8
    }
}

impl Default for StructuringElement {
    fn default() -> Self {
        Self { side: 5 }
    }
}

/// Morphological closing (dilation followed by erosion).
///
/// An L-infinity ball of radius `r` is exactly the `(2r + 1)` square, so
/// the closing below is the closing with [`StructuringElement`].
#[derive(Debug, Clone, Default)]
pub struct MorphologicalCloser {
    pub element: StructuringElement,
}

impl MorphologicalCloser {
    pub fn new(element: StructuringElement) -> Self {
        Self { element }
    }

    pub fn with_kernel_size(side: u32) -> Result<Self> {
        Ok(Self::new(StructuringElement::square(side)?))
    }
}

impl EdgeCloser for MorphologicalCloser {
    fn close(&self, edges: &GrayImage) -> Result<GrayImage> {
        let radius = self.element.radius();
        debug!(kernel = self.element.side(), radius, "closing edge map");
        if radius == 0 {
            // 1x1 element is the identity
            return Ok(edges.clone());
        }
        Ok(imageproc::morphology::close(edges, Norm::LInf, radius))
    }
}
