pub mod builder;

use image::{DynamicImage, GrayImage};
use tracing::debug;
use crate::{
    error::{ContourError, Result},
    raster::to_luma8,
    types::{ComputedContours, ContourSource, StageImages},
    traits::{EdgeDetector, EdgeCloser, ContourExtractor, ContourPostProcessor},
};

/// Everything one pipeline run produces
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub contours: ComputedContours,
    pub stages: StageImages,
}

/// Edge detection, gap closing and contour extraction composed into one pass
pub struct Pipeline {
    edge_detector: Box<dyn EdgeDetector>,
    closer: Box<dyn EdgeCloser>,
    contour_extractor: Box<dyn ContourExtractor>,
    contour_source: ContourSource,
    postprocessors: Vec<Box<dyn ContourPostProcessor>>,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    /// Create a new pipeline with the given components
    pub fn new(
        edge_detector: Box<dyn EdgeDetector>,
        closer: Box<dyn EdgeCloser>,
        contour_extractor: Box<dyn ContourExtractor>,
        contour_source: ContourSource,
        postprocessors: Vec<Box<dyn ContourPostProcessor>>,
    ) -> Self {
        Self {
            edge_detector,
            closer,
            contour_extractor,
            contour_source,
            postprocessors,
        }
    }

    /// Process an 8-bit image through the entire pipeline
    pub fn process(&self, image: &DynamicImage) -> Result<PipelineOutput> {
        let gray = to_luma8(image)?;
        self.process_luma(&gray)
    }

    /// Process an already single-channel image
    pub fn process_luma(&self, gray: &GrayImage) -> Result<PipelineOutput> {
        let dimensions = gray.dimensions();

        // Step 1: Edge map
        let edges = self.edge_detector.detect(gray)?;
        ensure_same_dimensions("edge map", dimensions, edges.dimensions())?;

        // Step 2: Bridge small gaps
        let closed = self.closer.close(&edges)?;
        ensure_same_dimensions("closed edge map", dimensions, closed.dimensions())?;

        // Step 3: Extract contours from the selected map
        let source = match self.contour_source {
            ContourSource::Closed => &closed,
            ContourSource::Edges => &edges,
        };
        let mut contours = self.contour_extractor.extract_contours(source)?;

        // Step 4: Apply all post-processors in sequence
        for postprocessor in &self.postprocessors {
            postprocessor.process(&mut contours)?;
        }

        debug!(
            source = %self.contour_source,
            contours = contours.len(),
            "pipeline finished"
        );

        Ok(PipelineOutput {
            contours: ComputedContours {
                contours,
                image_width: dimensions.0,
                image_height: dimensions.1,
            },
            stages: StageImages { edges, closed },
        })
    }

    /// Get information about the pipeline configuration
    pub fn info(&self) -> String {
        format!(
            "Pipeline: edge detector, closer, contour extractor on {} map, {} postprocessors",
            self.contour_source,
            self.postprocessors.len()
        )
    }
}

fn ensure_same_dimensions(stage: &str, expected: (u32, u32), actual: (u32, u32)) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(ContourError::ImageProcessing(format!(
            "{stage} is {}x{}, source is {}x{}",
            actual.0, actual.1, expected.0, expected.1
        )))
    }
}
