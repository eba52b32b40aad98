use crate::{
    error::Result,
    pipeline::Pipeline,
    traits::{EdgeDetector, EdgeCloser, ContourExtractor, ContourPostProcessor},
    types::ContourSource,
    algorithms::{
        CannyEdgeDetector,
        MorphologicalCloser,
        ExternalContourExtractor,
        DouglasPeuckerSimplifier,
        MinimumAreaFilter,
    },
};

/// Builder for creating processing pipelines with a fluent API
pub struct PipelineBuilder {
    edge_detector: Option<Box<dyn EdgeDetector>>,
    closer: Option<Box<dyn EdgeCloser>>,
    contour_extractor: Option<Box<dyn ContourExtractor>>,
    contour_source: ContourSource,
    postprocessors: Vec<Box<dyn ContourPostProcessor>>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            edge_detector: None,
            closer: None,
            contour_extractor: None,
            contour_source: ContourSource::default(),
            postprocessors: Vec::new(),
        }
    }

    /// Set the edge detector (replaces any existing one)
    pub fn set_edge_detector<D>(mut self, detector: D) -> Self
    where
        D: EdgeDetector + 'static,
    {
        self.edge_detector = Some(Box::new(detector));
        self
    }

    /// Use Canny with the given weak/strong cutoffs
    pub fn with_thresholds(self, low_threshold: f32, high_threshold: f32) -> Self {
        self.set_edge_detector(CannyEdgeDetector::new(low_threshold, high_threshold))
    }

    /// Set the gap closer (replaces any existing one)
    pub fn set_closer<C>(mut self, closer: C) -> Self
    where
        C: EdgeCloser + 'static,
    {
        self.closer = Some(Box::new(closer));
        self
    }

    /// Close with a square structuring element of side `kernel_size`
    pub fn with_kernel_size(self, kernel_size: u32) -> Result<Self> {
        Ok(self.set_closer(MorphologicalCloser::with_kernel_size(kernel_size)?))
    }

    /// Set the contour extractor (replaces any existing one)
    pub fn set_contour_extractor<E>(mut self, extractor: E) -> Self
    where
        E: ContourExtractor + 'static,
    {
        self.contour_extractor = Some(Box::new(extractor));
        self
    }

    /// Choose which edge map feeds contour extraction
    pub fn contour_source(mut self, source: ContourSource) -> Self {
        self.contour_source = source;
        self
    }

    /// Add a post-processor to the pipeline
    pub fn add_postprocessor<P>(mut self, postprocessor: P) -> Self
    where
        P: ContourPostProcessor + 'static,
    {
        self.postprocessors.push(Box::new(postprocessor));
        self
    }

    /// Add Douglas-Peucker simplification as a post-processing step
    pub fn with_simplification(self, tolerance: f64) -> Self {
        self.add_postprocessor(DouglasPeuckerSimplifier { tolerance })
    }

    /// Drop contours smaller than `min_area`
    pub fn with_min_area(self, min_area: f64) -> Self {
        self.add_postprocessor(MinimumAreaFilter { min_area })
    }

    /// Build the pipeline with default components if not specified
    pub fn build(self) -> Pipeline {
        let edge_detector = self.edge_detector
            .unwrap_or_else(|| Box::new(CannyEdgeDetector::default()));

        let closer = self.closer
            .unwrap_or_else(|| Box::new(MorphologicalCloser::default()));

        let contour_extractor = self.contour_extractor
            .unwrap_or_else(|| Box::new(ExternalContourExtractor::default()));

        Pipeline::new(
            edge_detector,
            closer,
            contour_extractor,
            self.contour_source,
            self.postprocessors,
        )
    }

    /// Build the canny → close → external contours pipeline
    pub fn build_closed(low_threshold: f32, high_threshold: f32, kernel_size: u32) -> Result<Pipeline> {
        Ok(Self::new()
            .with_thresholds(low_threshold, high_threshold)
            .with_kernel_size(kernel_size)?
            .build())
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
