//! # Edge Contour Extraction Library
//!
//! Finds the external outlines of objects in a photograph: Canny edge
//! detection, a morphological closing that bridges small gaps in the edge
//! map, and external contour tracing with collinear points removed.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edge_contours::closed_contours;
//!
//! let image = image::open("photo.jpg")?;
//! let contours = closed_contours(&image, 100.0, 200.0, 5)?;
//! println!("found {} contours", contours.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Custom Pipeline
//!
//! ```rust,no_run
//! use edge_contours::{Pipeline, ContourSource};
//!
//! let pipeline = Pipeline::builder()
//!     .with_thresholds(50.0, 150.0)
//!     .with_kernel_size(7)?
//!     .contour_source(ContourSource::Edges)
//!     .with_simplification(1.5)
//!     .build();
//!
//! let image = image::open("photo.jpg")?;
//! let output = pipeline.process(&image)?;
//! output.stages.closed.save("closed.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Core modules
pub mod error;
pub mod types;
pub mod traits;
pub mod algorithms;
pub mod pipeline;
pub mod raster;
pub mod render;
pub mod viewer;

// Re-exports for convenience
pub use error::{ContourError, Result};
pub use types::{ChainApproximation, ComputedContours, Contour, ContourSource, StageImages};
pub use traits::*;
pub use algorithms::*;
pub use pipeline::{Pipeline, PipelineOutput, builder::PipelineBuilder};
pub use raster::raster_from_raw;
pub use render::{draw_contours, draw_contours_mut, CONTOUR_COLOR, CONTOUR_THICKNESS};
pub use viewer::{FileViewer, NullViewer, StageViewer, ViewerWindow};

/// External contours of `source` after Canny edge detection and a closing
/// with a `kernel_size` square.
///
/// `source` must hold 8-bit samples. `kernel_size` must be positive and odd.
pub fn closed_contours(
    source: &image::DynamicImage,
    low_threshold: f32,
    high_threshold: f32,
    kernel_size: u32,
) -> Result<Vec<Contour>> {
    let pipeline = PipelineBuilder::build_closed(low_threshold, high_threshold, kernel_size)?;
    Ok(pipeline.process(source)?.contours.contours)
}
