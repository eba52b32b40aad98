use edge_contours::{
    draw_contours, raster, ComputedContours, ContourError, ContourSource, Pipeline, StageViewer,
    ViewerWindow, CONTOUR_COLOR, CONTOUR_THICKNESS,
};
use image::DynamicImage;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ContourKitError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    ContourError(#[from] ContourError),
    #[error("Failed to read image {path}: {source}")]
    ImageRead {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

fn default_low_threshold() -> f32 {
    100.0
}

fn default_high_threshold() -> f32 {
    200.0
}

fn default_kernel_size() -> u32 {
    5
}

/// Parameters of one extraction run
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ExtractionConfig {
    /// Image to read
    pub image_path: PathBuf,
    /// Weak-edge cutoff
    #[serde(default = "default_low_threshold")]
    pub low_threshold: f32,
    /// Strong-edge cutoff
    #[serde(default = "default_high_threshold")]
    pub high_threshold: f32,
    /// Side of the square structuring element, positive and odd
    #[serde(default = "default_kernel_size")]
    pub kernel_size: u32,
    /// Edge map that feeds contour extraction
    #[serde(default)]
    pub contour_source: ContourSource,
    /// Directory receiving the stage images, none disables display
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl ExtractionConfig {
    pub fn new(image_path: impl Into<PathBuf>) -> Self {
        Self {
            image_path: image_path.into(),
            low_threshold: default_low_threshold(),
            high_threshold: default_high_threshold(),
            kernel_size: default_kernel_size(),
            contour_source: ContourSource::default(),
            output_dir: None,
        }
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ContourKitError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self, ContourKitError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ContourKitError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load configuration from JSON string
    pub fn from_json(content: &str) -> Result<Self, ContourKitError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ContourKitError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(ContourKitError::UnsupportedFileFormat),
        }
    }

    /// Convert configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ContourKitError> {
        Ok(toml::to_string_pretty(&self)?)
    }

    /// Convert configuration to JSON string
    pub fn to_json(&self) -> Result<String, ContourKitError> {
        Ok(serde_json::to_string_pretty(&self)?)
    }

    /// JSON schema of the configuration file
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ExtractionConfig)
    }
}

pub fn load_image(path: &Path) -> Result<DynamicImage, ContourKitError> {
    image::open(path).map_err(|source| ContourKitError::ImageRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Run the pipeline on `image`, showing every stage through `viewer`
pub fn run_extraction<V: StageViewer + ?Sized>(
    config: &ExtractionConfig,
    image: &DynamicImage,
    viewer: &mut V,
) -> Result<ComputedContours, ContourKitError> {
    info!(
        shape = %raster::shape(image),
        color = ?image.color(),
        "loaded {}",
        config.image_path.display()
    );

    show(viewer, "image", image)?;

    let pipeline = Pipeline::builder()
        .with_thresholds(config.low_threshold, config.high_threshold)
        .with_kernel_size(config.kernel_size)?
        .contour_source(config.contour_source)
        .build();
    debug!("{}", pipeline.info());

    let output = pipeline.process(image)?;

    show(viewer, "edges", &DynamicImage::ImageLuma8(output.stages.edges.clone()))?;
    show(viewer, "closed_edges", &DynamicImage::ImageLuma8(output.stages.closed.clone()))?;

    let contours = output.contours;
    info!(count = contours.contours.len(), points = contours.total_points(), "contours");
    for (i, contour) in contours.contours.iter().enumerate() {
        debug!(
            index = i,
            perimeter = contour.perimeter(),
            points = ?contour.points,
            "contour"
        );
    }

    let overlay = draw_contours(&image.to_rgb8(), &contours.contours, CONTOUR_COLOR, CONTOUR_THICKNESS);
    show(viewer, "contours", &DynamicImage::ImageRgb8(overlay))?;

    Ok(contours)
}

fn show<V: StageViewer + ?Sized>(
    viewer: &mut V,
    name: &str,
    image: &DynamicImage,
) -> Result<(), ContourKitError> {
    let mut window = ViewerWindow::open(viewer, name)?;
    window.show(image)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use edge_contours::{viewer::FileViewer, NullViewer};
    use image::{GrayImage, Luma};

    fn square_image() -> DynamicImage {
        let mut img = GrayImage::new(80, 80);
        for y in 20..60 {
            for x in 20..60 {
                img.put_pixel(x, y, Luma([255u8]));
            }
        }
        DynamicImage::ImageLuma8(img)
    }

    #[test]
    fn test_toml_defaults() {
        let config = ExtractionConfig::from_toml("image_path = \"pods.jpg\"").expect("Should parse");
        assert_eq!(config, ExtractionConfig::new("pods.jpg"));
    }

    #[test]
    fn test_toml_and_json_agree() {
        let mut config = ExtractionConfig::new("img/pods.jpg");
        config.low_threshold = 600.0;
        config.high_threshold = 150.0;
        config.contour_source = ContourSource::Edges;
        config.output_dir = Some(PathBuf::from("out"));

        let from_toml = ExtractionConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        let from_json = ExtractionConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(from_toml, config);
        assert_eq!(from_json, config);
    }

    #[test]
    fn test_contour_source_spelling() {
        let config = ExtractionConfig::from_json(
            r#"{"image_path": "a.png", "contour_source": "edges"}"#,
        )
        .unwrap();
        assert_eq!(config.contour_source, ContourSource::Edges);
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(matches!(
            ExtractionConfig::from_file("config.yaml"),
            Err(ContourKitError::UnsupportedFileFormat)
        ));
    }

    #[test]
    fn test_schema_lists_fields() {
        let schema = serde_json::to_value(ExtractionConfig::schema()).unwrap();
        let properties = &schema["properties"];
        assert!(properties.get("kernel_size").is_some());
        assert!(properties.get("contour_source").is_some());
    }

    #[test]
    fn test_run_extraction() {
        let mut config = ExtractionConfig::new("square.png");
        config.low_threshold = 50.0;
        config.high_threshold = 100.0;

        let contours = run_extraction(&config, &square_image(), &mut NullViewer).expect("Should run");
        assert_eq!(contours.contours.len(), 1);
        assert_eq!((contours.image_width, contours.image_height), (80, 80));
    }

    #[test]
    fn test_run_extraction_writes_stages() {
        let dir = std::env::temp_dir().join(format!("contour_cli_stages_{}", std::process::id()));
        let mut config = ExtractionConfig::new("square.png");
        config.low_threshold = 50.0;
        config.high_threshold = 100.0;

        let mut viewer = FileViewer::new(&dir);
        run_extraction(&config, &square_image(), &mut viewer).expect("Should run");

        for stage in ["image", "edges", "closed_edges", "contours"] {
            assert!(dir.join(format!("{stage}_00.png")).exists(), "missing {stage}");
        }
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_bad_kernel_reported() {
        let mut config = ExtractionConfig::new("square.png");
        config.kernel_size = 6;
        assert!(matches!(
            run_extraction(&config, &square_image(), &mut NullViewer),
            Err(ContourKitError::ContourError(ContourError::InvalidParameter(_)))
        ));
    }

    #[test]
    fn test_missing_image() {
        assert!(matches!(
            load_image(Path::new("/nonexistent/pods.jpg")),
            Err(ContourKitError::ImageRead { .. })
        ));
    }
}
