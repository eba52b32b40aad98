use geo_types::{Coord, LineString, Polygon};
use image::GrayImage;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

/// One closed external boundary, as `[x, y]` pixel coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contour {
    pub points: Vec<[i32; 2]>,
}

impl Contour {
    pub fn new(points: Vec<[i32; 2]>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Convert to a closed geo-types polygon for geometric operations
    pub fn to_geo_polygon(&self) -> Polygon<f64> {
        let coords: Vec<Coord<f64>> = self
            .points
            .iter()
            .map(|&[x, y]| Coord {
                x: x as f64,
                y: y as f64,
            })
            .collect();

        // Polygon::new closes the ring if needed
        Polygon::new(LineString::new(coords), vec![])
    }

    /// Enclosed area of the boundary polygon
    pub fn area(&self) -> f64 {
        use geo::Area;
        self.to_geo_polygon().unsigned_area()
    }

    /// Inclusive pixel bounding box as `(min, max)`.
    ///
    /// Returns `None` for an empty contour.
    pub fn bounding_box(&self) -> Option<([i32; 2], [i32; 2])> {
        let first = *self.points.first()?;
        let (min, max) = self.points.iter().fold((first, first), |(min, max), &[x, y]| {
            ([min[0].min(x), min[1].min(y)], [max[0].max(x), max[1].max(y)])
        });
        Some((min, max))
    }

    /// Length of the closed polyline
    pub fn perimeter(&self) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }

        let n = self.points.len();
        (0..n)
            .map(|i| {
                let [x0, y0] = self.points[i];
                let [x1, y1] = self.points[(i + 1) % n];
                let dx = (x1 - x0) as f64;
                let dy = (y1 - y0) as f64;
                (dx * dx + dy * dy).sqrt()
            })
            .sum()
    }
}

/// Contours found in one image together with the image dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedContours {
    pub contours: Vec<Contour>,
    pub image_width: u32,
    pub image_height: u32,
}

impl ComputedContours {
    pub fn total_points(&self) -> usize {
        self.contours.iter().map(Contour::len).sum()
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Intermediate binary maps produced on the way to the contours.
///
/// Both maps share the source image's dimensions.
#[derive(Debug, Clone)]
pub struct StageImages {
    pub edges: GrayImage,
    pub closed: GrayImage,
}

/// Which edge map feeds contour extraction
#[derive(
    Debug, Clone, Copy, Default,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq, Eq,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ContourSource {
    /// The edge map after morphological closing
    #[default]
    Closed,
    /// The raw edge map, closing result is only kept for display
    Edges,
}

/// How boundary pixels are reduced to contour points
#[derive(
    Debug, Clone, Copy, Default,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq, Eq,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChainApproximation {
    /// Keep every boundary pixel
    Full,
    /// Keep only the points where the boundary changes direction
    #[default]
    Simple,
}
