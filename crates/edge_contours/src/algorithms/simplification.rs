use geo_types::{Coord, LineString};
use crate::{error::Result, traits::ContourPostProcessor, types::Contour};

/// Douglas-Peucker simplifier using geo crate's implementation
#[derive(Debug, Clone)]
pub struct DouglasPeuckerSimplifier {
    pub tolerance: f64,
}

impl Default for DouglasPeuckerSimplifier {
    fn default() -> Self {
        Self { tolerance: 1.0 }
    }
}

impl ContourPostProcessor for DouglasPeuckerSimplifier {
    fn process(&self, contours: &mut Vec<Contour>) -> Result<()> {
        use geo::Simplify;

        for contour in contours.iter_mut() {
            if contour.points.len() < 3 {
                continue;
            }

            // Close the ring so the last segment is simplified too
            let mut coords: Vec<Coord<f64>> = contour
                .points
                .iter()
                .map(|&[x, y]| Coord {
                    x: x as f64,
                    y: y as f64,
                })
                .collect();
            coords.push(coords[0]);

            let simplified = LineString::new(coords).simplify(&self.tolerance);
            let mut points: Vec<[i32; 2]> = simplified
                .coords()
                .map(|c| [c.x.round() as i32, c.y.round() as i32])
                .collect();
            points.pop();

            contour.points = points;
        }

        Ok(())
    }
}

/// Drops contours enclosing less than `min_area` square pixels
#[derive(Debug, Clone)]
pub struct MinimumAreaFilter {
    pub min_area: f64,
}

impl Default for MinimumAreaFilter {
    fn default() -> Self {
        Self { min_area: 10.0 }
    }
}

impl ContourPostProcessor for MinimumAreaFilter {
    fn process(&self, contours: &mut Vec<Contour>) -> Result<()> {
        contours.retain(|contour| contour.area() >= self.min_area);
        Ok(())
    }
}
