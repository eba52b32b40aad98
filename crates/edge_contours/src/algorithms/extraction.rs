use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};
use crate::{
    error::Result,
    traits::ContourExtractor,
    types::{ChainApproximation, Contour},
};

/// External-only contour extractor built on imageproc's border following.
///
/// Keeps the outer border of every top-level foreground region; hole
/// borders and everything nested inside a hole are dropped.
#[derive(Debug, Clone, Default)]
pub struct ExternalContourExtractor {
    pub approximation: ChainApproximation,
}

impl ExternalContourExtractor {
    pub fn new(approximation: ChainApproximation) -> Self {
        Self { approximation }
    }
}

impl ContourExtractor for ExternalContourExtractor {
    fn extract_contours(&self, binary_image: &GrayImage) -> Result<Vec<Contour>> {
        let contours = find_contours::<i32>(binary_image);

        let result = contours
            .into_iter()
            .filter(|contour| contour.border_type == BorderType::Outer && contour.parent.is_none())
            .map(|contour| {
                let points: Vec<[i32; 2]> = contour.points.iter().map(|p| [p.x, p.y]).collect();
                match self.approximation {
                    ChainApproximation::Full => Contour::new(points),
                    ChainApproximation::Simple => Contour::new(compress_chain(&points)),
                }
            })
            .collect();

        Ok(result)
    }
}

/// Drop points that continue the previous step's direction on a closed chain.
pub fn compress_chain(points: &[[i32; 2]]) -> Vec<[i32; 2]> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let step = |from: [i32; 2], to: [i32; 2]| [(to[0] - from[0]).signum(), (to[1] - from[1]).signum()];

    let kept: Vec<[i32; 2]> = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            step(prev, points[i]) != step(points[i], next)
        })
        .map(|i| points[i])
        .collect();

    // only a chain of identical points never turns
    if kept.is_empty() {
        vec![points[0]]
    } else {
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn fill(img: &mut GrayImage, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>, value: u8) {
        for y in ys {
            for x in xs.clone() {
                img.put_pixel(x, y, Luma([value]));
            }
        }
    }

    #[test]
    fn test_compress_chain_square() {
        let mut points = Vec::new();
        for x in 0..4 {
            points.push([x, 0]);
        }
        for y in 1..4 {
            points.push([3, y]);
        }
        for x in (0..3).rev() {
            points.push([x, 3]);
        }
        for y in (1..3).rev() {
            points.push([0, y]);
        }

        assert_eq!(compress_chain(&points), vec![[0, 0], [3, 0], [3, 3], [0, 3]]);
    }

    #[test]
    fn test_compress_chain_short() {
        assert_eq!(compress_chain(&[[1, 1]]), vec![[1, 1]]);
        assert_eq!(compress_chain(&[[1, 1], [2, 1]]), vec![[1, 1], [2, 1]]);
        assert_eq!(compress_chain(&[[4, 4], [4, 4], [4, 4]]), vec![[4, 4]]);
    }

    #[test]
    fn test_nested_regions_are_dropped() {
        // ring with a blob inside its hole
        let mut img = GrayImage::new(60, 60);
        fill(&mut img, 10..50, 10..50, 255);
        fill(&mut img, 15..45, 15..45, 0);
        fill(&mut img, 25..35, 25..35, 255);

        let contours = ExternalContourExtractor::default()
            .extract_contours(&img)
            .expect("Should extract");

        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].bounding_box(), Some(([10, 10], [49, 49])));
        assert_eq!(contours[0].points.len(), 4);
    }

    #[test]
    fn test_separate_regions_each_yield_a_contour() {
        let mut img = GrayImage::new(60, 30);
        fill(&mut img, 5..15, 5..15, 255);
        fill(&mut img, 30..50, 10..20, 255);

        let contours = ExternalContourExtractor::new(ChainApproximation::Full)
            .extract_contours(&img)
            .expect("Should extract");

        assert_eq!(contours.len(), 2);
        // every boundary pixel of a 10x10 square
        let first = contours
            .iter()
            .find(|c| c.bounding_box() == Some(([5, 5], [14, 14])))
            .expect("Should find first square");
        assert_eq!(first.points.len(), 36);
    }
}
